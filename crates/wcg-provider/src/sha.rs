//! # Digest Providers
//!
//! Fixed-length SHA digests and the variable-length SHAKE functions.
//! Digest providers create no keys, so their usage sets are empty.

use std::sync::Arc;

use wcg_core::{Algorithm, AlgorithmParams, KeyUsages, Result, WebCryptoError};

use crate::backend::CryptoBackend;
use crate::checks;
use crate::provider::Provider;

/// SHA-1 and SHA-2 digests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShaAlgorithm {
    Sha1,
    Sha256,
    Sha384,
    Sha512,
}

impl ShaAlgorithm {
    pub const ALL: [ShaAlgorithm; 4] = [Self::Sha1, Self::Sha256, Self::Sha384, Self::Sha512];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Sha1 => "SHA-1",
            Self::Sha256 => "SHA-256",
            Self::Sha384 => "SHA-384",
            Self::Sha512 => "SHA-512",
        }
    }
}

pub struct ShaProvider {
    algorithm: ShaAlgorithm,
    backend: Arc<dyn CryptoBackend>,
}

impl ShaProvider {
    pub fn new(algorithm: ShaAlgorithm, backend: Arc<dyn CryptoBackend>) -> Self {
        Self { algorithm, backend }
    }
}

impl Provider for ShaProvider {
    fn name(&self) -> &str {
        self.algorithm.name()
    }

    fn usages(&self) -> KeyUsages {
        KeyUsages::Flat(&[])
    }

    fn backend(&self) -> &dyn CryptoBackend {
        self.backend.as_ref()
    }
}

// ---------------------------------------------------------------------------
// SHAKE
// ---------------------------------------------------------------------------

/// SHAKE extendable-output functions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShakeAlgorithm {
    Shake128,
    Shake256,
}

impl ShakeAlgorithm {
    pub const ALL: [ShakeAlgorithm; 2] = [Self::Shake128, Self::Shake256];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Shake128 => "shake128",
            Self::Shake256 => "shake256",
        }
    }

    /// Output length in bytes when the request names none.
    pub fn default_length(&self) -> i64 {
        match self {
            Self::Shake128 => 16,
            Self::Shake256 => 32,
        }
    }
}

pub struct ShakeProvider {
    algorithm: ShakeAlgorithm,
    backend: Arc<dyn CryptoBackend>,
}

impl ShakeProvider {
    pub fn new(algorithm: ShakeAlgorithm, backend: Arc<dyn CryptoBackend>) -> Self {
        Self { algorithm, backend }
    }
}

impl Provider for ShakeProvider {
    fn name(&self) -> &str {
        self.algorithm.name()
    }

    fn usages(&self) -> KeyUsages {
        KeyUsages::Flat(&[])
    }

    fn backend(&self) -> &dyn CryptoBackend {
        self.backend.as_ref()
    }

    fn prepare_algorithm(&self, algorithm: &mut Algorithm) {
        let default = self.algorithm.default_length();
        if matches!(algorithm.params, AlgorithmParams::None) {
            algorithm.params = AlgorithmParams::Length { length: None };
        }
        if let AlgorithmParams::Length { length } = &mut algorithm.params {
            length.get_or_insert(default);
        }
    }

    fn check_digest(&self, algorithm: &Algorithm) -> Result<()> {
        checks::check_algorithm_name(self.name(), algorithm)?;
        if let Some(length) = algorithm.params.length() {
            if length < 0 {
                return Err(WebCryptoError::Type("length: Is negative".into()));
            }
        }
        Ok(())
    }
}
