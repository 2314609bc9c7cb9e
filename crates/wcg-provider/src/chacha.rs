//! # ChaCha20 and Poly1305 Providers
//!
//! Both use 256-bit secret keys and accept only `raw` and `jwk` key data.

use std::sync::Arc;

use wcg_core::{Algorithm, KeyData, KeyFormat, KeyUsage, KeyUsages, Result, WebCryptoError};

use crate::backend::CryptoBackend;
use crate::checks;
use crate::provider::Provider;

pub const KEY_LENGTH: i64 = 256;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChaChaAlgorithm {
    ChaCha20,
    Poly1305,
}

impl ChaChaAlgorithm {
    pub const ALL: [ChaChaAlgorithm; 2] = [Self::ChaCha20, Self::Poly1305];

    pub fn name(&self) -> &'static str {
        match self {
            Self::ChaCha20 => "ChaCha20",
            Self::Poly1305 => "Poly1305",
        }
    }
}

pub struct ChaChaProvider {
    algorithm: ChaChaAlgorithm,
    backend: Arc<dyn CryptoBackend>,
}

impl ChaChaProvider {
    pub fn new(algorithm: ChaChaAlgorithm, backend: Arc<dyn CryptoBackend>) -> Self {
        Self { algorithm, backend }
    }
}

impl Provider for ChaChaProvider {
    fn name(&self) -> &str {
        self.algorithm.name()
    }

    fn usages(&self) -> KeyUsages {
        match self.algorithm {
            ChaChaAlgorithm::ChaCha20 => KeyUsages::Flat(&[KeyUsage::Encrypt, KeyUsage::Decrypt]),
            ChaChaAlgorithm::Poly1305 => KeyUsages::Flat(&[KeyUsage::Sign, KeyUsage::Verify]),
        }
    }

    fn backend(&self) -> &dyn CryptoBackend {
        self.backend.as_ref()
    }

    fn check_generate_key_params(&self, algorithm: &Algorithm) -> Result<()> {
        match algorithm.params.length() {
            Some(length) if length != KEY_LENGTH => Err(WebCryptoError::Operation(format!(
                "length: Must be {KEY_LENGTH}"
            ))),
            _ => Ok(()),
        }
    }

    fn check_import_key(
        &self,
        format: KeyFormat,
        key_data: &KeyData,
        algorithm: &Algorithm,
        extractable: bool,
        usages: &[KeyUsage],
    ) -> Result<()> {
        let _ = extractable;
        checks::check_allowed_format(format, &[KeyFormat::Raw, KeyFormat::Jwk])?;
        checks::check_import_key(self, format, key_data, algorithm, usages)
    }
}
