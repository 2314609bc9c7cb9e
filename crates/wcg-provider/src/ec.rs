//! # Elliptic-Curve Providers
//!
//! Covers the curve-parameterised families (ECDSA, ECDH, EdDSA, ECDH-ES)
//! and the fixed-curve algorithms (Ed25519, X25519).
//!
//! ## Design
//!
//! - Curve-parameterised families require `namedCurve` on key generation
//!   and import, matched case-insensitively against the family's list.
//! - Key-agreement families require a `public` key on derivation. It must
//!   be of type `public` and belong to the same algorithm.

use std::sync::Arc;

use wcg_core::{Algorithm, KeyType, KeyUsage, KeyUsages, Result, WebCryptoError};

use crate::backend::CryptoBackend;
use crate::checks::{check_hash_algorithm, check_required_property, SHA_HASHES};
use crate::provider::Provider;

const NIST_CURVES: &[&str] = &["P-256", "P-384", "P-521", "K-256"];
const EDWARDS_CURVES: &[&str] = &["Ed25519", "Ed448"];
const MONTGOMERY_CURVES: &[&str] = &["X25519", "X448"];

const SIGNING: KeyUsages = KeyUsages::Split {
    private_key: &[KeyUsage::Sign],
    public_key: &[KeyUsage::Verify],
};
const AGREEMENT: KeyUsages = KeyUsages::Split {
    private_key: &[KeyUsage::DeriveBits, KeyUsage::DeriveKey],
    public_key: &[],
};

/// Elliptic-curve algorithm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EcAlgorithm {
    Ecdsa,
    Ecdh,
    EdDsa,
    EcdhEs,
    Ed25519,
    X25519,
}

impl EcAlgorithm {
    pub const ALL: [EcAlgorithm; 6] = [
        Self::Ecdsa,
        Self::Ecdh,
        Self::EdDsa,
        Self::EcdhEs,
        Self::Ed25519,
        Self::X25519,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Ecdsa => "ECDSA",
            Self::Ecdh => "ECDH",
            Self::EdDsa => "EdDSA",
            Self::EcdhEs => "ECDH-ES",
            Self::Ed25519 => "Ed25519",
            Self::X25519 => "X25519",
        }
    }

    /// Accepted `namedCurve` values. Empty for fixed-curve algorithms.
    pub fn curves(&self) -> &'static [&'static str] {
        match self {
            Self::Ecdsa | Self::Ecdh => NIST_CURVES,
            Self::EdDsa => EDWARDS_CURVES,
            Self::EcdhEs => MONTGOMERY_CURVES,
            Self::Ed25519 | Self::X25519 => &[],
        }
    }

    fn is_agreement(&self) -> bool {
        matches!(self, Self::Ecdh | Self::EcdhEs | Self::X25519)
    }
}

/// Provider for one elliptic-curve algorithm.
pub struct EcProvider {
    algorithm: EcAlgorithm,
    backend: Arc<dyn CryptoBackend>,
}

impl EcProvider {
    pub fn new(algorithm: EcAlgorithm, backend: Arc<dyn CryptoBackend>) -> Self {
        Self { algorithm, backend }
    }

    pub fn algorithm(&self) -> EcAlgorithm {
        self.algorithm
    }

    fn check_named_curve(&self, algorithm: &Algorithm) -> Result<()> {
        let curves = self.algorithm.curves();
        if curves.is_empty() {
            return Ok(());
        }
        let named_curve = check_required_property(algorithm.params.named_curve(), "namedCurve")?;
        if curves.iter().any(|c| c.eq_ignore_ascii_case(named_curve)) {
            Ok(())
        } else {
            Err(WebCryptoError::Operation(format!(
                "namedCurve: Must be one of {}",
                curves.join(", ")
            )))
        }
    }

    fn check_public_key(&self, algorithm: &Algorithm) -> Result<()> {
        let public = check_required_property(algorithm.params.public_key(), "public")?;
        if public.key_type() != KeyType::Public {
            return Err(WebCryptoError::Operation(
                "public: Is not a public key".into(),
            ));
        }
        if !public.algorithm().is(self.name()) {
            return Err(WebCryptoError::Operation(format!(
                "public: Is not {} key",
                self.name()
            )));
        }
        Ok(())
    }
}

impl Provider for EcProvider {
    fn name(&self) -> &str {
        self.algorithm.name()
    }

    fn usages(&self) -> KeyUsages {
        if self.algorithm.is_agreement() {
            AGREEMENT
        } else {
            SIGNING
        }
    }

    fn backend(&self) -> &dyn CryptoBackend {
        self.backend.as_ref()
    }

    fn check_generate_key_params(&self, algorithm: &Algorithm) -> Result<()> {
        self.check_named_curve(algorithm)
    }

    fn check_import_params(&self, algorithm: &Algorithm) -> Result<()> {
        self.check_named_curve(algorithm)
    }

    fn check_algorithm_params(&self, algorithm: &Algorithm) -> Result<()> {
        match self.algorithm {
            EcAlgorithm::Ecdsa => {
                let hash = check_required_property(algorithm.params.hash(), "hash")?;
                check_hash_algorithm(hash, SHA_HASHES)
            }
            EcAlgorithm::Ecdh | EcAlgorithm::EcdhEs | EcAlgorithm::X25519 => {
                self.check_public_key(algorithm)
            }
            EcAlgorithm::EdDsa | EcAlgorithm::Ed25519 => Ok(()),
        }
    }
}
