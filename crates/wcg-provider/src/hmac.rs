//! # HMAC Provider
//!
//! Key generation, import and use as a derived-key type all require a
//! `hash`. An optional `length` must be positive. When `length` is absent
//! the key length follows the hash output size (see [`default_length`]).

use std::sync::Arc;

use wcg_core::{Algorithm, KeyUsage, KeyUsages, Result, WebCryptoError};

use crate::backend::CryptoBackend;
use crate::checks::{check_hash_algorithm, check_required_property, SHA_HASHES};
use crate::provider::Provider;

pub const NAME: &str = "HMAC";

/// Default HMAC key length in bits for a hash: its output size.
pub fn default_length(hash: &Algorithm) -> Result<i64> {
    check_hash_algorithm(hash, SHA_HASHES)?;
    let bits = match hash.name.to_ascii_uppercase().as_str() {
        "SHA-1" => 160,
        "SHA-256" => 256,
        "SHA-384" => 384,
        _ => 512,
    };
    Ok(bits)
}

pub struct HmacProvider {
    backend: Arc<dyn CryptoBackend>,
}

impl HmacProvider {
    pub fn new(backend: Arc<dyn CryptoBackend>) -> Self {
        Self { backend }
    }

    fn check_key_params(algorithm: &Algorithm) -> Result<()> {
        let hash = check_required_property(algorithm.params.hash(), "hash")?;
        check_hash_algorithm(hash, SHA_HASHES)?;
        if let Some(length) = algorithm.params.length() {
            if length < 1 {
                return Err(WebCryptoError::Range("length: Must be more than 0".into()));
            }
        }
        Ok(())
    }
}

impl Provider for HmacProvider {
    fn name(&self) -> &str {
        NAME
    }

    fn usages(&self) -> KeyUsages {
        KeyUsages::Flat(&[KeyUsage::Sign, KeyUsage::Verify])
    }

    fn backend(&self) -> &dyn CryptoBackend {
        self.backend.as_ref()
    }

    fn check_generate_key_params(&self, algorithm: &Algorithm) -> Result<()> {
        Self::check_key_params(algorithm)
    }

    fn check_import_params(&self, algorithm: &Algorithm) -> Result<()> {
        Self::check_key_params(algorithm)
    }

    fn check_derived_key_params(&self, algorithm: &Algorithm) -> Result<()> {
        Self::check_key_params(algorithm)
    }
}
