//! # Key-Derivation Providers (HKDF, PBKDF2)
//!
//! Both derive bits from a secret base key and never let that key be
//! exported: import requires `extractable` to be `false`.

use std::sync::Arc;

use wcg_core::{Algorithm, KeyData, KeyFormat, KeyUsage, KeyUsages, Result, WebCryptoError};

use crate::backend::CryptoBackend;
use crate::checks::{self, check_hash_algorithm, check_required_property, SHA_HASHES};
use crate::provider::Provider;

const DERIVE_USAGES: &[KeyUsage] = &[KeyUsage::DeriveBits, KeyUsage::DeriveKey];

fn check_not_extractable(extractable: bool) -> Result<()> {
    if extractable {
        Err(WebCryptoError::Syntax("extractable: Must be 'false'".into()))
    } else {
        Ok(())
    }
}

fn check_hash(algorithm: &Algorithm) -> Result<()> {
    let hash = check_required_property(algorithm.params.hash(), "hash")?;
    check_hash_algorithm(hash, SHA_HASHES)
}

// ---------------------------------------------------------------------------
// HKDF
// ---------------------------------------------------------------------------

pub struct HkdfProvider {
    backend: Arc<dyn CryptoBackend>,
}

impl HkdfProvider {
    pub const NAME: &'static str = "HKDF";

    pub fn new(backend: Arc<dyn CryptoBackend>) -> Self {
        Self { backend }
    }
}

impl Provider for HkdfProvider {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn usages(&self) -> KeyUsages {
        KeyUsages::Flat(DERIVE_USAGES)
    }

    fn backend(&self) -> &dyn CryptoBackend {
        self.backend.as_ref()
    }

    fn check_algorithm_params(&self, algorithm: &Algorithm) -> Result<()> {
        check_hash(algorithm)?;
        check_required_property(algorithm.params.salt(), "salt")?;
        check_required_property(algorithm.params.info(), "info")?;
        Ok(())
    }

    fn check_import_key(
        &self,
        format: KeyFormat,
        key_data: &KeyData,
        algorithm: &Algorithm,
        extractable: bool,
        usages: &[KeyUsage],
    ) -> Result<()> {
        checks::check_import_key(self, format, key_data, algorithm, usages)?;
        check_not_extractable(extractable)
    }
}

// ---------------------------------------------------------------------------
// PBKDF2
// ---------------------------------------------------------------------------

pub struct Pbkdf2Provider {
    backend: Arc<dyn CryptoBackend>,
}

impl Pbkdf2Provider {
    pub const NAME: &'static str = "PBKDF2";

    pub fn new(backend: Arc<dyn CryptoBackend>) -> Self {
        Self { backend }
    }
}

impl Provider for Pbkdf2Provider {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn usages(&self) -> KeyUsages {
        KeyUsages::Flat(DERIVE_USAGES)
    }

    fn backend(&self) -> &dyn CryptoBackend {
        self.backend.as_ref()
    }

    fn check_algorithm_params(&self, algorithm: &Algorithm) -> Result<()> {
        check_hash(algorithm)?;
        check_required_property(algorithm.params.salt(), "salt")?;
        let iterations = check_required_property(algorithm.params.iterations(), "iterations")?;
        if iterations < 1 {
            return Err(WebCryptoError::Type("iterations: Is less than 1".into()));
        }
        Ok(())
    }

    fn check_import_key(
        &self,
        format: KeyFormat,
        key_data: &KeyData,
        algorithm: &Algorithm,
        extractable: bool,
        usages: &[KeyUsage],
    ) -> Result<()> {
        checks::check_import_key(self, format, key_data, algorithm, usages)?;
        check_not_extractable(extractable)
    }
}
