//! # DES Providers
//!
//! DES-CBC and DES-EDE3-CBC. Each variant fixes its key size and IV size;
//! key generation must request exactly the variant's key size.

use std::sync::Arc;

use wcg_core::{Algorithm, KeyUsage, KeyUsages, Result, WebCryptoError};

use crate::backend::CryptoBackend;
use crate::checks::check_required_property;
use crate::provider::Provider;

/// DES variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DesVariant {
    DesCbc,
    DesEde3Cbc,
}

impl DesVariant {
    pub const ALL: [DesVariant; 2] = [Self::DesCbc, Self::DesEde3Cbc];

    pub fn name(&self) -> &'static str {
        match self {
            Self::DesCbc => "DES-CBC",
            Self::DesEde3Cbc => "DES-EDE3-CBC",
        }
    }

    pub fn key_size_bits(&self) -> i64 {
        match self {
            Self::DesCbc => 64,
            Self::DesEde3Cbc => 192,
        }
    }

    pub fn iv_size(&self) -> usize {
        8
    }
}

pub struct DesProvider {
    variant: DesVariant,
    backend: Arc<dyn CryptoBackend>,
}

impl DesProvider {
    pub fn new(variant: DesVariant, backend: Arc<dyn CryptoBackend>) -> Self {
        Self { variant, backend }
    }

    fn check_key_length(&self, algorithm: &Algorithm) -> Result<()> {
        let length = check_required_property(algorithm.params.length(), "length")?;
        let expected = self.variant.key_size_bits();
        if length != expected {
            return Err(WebCryptoError::Operation(format!(
                "length: Must be {expected}"
            )));
        }
        Ok(())
    }
}

impl Provider for DesProvider {
    fn name(&self) -> &str {
        self.variant.name()
    }

    fn usages(&self) -> KeyUsages {
        KeyUsages::Flat(&[
            KeyUsage::Encrypt,
            KeyUsage::Decrypt,
            KeyUsage::WrapKey,
            KeyUsage::UnwrapKey,
        ])
    }

    fn backend(&self) -> &dyn CryptoBackend {
        self.backend.as_ref()
    }

    fn check_generate_key_params(&self, algorithm: &Algorithm) -> Result<()> {
        self.check_key_length(algorithm)
    }

    fn check_derived_key_params(&self, algorithm: &Algorithm) -> Result<()> {
        self.check_key_length(algorithm)
    }

    fn check_algorithm_params(&self, algorithm: &Algorithm) -> Result<()> {
        let iv = check_required_property(algorithm.params.iv(), "iv")?;
        let expected = self.variant.iv_size();
        if iv.len() != expected {
            return Err(WebCryptoError::Type(format!(
                "iv: Must have length {expected} bytes"
            )));
        }
        Ok(())
    }
}
