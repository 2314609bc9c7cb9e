//! # RSA Providers
//!
//! RSASSA-PKCS1-v1_5, RSA-PSS and RSA-OAEP share key generation and import
//! rules and differ in their usage split and per-operation parameters.
//!
//! Key generation requires:
//! - `hash` in SHA-1, SHA-256, SHA-384, SHA-512;
//! - `publicExponent` equal to `[3]` or `[1, 0, 1]`;
//! - `modulusLength` a multiple of 8 in `[256, 16384]`.

use std::sync::Arc;

use wcg_core::{Algorithm, KeyUsage, KeyUsages, Result, WebCryptoError};

use crate::backend::CryptoBackend;
use crate::checks::{check_hash_algorithm, check_required_property, SHA_HASHES};
use crate::provider::Provider;

pub const MIN_MODULUS_LENGTH: i64 = 256;
pub const MAX_MODULUS_LENGTH: i64 = 16384;

const EXPONENT_3: &[u8] = &[3];
const EXPONENT_65537: &[u8] = &[1, 0, 1];

/// RSA signature or encryption scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RsaScheme {
    Pkcs1V15,
    Pss,
    Oaep,
}

impl RsaScheme {
    pub const ALL: [RsaScheme; 3] = [Self::Pkcs1V15, Self::Pss, Self::Oaep];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Pkcs1V15 => "RSASSA-PKCS1-v1_5",
            Self::Pss => "RSA-PSS",
            Self::Oaep => "RSA-OAEP",
        }
    }
}

/// Provider for one RSA scheme.
pub struct RsaProvider {
    scheme: RsaScheme,
    backend: Arc<dyn CryptoBackend>,
}

impl RsaProvider {
    pub fn new(scheme: RsaScheme, backend: Arc<dyn CryptoBackend>) -> Self {
        Self { scheme, backend }
    }

    pub fn scheme(&self) -> RsaScheme {
        self.scheme
    }

    fn check_hash(algorithm: &Algorithm) -> Result<()> {
        let hash = check_required_property(algorithm.params.hash(), "hash")?;
        check_hash_algorithm(hash, SHA_HASHES)
    }
}

impl Provider for RsaProvider {
    fn name(&self) -> &str {
        self.scheme.name()
    }

    fn usages(&self) -> KeyUsages {
        match self.scheme {
            RsaScheme::Pkcs1V15 | RsaScheme::Pss => KeyUsages::Split {
                private_key: &[KeyUsage::Sign],
                public_key: &[KeyUsage::Verify],
            },
            RsaScheme::Oaep => KeyUsages::Split {
                private_key: &[KeyUsage::Decrypt, KeyUsage::UnwrapKey],
                public_key: &[KeyUsage::Encrypt, KeyUsage::WrapKey],
            },
        }
    }

    fn backend(&self) -> &dyn CryptoBackend {
        self.backend.as_ref()
    }

    fn check_generate_key_params(&self, algorithm: &Algorithm) -> Result<()> {
        Self::check_hash(algorithm)?;

        let exponent =
            check_required_property(algorithm.params.public_exponent(), "publicExponent")?;
        if exponent != EXPONENT_3 && exponent != EXPONENT_65537 {
            return Err(WebCryptoError::Type(
                "publicExponent: Must be [3] or [1,0,1]".into(),
            ));
        }

        let modulus_length =
            check_required_property(algorithm.params.modulus_length(), "modulusLength")?;
        if !(MIN_MODULUS_LENGTH..=MAX_MODULUS_LENGTH).contains(&modulus_length)
            || modulus_length % 8 != 0
        {
            return Err(WebCryptoError::Type(format!(
                "modulusLength: Must be a multiple of 8 in the range [{MIN_MODULUS_LENGTH}, {MAX_MODULUS_LENGTH}]"
            )));
        }
        Ok(())
    }

    fn check_import_params(&self, algorithm: &Algorithm) -> Result<()> {
        Self::check_hash(algorithm)
    }

    fn check_algorithm_params(&self, algorithm: &Algorithm) -> Result<()> {
        match self.scheme {
            RsaScheme::Pkcs1V15 => Ok(()),
            RsaScheme::Pss => {
                let salt_length =
                    check_required_property(algorithm.params.salt_length(), "saltLength")?;
                if salt_length < 0 {
                    return Err(WebCryptoError::Range(
                        "saltLength: Must be non-negative".into(),
                    ));
                }
                Ok(())
            }
            // `label` is optional and byte-typed by construction.
            RsaScheme::Oaep => Ok(()),
        }
    }
}
