//! # AES Providers
//!
//! One provider type covers every AES mode. The mode decides the canonical
//! name, the usage set and the per-operation parameter rules. Key
//! generation and derived-key rules are shared: `length` must be 128, 192
//! or 256.

use std::sync::Arc;

use wcg_core::{Algorithm, AlgorithmParams, KeyUsage, KeyUsages, Result, WebCryptoError};

use crate::backend::CryptoBackend;
use crate::checks::check_required_property;
use crate::provider::Provider;

const CIPHER_USAGES: &[KeyUsage] = &[
    KeyUsage::Encrypt,
    KeyUsage::Decrypt,
    KeyUsage::WrapKey,
    KeyUsage::UnwrapKey,
];
const WRAP_USAGES: &[KeyUsage] = &[KeyUsage::WrapKey, KeyUsage::UnwrapKey];
const MAC_USAGES: &[KeyUsage] = &[KeyUsage::Sign, KeyUsage::Verify];

/// GCM authentication tag lengths, in bits.
pub const GCM_TAG_LENGTHS: &[i64] = &[32, 64, 96, 104, 112, 120, 128];
pub const GCM_DEFAULT_TAG_LENGTH: i64 = 128;

const BLOCK_BYTES: usize = 16;

/// AES mode of operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AesMode {
    Ecb,
    Cbc,
    Cfb,
    Ctr,
    Gcm,
    Kw,
    Cmac,
}

impl AesMode {
    pub const ALL: [AesMode; 7] = [
        Self::Ecb,
        Self::Cbc,
        Self::Cfb,
        Self::Ctr,
        Self::Gcm,
        Self::Kw,
        Self::Cmac,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Ecb => "AES-ECB",
            Self::Cbc => "AES-CBC",
            Self::Cfb => "AES-CFB-8",
            Self::Ctr => "AES-CTR",
            Self::Gcm => "AES-GCM",
            Self::Kw => "AES-KW",
            Self::Cmac => "AES-CMAC",
        }
    }
}

/// Provider for one AES mode.
pub struct AesProvider {
    mode: AesMode,
    backend: Arc<dyn CryptoBackend>,
}

impl AesProvider {
    pub fn new(mode: AesMode, backend: Arc<dyn CryptoBackend>) -> Self {
        Self { mode, backend }
    }

    pub fn mode(&self) -> AesMode {
        self.mode
    }

    fn check_key_length(algorithm: &Algorithm) -> Result<()> {
        let length = check_required_property(algorithm.params.length(), "length")?;
        match length {
            128 | 192 | 256 => Ok(()),
            _ => Err(WebCryptoError::Type(
                "length: Must be 128, 192, or 256".into(),
            )),
        }
    }

    fn check_block_iv(iv: Option<&[u8]>, name: &str) -> Result<()> {
        let iv = check_required_property(iv, name)?;
        if iv.len() != BLOCK_BYTES {
            return Err(WebCryptoError::Type(format!(
                "{name}: Must have length {BLOCK_BYTES} bytes"
            )));
        }
        Ok(())
    }
}

impl Provider for AesProvider {
    fn name(&self) -> &str {
        self.mode.name()
    }

    fn usages(&self) -> KeyUsages {
        match self.mode {
            AesMode::Kw => KeyUsages::Flat(WRAP_USAGES),
            AesMode::Cmac => KeyUsages::Flat(MAC_USAGES),
            _ => KeyUsages::Flat(CIPHER_USAGES),
        }
    }

    fn backend(&self) -> &dyn CryptoBackend {
        self.backend.as_ref()
    }

    fn prepare_algorithm(&self, algorithm: &mut Algorithm) {
        if self.mode != AesMode::Gcm {
            return;
        }
        if let AlgorithmParams::AesGcm { tag_length, .. } = &mut algorithm.params {
            tag_length.get_or_insert(GCM_DEFAULT_TAG_LENGTH);
        }
    }

    fn check_generate_key_params(&self, algorithm: &Algorithm) -> Result<()> {
        Self::check_key_length(algorithm)
    }

    fn check_derived_key_params(&self, algorithm: &Algorithm) -> Result<()> {
        Self::check_key_length(algorithm)
    }

    fn check_algorithm_params(&self, algorithm: &Algorithm) -> Result<()> {
        let params = &algorithm.params;
        match self.mode {
            AesMode::Ecb | AesMode::Kw => Ok(()),
            AesMode::Cbc | AesMode::Cfb => Self::check_block_iv(params.iv(), "iv"),
            AesMode::Ctr => {
                Self::check_block_iv(params.counter(), "counter")?;
                let length = check_required_property(params.counter_length(), "length")?;
                if !(1..=128).contains(&length) {
                    return Err(WebCryptoError::Operation(
                        "length: Must be in the range [1, 128]".into(),
                    ));
                }
                Ok(())
            }
            AesMode::Gcm => {
                let iv = check_required_property(params.iv(), "iv")?;
                if iv.is_empty() {
                    return Err(WebCryptoError::Operation(
                        "iv: Must have length more than 0 and less than 2^64 - 1".into(),
                    ));
                }
                let tag_length = params.tag_length().unwrap_or(GCM_DEFAULT_TAG_LENGTH);
                if !GCM_TAG_LENGTHS.contains(&tag_length) {
                    return Err(WebCryptoError::Operation(format!(
                        "tagLength: Must be one of {}",
                        GCM_TAG_LENGTHS
                            .iter()
                            .map(ToString::to_string)
                            .collect::<Vec<_>>()
                            .join(", ")
                    )));
                }
                Ok(())
            }
            AesMode::Cmac => {
                let length = check_required_property(params.length(), "length")?;
                if length < 1 {
                    return Err(WebCryptoError::Operation("length: Must be more than 0".into()));
                }
                Ok(())
            }
        }
    }
}
