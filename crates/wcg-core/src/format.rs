//! # Key Formats
//!
//! The four interchange formats accepted by `importKey`/`exportKey` and the
//! key data that travels with them.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::WebCryptoError;
use crate::jwk::JsonWebKey;
use crate::key::KeyType;

/// A key interchange format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KeyFormat {
    Raw,
    Pkcs8,
    Spki,
    Jwk,
}

impl KeyFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Raw => "raw",
            Self::Pkcs8 => "pkcs8",
            Self::Spki => "spki",
            Self::Jwk => "jwk",
        }
    }

    /// Key types that can be carried in this format.
    ///
    /// `jwk` carries every type, `pkcs8` only private keys, `spki` only
    /// public keys, `raw` secret and public keys.
    pub fn allows(&self, key_type: KeyType) -> bool {
        match self {
            Self::Jwk => true,
            Self::Pkcs8 => key_type == KeyType::Private,
            Self::Spki => key_type == KeyType::Public,
            Self::Raw => matches!(key_type, KeyType::Secret | KeyType::Public),
        }
    }
}

impl fmt::Display for KeyFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for KeyFormat {
    type Err = WebCryptoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "raw" => Ok(Self::Raw),
            "pkcs8" => Ok(Self::Pkcs8),
            "spki" => Ok(Self::Spki),
            "jwk" => Ok(Self::Jwk),
            _ => Err(WebCryptoError::Type(
                "format: Is invalid value. Must be 'jwk', 'raw', 'spki', or 'pkcs8'".into(),
            )),
        }
    }
}

/// Key material handed to `importKey`.
#[derive(Debug, Clone, PartialEq)]
pub enum KeyData {
    Jwk(JsonWebKey),
    Bytes(Vec<u8>),
}

impl From<JsonWebKey> for KeyData {
    fn from(jwk: JsonWebKey) -> Self {
        Self::Jwk(jwk)
    }
}

impl From<Vec<u8>> for KeyData {
    fn from(bytes: Vec<u8>) -> Self {
        Self::Bytes(bytes)
    }
}

impl From<&[u8]> for KeyData {
    fn from(bytes: &[u8]) -> Self {
        Self::Bytes(bytes.to_vec())
    }
}

/// Key material returned by `exportKey`.
#[derive(Debug, Clone, PartialEq)]
pub enum ExportedKey {
    Jwk(JsonWebKey),
    Bytes(Vec<u8>),
}

impl ExportedKey {
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Self::Bytes(bytes) => Some(bytes),
            Self::Jwk(_) => None,
        }
    }

    pub fn as_jwk(&self) -> Option<&JsonWebKey> {
        match self {
            Self::Jwk(jwk) => Some(jwk),
            Self::Bytes(_) => None,
        }
    }
}

impl From<ExportedKey> for KeyData {
    fn from(exported: ExportedKey) -> Self {
        match exported {
            ExportedKey::Jwk(jwk) => Self::Jwk(jwk),
            ExportedKey::Bytes(bytes) => Self::Bytes(bytes),
        }
    }
}
