//! # JSON Web Key
//!
//! Serde model of RFC 7517/7518 keys plus the RFC 7638 thumbprint input.
//! Binary members stay base64url strings; decoding them is a backend
//! concern.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{Result, WebCryptoError};

/// A JSON Web Key.
///
/// Every member is optional so that an object lacking `kty` can still be
/// parsed and then rejected by key-data validation.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct JsonWebKey {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kty: Option<String>,
    #[serde(rename = "use", skip_serializing_if = "Option::is_none")]
    pub public_key_use: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key_ops: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alg: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ext: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub crv: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub d: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub n: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub e: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub p: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub q: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dp: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dq: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub qi: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub k: Option<String>,
    /// Members not modelled above.
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl JsonWebKey {
    /// An empty key of the given `kty`.
    pub fn new(kty: impl Into<String>) -> Self {
        Self {
            kty: Some(kty.into()),
            ..Self::default()
        }
    }

    /// Canonical thumbprint input: the present required members
    /// (`crv`, `e`, `k`, `kty`, `n`, `x`, `y`) in lexicographic order,
    /// serialized as compact JSON.
    pub fn thumbprint_input(&self) -> Result<Vec<u8>> {
        let kty = self
            .kty
            .as_deref()
            .ok_or_else(|| WebCryptoError::RequiredProperty("kty".into()))?;

        let mut members: BTreeMap<&str, &str> = BTreeMap::new();
        members.insert("kty", kty);
        let optional = [
            ("crv", &self.crv),
            ("e", &self.e),
            ("k", &self.k),
            ("n", &self.n),
            ("x", &self.x),
            ("y", &self.y),
        ];
        for (name, value) in optional {
            if let Some(value) = value.as_deref() {
                members.insert(name, value);
            }
        }
        serde_json::to_vec(&members).map_err(|e| WebCryptoError::Operation(e.to_string()))
    }
}
