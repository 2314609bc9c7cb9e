//! # Mock Backend
//!
//! A deterministic, transparent backend that records every hook it
//! receives. Tests use it to assert that validation failures never reach
//! the backend, and to drive the composed operations (`deriveKey`,
//! `wrapKey`, `unwrapKey`) end to end.
//!
//! ## Security Notice
//!
//! Nothing here is cryptography. "Encryption" XORs with a constant and
//! "signatures" echo the data. Never register it outside tests.

use std::sync::{Arc, Mutex};

use wcg_core::{
    Algorithm, CryptoKey, CryptoKeyPair, ExportedKey, GeneratedKey, JsonWebKey, KeyData,
    KeyFormat, KeyType, KeyUsages, Result, WebCryptoError,
};

use crate::backend::{CryptoBackend, KeyTemplate};

const XOR_MASK: u8 = 0x5A;
const DEFAULT_KEY_BYTES: usize = 32;

/// Recording backend with reversible toy primitives.
#[derive(Debug, Default)]
pub struct MockBackend {
    calls: Mutex<Vec<&'static str>>,
}

impl MockBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Shared handle, the form providers take.
    pub fn shared() -> Arc<Self> {
        Arc::new(Self::new())
    }

    /// Hooks received so far, in order.
    pub fn calls(&self) -> Vec<&'static str> {
        self.calls.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    pub fn call_count(&self, hook: &str) -> usize {
        self.calls().iter().filter(|c| **c == hook).count()
    }

    pub fn reset(&self) {
        self.calls.lock().unwrap_or_else(|e| e.into_inner()).clear();
    }

    fn record(&self, hook: &'static str) {
        self.calls.lock().unwrap_or_else(|e| e.into_inner()).push(hook);
    }

    /// What `encrypt` produces for `data`; also what `decrypt` inverts.
    pub fn seal(data: &[u8]) -> Vec<u8> {
        data.iter().map(|b| b ^ XOR_MASK).collect()
    }
}

fn key_bytes(key: &CryptoKey) -> Vec<u8> {
    key.material::<Vec<u8>>().cloned().unwrap_or_default()
}

fn to_hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

fn from_hex(hex: &str) -> Result<Vec<u8>> {
    if hex.len() % 2 != 0 {
        return Err(WebCryptoError::Operation("mock: odd-length hex".into()));
    }
    hex.as_bytes()
        .chunks(2)
        .map(|pair| {
            std::str::from_utf8(pair)
                .ok()
                .and_then(|digits| u8::from_str_radix(digits, 16).ok())
                .ok_or_else(|| WebCryptoError::Operation("mock: invalid hex digit".into()))
        })
        .collect()
}

impl CryptoBackend for MockBackend {
    fn digest(&self, _algorithm: &Algorithm, data: &[u8]) -> Result<Vec<u8>> {
        self.record("digest");
        let mut out = vec![0u8; DEFAULT_KEY_BYTES];
        for (i, b) in data.iter().enumerate() {
            out[i % DEFAULT_KEY_BYTES] ^= b;
        }
        Ok(out)
    }

    fn generate_key(&self, template: &KeyTemplate<'_>) -> Result<GeneratedKey> {
        self.record("generateKey");
        let length = template
            .algorithm
            .params
            .length()
            .and_then(|bits| usize::try_from(bits / 8).ok())
            .unwrap_or(DEFAULT_KEY_BYTES);
        let material = Arc::new(vec![0x42u8; length]);
        match template.allowed {
            KeyUsages::Flat(_) => Ok(GeneratedKey::Key(CryptoKey::with_material(
                template.algorithm.clone(),
                KeyType::Secret,
                template.extractable,
                template.usages,
                material,
            ))),
            KeyUsages::Split { .. } => {
                let (private, public) = template.allowed.split(template.usages);
                Ok(GeneratedKey::Pair(CryptoKeyPair {
                    private_key: CryptoKey::with_material(
                        template.algorithm.clone(),
                        KeyType::Private,
                        template.extractable,
                        private,
                        material.clone(),
                    ),
                    public_key: CryptoKey::with_material(
                        template.algorithm.clone(),
                        KeyType::Public,
                        true,
                        public,
                        material,
                    ),
                }))
            }
        }
    }

    fn sign(&self, _algorithm: &Algorithm, _key: &CryptoKey, data: &[u8]) -> Result<Vec<u8>> {
        self.record("sign");
        Ok(data.to_vec())
    }

    fn verify(
        &self,
        _algorithm: &Algorithm,
        _key: &CryptoKey,
        signature: &[u8],
        data: &[u8],
    ) -> Result<bool> {
        self.record("verify");
        Ok(signature == data)
    }

    fn encrypt(&self, _algorithm: &Algorithm, _key: &CryptoKey, data: &[u8]) -> Result<Vec<u8>> {
        self.record("encrypt");
        Ok(Self::seal(data))
    }

    fn decrypt(&self, _algorithm: &Algorithm, _key: &CryptoKey, data: &[u8]) -> Result<Vec<u8>> {
        self.record("decrypt");
        Ok(Self::seal(data))
    }

    fn derive_bits(
        &self,
        _algorithm: &Algorithm,
        _base_key: &CryptoKey,
        length: Option<u32>,
    ) -> Result<Vec<u8>> {
        self.record("deriveBits");
        let bytes = length.map_or(DEFAULT_KEY_BYTES, |bits| (bits / 8) as usize);
        Ok(vec![0x11; bytes])
    }

    fn export_key(&self, format: KeyFormat, key: &CryptoKey) -> Result<ExportedKey> {
        self.record("exportKey");
        let bytes = key_bytes(key);
        match format {
            KeyFormat::Jwk => Ok(ExportedKey::Jwk(JsonWebKey {
                k: Some(to_hex(&bytes)),
                ext: Some(key.extractable()),
                key_ops: Some(key.usages().iter().map(ToString::to_string).collect()),
                ..JsonWebKey::new("oct")
            })),
            _ => Ok(ExportedKey::Bytes(bytes)),
        }
    }

    fn import_key(
        &self,
        format: KeyFormat,
        key_data: &KeyData,
        template: &KeyTemplate<'_>,
    ) -> Result<CryptoKey> {
        self.record("importKey");
        let (bytes, has_private) = match key_data {
            KeyData::Bytes(bytes) => (bytes.clone(), format == KeyFormat::Pkcs8),
            KeyData::Jwk(jwk) => (
                from_hex(jwk.k.as_deref().unwrap_or_default())?,
                jwk.d.is_some(),
            ),
        };
        let key_type = match template.allowed {
            KeyUsages::Flat(_) => KeyType::Secret,
            KeyUsages::Split { .. } if has_private => KeyType::Private,
            KeyUsages::Split { .. } => KeyType::Public,
        };
        Ok(CryptoKey::with_material(
            template.algorithm.clone(),
            key_type,
            template.extractable,
            template.usages,
            Arc::new(bytes),
        ))
    }
}
