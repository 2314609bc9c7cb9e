//! # Primitive Backend Boundary
//!
//! `CryptoBackend` is where a real cryptography implementation plugs in.
//! Providers call it only after every validation rule for the operation
//! has passed, so a backend never sees a key with the wrong usage or
//! type, or parameters outside the algorithm's contract.
//!
//! Every hook has a default body returning `UnsupportedOperation`, so a
//! backend implements only the primitives it actually has.
//!
//! ## Design
//!
//! - Object-safe and `Send + Sync` for use as `Arc<dyn CryptoBackend>`
//!   shared by every provider in a registry.
//! - Hooks are synchronous. Callers that need to off-load slow primitives
//!   wrap the call at a higher layer.
//! - Per-call key options travel in one struct, `KeyTemplate`.

use wcg_core::{
    Algorithm, CryptoKey, ExportedKey, GeneratedKey, KeyData, KeyFormat, KeyUsage, KeyUsages,
    Result, WebCryptoError,
};

/// The key being created by `generateKey` or `importKey`.
#[derive(Debug, Clone, Copy)]
pub struct KeyTemplate<'a> {
    /// Prepared algorithm with the provider's canonical name.
    pub algorithm: &'a Algorithm,
    pub extractable: bool,
    /// Usages requested by the caller, already validated.
    pub usages: &'a [KeyUsage],
    /// The provider's usage set, for splitting usages across a key pair.
    pub allowed: KeyUsages,
}

/// Cryptographic primitives behind the providers.
pub trait CryptoBackend: Send + Sync {
    fn digest(&self, algorithm: &Algorithm, data: &[u8]) -> Result<Vec<u8>> {
        let _ = (algorithm, data);
        Err(WebCryptoError::unsupported("digest"))
    }

    fn generate_key(&self, template: &KeyTemplate<'_>) -> Result<GeneratedKey> {
        let _ = template;
        Err(WebCryptoError::unsupported("generateKey"))
    }

    fn sign(&self, algorithm: &Algorithm, key: &CryptoKey, data: &[u8]) -> Result<Vec<u8>> {
        let _ = (algorithm, key, data);
        Err(WebCryptoError::unsupported("sign"))
    }

    fn verify(
        &self,
        algorithm: &Algorithm,
        key: &CryptoKey,
        signature: &[u8],
        data: &[u8],
    ) -> Result<bool> {
        let _ = (algorithm, key, signature, data);
        Err(WebCryptoError::unsupported("verify"))
    }

    fn encrypt(&self, algorithm: &Algorithm, key: &CryptoKey, data: &[u8]) -> Result<Vec<u8>> {
        let _ = (algorithm, key, data);
        Err(WebCryptoError::unsupported("encrypt"))
    }

    fn decrypt(&self, algorithm: &Algorithm, key: &CryptoKey, data: &[u8]) -> Result<Vec<u8>> {
        let _ = (algorithm, key, data);
        Err(WebCryptoError::unsupported("decrypt"))
    }

    /// `length` is in bits and, when present, a multiple of 8.
    fn derive_bits(
        &self,
        algorithm: &Algorithm,
        base_key: &CryptoKey,
        length: Option<u32>,
    ) -> Result<Vec<u8>> {
        let _ = (algorithm, base_key, length);
        Err(WebCryptoError::unsupported("deriveBits"))
    }

    fn export_key(&self, format: KeyFormat, key: &CryptoKey) -> Result<ExportedKey> {
        let _ = (format, key);
        Err(WebCryptoError::unsupported("exportKey"))
    }

    fn import_key(
        &self,
        format: KeyFormat,
        key_data: &KeyData,
        template: &KeyTemplate<'_>,
    ) -> Result<CryptoKey> {
        let _ = (format, key_data, template);
        Err(WebCryptoError::unsupported("importKey"))
    }
}

/// A backend with no primitives. Every hook reports `UnsupportedOperation`.
#[derive(Debug, Default, Clone, Copy)]
pub struct UnsupportedBackend;

impl CryptoBackend for UnsupportedBackend {}

#[cfg(test)]
mod tests {
    use super::*;
    use wcg_core::ErrorKind;

    #[test]
    fn default_hooks_are_unsupported() {
        let backend = UnsupportedBackend;
        let alg = Algorithm::new("SHA-256");
        let err = backend.digest(&alg, b"abc").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnsupportedOperation);
        assert_eq!(err.to_string(), "Unsupported operation: digest");

        let template = KeyTemplate {
            algorithm: &alg,
            extractable: true,
            usages: &[],
            allowed: KeyUsages::Flat(&[]),
        };
        let err = backend.generate_key(&template).unwrap_err();
        assert_eq!(err.to_string(), "Unsupported operation: generateKey");
    }
}
