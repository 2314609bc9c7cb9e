//! # Software Backend
//!
//! In-process [`CryptoBackend`] over `sha2` and `ed25519-dalek`.
//!
//! | Hook | Supported |
//! |------|-----------|
//! | `digest` | SHA-256, SHA-384, SHA-512 |
//! | `generateKey` | every symmetric family (random bytes), Ed25519 pairs |
//! | `sign` / `verify` | Ed25519 (including EdDSA on `Ed25519`) |
//! | `exportKey` / `importKey` | `raw` secret keys, `raw` Ed25519 public keys |
//!
//! Every other hook keeps the trait default and reports
//! `UnsupportedOperation`. SHA-1 is deliberately absent.
//!
//! ## Security Invariant
//!
//! Secret material lives in [`SecretBytes`] or [`Ed25519Private`], both
//! zeroized on drop. Log lines carry algorithm names and sizes only.

use std::sync::Arc;

use ed25519_dalek::{Signer, Verifier};
use rand::rngs::OsRng;
use rand::RngCore;
use sha2::{Digest, Sha256, Sha384, Sha512};
use wcg_core::{
    Algorithm, CryptoKey, CryptoKeyPair, ExportedKey, GeneratedKey, KeyData, KeyFormat, KeyType,
    KeyUsages, Result, WebCryptoError,
};
use wcg_provider::{hmac, CryptoBackend, KeyTemplate};

use crate::error::SoftwareError;
use crate::material::{Ed25519Private, Ed25519Public, SecretBytes};

const ED25519: &str = "Ed25519";
const ED25519_KEY_BYTES: usize = 32;
/// Largest secret key this backend will generate, in bytes.
pub const MAX_SECRET_BYTES: usize = 1024;

/// Primitive backend running entirely in process memory.
#[derive(Debug, Default, Clone, Copy)]
pub struct SoftwareBackend;

impl SoftwareBackend {
    pub fn new() -> Self {
        Self
    }

    /// Shared handle, the form providers take.
    pub fn shared() -> Arc<dyn CryptoBackend> {
        Arc::new(Self)
    }
}

/// `Ed25519`, or `EdDSA` with `namedCurve: Ed25519`.
fn is_ed25519(algorithm: &Algorithm) -> bool {
    algorithm.is(ED25519)
        || (algorithm.is("EdDSA")
            && algorithm
                .params
                .named_curve()
                .is_some_and(|curve| curve.eq_ignore_ascii_case(ED25519)))
}

/// Key size in bytes for a symmetric key of `algorithm`.
fn secret_length(algorithm: &Algorithm) -> Result<usize> {
    let bits = match algorithm.params.length() {
        Some(bits) => bits,
        None if algorithm.is(hmac::NAME) => match algorithm.params.hash() {
            Some(hash) => hmac::default_length(hash)?,
            None => return Err(SoftwareError::UnknownLength(algorithm.name.clone()).into()),
        },
        None if algorithm.is("DES-CBC") => 64,
        None if algorithm.is("DES-EDE3-CBC") => 192,
        None if algorithm.is("ChaCha20") || algorithm.is("Poly1305") => 256,
        None => return Err(SoftwareError::UnknownLength(algorithm.name.clone()).into()),
    };
    // HMAC lengths need not be whole bytes; round up.
    let bytes = bits
        .checked_add(7)
        .map(|rounded| rounded / 8)
        .and_then(|bytes| usize::try_from(bytes).ok())
        .filter(|bytes| *bytes <= MAX_SECRET_BYTES);
    bytes.ok_or_else(|| {
        SoftwareError::SecretTooLong {
            bits,
            max: MAX_SECRET_BYTES,
        }
        .into()
    })
}

fn random_secret(length: usize) -> SecretBytes {
    let mut bytes = vec![0u8; length];
    OsRng.fill_bytes(&mut bytes);
    SecretBytes::new(bytes)
}

fn ed25519_public_from_raw(bytes: &[u8]) -> Result<Ed25519Public> {
    let raw: [u8; ED25519_KEY_BYTES] = bytes.try_into().map_err(|_| SoftwareError::KeyLength {
        expected: ED25519_KEY_BYTES,
        actual: bytes.len(),
    })?;
    let verifying = ed25519_dalek::VerifyingKey::from_bytes(&raw).map_err(|e| {
        SoftwareError::InvalidPublicKey {
            algorithm: ED25519,
            reason: e.to_string(),
        }
    })?;
    Ok(Ed25519Public(verifying))
}

impl CryptoBackend for SoftwareBackend {
    fn digest(&self, algorithm: &Algorithm, data: &[u8]) -> Result<Vec<u8>> {
        let digest = match algorithm.name.to_ascii_uppercase().as_str() {
            "SHA-256" => Sha256::digest(data).to_vec(),
            "SHA-384" => Sha384::digest(data).to_vec(),
            "SHA-512" => Sha512::digest(data).to_vec(),
            _ => return Err(WebCryptoError::unsupported("digest")),
        };
        Ok(digest)
    }

    fn generate_key(&self, template: &KeyTemplate<'_>) -> Result<GeneratedKey> {
        let algorithm = template.algorithm;
        match template.allowed {
            KeyUsages::Flat(_) => {
                let secret = random_secret(secret_length(algorithm)?);
                tracing::debug!(
                    algorithm = %algorithm.name,
                    bytes = secret.len(),
                    "generated secret key"
                );
                Ok(GeneratedKey::Key(CryptoKey::with_material(
                    algorithm.clone(),
                    KeyType::Secret,
                    template.extractable,
                    template.usages,
                    Arc::new(secret),
                )))
            }
            KeyUsages::Split { .. } if is_ed25519(algorithm) => {
                let signing = ed25519_dalek::SigningKey::generate(&mut OsRng);
                let public = Ed25519Public(signing.verifying_key());
                let (private_usages, public_usages) = template.allowed.split(template.usages);
                tracing::debug!(algorithm = %algorithm.name, "generated Ed25519 key pair");
                Ok(GeneratedKey::Pair(CryptoKeyPair {
                    private_key: CryptoKey::with_material(
                        algorithm.clone(),
                        KeyType::Private,
                        template.extractable,
                        private_usages,
                        Arc::new(Ed25519Private(signing)),
                    ),
                    public_key: CryptoKey::with_material(
                        algorithm.clone(),
                        KeyType::Public,
                        true,
                        public_usages,
                        Arc::new(public),
                    ),
                }))
            }
            KeyUsages::Split { .. } => Err(WebCryptoError::unsupported("generateKey")),
        }
    }

    fn sign(&self, _algorithm: &Algorithm, key: &CryptoKey, data: &[u8]) -> Result<Vec<u8>> {
        if !is_ed25519(key.algorithm()) {
            return Err(WebCryptoError::unsupported("sign"));
        }
        let private = key
            .material::<Ed25519Private>()
            .ok_or(SoftwareError::ForeignMaterial("sign"))?;
        Ok(private.0.sign(data).to_bytes().to_vec())
    }

    fn verify(
        &self,
        _algorithm: &Algorithm,
        key: &CryptoKey,
        signature: &[u8],
        data: &[u8],
    ) -> Result<bool> {
        if !is_ed25519(key.algorithm()) {
            return Err(WebCryptoError::unsupported("verify"));
        }
        let public = key
            .material::<Ed25519Public>()
            .ok_or(SoftwareError::ForeignMaterial("verify"))?;
        // A malformed signature is a failed verification, not an error.
        let Ok(signature) = ed25519_dalek::Signature::from_slice(signature) else {
            return Ok(false);
        };
        Ok(public.0.verify(data, &signature).is_ok())
    }

    fn export_key(&self, format: KeyFormat, key: &CryptoKey) -> Result<ExportedKey> {
        if format != KeyFormat::Raw {
            return Err(WebCryptoError::unsupported("exportKey"));
        }
        if let Some(secret) = key.material::<SecretBytes>() {
            return Ok(ExportedKey::Bytes(secret.as_bytes().to_vec()));
        }
        if let Some(public) = key.material::<Ed25519Public>() {
            return Ok(ExportedKey::Bytes(public.to_bytes().to_vec()));
        }
        Err(WebCryptoError::unsupported("exportKey"))
    }

    fn import_key(
        &self,
        format: KeyFormat,
        key_data: &KeyData,
        template: &KeyTemplate<'_>,
    ) -> Result<CryptoKey> {
        let (KeyFormat::Raw, KeyData::Bytes(bytes)) = (format, key_data) else {
            return Err(WebCryptoError::unsupported("importKey"));
        };
        let algorithm = template.algorithm;
        match template.allowed {
            KeyUsages::Flat(_) => Ok(CryptoKey::with_material(
                algorithm.clone(),
                KeyType::Secret,
                template.extractable,
                template.usages,
                Arc::new(SecretBytes::new(bytes.clone())),
            )),
            KeyUsages::Split { .. } if is_ed25519(algorithm) => {
                let allowed = template.allowed.for_type(KeyType::Public);
                if let Some(usage) = template.usages.iter().find(|u| !allowed.contains(u)) {
                    return Err(WebCryptoError::Syntax(format!(
                        "keyUsages: Public key cannot be used for '{usage}'"
                    )));
                }
                Ok(CryptoKey::with_material(
                    algorithm.clone(),
                    KeyType::Public,
                    template.extractable,
                    template.usages,
                    Arc::new(ed25519_public_from_raw(bytes)?),
                ))
            }
            KeyUsages::Split { .. } => Err(WebCryptoError::unsupported("importKey")),
        }
    }
}
