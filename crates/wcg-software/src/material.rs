//! # Key Material
//!
//! The concrete types this backend stores inside a `CryptoKey`. Secret
//! bytes are zeroized on drop and never printed by `Debug`.

use zeroize::{Zeroize, ZeroizeOnDrop};

/// Raw symmetric key bytes (AES, HMAC, DES, ChaCha20, Poly1305, KDF input).
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct SecretBytes(Vec<u8>);

impl SecretBytes {
    pub fn new(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl std::fmt::Debug for SecretBytes {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SecretBytes([REDACTED; {} bytes])", self.0.len())
    }
}

/// Private half of an Ed25519 pair. `SigningKey` clears its own secret
/// scalar on drop.
pub struct Ed25519Private(pub(crate) ed25519_dalek::SigningKey);

impl std::fmt::Debug for Ed25519Private {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Ed25519Private([REDACTED])")
    }
}

/// Public half of an Ed25519 pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ed25519Public(pub(crate) ed25519_dalek::VerifyingKey);

impl Ed25519Public {
    pub fn to_bytes(&self) -> [u8; 32] {
        self.0.to_bytes()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_never_prints_secret_bytes() {
        let secret = SecretBytes::new(vec![0xAA; 16]);
        let rendered = format!("{secret:?}");
        assert!(!rendered.to_lowercase().contains("aa"));
        assert!(rendered.contains("16 bytes"));
    }

    #[test]
    fn debug_never_prints_signing_key() {
        let key = Ed25519Private(ed25519_dalek::SigningKey::from_bytes(&[7; 32]));
        assert_eq!(format!("{key:?}"), "Ed25519Private([REDACTED])");
    }
}
