//! # Software Backend Errors
//!
//! Failures local to the in-process primitives. Each maps onto a
//! [`WebCryptoError`] before it leaves the backend, so the dispatcher sees
//! one error type.

use thiserror::Error;
use wcg_core::WebCryptoError;

#[derive(Error, Debug)]
pub enum SoftwareError {
    /// Key bytes have the wrong size for the algorithm.
    #[error("keyData: Must be {expected} bytes, got {actual}")]
    KeyLength { expected: usize, actual: usize },

    /// Bytes that do not decode to a valid public key.
    #[error("keyData: Is not a valid {algorithm} public key: {reason}")]
    InvalidPublicKey {
        algorithm: &'static str,
        reason: String,
    },

    /// The key carries material this backend did not produce.
    #[error("key: Material is not usable for {0}")]
    ForeignMaterial(&'static str),

    /// A secret-key generation request with no derivable length.
    #[error("length: Cannot determine key length for {0}")]
    UnknownLength(String),

    /// A requested secret-key length outside what this backend generates.
    #[error("length: {bits} bits exceeds the {max}-byte secret key limit")]
    SecretTooLong { bits: i64, max: usize },
}

impl From<SoftwareError> for WebCryptoError {
    fn from(err: SoftwareError) -> Self {
        match err {
            SoftwareError::ForeignMaterial(_) => WebCryptoError::Crypto(err.to_string()),
            _ => WebCryptoError::Operation(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wcg_core::ErrorKind;

    #[test]
    fn key_length_maps_to_operation_error() {
        let err: WebCryptoError = SoftwareError::KeyLength {
            expected: 32,
            actual: 31,
        }
        .into();
        assert_eq!(err.kind(), ErrorKind::Operation);
        assert_eq!(err.to_string(), "keyData: Must be 32 bytes, got 31");
    }

    #[test]
    fn oversized_secret_maps_to_operation_error() {
        let err: WebCryptoError = SoftwareError::SecretTooLong {
            bits: i64::MAX,
            max: 1024,
        }
        .into();
        assert_eq!(err.kind(), ErrorKind::Operation);
        assert!(err.to_string().starts_with("length: "));
    }

    #[test]
    fn foreign_material_maps_to_crypto_error() {
        let err: WebCryptoError = SoftwareError::ForeignMaterial("sign").into();
        assert_eq!(err.kind(), ErrorKind::Crypto);
    }
}
