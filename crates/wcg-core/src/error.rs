//! # Error Types — WebCrypto Failure Taxonomy
//!
//! Every failure raised by the gate is a `WebCryptoError`. The variants map
//! one-to-one onto the WebCrypto exception names callers already know
//! (`OperationError`, `TypeError`, ...), and `kind()` flattens them into an
//! `ErrorKind` for matching.
//!
//! ## Design
//!
//! - Validation failures carry a message naming the offending parameter,
//!   e.g. `"length: Must be 128, 192, or 256"`.
//! - Errors are raised once and propagated verbatim. Nothing in the gate
//!   catches, retries or rewrites them.
//! - `InvalidJson` is a `Type`-kind failure that keeps the parser error as
//!   its `source()`.

use thiserror::Error;

/// Convenience alias used across the workspace.
pub type Result<T, E = WebCryptoError> = std::result::Result<T, E>;

/// Top-level error type for the WebCrypto gate.
#[derive(Error, Debug)]
pub enum WebCryptoError {
    /// The provider or backend does not implement the requested hook.
    #[error("Unsupported operation: {0}")]
    UnsupportedOperation(String),

    /// Algorithm name mismatch between request, key and provider.
    #[error("{0}")]
    Algorithm(String),

    /// A mandatory algorithm parameter is absent.
    #[error("{0}: Missing required property")]
    RequiredProperty(String),

    /// A parameter is present but has an invalid value or range.
    #[error("{0}")]
    Operation(String),

    /// Key and operation do not match (usage, extractability, key type).
    #[error("{0}")]
    Crypto(String),

    /// A parameter has the wrong shape.
    #[error("{0}")]
    Type(String),

    /// A numeric parameter is out of range.
    #[error("{0}")]
    Range(String),

    /// A parameter violates a syntactic rule of the operation.
    #[error("{0}")]
    Syntax(String),

    /// A random-values request larger than one call may fill.
    #[error("{0}")]
    QuotaExceeded(String),

    /// Unwrapped JWK bytes are not valid JSON.
    #[error("wrappedKey: Is not a JSON")]
    InvalidJson(#[source] serde_json::Error),
}

/// Flat discriminant of [`WebCryptoError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    UnsupportedOperation,
    Algorithm,
    RequiredProperty,
    Operation,
    Crypto,
    Type,
    Range,
    Syntax,
    QuotaExceeded,
}

impl WebCryptoError {
    /// The error category, as WebCrypto would name the exception.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::UnsupportedOperation(_) => ErrorKind::UnsupportedOperation,
            Self::Algorithm(_) => ErrorKind::Algorithm,
            Self::RequiredProperty(_) => ErrorKind::RequiredProperty,
            Self::Operation(_) => ErrorKind::Operation,
            Self::Crypto(_) => ErrorKind::Crypto,
            Self::Type(_) | Self::InvalidJson(_) => ErrorKind::Type,
            Self::Range(_) => ErrorKind::Range,
            Self::Syntax(_) => ErrorKind::Syntax,
            Self::QuotaExceeded(_) => ErrorKind::QuotaExceeded,
        }
    }

    /// Shorthand for an unsupported hook.
    pub fn unsupported(operation: impl Into<String>) -> Self {
        Self::UnsupportedOperation(operation.into())
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::UnsupportedOperation => "UnsupportedOperationError",
            Self::Algorithm => "AlgorithmError",
            Self::RequiredProperty => "RequiredPropertyError",
            Self::Operation => "OperationError",
            Self::Crypto => "CryptoError",
            Self::Type => "TypeError",
            Self::Range => "RangeError",
            Self::Syntax => "SyntaxError",
            Self::QuotaExceeded => "QuotaExceededError",
        };
        f.write_str(name)
    }
}
