//! # Algorithm Descriptors
//!
//! An `Algorithm` is a canonical name plus a parameter shape. Callers may
//! name an algorithm with a bare string or a full descriptor; both are
//! accepted through `AlgorithmIdentifier` and normalized to `Algorithm`.
//!
//! ## Design
//!
//! - `AlgorithmParams` is a tagged union with one variant per parameter
//!   shape. The provider that owns an algorithm decides which variant it
//!   expects. A different variant reads as "every property absent".
//! - Fields are `Option` so validation can distinguish a missing property
//!   (`RequiredProperty`) from a present but invalid one.
//! - Integer parameters are `i64` so out-of-range inputs (negative lengths,
//!   zero iterations) reach the validator instead of being unrepresentable.
//! - Nested `hash` descriptors are themselves `Algorithm`s.

use crate::key::CryptoKey;

/// A nested descriptor such as `hash`.
pub type NestedAlgorithm = Box<Algorithm>;

/// Normalize an identifier into a nested descriptor slot.
pub fn nested(identifier: impl Into<AlgorithmIdentifier>) -> Option<NestedAlgorithm> {
    Some(Box::new(identifier.into().normalize()))
}

/// Parameter shapes, one per algorithm family.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum AlgorithmParams {
    /// No parameters beyond the name.
    #[default]
    None,
    /// A single `length`: AES/DES/ChaCha20 key length, AES-CMAC tag length,
    /// SHAKE output length in bytes.
    Length { length: Option<i64> },
    /// AES-CBC, AES-CFB and DES-CBC.
    Cbc { iv: Option<Vec<u8>> },
    AesCtr {
        counter: Option<Vec<u8>>,
        length: Option<i64>,
    },
    AesGcm {
        iv: Option<Vec<u8>>,
        additional_data: Option<Vec<u8>>,
        tag_length: Option<i64>,
    },
    RsaHashedKeyGen {
        hash: Option<NestedAlgorithm>,
        modulus_length: Option<i64>,
        public_exponent: Option<Vec<u8>>,
    },
    RsaHashedImport { hash: Option<NestedAlgorithm> },
    RsaPss { salt_length: Option<i64> },
    RsaOaep { label: Option<Vec<u8>> },
    /// EC key generation and import.
    EcKey { named_curve: Option<String> },
    Ecdsa { hash: Option<NestedAlgorithm> },
    /// ECDH, ECDH-ES and X25519 derivation.
    EcdhKeyDerive { public: Option<CryptoKey> },
    /// HMAC key generation, import and derived-key type.
    Hmac {
        hash: Option<NestedAlgorithm>,
        length: Option<i64>,
    },
    Hkdf {
        hash: Option<NestedAlgorithm>,
        salt: Option<Vec<u8>>,
        info: Option<Vec<u8>>,
    },
    Pbkdf2 {
        hash: Option<NestedAlgorithm>,
        salt: Option<Vec<u8>>,
        iterations: Option<i64>,
    },
}

impl AlgorithmParams {
    /// Key or output length. The AES-CTR counter width is not a key length
    /// and is read through [`counter_length`](Self::counter_length).
    pub fn length(&self) -> Option<i64> {
        match self {
            Self::Length { length } | Self::Hmac { length, .. } => *length,
            _ => None,
        }
    }

    /// Bits of the AES-CTR counter block that form the counter.
    pub fn counter_length(&self) -> Option<i64> {
        match self {
            Self::AesCtr { length, .. } => *length,
            _ => None,
        }
    }

    pub fn iv(&self) -> Option<&[u8]> {
        match self {
            Self::Cbc { iv } | Self::AesGcm { iv, .. } => iv.as_deref(),
            _ => None,
        }
    }

    pub fn counter(&self) -> Option<&[u8]> {
        match self {
            Self::AesCtr { counter, .. } => counter.as_deref(),
            _ => None,
        }
    }

    pub fn additional_data(&self) -> Option<&[u8]> {
        match self {
            Self::AesGcm {
                additional_data, ..
            } => additional_data.as_deref(),
            _ => None,
        }
    }

    pub fn tag_length(&self) -> Option<i64> {
        match self {
            Self::AesGcm { tag_length, .. } => *tag_length,
            _ => None,
        }
    }

    pub fn hash(&self) -> Option<&Algorithm> {
        match self {
            Self::RsaHashedKeyGen { hash, .. }
            | Self::RsaHashedImport { hash }
            | Self::Ecdsa { hash }
            | Self::Hmac { hash, .. }
            | Self::Hkdf { hash, .. }
            | Self::Pbkdf2 { hash, .. } => hash.as_deref(),
            _ => None,
        }
    }

    pub fn modulus_length(&self) -> Option<i64> {
        match self {
            Self::RsaHashedKeyGen { modulus_length, .. } => *modulus_length,
            _ => None,
        }
    }

    pub fn public_exponent(&self) -> Option<&[u8]> {
        match self {
            Self::RsaHashedKeyGen {
                public_exponent, ..
            } => public_exponent.as_deref(),
            _ => None,
        }
    }

    pub fn salt_length(&self) -> Option<i64> {
        match self {
            Self::RsaPss { salt_length } => *salt_length,
            _ => None,
        }
    }

    pub fn label(&self) -> Option<&[u8]> {
        match self {
            Self::RsaOaep { label } => label.as_deref(),
            _ => None,
        }
    }

    pub fn named_curve(&self) -> Option<&str> {
        match self {
            Self::EcKey { named_curve } => named_curve.as_deref(),
            _ => None,
        }
    }

    pub fn public_key(&self) -> Option<&CryptoKey> {
        match self {
            Self::EcdhKeyDerive { public } => public.as_ref(),
            _ => None,
        }
    }

    pub fn salt(&self) -> Option<&[u8]> {
        match self {
            Self::Hkdf { salt, .. } | Self::Pbkdf2 { salt, .. } => salt.as_deref(),
            _ => None,
        }
    }

    pub fn info(&self) -> Option<&[u8]> {
        match self {
            Self::Hkdf { info, .. } => info.as_deref(),
            _ => None,
        }
    }

    pub fn iterations(&self) -> Option<i64> {
        match self {
            Self::Pbkdf2 { iterations, .. } => *iterations,
            _ => None,
        }
    }
}

/// A normalized algorithm descriptor.
#[derive(Debug, Clone, PartialEq)]
pub struct Algorithm {
    pub name: String,
    pub params: AlgorithmParams,
}

impl Algorithm {
    /// A descriptor with no parameters.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            params: AlgorithmParams::None,
        }
    }

    pub fn with_params(name: impl Into<String>, params: AlgorithmParams) -> Self {
        Self {
            name: name.into(),
            params,
        }
    }

    /// Case-insensitive name comparison.
    pub fn is(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name)
    }
}

/// How callers name an algorithm: a bare string or a full descriptor.
#[derive(Debug, Clone, PartialEq)]
pub enum AlgorithmIdentifier {
    Name(String),
    Algorithm(Algorithm),
}

impl AlgorithmIdentifier {
    /// Wrap bare names as `{ name }`; descriptors pass through.
    pub fn normalize(self) -> Algorithm {
        match self {
            Self::Name(name) => Algorithm::new(name),
            Self::Algorithm(algorithm) => algorithm,
        }
    }
}

impl From<&str> for AlgorithmIdentifier {
    fn from(name: &str) -> Self {
        Self::Name(name.to_string())
    }
}

impl From<String> for AlgorithmIdentifier {
    fn from(name: String) -> Self {
        Self::Name(name)
    }
}

impl From<Algorithm> for AlgorithmIdentifier {
    fn from(algorithm: Algorithm) -> Self {
        Self::Algorithm(algorithm)
    }
}

impl From<&Algorithm> for AlgorithmIdentifier {
    fn from(algorithm: &Algorithm) -> Self {
        Self::Algorithm(algorithm.clone())
    }
}
