//! # Keys and Key Usages
//!
//! `CryptoKey` is the opaque handle every operation consumes. It records the
//! algorithm the key belongs to, its type, whether it may be exported, and
//! the usage tags it was created with. None of these change after creation.
//!
//! ## Security Invariant
//!
//! - Backend key material lives behind `KeyMaterial`, a type-erased shared
//!   slot. The `Debug` output of a key never includes it.
//! - A key is cheap to clone; clones share the same immutable state.

use std::any::Any;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::algorithm::Algorithm;
use crate::error::WebCryptoError;

/// Type-erased key material owned by a backend.
pub type KeyMaterial = Arc<dyn Any + Send + Sync>;

// ---------------------------------------------------------------------------
// KeyUsage
// ---------------------------------------------------------------------------

/// An operation tag a key may be used for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum KeyUsage {
    Encrypt,
    Decrypt,
    Sign,
    Verify,
    DeriveKey,
    DeriveBits,
    WrapKey,
    UnwrapKey,
}

impl KeyUsage {
    /// Every usage tag, in WebCrypto declaration order.
    pub const ALL: [KeyUsage; 8] = [
        Self::Encrypt,
        Self::Decrypt,
        Self::Sign,
        Self::Verify,
        Self::DeriveKey,
        Self::DeriveBits,
        Self::WrapKey,
        Self::UnwrapKey,
    ];

    /// The wire name of this usage (`"deriveKey"`, `"wrapKey"`, ...).
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Encrypt => "encrypt",
            Self::Decrypt => "decrypt",
            Self::Sign => "sign",
            Self::Verify => "verify",
            Self::DeriveKey => "deriveKey",
            Self::DeriveBits => "deriveBits",
            Self::WrapKey => "wrapKey",
            Self::UnwrapKey => "unwrapKey",
        }
    }
}

impl fmt::Display for KeyUsage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for KeyUsage {
    type Err = WebCryptoError;

    /// Usage names are case-sensitive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|usage| usage.as_str() == s)
            .ok_or_else(|| WebCryptoError::Type(format!("keyUsages: '{s}' is not a valid key usage")))
    }
}

// ---------------------------------------------------------------------------
// KeyType
// ---------------------------------------------------------------------------

/// The kind of key material a handle refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KeyType {
    Secret,
    Private,
    Public,
}

impl fmt::Display for KeyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Secret => f.write_str("secret"),
            Self::Private => f.write_str("private"),
            Self::Public => f.write_str("public"),
        }
    }
}

// ---------------------------------------------------------------------------
// KeyUsages (provider usage sets)
// ---------------------------------------------------------------------------

/// The usages a provider allows.
///
/// Symmetric algorithms declare one flat set. Asymmetric algorithms split
/// the set between the private and the public half of a key pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyUsages {
    Flat(&'static [KeyUsage]),
    Split {
        private_key: &'static [KeyUsage],
        public_key: &'static [KeyUsage],
    },
}

impl KeyUsages {
    /// Every allowed usage, flattened across both halves of a split set.
    pub fn all(&self) -> Vec<KeyUsage> {
        match self {
            Self::Flat(usages) => usages.to_vec(),
            Self::Split {
                private_key,
                public_key,
            } => {
                let mut all = private_key.to_vec();
                for usage in public_key.iter() {
                    if !all.contains(usage) {
                        all.push(*usage);
                    }
                }
                all
            }
        }
    }

    /// Usages a key of the given type may carry.
    pub fn for_type(&self, key_type: KeyType) -> &'static [KeyUsage] {
        match (self, key_type) {
            (Self::Flat(usages), _) => *usages,
            (Self::Split { private_key, .. }, KeyType::Private) => *private_key,
            (Self::Split { public_key, .. }, KeyType::Public) => *public_key,
            (Self::Split { .. }, KeyType::Secret) => &[],
        }
    }

    /// Partition requested usages between the private and public half of a
    /// generated pair. Requested order is preserved.
    pub fn split(&self, requested: &[KeyUsage]) -> (Vec<KeyUsage>, Vec<KeyUsage>) {
        let private = self.for_type(KeyType::Private);
        let public = self.for_type(KeyType::Public);
        (
            requested.iter().copied().filter(|u| private.contains(u)).collect(),
            requested.iter().copied().filter(|u| public.contains(u)).collect(),
        )
    }
}

// ---------------------------------------------------------------------------
// CryptoKey
// ---------------------------------------------------------------------------

struct KeyInner {
    algorithm: Algorithm,
    key_type: KeyType,
    extractable: bool,
    usages: Vec<KeyUsage>,
    material: Option<KeyMaterial>,
}

/// An immutable key handle.
#[derive(Clone)]
pub struct CryptoKey {
    inner: Arc<KeyInner>,
}

impl CryptoKey {
    /// Create a key handle without backend material.
    pub fn new(
        algorithm: Algorithm,
        key_type: KeyType,
        extractable: bool,
        usages: impl Into<Vec<KeyUsage>>,
    ) -> Self {
        Self::build(algorithm, key_type, extractable, usages.into(), None)
    }

    /// Create a key handle wrapping backend material.
    pub fn with_material(
        algorithm: Algorithm,
        key_type: KeyType,
        extractable: bool,
        usages: impl Into<Vec<KeyUsage>>,
        material: KeyMaterial,
    ) -> Self {
        Self::build(algorithm, key_type, extractable, usages.into(), Some(material))
    }

    fn build(
        algorithm: Algorithm,
        key_type: KeyType,
        extractable: bool,
        usages: Vec<KeyUsage>,
        material: Option<KeyMaterial>,
    ) -> Self {
        Self {
            inner: Arc::new(KeyInner {
                algorithm,
                key_type,
                extractable,
                usages,
                material,
            }),
        }
    }

    pub fn algorithm(&self) -> &Algorithm {
        &self.inner.algorithm
    }

    pub fn key_type(&self) -> KeyType {
        self.inner.key_type
    }

    pub fn extractable(&self) -> bool {
        self.inner.extractable
    }

    pub fn usages(&self) -> &[KeyUsage] {
        &self.inner.usages
    }

    pub fn has_usage(&self, usage: KeyUsage) -> bool {
        self.inner.usages.contains(&usage)
    }

    /// Downcast the backend material to a concrete type.
    pub fn material<T: Any + Send + Sync>(&self) -> Option<&T> {
        self.inner.material.as_deref()?.downcast_ref::<T>()
    }

    /// The shared material slot, for backends that re-wrap it.
    pub fn raw_material(&self) -> Option<&KeyMaterial> {
        self.inner.material.as_ref()
    }
}

/// Keys compare by identity: two handles are equal when they share state.
impl PartialEq for CryptoKey {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl fmt::Debug for CryptoKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CryptoKey")
            .field("algorithm", &self.inner.algorithm.name)
            .field("type", &self.inner.key_type)
            .field("extractable", &self.inner.extractable)
            .field("usages", &self.inner.usages)
            .field("material", &"<opaque>")
            .finish()
    }
}

/// A generated asymmetric key pair.
#[derive(Debug, Clone, PartialEq)]
pub struct CryptoKeyPair {
    pub private_key: CryptoKey,
    pub public_key: CryptoKey,
}

/// The result of `generateKey`.
#[derive(Debug, Clone, PartialEq)]
pub enum GeneratedKey {
    Key(CryptoKey),
    Pair(CryptoKeyPair),
}

impl GeneratedKey {
    pub fn into_key(self) -> Option<CryptoKey> {
        match self {
            Self::Key(key) => Some(key),
            Self::Pair(_) => None,
        }
    }

    pub fn into_pair(self) -> Option<CryptoKeyPair> {
        match self {
            Self::Pair(pair) => Some(pair),
            Self::Key(_) => None,
        }
    }
}
