//! # wcg-core — Foundational Types for the WebCrypto Gate
//!
//! This crate defines the vocabulary shared by every other crate in the
//! workspace: keys and their usages, algorithm descriptors, key formats,
//! JSON Web Keys, and the error taxonomy. It performs no cryptography and
//! no dispatch.
//!
//! ## Key Design Principles
//!
//! 1. **Algorithm parameters are a sum type.** `AlgorithmParams` carries one
//!    variant per parameter shape. Every field inside a variant is optional,
//!    so a missing mandatory property surfaces as a `RequiredProperty` error
//!    instead of a construction failure.
//!
//! 2. **Keys are immutable handles.** `CryptoKey` exposes its algorithm, type,
//!    extractability and usages read-only. Backend material is an opaque
//!    shared slot that this crate never inspects or prints.
//!
//! 3. **One error enum, flat.** `WebCryptoError` partitions every failure
//!    into a kind (`ErrorKind`) that callers can match without parsing
//!    messages.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `wcg-*` crates (this is the leaf of the DAG).
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod algorithm;
pub mod error;
pub mod format;
pub mod jwk;
pub mod key;

// Re-export primary types for ergonomic imports.
pub use algorithm::{nested, Algorithm, AlgorithmIdentifier, AlgorithmParams};
pub use error::{ErrorKind, Result, WebCryptoError};
pub use format::{ExportedKey, KeyData, KeyFormat};
pub use jwk::JsonWebKey;
pub use key::{
    CryptoKey, CryptoKeyPair, GeneratedKey, KeyMaterial, KeyType, KeyUsage, KeyUsages,
};
