//! # wcg-subtle — WebCrypto Dispatcher
//!
//! `SubtleCrypto` resolves each request to a provider in a
//! `ProviderStorage` and runs it through that provider's check and hook
//! phases.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use wcg_core::{Algorithm, AlgorithmParams, KeyUsage};
//! use wcg_software::SoftwareBackend;
//! use wcg_subtle::SubtleCrypto;
//!
//! let subtle = SubtleCrypto::with_backend(Arc::new(SoftwareBackend::new()));
//! let digest = subtle.digest("sha-256", b"abc").unwrap();
//! assert_eq!(digest.len(), 32);
//!
//! let keygen = Algorithm::with_params("AES-GCM", AlgorithmParams::Length { length: Some(256) });
//! let key = subtle
//!     .generate_key(keygen, false, &[KeyUsage::Encrypt, KeyUsage::Decrypt])
//!     .unwrap();
//! ```
//!
//! ## Design
//!
//! - Calls are synchronous. The registry is read-only after composition,
//!   so one `SubtleCrypto` can serve concurrent callers behind an `Arc`.
//! - Argument counts are fixed by the method signatures.
//! - Byte inputs accept anything `AsRef<[u8]>`.
//! - [`Crypto`] wraps the dispatcher with `get_random_values` and
//!   `random_uuid`, which run without a provider.

pub mod crypto;
pub mod subtle;

pub use crypto::{Crypto, MAX_RANDOM_BYTES};
pub use subtle::{SubtleCrypto, DEFAULT_DERIVED_LENGTH};
