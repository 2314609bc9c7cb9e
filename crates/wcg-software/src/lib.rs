//! # wcg-software — In-Process Primitive Backend
//!
//! A [`CryptoBackend`](wcg_provider::CryptoBackend) for development and
//! tests that runs every primitive in process memory.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use wcg_provider::builtin_providers;
//! use wcg_software::SoftwareBackend;
//!
//! let providers = builtin_providers(SoftwareBackend::shared());
//! assert!(!providers.is_empty());
//! ```
//!
//! ## Crate Policy
//!
//! - Providers have already validated every request that reaches a hook.
//!   This crate checks only what the primitive itself needs (key sizes,
//!   point encodings).
//! - Key material never implements `Serialize` and never appears in
//!   `Debug` output.

pub mod backend;
pub mod error;
pub mod material;

pub use backend::{SoftwareBackend, MAX_SECRET_BYTES};
pub use error::SoftwareError;
pub use material::{Ed25519Private, Ed25519Public, SecretBytes};
