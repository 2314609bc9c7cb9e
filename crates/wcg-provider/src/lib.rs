//! # wcg-provider — Algorithm Providers and Registry
//!
//! Everything between a resolved algorithm name and the primitive backend.
//!
//! ## Architecture
//!
//! - **Provider** (`provider.rs`): the trait every algorithm implements.
//!   Public operations run their check phase, then their `on_*` hook.
//!
//! - **Toolkit** (`checks.rs`): free validation functions shared by all
//!   providers (`check_required_property`, `check_hash_algorithm`,
//!   `check_key_usages`, `check_crypto_key`, ...).
//!
//! - **Backend** (`backend.rs`): the `CryptoBackend` trait the `on_*` hooks
//!   delegate to. Unimplemented primitives report `UnsupportedOperation`.
//!
//! - **Families**: `aes`, `rsa`, `ec`, `hmac`, `kdf`, `sha`, `des`,
//!   `chacha`. Each family is one provider type parameterised by a mode
//!   enum, so shared rules are written once.
//!
//! - **Registry** (`registry.rs`): `ProviderStorage`, a case-insensitive
//!   name → provider map. `builtin::compose` fills one from a
//!   `RegistryConfig`.
//!
//! - **Mock** (`mock.rs`, feature `mock`): recording backend for tests.
//!
//! ## Crate Policy
//!
//! - Depends only on `wcg-core` internally.
//! - Providers hold no mutable state. Validation is idempotent.
//! - No `unsafe` code.

pub mod aes;
pub mod backend;
pub mod builtin;
pub mod chacha;
pub mod checks;
pub mod config;
pub mod des;
pub mod ec;
pub mod hmac;
pub mod kdf;
#[cfg(feature = "mock")]
pub mod mock;
pub mod provider;
pub mod registry;
pub mod rsa;
pub mod sha;

pub use backend::{CryptoBackend, KeyTemplate, UnsupportedBackend};
pub use builtin::{builtin_names, builtin_providers, compose};
pub use config::{ConfigError, RegistryConfig};
#[cfg(feature = "mock")]
pub use mock::MockBackend;
pub use provider::{CheckOptions, Provider};
pub use registry::ProviderStorage;
