//! # Provider Contract
//!
//! A provider is the validation and dispatch unit for one algorithm. Each
//! public operation runs in two phases:
//!
//! 1. **check**: every contract rule for the operation (name, parameters,
//!    key algorithm, key usage, key type). The first violation fails the
//!    call.
//! 2. **on**: the hook that delegates to the backend. It runs only after
//!    the check phase passed, and its result passes straight through.
//!
//! Implementors supply `name`, `usages` and `backend`, plus whichever
//! parameter hooks (`check_*_params`) their algorithm needs. The composite
//! checks default to the toolkit in [`crate::checks`]; overriding one
//! means calling the toolkit function first and then adding rules.
//!
//! ## Security Invariant
//!
//! No `on_*` hook is reached with a key whose algorithm, usage or type the
//! check phase would reject.

use wcg_core::{
    Algorithm, CryptoKey, ExportedKey, GeneratedKey, KeyData, KeyFormat, KeyUsage, KeyUsages,
    Result,
};

use crate::backend::{CryptoBackend, KeyTemplate};
use crate::checks;

/// Per-call options for operations whose key-usage check is conditional.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CheckOptions {
    /// Require the key to carry the operation's usage tag.
    pub key_usage: bool,
}

impl CheckOptions {
    /// Enforce the key-usage check.
    pub const ENFORCE: Self = Self { key_usage: true };
    /// Skip the key-usage check (key wrapping, key derivation).
    pub const SKIP: Self = Self { key_usage: false };

    fn usage(self, usage: KeyUsage) -> Option<KeyUsage> {
        self.key_usage.then_some(usage)
    }
}

/// The contract every algorithm provider satisfies.
///
/// Object-safe; registries hold `Arc<dyn Provider>`.
pub trait Provider: Send + Sync {
    /// Canonical algorithm name.
    fn name(&self) -> &str;

    /// Usages a key of this algorithm may be created with.
    fn usages(&self) -> KeyUsages;

    /// Primitive backend reached by the `on_*` hooks.
    fn backend(&self) -> &dyn CryptoBackend;

    /// Inject provider defaults into a request before it is checked.
    fn prepare_algorithm(&self, algorithm: &mut Algorithm) {
        let _ = algorithm;
    }

    // ─── Parameter hooks ────────────────────────────────────────────────

    fn check_generate_key_params(&self, algorithm: &Algorithm) -> Result<()> {
        let _ = algorithm;
        Ok(())
    }

    fn check_algorithm_params(&self, algorithm: &Algorithm) -> Result<()> {
        let _ = algorithm;
        Ok(())
    }

    /// Rules for this algorithm as the target type of `deriveKey`.
    fn check_derived_key_params(&self, algorithm: &Algorithm) -> Result<()> {
        let _ = algorithm;
        Ok(())
    }

    fn check_import_params(&self, algorithm: &Algorithm) -> Result<()> {
        let _ = algorithm;
        Ok(())
    }

    // ─── Composite checks ───────────────────────────────────────────────

    fn check_crypto_key(&self, key: &CryptoKey, usage: Option<KeyUsage>) -> Result<()> {
        checks::check_crypto_key(self, key, usage)
    }

    fn check_digest(&self, algorithm: &Algorithm) -> Result<()> {
        checks::check_algorithm_name(self.name(), algorithm)
    }

    fn check_generate_key(
        &self,
        algorithm: &Algorithm,
        extractable: bool,
        usages: &[KeyUsage],
    ) -> Result<()> {
        let _ = extractable;
        checks::check_generate_key(self, algorithm, usages)
    }

    fn check_sign(&self, algorithm: &Algorithm, key: &CryptoKey) -> Result<()> {
        checks::check_algorithm_name(self.name(), algorithm)?;
        self.check_algorithm_params(algorithm)?;
        self.check_crypto_key(key, Some(KeyUsage::Sign))
    }

    fn check_verify(&self, algorithm: &Algorithm, key: &CryptoKey) -> Result<()> {
        checks::check_algorithm_name(self.name(), algorithm)?;
        self.check_algorithm_params(algorithm)?;
        self.check_crypto_key(key, Some(KeyUsage::Verify))
    }

    fn check_encrypt(
        &self,
        algorithm: &Algorithm,
        key: &CryptoKey,
        options: CheckOptions,
    ) -> Result<()> {
        checks::check_algorithm_name(self.name(), algorithm)?;
        self.check_algorithm_params(algorithm)?;
        self.check_crypto_key(key, options.usage(KeyUsage::Encrypt))
    }

    fn check_decrypt(
        &self,
        algorithm: &Algorithm,
        key: &CryptoKey,
        options: CheckOptions,
    ) -> Result<()> {
        checks::check_algorithm_name(self.name(), algorithm)?;
        self.check_algorithm_params(algorithm)?;
        self.check_crypto_key(key, options.usage(KeyUsage::Decrypt))
    }

    fn check_derive_bits(
        &self,
        algorithm: &Algorithm,
        base_key: &CryptoKey,
        length: Option<u32>,
        options: CheckOptions,
    ) -> Result<()> {
        checks::check_algorithm_name(self.name(), algorithm)?;
        self.check_algorithm_params(algorithm)?;
        self.check_crypto_key(base_key, options.usage(KeyUsage::DeriveBits))?;
        checks::check_derive_length(length)
    }

    fn check_export_key(&self, format: KeyFormat, key: &CryptoKey) -> Result<()> {
        checks::check_export_key(self, format, key)
    }

    fn check_import_key(
        &self,
        format: KeyFormat,
        key_data: &KeyData,
        algorithm: &Algorithm,
        extractable: bool,
        usages: &[KeyUsage],
    ) -> Result<()> {
        let _ = extractable;
        checks::check_import_key(self, format, key_data, algorithm, usages)
    }

    // ─── Public operations ──────────────────────────────────────────────

    fn digest(&self, algorithm: &Algorithm, data: &[u8]) -> Result<Vec<u8>> {
        self.check_digest(algorithm)?;
        self.on_digest(algorithm, data)
    }

    fn generate_key(
        &self,
        algorithm: &Algorithm,
        extractable: bool,
        usages: &[KeyUsage],
    ) -> Result<GeneratedKey> {
        self.check_generate_key(algorithm, extractable, usages)?;
        self.on_generate_key(algorithm, extractable, usages)
    }

    fn sign(&self, algorithm: &Algorithm, key: &CryptoKey, data: &[u8]) -> Result<Vec<u8>> {
        self.check_sign(algorithm, key)?;
        self.on_sign(algorithm, key, data)
    }

    fn verify(
        &self,
        algorithm: &Algorithm,
        key: &CryptoKey,
        signature: &[u8],
        data: &[u8],
    ) -> Result<bool> {
        self.check_verify(algorithm, key)?;
        self.on_verify(algorithm, key, signature, data)
    }

    fn encrypt(
        &self,
        algorithm: &Algorithm,
        key: &CryptoKey,
        data: &[u8],
        options: CheckOptions,
    ) -> Result<Vec<u8>> {
        self.check_encrypt(algorithm, key, options)?;
        self.on_encrypt(algorithm, key, data)
    }

    fn decrypt(
        &self,
        algorithm: &Algorithm,
        key: &CryptoKey,
        data: &[u8],
        options: CheckOptions,
    ) -> Result<Vec<u8>> {
        self.check_decrypt(algorithm, key, options)?;
        self.on_decrypt(algorithm, key, data)
    }

    fn derive_bits(
        &self,
        algorithm: &Algorithm,
        base_key: &CryptoKey,
        length: Option<u32>,
        options: CheckOptions,
    ) -> Result<Vec<u8>> {
        self.check_derive_bits(algorithm, base_key, length, options)?;
        self.on_derive_bits(algorithm, base_key, length)
    }

    fn export_key(&self, format: KeyFormat, key: &CryptoKey) -> Result<ExportedKey> {
        self.check_export_key(format, key)?;
        self.on_export_key(format, key)
    }

    fn import_key(
        &self,
        format: KeyFormat,
        key_data: &KeyData,
        algorithm: &Algorithm,
        extractable: bool,
        usages: &[KeyUsage],
    ) -> Result<CryptoKey> {
        self.check_import_key(format, key_data, algorithm, extractable, usages)?;
        self.on_import_key(format, key_data, algorithm, extractable, usages)
    }

    // ─── Backend hooks ──────────────────────────────────────────────────

    fn on_digest(&self, algorithm: &Algorithm, data: &[u8]) -> Result<Vec<u8>> {
        tracing::trace!(algorithm = %algorithm.name, len = data.len(), "digest hook");
        self.backend().digest(algorithm, data)
    }

    fn on_generate_key(
        &self,
        algorithm: &Algorithm,
        extractable: bool,
        usages: &[KeyUsage],
    ) -> Result<GeneratedKey> {
        tracing::trace!(algorithm = %algorithm.name, extractable, "generateKey hook");
        self.backend().generate_key(&KeyTemplate {
            algorithm,
            extractable,
            usages,
            allowed: self.usages(),
        })
    }

    fn on_sign(&self, algorithm: &Algorithm, key: &CryptoKey, data: &[u8]) -> Result<Vec<u8>> {
        tracing::trace!(algorithm = %algorithm.name, "sign hook");
        self.backend().sign(algorithm, key, data)
    }

    fn on_verify(
        &self,
        algorithm: &Algorithm,
        key: &CryptoKey,
        signature: &[u8],
        data: &[u8],
    ) -> Result<bool> {
        tracing::trace!(algorithm = %algorithm.name, "verify hook");
        self.backend().verify(algorithm, key, signature, data)
    }

    fn on_encrypt(&self, algorithm: &Algorithm, key: &CryptoKey, data: &[u8]) -> Result<Vec<u8>> {
        tracing::trace!(algorithm = %algorithm.name, "encrypt hook");
        self.backend().encrypt(algorithm, key, data)
    }

    fn on_decrypt(&self, algorithm: &Algorithm, key: &CryptoKey, data: &[u8]) -> Result<Vec<u8>> {
        tracing::trace!(algorithm = %algorithm.name, "decrypt hook");
        self.backend().decrypt(algorithm, key, data)
    }

    fn on_derive_bits(
        &self,
        algorithm: &Algorithm,
        base_key: &CryptoKey,
        length: Option<u32>,
    ) -> Result<Vec<u8>> {
        tracing::trace!(algorithm = %algorithm.name, ?length, "deriveBits hook");
        self.backend().derive_bits(algorithm, base_key, length)
    }

    fn on_export_key(&self, format: KeyFormat, key: &CryptoKey) -> Result<ExportedKey> {
        tracing::trace!(algorithm = %key.algorithm().name, %format, "exportKey hook");
        self.backend().export_key(format, key)
    }

    fn on_import_key(
        &self,
        format: KeyFormat,
        key_data: &KeyData,
        algorithm: &Algorithm,
        extractable: bool,
        usages: &[KeyUsage],
    ) -> Result<CryptoKey> {
        tracing::trace!(algorithm = %algorithm.name, %format, "importKey hook");
        self.backend().import_key(
            format,
            key_data,
            &KeyTemplate {
                algorithm,
                extractable,
                usages,
                allowed: self.usages(),
            },
        )
    }
}
