//! # SubtleCrypto Dispatcher
//!
//! The single facade for the twelve WebCrypto operations. Each call:
//!
//! 1. normalizes the algorithm identifier (`"AES-GCM"` → `{ name }`);
//! 2. resolves the provider case-insensitively, failing with
//!    `AlgorithmError("Unrecognized name")`;
//! 3. re-stamps the name with the provider's canonical spelling and lets
//!    the provider inject its defaults;
//! 4. delegates to the provider operation of the same name.
//!
//! `deriveKey`, `wrapKey` and `unwrapKey` are composed here from the
//! other operations rather than delegated.
//!
//! Errors from providers and backends propagate unchanged.

use std::sync::Arc;

use wcg_core::{
    Algorithm, AlgorithmIdentifier, CryptoKey, ExportedKey, GeneratedKey, JsonWebKey, KeyData,
    KeyFormat, KeyUsage, Result, WebCryptoError,
};
use wcg_provider::{
    builtin_providers, compose, CheckOptions, ConfigError, CryptoBackend, Provider,
    ProviderStorage, RegistryConfig,
};

/// Derived key length, in bits, when the derived key type names none.
pub const DEFAULT_DERIVED_LENGTH: u32 = 512;

/// WebCrypto operation surface over a provider registry.
#[derive(Debug, Clone)]
pub struct SubtleCrypto {
    providers: ProviderStorage,
}

impl SubtleCrypto {
    pub fn new(providers: ProviderStorage) -> Self {
        Self { providers }
    }

    /// Every built-in provider over `backend`.
    pub fn with_backend(backend: Arc<dyn CryptoBackend>) -> Self {
        Self::new(builtin_providers(backend).into_iter().collect())
    }

    /// The built-in providers `config` permits, over `backend`.
    pub fn from_config(
        backend: Arc<dyn CryptoBackend>,
        config: &RegistryConfig,
    ) -> Result<Self, ConfigError> {
        Ok(Self::new(compose(backend, config)?))
    }

    pub fn providers(&self) -> &ProviderStorage {
        &self.providers
    }

    pub fn providers_mut(&mut self) -> &mut ProviderStorage {
        &mut self.providers
    }

    // ─── Resolution ─────────────────────────────────────────────────────

    fn get_provider(&self, name: &str) -> Result<Arc<dyn Provider>> {
        self.providers
            .get(name)
            .ok_or_else(|| WebCryptoError::Algorithm("Unrecognized name".into()))
    }

    fn prepare(
        &self,
        operation: &'static str,
        algorithm: impl Into<AlgorithmIdentifier>,
    ) -> Result<(Algorithm, Arc<dyn Provider>)> {
        let mut algorithm = algorithm.into().normalize();
        let provider = self.get_provider(&algorithm.name)?;
        algorithm.name = provider.name().to_string();
        provider.prepare_algorithm(&mut algorithm);
        tracing::debug!(operation, algorithm = %algorithm.name, "dispatching");
        Ok((algorithm, provider))
    }

    // ─── Operations ─────────────────────────────────────────────────────

    pub fn digest(
        &self,
        algorithm: impl Into<AlgorithmIdentifier>,
        data: impl AsRef<[u8]>,
    ) -> Result<Vec<u8>> {
        let (algorithm, provider) = self.prepare("digest", algorithm)?;
        provider.digest(&algorithm, data.as_ref())
    }

    pub fn generate_key(
        &self,
        algorithm: impl Into<AlgorithmIdentifier>,
        extractable: bool,
        usages: &[KeyUsage],
    ) -> Result<GeneratedKey> {
        let (algorithm, provider) = self.prepare("generateKey", algorithm)?;
        provider.generate_key(&algorithm, extractable, usages)
    }

    pub fn sign(
        &self,
        algorithm: impl Into<AlgorithmIdentifier>,
        key: &CryptoKey,
        data: impl AsRef<[u8]>,
    ) -> Result<Vec<u8>> {
        let (algorithm, provider) = self.prepare("sign", algorithm)?;
        provider.sign(&algorithm, key, data.as_ref())
    }

    pub fn verify(
        &self,
        algorithm: impl Into<AlgorithmIdentifier>,
        key: &CryptoKey,
        signature: impl AsRef<[u8]>,
        data: impl AsRef<[u8]>,
    ) -> Result<bool> {
        let (algorithm, provider) = self.prepare("verify", algorithm)?;
        provider.verify(&algorithm, key, signature.as_ref(), data.as_ref())
    }

    pub fn encrypt(
        &self,
        algorithm: impl Into<AlgorithmIdentifier>,
        key: &CryptoKey,
        data: impl AsRef<[u8]>,
    ) -> Result<Vec<u8>> {
        let (algorithm, provider) = self.prepare("encrypt", algorithm)?;
        provider.encrypt(&algorithm, key, data.as_ref(), CheckOptions::ENFORCE)
    }

    pub fn decrypt(
        &self,
        algorithm: impl Into<AlgorithmIdentifier>,
        key: &CryptoKey,
        data: impl AsRef<[u8]>,
    ) -> Result<Vec<u8>> {
        let (algorithm, provider) = self.prepare("decrypt", algorithm)?;
        provider.decrypt(&algorithm, key, data.as_ref(), CheckOptions::ENFORCE)
    }

    /// `length` is in bits.
    pub fn derive_bits(
        &self,
        algorithm: impl Into<AlgorithmIdentifier>,
        base_key: &CryptoKey,
        length: Option<u32>,
    ) -> Result<Vec<u8>> {
        let (algorithm, provider) = self.prepare("deriveBits", algorithm)?;
        provider.derive_bits(&algorithm, base_key, length, CheckOptions::ENFORCE)
    }

    /// Derive bits from `base_key` and import them as a key of
    /// `derived_key_type`.
    ///
    /// The base key must carry `deriveKey`; its `deriveBits` usage is not
    /// required.
    pub fn derive_key(
        &self,
        algorithm: impl Into<AlgorithmIdentifier>,
        base_key: &CryptoKey,
        derived_key_type: impl Into<AlgorithmIdentifier>,
        extractable: bool,
        usages: &[KeyUsage],
    ) -> Result<CryptoKey> {
        let (derived_key_type, import_provider) = self.prepare("deriveKey", derived_key_type)?;
        import_provider.check_derived_key_params(&derived_key_type)?;

        let (algorithm, provider) = self.prepare("deriveKey", algorithm)?;
        provider.check_crypto_key(base_key, Some(KeyUsage::DeriveKey))?;

        let length = match derived_key_type.params.length() {
            Some(length) => u32::try_from(length).map_err(|_| {
                WebCryptoError::Operation("length: Must be a non-negative integer".into())
            })?,
            None => DEFAULT_DERIVED_LENGTH,
        };
        let bits = provider.derive_bits(&algorithm, base_key, Some(length), CheckOptions::SKIP)?;

        import_provider.import_key(
            KeyFormat::Raw,
            &KeyData::Bytes(bits),
            &derived_key_type,
            extractable,
            usages,
        )
    }

    pub fn export_key(&self, format: KeyFormat, key: &CryptoKey) -> Result<ExportedKey> {
        let provider = self.get_provider(&key.algorithm().name)?;
        tracing::debug!(operation = "exportKey", algorithm = %provider.name(), %format, "dispatching");
        provider.export_key(format, key)
    }

    pub fn import_key(
        &self,
        format: KeyFormat,
        key_data: impl Into<KeyData>,
        algorithm: impl Into<AlgorithmIdentifier>,
        extractable: bool,
        usages: &[KeyUsage],
    ) -> Result<CryptoKey> {
        let (algorithm, provider) = self.prepare("importKey", algorithm)?;
        provider.import_key(format, &key_data.into(), &algorithm, extractable, usages)
    }

    /// Export `key` and encrypt the result with `wrapping_key`.
    ///
    /// JWK exports are serialized as UTF-8 JSON before encryption. The
    /// wrapping key must carry `wrapKey`; `key`'s own usages are not
    /// consulted.
    pub fn wrap_key(
        &self,
        format: KeyFormat,
        key: &CryptoKey,
        wrapping_key: &CryptoKey,
        wrap_algorithm: impl Into<AlgorithmIdentifier>,
    ) -> Result<Vec<u8>> {
        let exported = match self.export_key(format, key)? {
            ExportedKey::Jwk(jwk) => {
                serde_json::to_vec(&jwk).map_err(|e| WebCryptoError::Operation(e.to_string()))?
            }
            ExportedKey::Bytes(bytes) => bytes,
        };

        let (algorithm, provider) = self.prepare("wrapKey", wrap_algorithm)?;
        provider.check_crypto_key(wrapping_key, Some(KeyUsage::WrapKey))?;
        provider.encrypt(&algorithm, wrapping_key, &exported, CheckOptions::SKIP)
    }

    /// Decrypt `wrapped_key` with `unwrapping_key` and import the result.
    ///
    /// For `jwk`, the plaintext must be UTF-8 JSON; anything else fails
    /// with a `Type`-kind `InvalidJson` error carrying the parser error.
    #[allow(clippy::too_many_arguments)]
    pub fn unwrap_key(
        &self,
        format: KeyFormat,
        wrapped_key: impl AsRef<[u8]>,
        unwrapping_key: &CryptoKey,
        unwrap_algorithm: impl Into<AlgorithmIdentifier>,
        unwrapped_key_algorithm: impl Into<AlgorithmIdentifier>,
        extractable: bool,
        usages: &[KeyUsage],
    ) -> Result<CryptoKey> {
        let (algorithm, provider) = self.prepare("unwrapKey", unwrap_algorithm)?;
        provider.check_crypto_key(unwrapping_key, Some(KeyUsage::UnwrapKey))?;
        let plaintext = provider.decrypt(
            &algorithm,
            unwrapping_key,
            wrapped_key.as_ref(),
            CheckOptions::SKIP,
        )?;

        let key_data = match format {
            KeyFormat::Jwk => KeyData::Jwk(
                serde_json::from_slice::<JsonWebKey>(&plaintext)
                    .map_err(WebCryptoError::InvalidJson)?,
            ),
            _ => KeyData::Bytes(plaintext),
        };
        self.import_key(format, key_data, unwrapped_key_algorithm, extractable, usages)
    }

    /// RFC 7638 thumbprint of `jwk` under `hash`.
    pub fn jwk_thumbprint(
        &self,
        hash: impl Into<AlgorithmIdentifier>,
        jwk: &JsonWebKey,
    ) -> Result<Vec<u8>> {
        self.digest(hash, jwk.thumbprint_input()?)
    }
}
