//! # Built-in Composition
//!
//! Builds every built-in provider over one shared backend and fills a
//! registry with those the configuration permits.

use std::sync::Arc;

use crate::aes::{AesMode, AesProvider};
use crate::backend::CryptoBackend;
use crate::chacha::{ChaChaAlgorithm, ChaChaProvider};
use crate::config::{ConfigError, RegistryConfig};
use crate::des::{DesProvider, DesVariant};
use crate::ec::{EcAlgorithm, EcProvider};
use crate::hmac::{self, HmacProvider};
use crate::kdf::{HkdfProvider, Pbkdf2Provider};
use crate::provider::Provider;
use crate::registry::ProviderStorage;
use crate::rsa::{RsaProvider, RsaScheme};
use crate::sha::{ShaAlgorithm, ShaProvider, ShakeAlgorithm, ShakeProvider};

/// Canonical names of every built-in algorithm.
pub fn builtin_names() -> Vec<&'static str> {
    let mut names = Vec::new();
    names.extend(AesMode::ALL.iter().map(AesMode::name));
    names.extend(RsaScheme::ALL.iter().map(RsaScheme::name));
    names.extend(EcAlgorithm::ALL.iter().map(EcAlgorithm::name));
    names.push(hmac::NAME);
    names.push(HkdfProvider::NAME);
    names.push(Pbkdf2Provider::NAME);
    names.extend(ShaAlgorithm::ALL.iter().map(ShaAlgorithm::name));
    names.extend(ShakeAlgorithm::ALL.iter().map(ShakeAlgorithm::name));
    names.extend(DesVariant::ALL.iter().map(DesVariant::name));
    names.extend(ChaChaAlgorithm::ALL.iter().map(ChaChaAlgorithm::name));
    names
}

/// One instance of every built-in provider, sharing `backend`.
pub fn builtin_providers(backend: Arc<dyn CryptoBackend>) -> Vec<Arc<dyn Provider>> {
    let mut providers: Vec<Arc<dyn Provider>> = Vec::new();
    for mode in AesMode::ALL {
        providers.push(Arc::new(AesProvider::new(mode, backend.clone())));
    }
    for scheme in RsaScheme::ALL {
        providers.push(Arc::new(RsaProvider::new(scheme, backend.clone())));
    }
    for algorithm in EcAlgorithm::ALL {
        providers.push(Arc::new(EcProvider::new(algorithm, backend.clone())));
    }
    providers.push(Arc::new(HmacProvider::new(backend.clone())));
    providers.push(Arc::new(HkdfProvider::new(backend.clone())));
    providers.push(Arc::new(Pbkdf2Provider::new(backend.clone())));
    for algorithm in ShaAlgorithm::ALL {
        providers.push(Arc::new(ShaProvider::new(algorithm, backend.clone())));
    }
    for algorithm in ShakeAlgorithm::ALL {
        providers.push(Arc::new(ShakeProvider::new(algorithm, backend.clone())));
    }
    for variant in DesVariant::ALL {
        providers.push(Arc::new(DesProvider::new(variant, backend.clone())));
    }
    for algorithm in ChaChaAlgorithm::ALL {
        providers.push(Arc::new(ChaChaProvider::new(algorithm, backend.clone())));
    }
    providers
}

/// A registry of the built-in providers the configuration permits.
pub fn compose(
    backend: Arc<dyn CryptoBackend>,
    config: &RegistryConfig,
) -> Result<ProviderStorage, ConfigError> {
    config.validate(&builtin_names())?;
    let storage: ProviderStorage = builtin_providers(backend)
        .into_iter()
        .filter(|provider| config.permits(provider.name()))
        .collect();
    tracing::debug!(algorithms = storage.len(), "composed provider registry");
    Ok(storage)
}
