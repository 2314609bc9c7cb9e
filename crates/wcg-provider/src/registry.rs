//! # Provider Registry
//!
//! `ProviderStorage` maps algorithm names to provider instances. Keys are
//! lower-cased, so every lookup is case-insensitive. The registry never
//! constructs providers; it is filled at composition time (see
//! [`crate::builtin`]) and then read.

use std::collections::HashMap;
use std::sync::Arc;

use crate::provider::Provider;

/// Name-indexed store of providers.
#[derive(Default, Clone)]
pub struct ProviderStorage {
    items: HashMap<String, Arc<dyn Provider>>,
}

impl ProviderStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a provider under its lower-cased name. Last write wins; the
    /// replaced provider, if any, is returned.
    pub fn set(&mut self, provider: Arc<dyn Provider>) -> Option<Arc<dyn Provider>> {
        let key = provider.name().to_lowercase();
        let previous = self.items.insert(key, provider);
        if let Some(previous) = &previous {
            tracing::debug!(algorithm = %previous.name(), "replaced registered provider");
        }
        previous
    }

    /// Case-insensitive lookup.
    pub fn get(&self, name: &str) -> Option<Arc<dyn Provider>> {
        self.items.get(&name.to_lowercase()).cloned()
    }

    pub fn has(&self, name: &str) -> bool {
        self.items.contains_key(&name.to_lowercase())
    }

    /// Remove and return the provider registered under `name`.
    pub fn remove_at(&mut self, name: &str) -> Option<Arc<dyn Provider>> {
        self.items.remove(&name.to_lowercase())
    }

    /// Canonical names of every registered provider, sorted.
    pub fn algorithms(&self) -> Vec<String> {
        let mut names: Vec<String> = self.items.values().map(|p| p.name().to_string()).collect();
        names.sort();
        names
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl FromIterator<Arc<dyn Provider>> for ProviderStorage {
    fn from_iter<I: IntoIterator<Item = Arc<dyn Provider>>>(iter: I) -> Self {
        let mut storage = Self::new();
        for provider in iter {
            storage.set(provider);
        }
        storage
    }
}

impl std::fmt::Debug for ProviderStorage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderStorage")
            .field("algorithms", &self.algorithms())
            .finish()
    }
}
