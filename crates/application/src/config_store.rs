//! Shared default options for resources.
//!
//! The store is the single place application code sets defaults such as
//! `baseURL`. Resources take a snapshot of it when they are built, so later
//! updates only affect resources built afterwards.

use std::sync::Arc;

use parking_lot::RwLock;
use restkit_domain::ResourceConfig;

/// Mutable default options, shared between clones.
#[derive(Debug, Clone, Default)]
pub struct ConfigStore {
    inner: Arc<RwLock<ResourceConfig>>,
}

impl ConfigStore {
    /// Creates a store seeded with `initial`.
    #[must_use]
    pub fn new(initial: ResourceConfig) -> Self {
        Self {
            inner: Arc::new(RwLock::new(initial)),
        }
    }

    /// Shallow-merges `options` into the stored defaults.
    ///
    /// Existing keys are overwritten and new keys added; nothing is removed.
    pub fn set_config(&self, options: &ResourceConfig) {
        let keys: Vec<&String> = options.as_map().keys().collect();
        tracing::debug!(?keys, "updating resource defaults");
        self.inner.write().merge(options);
    }

    /// Returns a snapshot of the stored defaults.
    #[must_use]
    pub fn get_config(&self) -> ResourceConfig {
        self.inner.read().clone()
    }

    /// Returns the stored defaults with `overrides` merged on top.
    #[must_use]
    pub fn effective(&self, overrides: &ResourceConfig) -> ResourceConfig {
        self.inner.read().merged(overrides)
    }
}
