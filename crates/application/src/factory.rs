//! Resource factory.
//!
//! Owns the transport and the [`ConfigStore`] and hands out resources that
//! capture the store's options at the moment they are created.

use std::fmt;
use std::sync::Arc;

use restkit_domain::{ModelMapper, Passthrough, ResourceConfig};

use crate::config_store::ConfigStore;
use crate::error::ResourceResult;
use crate::ports::HttpClient;
use crate::resource::Resource;

/// Builds [`Resource`]s sharing one transport and one set of defaults.
///
/// # Example
///
/// ```ignore
/// let factory = ResourceFactory::new(Arc::new(ReqwestHttpClient::new()?));
/// factory.set_config(&ResourceConfig::new().with_base_url("https://api.example.com"));
///
/// let users = factory.model_resource("users", SerdeModel::<User>::new())?;
/// ```
pub struct ResourceFactory<C: ?Sized> {
    client: Arc<C>,
    store: ConfigStore,
}

impl<C: HttpClient + ?Sized> ResourceFactory<C> {
    /// Creates a factory with empty defaults.
    pub fn new(client: Arc<C>) -> Self {
        Self::with_store(client, ConfigStore::default())
    }

    /// Creates a factory seeded with `config`.
    pub fn with_config(client: Arc<C>, config: ResourceConfig) -> Self {
        Self::with_store(client, ConfigStore::new(config))
    }

    /// Creates a factory around an existing store.
    pub const fn with_store(client: Arc<C>, store: ConfigStore) -> Self {
        Self { client, store }
    }

    /// Returns the defaults store.
    pub const fn config_store(&self) -> &ConfigStore {
        &self.store
    }

    /// Merges `options` into the defaults used by resources created later.
    pub fn set_config(&self, options: &ResourceConfig) {
        self.store.set_config(options);
    }

    /// Creates a resource returning raw payloads.
    ///
    /// # Errors
    ///
    /// See [`Resource::new`].
    pub fn resource(&self, route: &str) -> ResourceResult<Resource<C>> {
        self.resource_with(route, Passthrough, &ResourceConfig::new())
    }

    /// Creates a resource mapping payloads through `model`.
    ///
    /// # Errors
    ///
    /// See [`Resource::new`].
    pub fn model_resource<M: ModelMapper>(
        &self,
        route: &str,
        model: M,
    ) -> ResourceResult<Resource<C, M>> {
        self.resource_with(route, model, &ResourceConfig::new())
    }

    /// Creates a resource with per-instance option overrides.
    ///
    /// # Errors
    ///
    /// See [`Resource::new`].
    pub fn resource_with<M: ModelMapper>(
        &self,
        route: &str,
        model: M,
        options: &ResourceConfig,
    ) -> ResourceResult<Resource<C, M>> {
        let effective = self.store.effective(options);
        Resource::new(Arc::clone(&self.client), route, model, effective)
    }
}

impl<C: ?Sized> Clone for ResourceFactory<C> {
    fn clone(&self) -> Self {
        Self {
            client: Arc::clone(&self.client),
            store: self.store.clone(),
        }
    }
}

impl<C: ?Sized> fmt::Debug for ResourceFactory<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResourceFactory")
            .field("store", &self.store)
            .finish_non_exhaustive()
    }
}
