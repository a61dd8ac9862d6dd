//! Adapter factory pattern for building the configured upstream adapter
//!
//! Each upstream family registers one factory; the gateway asks the registry
//! for the family named in configuration and never names a concrete adapter.

use crate::omdb::OmdbAdapter;
use crate::tmdb::TmdbAdapter;
use crate::UpstreamAdapter;
use anyhow::{anyhow, Result};
use reel_config::{UpstreamConfig, UpstreamFamily};
use std::collections::HashMap;
use std::sync::Arc;

/// Factory trait for creating an upstream adapter from configuration
pub trait AdapterFactory: Send + Sync {
    /// The family this factory builds
    fn family(&self) -> UpstreamFamily;

    /// Build an adapter. A missing credential is not an error here: the
    /// adapter reports it per request.
    fn create(&self, config: &UpstreamConfig) -> Result<Arc<dyn UpstreamAdapter>>;
}

/// Registry of adapter factories
pub struct AdapterFactoryRegistry {
    factories: HashMap<UpstreamFamily, Box<dyn AdapterFactory>>,
}

impl AdapterFactoryRegistry {
    /// Create a new registry with the built-in families registered
    pub fn new() -> Self {
        let mut registry = Self {
            factories: HashMap::new(),
        };

        registry.register(Box::new(omdb::OmdbAdapterFactory));
        registry.register(Box::new(tmdb::TmdbAdapterFactory));

        registry
    }

    pub fn register(&mut self, factory: Box<dyn AdapterFactory>) {
        self.factories.insert(factory.family(), factory);
    }

    /// Build the adapter for `config.family`
    pub fn create(&self, config: &UpstreamConfig) -> Result<Arc<dyn UpstreamAdapter>> {
        let factory = self
            .factories
            .get(&config.family)
            .ok_or_else(|| anyhow!("No adapter registered for upstream '{}'", config.family))?;
        factory.create(config)
    }

    pub fn registered_families(&self) -> Vec<UpstreamFamily> {
        let mut families: Vec<UpstreamFamily> = self.factories.keys().copied().collect();
        families.sort_by_key(|f| f.as_str());
        families
    }
}

impl Default for AdapterFactoryRegistry {
    fn default() -> Self {
        Self::new()
    }
}

mod omdb {
    use super::*;

    pub struct OmdbAdapterFactory;

    impl AdapterFactory for OmdbAdapterFactory {
        fn family(&self) -> UpstreamFamily {
            UpstreamFamily::Omdb
        }

        fn create(&self, config: &UpstreamConfig) -> Result<Arc<dyn UpstreamAdapter>> {
            Ok(Arc::new(OmdbAdapter::new(config)?))
        }
    }
}

mod tmdb {
    use super::*;

    pub struct TmdbAdapterFactory;

    impl AdapterFactory for TmdbAdapterFactory {
        fn family(&self) -> UpstreamFamily {
            UpstreamFamily::Tmdb
        }

        fn create(&self, config: &UpstreamConfig) -> Result<Arc<dyn UpstreamAdapter>> {
            Ok(Arc::new(TmdbAdapter::new(config)?))
        }
    }
}
