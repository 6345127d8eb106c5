//! Plugin-based API registry
//!
//! The registry allows zone API implementations to be registered
//! dynamically at runtime, avoiding hardcoded if-else chains.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use cft_core::registry::ApiRegistry;
//! use cft_core::config::ProviderConfig;
//!
//! // Create a registry
//! let registry = ApiRegistry::new();
//!
//! // Register providers
//! cft_provider_cloudflare::register(&registry);
//!
//! // Create an API client from config
//! let config = ProviderConfig::Cloudflare { ... };
//! let api = registry.create_api(&config)?;
//! ```

use crate::config::ProviderConfig;
use crate::error::{Error, Result};
use crate::traits::{ZoneApi, ZoneApiFactory};
use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

/// Registry of zone API factories
///
/// Maps provider type names (as returned by [`ProviderConfig::type_name`])
/// to factory objects.
///
/// ## Thread Safety
///
/// The registry uses interior mutability with RwLock, allowing concurrent
/// reads and exclusive writes.
#[derive(Default)]
pub struct ApiRegistry {
    /// Registered zone API factories
    apis: RwLock<HashMap<String, Box<dyn ZoneApiFactory>>>,
}

impl ApiRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a zone API factory
    ///
    /// # Parameters
    ///
    /// - `name`: Provider type name (e.g., "cloudflare")
    /// - `factory`: Factory object for creating API instances
    ///
    /// Registering the same name twice replaces the earlier factory.
    pub fn register_api(&self, name: impl Into<String>, factory: Box<dyn ZoneApiFactory>) {
        let mut apis = self.apis.write().unwrap_or_else(PoisonError::into_inner);
        apis.insert(name.into(), factory);
    }

    /// Create a zone API from configuration
    ///
    /// # Returns
    ///
    /// - `Ok(Box<dyn ZoneApi>)`: Created API instance
    /// - `Err(Error)`: If the provider type is not registered or creation fails
    pub fn create_api(&self, config: &ProviderConfig) -> Result<Box<dyn ZoneApi>> {
        let provider_type = config.type_name();
        let apis = self.apis.read().unwrap_or_else(PoisonError::into_inner);

        let factory = apis
            .get(provider_type)
            .ok_or_else(|| Error::config(format!("Unknown provider type: {}", provider_type)))?;

        factory.create(config)
    }

    /// Check if a provider type is registered
    pub fn has_api(&self, name: &str) -> bool {
        let apis = self.apis.read().unwrap_or_else(PoisonError::into_inner);
        apis.contains_key(name)
    }
}
