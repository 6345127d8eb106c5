// # Zone API Trait
//
// Defines the interface for reading zones and their resources from a
// provider API.
//
// ## Implementations
//
// - Cloudflare: `cft-provider-cloudflare` crate
//
// ## Usage
//
// ```rust,ignore
// use cft_core::ZoneApi;
//
// #[tokio::main]
// async fn main() -> anyhow::Result<()> {
//     let api = /* ZoneApi implementation */;
//
//     for zone in api.list_zones(None).await? {
//         let rules = api.list_page_rules(&zone.id).await?;
//         println!("{}: {} page rule(s)", zone.name, rules.len());
//     }
//
//     Ok(())
// }
// ```

use crate::model::{PageRule, Zone};
use async_trait::async_trait;

/// Trait for zone API implementations
///
/// The exporter treats the API as a synchronous, reliable collaborator:
/// it awaits one call at a time and never retries.
///
/// # Constraints
///
/// Implementations:
/// - make one logical listing per call (following pagination is fine)
/// - do not retry, back off, or cache between calls
/// - never log credentials
#[async_trait]
pub trait ZoneApi: Send + Sync {
    /// List zones visible to the configured credentials
    ///
    /// # Parameters
    ///
    /// - `name`: When set, only the zone with this exact name is returned
    ///
    /// # Returns
    ///
    /// - `Ok(Vec<Zone>)`: Zones in API order
    /// - `Err(Error)`: If the request failed
    async fn list_zones(&self, name: Option<&str>) -> Result<Vec<Zone>, crate::Error>;

    /// List the page rules of a zone
    ///
    /// # Parameters
    ///
    /// - `zone_id`: The zone identifier
    ///
    /// # Returns
    ///
    /// - `Ok(Vec<PageRule>)`: Rules in API order
    /// - `Err(Error)`: If the request failed
    async fn list_page_rules(&self, zone_id: &str) -> Result<Vec<PageRule>, crate::Error>;

    /// Get the provider name (for logging/debugging)
    fn provider_name(&self) -> &'static str;
}

/// Helper trait for constructing zone APIs from configuration
pub trait ZoneApiFactory: Send + Sync {
    /// Create a ZoneApi instance from configuration
    ///
    /// # Parameters
    ///
    /// - `config`: Configuration specific to this provider
    ///
    /// # Returns
    ///
    /// A boxed ZoneApi trait object
    fn create(
        &self,
        config: &crate::config::ProviderConfig,
    ) -> Result<Box<dyn ZoneApi>, crate::Error>;
}
