// # cft-core
//
// Core library for turning existing Cloudflare resources into Terraform
// configuration.
//
// ## Architecture Overview
//
// - **Model**: Zone and page rule types, deserialized from API responses
// - **ZoneApi**: Trait for listing zones and page rules via a provider API
// - **HCL**: Value normalization and a structured block builder
// - **Resources**: Per-resource renderers (`cloudflare_page_rule`)
// - **Exporter**: Drives a run: fetch, render, write blocks and import scripts
// - **ApiRegistry**: Plugin-based registry for API implementations
//
// ## Design Principles
//
// 1. **Separation of Concerns**: Rendering is pure; I/O lives in the exporter
// 2. **Typed Values**: API JSON is narrowed into a tagged union before rendering
// 3. **Plugin-Based**: API clients are registered dynamically
// 4. **Library-First**: All core functionality can be used as a library

pub mod config;
pub mod error;
pub mod export;
pub mod hcl;
pub mod model;
pub mod registry;
pub mod resources;
pub mod traits;

// Re-export core types for convenience
pub use config::{CftConfig, ExportConfig, ProviderConfig};
pub use error::{Error, Result};
pub use export::{ExportSummary, Exporter, ZoneSummary};
pub use model::{Action, Constraint, PageRule, Target, Zone};
pub use registry::ApiRegistry;
pub use traits::{ZoneApi, ZoneApiFactory};
