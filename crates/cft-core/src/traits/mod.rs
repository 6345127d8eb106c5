//! Core traits for cf-terraforming
//!
//! This module defines the abstract interfaces that all implementations must follow.
//!
//! - [`ZoneApi`]: Read zones and their resources from a provider API

pub mod zone_api;

pub use zone_api::{ZoneApi, ZoneApiFactory};
