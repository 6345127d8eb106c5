//! Resource model as returned by the Cloudflare API
//!
//! These types are read-only inputs to the exporter. They deserialize
//! straight from API responses; JSON objects keep their insertion order so
//! targets, actions and action mappings render in the order the API returned
//! them.

use serde::{Deserialize, Serialize};

/// A DNS zone, the container that owns page rules
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Zone {
    /// Zone identifier
    pub id: String,
    /// Zone name (e.g., "example.com"), also used as the output directory
    pub name: String,
}

impl Zone {
    /// Create a new zone
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// A page rule attached to a zone
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageRule {
    /// Page rule identifier
    pub id: String,

    /// URL patterns this rule applies to
    #[serde(default)]
    pub targets: Vec<Target>,

    /// Effects applied when a target matches
    #[serde(default)]
    pub actions: Vec<Action>,

    /// Rule priority
    ///
    /// Kept as raw JSON: depending on the source it is a number or a
    /// string, and the rendered output quotes it accordingly.
    #[serde(default)]
    pub priority: serde_json::Value,

    /// Rule status ("active" or "disabled")
    #[serde(default)]
    pub status: String,
}

/// A page rule target
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Target {
    /// Target kind, "url" for every rule the API currently returns
    #[serde(default = "default_target_kind")]
    pub target: String,

    /// Matching constraint
    pub constraint: Constraint,
}

impl Target {
    /// Create a URL target matching `pattern`
    pub fn url(pattern: impl Into<String>) -> Self {
        Self {
            target: default_target_kind(),
            constraint: Constraint {
                operator: "matches".to_string(),
                value: pattern.into(),
            },
        }
    }
}

/// Constraint of a page rule target
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Constraint {
    /// Match operator (e.g., "matches")
    #[serde(default)]
    pub operator: String,

    /// URL pattern
    pub value: String,
}

/// A single page rule action
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Action {
    /// Action type (e.g., "forwarding_url", "cache_level")
    pub id: String,

    /// Action value: a scalar, or a mapping of keys to scalars
    #[serde(default)]
    pub value: serde_json::Value,
}

impl Action {
    /// Create a new action
    pub fn new(id: impl Into<String>, value: serde_json::Value) -> Self {
        Self {
            id: id.into(),
            value,
        }
    }
}

fn default_target_kind() -> String {
    "url".to_string()
}
