//! Test doubles and common utilities for export contract tests
//!
//! This module provides a scripted ZoneApi that records calls without
//! touching the network.

#![allow(dead_code)]

use cft_core::error::{Error, Result};
use cft_core::model::{Action, PageRule, Target, Zone};
use cft_core::traits::ZoneApi;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// A ZoneApi that serves fixed zones and page rules
pub struct MockZoneApi {
    /// Zones returned by list_zones()
    zones: Vec<Zone>,
    /// Page rules per zone id
    rules: HashMap<String, Vec<PageRule>>,
    /// Zone ids whose listing fails
    failing: HashSet<String>,
    /// Call counter for list_page_rules()
    list_rules_call_count: Arc<AtomicUsize>,
    /// Zone ids passed to list_page_rules(), in call order
    listed_zone_ids: Arc<Mutex<Vec<String>>>,
}

impl MockZoneApi {
    pub fn new() -> Self {
        Self {
            zones: Vec::new(),
            rules: HashMap::new(),
            failing: HashSet::new(),
            list_rules_call_count: Arc::new(AtomicUsize::new(0)),
            listed_zone_ids: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Add a zone with its page rules
    pub fn with_zone(mut self, zone: Zone, rules: Vec<PageRule>) -> Self {
        self.rules.insert(zone.id.clone(), rules);
        self.zones.push(zone);
        self
    }

    /// Make list_page_rules() fail for this zone
    pub fn failing_zone(mut self, zone: Zone) -> Self {
        self.failing.insert(zone.id.clone());
        self.zones.push(zone);
        self
    }

    /// Get the number of times list_page_rules() was called
    pub fn list_rules_call_count(&self) -> usize {
        self.list_rules_call_count.load(Ordering::SeqCst)
    }

    /// Get the zone ids that were listed, in order
    pub fn listed_zone_ids(&self) -> Vec<String> {
        self.listed_zone_ids.lock().unwrap().clone()
    }

    /// Zones this API serves
    pub fn zones(&self) -> Vec<Zone> {
        self.zones.clone()
    }

    /// Create a new MockZoneApi that shares counters with an existing one
    pub fn sharing_counters_with(other: &Self) -> Self {
        Self {
            zones: other.zones.clone(),
            rules: other.rules.clone(),
            failing: other.failing.clone(),
            list_rules_call_count: Arc::clone(&other.list_rules_call_count),
            listed_zone_ids: Arc::clone(&other.listed_zone_ids),
        }
    }
}

#[async_trait::async_trait]
impl ZoneApi for MockZoneApi {
    async fn list_zones(&self, name: Option<&str>) -> Result<Vec<Zone>> {
        Ok(self
            .zones
            .iter()
            .filter(|z| name.is_none_or(|n| z.name == n))
            .cloned()
            .collect())
    }

    async fn list_page_rules(&self, zone_id: &str) -> Result<Vec<PageRule>> {
        self.list_rules_call_count.fetch_add(1, Ordering::SeqCst);
        self.listed_zone_ids
            .lock()
            .unwrap()
            .push(zone_id.to_string());

        if self.failing.contains(zone_id) {
            return Err(Error::provider("mock", format!("listing {} failed", zone_id)));
        }

        Ok(self.rules.get(zone_id).cloned().unwrap_or_default())
    }

    fn provider_name(&self) -> &'static str {
        "mock"
    }
}

/// Build a page rule with one URL target per pattern
pub fn page_rule(
    id: &str,
    targets: &[&str],
    priority: serde_json::Value,
    actions: Vec<Action>,
) -> PageRule {
    PageRule {
        id: id.to_string(),
        targets: targets.iter().map(|t| Target::url(*t)).collect(),
        actions,
        priority,
        status: "active".to_string(),
    }
}

/// Read a file to a string, panicking with the path on failure
pub fn read(path: impl AsRef<std::path::Path>) -> String {
    let path = path.as_ref();
    std::fs::read_to_string(path).unwrap_or_else(|e| panic!("read {}: {}", path.display(), e))
}
