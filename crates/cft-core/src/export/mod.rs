//! Page rule exporter
//!
//! The Exporter drives one export run:
//! - Listing the page rules of each zone via [`ZoneApi`]
//! - Rendering each rule as a `cloudflare_page_rule` resource block
//! - Writing blocks to the primary output stream
//! - Appending one `terraform import` command per rule to the zone's script
//!
//! ## Output Layout
//!
//! ```text
//! <output_dir>/
//! └── <zone.name>/
//!     ├── page-rules-<zone.name>.sh    import commands, one per line
//!     └── page-rules-<zone.name>.tf    only with `resources_to_file`
//! ```
//!
//! ## Failure Policy
//!
//! | Failure                    | Effect                                        |
//! |----------------------------|-----------------------------------------------|
//! | listing a zone's rules     | logged, run stops, earlier files stay on disk |
//! | creating a directory/file  | run stops                                     |
//! | rendering one rule         | logged, rule skipped (no block, no import)    |
//!
//! Zones and rules are processed one at a time, in API order.

use crate::config::ExportConfig;
use crate::error::{Error, Result};
use crate::model::{PageRule, Zone};
use crate::resources::ResourceKind;
use crate::resources::page_rule::{import_command, render_page_rule};
use crate::traits::ZoneApi;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, error, info, warn};

/// Outcome of exporting one zone
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZoneSummary {
    /// Zone identifier
    pub zone_id: String,
    /// Zone name
    pub zone_name: String,
    /// Path of the import script
    pub script_path: PathBuf,
    /// Number of rules rendered and queued for import
    pub exported: usize,
    /// Ids of rules that failed to render
    pub failed: Vec<String>,
}

/// Outcome of a full export run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExportSummary {
    /// Per-zone results, in processing order
    pub zones: Vec<ZoneSummary>,
}

impl ExportSummary {
    /// Rules exported across all zones
    pub fn total_exported(&self) -> usize {
        self.zones.iter().map(|z| z.exported).sum()
    }

    /// Rules that failed to render across all zones
    pub fn total_failed(&self) -> usize {
        self.zones.iter().map(|z| z.failed.len()).sum()
    }
}

/// Page rule exporter
///
/// Holds the API client and output settings; zones are passed to
/// [`Exporter::run`] explicitly.
pub struct Exporter {
    /// API used to list zones and page rules
    api: Box<dyn ZoneApi>,

    /// Output settings
    config: ExportConfig,
}

impl Exporter {
    /// Create a new exporter
    ///
    /// # Returns
    ///
    /// - `Err(Error::Config)`: If the export configuration is invalid
    pub fn new(api: Box<dyn ZoneApi>, config: ExportConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { api, config })
    }

    /// List the zones to export
    ///
    /// With a `filter`, exactly the zone of that name is expected; an empty
    /// result is reported as [`Error::NotFound`].
    pub async fn zones(&self, filter: Option<&str>) -> Result<Vec<Zone>> {
        let zones = self.api.list_zones(filter).await?;

        if let Some(name) = filter
            && zones.is_empty()
        {
            return Err(Error::not_found(format!("zone {}", name)));
        }

        debug!(
            provider = self.api.provider_name(),
            count = zones.len(),
            "Listed zones"
        );
        Ok(zones)
    }

    /// Export the page rules of every zone in `zones`
    ///
    /// Resource blocks are written to `out` (or to per-zone `.tf` files when
    /// `resources_to_file` is set). Import scripts always go to
    /// `<output_dir>/<zone.name>/page-rules-<zone.name>.<ext>`.
    ///
    /// # Returns
    ///
    /// - `Ok(ExportSummary)`: Every zone was processed; individual rules may
    ///   still have failed to render
    /// - `Err(Error)`: A fetch or filesystem failure stopped the run
    pub async fn run<W: Write>(&self, zones: &[Zone], out: &mut W) -> Result<ExportSummary> {
        info!("Exporting page rules for {} zone(s)", zones.len());

        let mut summary = ExportSummary::default();
        for zone in zones {
            let zone_summary = self.export_zone(zone, out).await?;
            summary.zones.push(zone_summary);
        }

        info!(
            exported = summary.total_exported(),
            failed = summary.total_failed(),
            "Page rule export finished"
        );
        Ok(summary)
    }

    async fn export_zone<W: Write>(&self, zone: &Zone, out: &mut W) -> Result<ZoneSummary> {
        debug!(zone_id = %zone.id, zone_name = %zone.name, "Processing zone");

        let rules = match self.api.list_page_rules(&zone.id).await {
            Ok(rules) => rules,
            Err(e) => {
                error!(zone_id = %zone.id, zone_name = %zone.name, "Failed to list page rules: {}", e);
                return Err(e);
            }
        };

        let dir = self.zone_dir(zone)?;
        let script_path = dir.join(self.file_name(zone, &self.config.script_extension));
        let mut script = create_file(&script_path)?;

        let mut resources = if self.config.resources_to_file {
            Some(create_file(&dir.join(self.file_name(zone, "tf")))?)
        } else {
            None
        };

        let mut summary = ZoneSummary {
            zone_id: zone.id.clone(),
            zone_name: zone.name.clone(),
            script_path: script_path.clone(),
            exported: 0,
            failed: Vec::new(),
        };

        for rule in &rules {
            log_rule(rule);

            let block = match render_page_rule(rule, zone) {
                Ok(block) => block,
                Err(e) if e.is_render() => {
                    error!(rule_id = %rule.id, zone_id = %zone.id, "Failed to render page rule: {}", e);
                    warn!(
                        rule_id = %rule.id,
                        zone_id = %zone.id,
                        "Import command skipped for page rule that was not rendered"
                    );
                    summary.failed.push(rule.id.clone());
                    continue;
                }
                Err(e) => return Err(e),
            };

            let hcl = block.to_hcl();
            match resources.as_mut() {
                Some(file) => file.write_all(hcl.as_bytes())?,
                None => out.write_all(hcl.as_bytes())?,
            }
            writeln!(script, "{}", import_command(rule, zone))?;
            summary.exported += 1;
        }

        script.flush()?;
        if let Some(mut file) = resources {
            file.flush()?;
        }
        out.flush()?;

        info!(
            zone_name = %zone.name,
            exported = summary.exported,
            failed = summary.failed.len(),
            script = %script_path.display(),
            "Zone exported"
        );
        Ok(summary)
    }

    /// `<output_dir>/<zone.name>`, created if missing
    fn zone_dir(&self, zone: &Zone) -> Result<PathBuf> {
        validate_zone_name(&zone.name)?;

        let dir = self.config.output_dir.join(&zone.name);
        fs::create_dir_all(&dir).map_err(|e| with_path(e, &dir))?;
        Ok(dir)
    }

    fn file_name(&self, zone: &Zone, extension: &str) -> String {
        format!(
            "{}-{}.{}",
            ResourceKind::PageRule.file_prefix(),
            zone.name,
            extension
        )
    }
}

fn log_rule(rule: &PageRule) {
    let targets: Vec<&str> = rule
        .targets
        .iter()
        .map(|t| t.constraint.value.as_str())
        .collect();

    debug!(
        rule_id = %rule.id,
        targets = ?targets,
        priority = %rule.priority,
        status = %rule.status,
        "Processing page rule"
    );
}

/// Zone names become directory names; reject anything that would escape
/// the output directory.
fn validate_zone_name(name: &str) -> Result<()> {
    if name.is_empty() || name == "." || name == ".." || name.contains(['/', '\\']) {
        return Err(Error::invalid_input(format!(
            "zone name '{}' cannot be used as a directory name",
            name
        )));
    }
    Ok(())
}

fn create_file(path: &Path) -> Result<BufWriter<File>> {
    let file = File::create(path).map_err(|e| with_path(e, path))?;
    Ok(BufWriter::new(file))
}

fn with_path(err: std::io::Error, path: &Path) -> Error {
    Error::Io(std::io::Error::new(
        err.kind(),
        format!("{}: {}", path.display(), err),
    ))
}
