//! Configuration types for cf-terraforming
//!
//! This module defines all configuration structures used throughout the crate.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CftConfig {
    /// API provider configuration
    pub provider: ProviderConfig,

    /// Output settings
    #[serde(default)]
    pub export: ExportConfig,

    /// Only export the zone with this name
    #[serde(default)]
    pub zone_filter: Option<String>,
}

impl CftConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), crate::Error> {
        self.provider.validate()?;
        self.export.validate()?;

        if let Some(zone) = &self.zone_filter
            && zone.trim().is_empty()
        {
            return Err(crate::Error::config("Zone filter cannot be empty"));
        }

        Ok(())
    }
}

/// API provider configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ProviderConfig {
    /// Cloudflare API v4
    ///
    /// Either `api_token`, or both `api_email` and `api_key`, must be set.
    Cloudflare {
        /// Scoped API token
        api_token: Option<String>,
        /// Account email for legacy global key authentication
        api_email: Option<String>,
        /// Legacy global API key
        api_key: Option<String>,
        /// Restrict zone listing to this account
        account_id: Option<String>,
    },
}

impl ProviderConfig {
    /// Validate the provider configuration
    pub fn validate(&self) -> Result<(), crate::Error> {
        match self {
            ProviderConfig::Cloudflare {
                api_token,
                api_email,
                api_key,
                ..
            } => {
                let has_token = api_token.as_ref().is_some_and(|t| !t.is_empty());
                let has_email = api_email.as_ref().is_some_and(|e| !e.is_empty());
                let has_key = api_key.as_ref().is_some_and(|k| !k.is_empty());

                if has_token {
                    return Ok(());
                }
                match (has_email, has_key) {
                    (true, true) => Ok(()),
                    (true, false) => Err(crate::Error::config(
                        "Cloudflare API key is required when an email is set",
                    )),
                    (false, true) => Err(crate::Error::config(
                        "Cloudflare account email is required when an API key is set",
                    )),
                    (false, false) => Err(crate::Error::config(
                        "Cloudflare credentials missing: set an API token, or an email and API key",
                    )),
                }
            }
        }
    }

    /// Get the provider type name
    pub fn type_name(&self) -> &'static str {
        match self {
            ProviderConfig::Cloudflare { .. } => "cloudflare",
        }
    }
}

impl Default for ProviderConfig {
    fn default() -> Self {
        ProviderConfig::Cloudflare {
            api_token: None,
            api_email: None,
            api_key: None,
            account_id: None,
        }
    }
}

/// Output configuration for an export run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Directory under which per-zone directories are created
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// Extension of the import scripts
    #[serde(default = "default_script_extension")]
    pub script_extension: String,

    /// Write resource blocks to `<zone>/<prefix>-<zone>.tf` instead of the
    /// primary output stream
    #[serde(default)]
    pub resources_to_file: bool,
}

impl ExportConfig {
    /// Create an export configuration rooted at `output_dir`
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            ..Self::default()
        }
    }

    /// Route resource blocks into per-zone `.tf` files
    pub fn with_resources_to_file(mut self, enabled: bool) -> Self {
        self.resources_to_file = enabled;
        self
    }

    /// Validate the export configuration
    pub fn validate(&self) -> Result<(), crate::Error> {
        if self.output_dir.as_os_str().is_empty() {
            return Err(crate::Error::config("Output directory cannot be empty"));
        }

        if self.script_extension.is_empty()
            || self.script_extension.contains(['.', '/', '\\'])
        {
            return Err(crate::Error::config(format!(
                "Invalid script extension: '{}'",
                self.script_extension
            )));
        }

        Ok(())
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            script_extension: default_script_extension(),
            resources_to_file: false,
        }
    }
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(".")
}

fn default_script_extension() -> String {
    "sh".to_string()
}
