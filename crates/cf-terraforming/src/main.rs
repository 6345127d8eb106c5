// # cf-terraforming
//
// Thin command-line layer over cft-core:
// 1. Reading configuration from flags and environment variables
// 2. Initializing logging and the runtime
// 3. Registering API providers
// 4. Running the exporter
//
// ## Configuration
//
// Every flag has an environment fallback:
//
// - `--token` / `CLOUDFLARE_API_TOKEN`: Scoped API token
// - `--email` / `CLOUDFLARE_EMAIL`: Account email (with `--key`)
// - `--key` / `CLOUDFLARE_API_KEY`: Global API key (with `--email`)
// - `--account` / `CLOUDFLARE_ACCOUNT_ID`: Only list zones of this account
// - `--zone` / `CLOUDFLARE_ZONE`: Only export this zone
// - `--output-dir` / `CFT_OUTPUT_DIR`: Where per-zone directories are created
// - `--log-level` / `CFT_LOG_LEVEL`: trace, debug, info, warn, error
//
// ## Example
//
// ```bash
// export CLOUDFLARE_API_TOKEN=your_token
// cf-terraforming --zone example.com page-rule > page_rules.tf
// sh example.com/page-rules-example.com.sh
// ```
//
// Resource blocks are printed on stdout; logs go to stderr.

use anyhow::{Context, Result};
use cft_core::{ApiRegistry, CftConfig, ExportConfig, Exporter, ProviderConfig};
use clap::{Parser, Subcommand};
use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{Level, error, info, warn};
use tracing_subscriber::FmtSubscriber;

/// Exit codes for different termination scenarios
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CftExitCode {
    /// Export completed
    Success = 0,
    /// Configuration error or startup failure
    ConfigError = 1,
    /// Export failed (API or filesystem)
    RuntimeError = 2,
}

impl From<CftExitCode> for ExitCode {
    fn from(code: CftExitCode) -> Self {
        ExitCode::from(code as u8)
    }
}

/// Export existing Cloudflare resources as Terraform configuration
#[derive(Parser, Debug)]
#[command(name = "cf-terraforming", version, about)]
struct Cli {
    /// Cloudflare API token
    #[arg(short = 't', long, env = "CLOUDFLARE_API_TOKEN", hide_env_values = true, global = true)]
    token: Option<String>,

    /// Account email for global API key authentication
    #[arg(short = 'e', long, env = "CLOUDFLARE_EMAIL", global = true)]
    email: Option<String>,

    /// Global API key
    #[arg(short = 'k', long, env = "CLOUDFLARE_API_KEY", hide_env_values = true, global = true)]
    key: Option<String>,

    /// Only list zones belonging to this account
    #[arg(short = 'a', long, env = "CLOUDFLARE_ACCOUNT_ID", global = true)]
    account: Option<String>,

    /// Only export the zone with this name
    #[arg(short = 'z', long, env = "CLOUDFLARE_ZONE", global = true)]
    zone: Option<String>,

    /// Directory under which per-zone output directories are created
    #[arg(short = 'o', long, env = "CFT_OUTPUT_DIR", default_value = ".", global = true)]
    output_dir: PathBuf,

    /// Write resource blocks to <zone>/<prefix>-<zone>.tf instead of stdout
    #[arg(long, global = true)]
    resources_to_file: bool,

    /// Shorthand for --log-level debug
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "CFT_LOG_LEVEL", default_value = "info", global = true)]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
enum Commands {
    /// Import page rule data into Terraform
    #[command(name = "page-rule", alias = "page_rule")]
    PageRule,
}

impl Cli {
    /// Build and validate the library configuration
    fn to_config(&self) -> Result<CftConfig> {
        let config = CftConfig {
            provider: ProviderConfig::Cloudflare {
                api_token: self.token.clone(),
                api_email: self.email.clone(),
                api_key: self.key.clone(),
                account_id: self.account.clone(),
            },
            export: ExportConfig::new(&self.output_dir)
                .with_resources_to_file(self.resources_to_file),
            zone_filter: self.zone.clone(),
        };

        config.validate()?;
        Ok(config)
    }

    fn level(&self) -> Result<Level> {
        if self.verbose {
            return Ok(Level::DEBUG);
        }

        match self.log_level.to_lowercase().as_str() {
            "trace" => Ok(Level::TRACE),
            "debug" => Ok(Level::DEBUG),
            "info" => Ok(Level::INFO),
            "warn" => Ok(Level::WARN),
            "error" => Ok(Level::ERROR),
            other => anyhow::bail!(
                "Log level '{}' is not valid. \
                Valid levels: trace, debug, info, warn, error",
                other
            ),
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let log_level = match cli.level() {
        Ok(level) => level,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            return CftExitCode::ConfigError.into();
        }
    };

    // stdout carries the generated HCL
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .finish();

    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set tracing subscriber: {}", e);
        return CftExitCode::ConfigError.into();
    }

    let config = match cli.to_config() {
        Ok(config) => config,
        Err(e) => {
            error!("Configuration error: {}", e);
            return CftExitCode::ConfigError.into();
        }
    };

    let rt = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            error!("Failed to create tokio runtime: {}", e);
            return CftExitCode::RuntimeError.into();
        }
    };

    rt.block_on(async {
        match run(cli.command, config).await {
            Ok(()) => CftExitCode::Success,
            Err(e) => {
                error!("Export failed: {:#}", e);
                CftExitCode::RuntimeError
            }
        }
    })
    .into()
}

fn registry() -> ApiRegistry {
    let registry = ApiRegistry::new();

    #[cfg(feature = "cloudflare")]
    cft_provider_cloudflare::register(&registry);

    registry
}

/// Run one export
async fn run(command: Commands, config: CftConfig) -> Result<()> {
    let registry = registry();
    let api = registry
        .create_api(&config.provider)
        .context("Failed to create API client")?;

    let exporter = Exporter::new(api, config.export)?;

    match command {
        Commands::PageRule => {
            info!("Importing page rule data");

            let zones = exporter
                .zones(config.zone_filter.as_deref())
                .await
                .context("Failed to list zones")?;

            let stdout = std::io::stdout();
            let mut out = stdout.lock();
            let summary = exporter.run(&zones, &mut out).await?;
            out.flush()?;

            if summary.total_failed() > 0 {
                warn!(
                    "{} page rule(s) could not be rendered and were skipped",
                    summary.total_failed()
                );
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(args).expect("arguments parse")
    }

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_page_rule_subcommand_and_alias() {
        let cli = parse(&["cf-terraforming", "--token", "tok", "page-rule"]);
        assert_eq!(cli.command, Commands::PageRule);

        let cli = parse(&["cf-terraforming", "page_rule", "--token", "tok"]);
        assert_eq!(cli.command, Commands::PageRule);
    }

    #[test]
    fn test_to_config() {
        let cli = parse(&[
            "cf-terraforming",
            "--token",
            "tok",
            "--zone",
            "example.com",
            "--output-dir",
            "/tmp/out",
            "--resources-to-file",
            "page-rule",
        ]);

        let config = cli.to_config().unwrap();
        assert_eq!(config.zone_filter.as_deref(), Some("example.com"));
        assert_eq!(config.export.output_dir, PathBuf::from("/tmp/out"));
        assert!(config.export.resources_to_file);
        assert_eq!(config.provider.type_name(), "cloudflare");
    }

    #[test]
    fn test_incomplete_global_key_rejected() {
        let mut cli = parse(&["cf-terraforming", "page-rule"]);
        cli.token = None;
        cli.email = Some("ops@example.com".to_string());
        cli.key = None;
        cli.zone = None;
        cli.output_dir = PathBuf::from(".");
        assert!(cli.to_config().is_err());

        cli.key = Some("global".to_string());
        assert!(cli.to_config().is_ok());
    }

    #[test]
    fn test_log_level() {
        let mut cli = parse(&["cf-terraforming", "--log-level", "WARN", "page-rule"]);
        assert_eq!(cli.level().unwrap(), Level::WARN);

        cli.verbose = true;
        assert_eq!(cli.level().unwrap(), Level::DEBUG);

        let cli = parse(&["cf-terraforming", "--log-level", "loud", "page-rule"]);
        assert!(cli.level().is_err());
    }

    #[test]
    fn test_exit_codes() {
        assert_eq!(CftExitCode::Success as u8, 0);
        assert_eq!(CftExitCode::ConfigError as u8, 1);
        assert_eq!(CftExitCode::RuntimeError as u8, 2);
    }

    #[cfg(feature = "cloudflare")]
    #[test]
    fn test_cloudflare_registered() {
        assert!(registry().has_api("cloudflare"));
    }
}
