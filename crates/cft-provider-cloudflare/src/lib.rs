// # Cloudflare Zone API
//
// This crate provides the Cloudflare API v4 implementation of `ZoneApi`.
//
// ## Scope
//
// - Lists zones (paginated, optionally filtered by name and account)
// - Lists page rules of a zone
// - Maps HTTP status codes and API envelope errors to `cft_core::Error`
// - NO retry, backoff or caching: one listing per call
//
// ## Authentication
//
// - Scoped API token: `Authorization: Bearer <token>`
// - Legacy global key: `X-Auth-Email` + `X-Auth-Key`
//
// Credentials never appear in logs or `Debug` output.
//
// ## API Reference
//
// - Cloudflare API v4: https://developers.cloudflare.com/api/
// - List Zones: GET `/zones?page=N&per_page=50&name=...&account.id=...`
// - List Page Rules: GET `/zones/:zone_id/pagerules`

use async_trait::async_trait;
use cft_core::config::ProviderConfig;
use cft_core::model::{PageRule, Zone};
use cft_core::traits::{ZoneApi, ZoneApiFactory};
use cft_core::{ApiRegistry, Error, Result};
use serde_json::Value;
use std::time::Duration;

/// Cloudflare API base URL
const CLOUDFLARE_API_BASE: &str = "https://api.cloudflare.com/client/v4";

/// Default HTTP timeout for API requests (30 seconds)
const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(30);

/// Page size for zone listing
const ZONES_PER_PAGE: u32 = 50;

/// Provider name used in errors and the registry
const PROVIDER: &str = "cloudflare";

/// API credentials
#[derive(Clone, PartialEq, Eq)]
pub enum Credentials {
    /// Scoped API token
    Token(String),
    /// Account email plus global API key
    GlobalKey {
        /// Account email
        email: String,
        /// Global API key
        key: String,
    },
}

// Custom Debug implementation that hides secrets
impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Credentials::Token(_) => f.debug_tuple("Token").field(&"<REDACTED>").finish(),
            Credentials::GlobalKey { email, .. } => f
                .debug_struct("GlobalKey")
                .field("email", email)
                .field("key", &"<REDACTED>")
                .finish(),
        }
    }
}

impl Credentials {
    fn validate(&self) -> Result<()> {
        match self {
            Credentials::Token(token) if token.is_empty() => {
                Err(Error::config("Cloudflare API token cannot be empty"))
            }
            Credentials::GlobalKey { email, key } if email.is_empty() || key.is_empty() => Err(
                Error::config("Cloudflare email and API key cannot be empty"),
            ),
            _ => Ok(()),
        }
    }
}

/// Cloudflare API v4 client
///
/// Stateless: every call issues fresh requests and returns the parsed
/// result. Errors are returned as-is; the caller decides what to do.
pub struct CloudflareApi {
    /// API credentials
    /// ⚠️ NEVER log these
    credentials: Credentials,

    /// Restrict zone listing to this account
    account_id: Option<String>,

    /// API base URL (overridable for tests and proxies)
    base_url: String,

    /// HTTP client for API requests
    client: reqwest::Client,
}

impl std::fmt::Debug for CloudflareApi {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CloudflareApi")
            .field("credentials", &self.credentials)
            .field("account_id", &self.account_id)
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl CloudflareApi {
    /// Create a new Cloudflare API client
    ///
    /// # Returns
    ///
    /// - `Err(Error::Config)`: If the credentials are empty
    /// - `Err(Error::Http)`: If the HTTP client cannot be built
    pub fn new(credentials: Credentials, account_id: Option<String>) -> Result<Self> {
        credentials.validate()?;

        let client = reqwest::Client::builder()
            .timeout(DEFAULT_HTTP_TIMEOUT)
            .user_agent(concat!("cf-terraforming/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| Error::http(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            credentials,
            account_id,
            base_url: CLOUDFLARE_API_BASE.to_string(),
            client,
        })
    }

    /// Use a different API base URL
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// API base URL in use
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.credentials {
            Credentials::Token(token) => request.bearer_auth(token),
            Credentials::GlobalKey { email, key } => request
                .header("X-Auth-Email", email)
                .header("X-Auth-Key", key),
        }
    }

    /// GET a path and return the parsed envelope
    async fn get(&self, path: &str, query: &[(&str, String)], context: &str) -> Result<Value> {
        let url = format!("{}{}", self.base_url, path);
        tracing::debug!("GET {}", url);

        let response = self
            .authorize(self.client.get(&url))
            .header("Content-Type", "application/json")
            .query(query)
            .send()
            .await
            .map_err(|e| Error::http(format!("HTTP request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unable to read error response".to_string());
            return Err(status_error(status.as_u16(), &error_text, context));
        }

        let json: Value = response
            .json()
            .await
            .map_err(|e| Error::provider(PROVIDER, format!("Failed to parse response: {}", e)))?;

        check_envelope(&json, context)?;
        Ok(json)
    }
}

#[async_trait]
impl ZoneApi for CloudflareApi {
    /// List zones, following pagination until `result_info.total_pages`
    async fn list_zones(&self, name: Option<&str>) -> Result<Vec<Zone>> {
        let mut zones = Vec::new();
        let mut page: u64 = 1;

        loop {
            let mut query = vec![
                ("page", page.to_string()),
                ("per_page", ZONES_PER_PAGE.to_string()),
            ];
            if let Some(name) = name {
                query.push(("name", name.to_string()));
            }
            if let Some(account_id) = &self.account_id {
                query.push(("account.id", account_id.clone()));
            }

            let json = self.get("/zones", &query, "Zone listing").await?;
            let (batch, total_pages) = parse_zones(&json)?;
            let empty = batch.is_empty();
            zones.extend(batch);

            tracing::debug!(page, total_pages, count = zones.len(), "Fetched zone page");

            if empty || page >= total_pages {
                break;
            }
            page += 1;
        }

        Ok(zones)
    }

    async fn list_page_rules(&self, zone_id: &str) -> Result<Vec<PageRule>> {
        let path = format!("/zones/{}/pagerules", zone_id);
        let json = self.get(&path, &[], "Page rule listing").await?;
        let rules = parse_page_rules(&json)?;

        tracing::debug!(zone_id, count = rules.len(), "Fetched page rules");
        Ok(rules)
    }

    fn provider_name(&self) -> &'static str {
        PROVIDER
    }
}

/// Map a non-success HTTP status to an error
fn status_error(status: u16, body: &str, context: &str) -> Error {
    match status {
        401 | 403 => Error::auth(format!(
            "Invalid API credentials or insufficient permissions. Status: {}",
            status
        )),
        404 => Error::not_found(format!("{}: {}", context, body)),
        429 => Error::rate_limited(format!(
            "Rate limit exceeded. Please retry later. Status: {}",
            status
        )),
        500..=599 => Error::provider(
            PROVIDER,
            format!("Cloudflare server error (transient): {} - {}", status, body),
        ),
        _ => Error::provider(
            PROVIDER,
            format!("{} failed: {} - {}", context, status, body),
        ),
    }
}

/// Reject envelopes with `success: false`
///
/// The first entry of `errors` becomes the message.
fn check_envelope(json: &Value, context: &str) -> Result<()> {
    if json["success"].as_bool() != Some(false) {
        return Ok(());
    }

    let message = json["errors"]
        .as_array()
        .and_then(|errors| errors.first())
        .map(|e| match (e["code"].as_i64(), e["message"].as_str()) {
            (Some(code), Some(msg)) => format!("{} (code {})", msg, code),
            (None, Some(msg)) => msg.to_string(),
            _ => e.to_string(),
        })
        .unwrap_or_else(|| "unknown error".to_string());

    Err(Error::provider(
        PROVIDER,
        format!("{} failed: {}", context, message),
    ))
}

/// Parse a zone listing page
///
/// # Returns
///
/// The zones on this page and `result_info.total_pages` (1 when absent)
fn parse_zones(json: &Value) -> Result<(Vec<Zone>, u64)> {
    let result = json
        .get("result")
        .filter(|r| r.is_array())
        .ok_or_else(|| Error::provider(PROVIDER, "Invalid response format: result is not an array"))?;

    let zones: Vec<Zone> = serde_json::from_value(result.clone())
        .map_err(|e| Error::provider(PROVIDER, format!("Invalid zone in response: {}", e)))?;

    let total_pages = json["result_info"]["total_pages"].as_u64().unwrap_or(1);
    Ok((zones, total_pages))
}

/// Parse a page rule listing
fn parse_page_rules(json: &Value) -> Result<Vec<PageRule>> {
    let result = json
        .get("result")
        .filter(|r| r.is_array())
        .ok_or_else(|| Error::provider(PROVIDER, "Invalid response format: result is not an array"))?;

    serde_json::from_value(result.clone())
        .map_err(|e| Error::provider(PROVIDER, format!("Invalid page rule in response: {}", e)))
}

/// Factory for creating Cloudflare API clients
pub struct CloudflareFactory;

impl ZoneApiFactory for CloudflareFactory {
    fn create(&self, config: &ProviderConfig) -> Result<Box<dyn ZoneApi>> {
        config.validate()?;

        let ProviderConfig::Cloudflare {
            api_token,
            api_email,
            api_key,
            account_id,
        } = config;

        let credentials = match (api_token, api_email, api_key) {
            (Some(token), _, _) if !token.is_empty() => Credentials::Token(token.clone()),
            (_, Some(email), Some(key)) => Credentials::GlobalKey {
                email: email.clone(),
                key: key.clone(),
            },
            _ => return Err(Error::config("Cloudflare credentials missing")),
        };

        Ok(Box::new(CloudflareApi::new(credentials, account_id.clone())?))
    }
}

/// Register the Cloudflare API with a registry
///
/// # Example
///
/// ```rust
/// use cft_core::ApiRegistry;
///
/// let registry = ApiRegistry::new();
/// cft_provider_cloudflare::register(&registry);
/// assert!(registry.has_api("cloudflare"));
/// ```
pub fn register(registry: &ApiRegistry) {
    registry.register_api(PROVIDER, Box::new(CloudflareFactory));
}
