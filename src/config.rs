//! Source configuration
//!
//! Settings for reaching the log service: endpoint, HTTP behavior and
//! static headers. Loadable from YAML or JSON files.

use crate::error::{Error, Result, ResultExt};
use crate::http::{HttpClientConfig, RateLimiterConfig};
use crate::types::{BackoffType, StringMap};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use url::Url;

/// Placeholder replaced by the region in endpoint templates
pub const REGION_PLACEHOLDER: &str = "{region}";

/// Default endpoint template for CloudWatch Logs
pub const DEFAULT_ENDPOINT: &str = "https://logs.{region}.amazonaws.com/";

// ============================================================================
// Source Config
// ============================================================================

/// Configuration for the HTTP page source
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SourceConfig {
    /// Endpoint URL or template containing `{region}`
    #[serde(default)]
    pub endpoint: Option<String>,

    /// HTTP client settings
    #[serde(default)]
    pub http: HttpConfig,

    /// Static headers sent with every request
    #[serde(default)]
    pub headers: StringMap,
}

impl SourceConfig {
    /// Load configuration from a YAML or JSON file (by extension)
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;

        let is_json = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("json"));

        if is_json {
            Ok(serde_json::from_str(&content)?)
        } else {
            Ok(serde_yaml::from_str(&content)?)
        }
    }

    /// Override the endpoint
    #[must_use]
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    /// Resolve the endpoint URL for a region
    pub fn endpoint_for(&self, region: &str) -> Result<String> {
        if region.is_empty() {
            return Err(Error::config("region must not be empty"));
        }
        let template = self.endpoint.as_deref().unwrap_or(DEFAULT_ENDPOINT);
        let endpoint = template.replace(REGION_PLACEHOLDER, region);

        let url = Url::parse(&endpoint)?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(Error::config(format!(
                "endpoint must use http or https, got '{}'",
                url.scheme()
            )));
        }
        Ok(url.to_string())
    }

    /// Build the HTTP client configuration
    pub fn http_client_config(&self) -> HttpClientConfig {
        let http = &self.http;
        let mut builder = HttpClientConfig::builder()
            .timeout(Duration::from_secs(http.timeout_seconds))
            .max_retries(http.max_retries)
            .backoff(
                http.retry_backoff.backoff_type,
                Duration::from_millis(http.retry_backoff.initial_ms),
                Duration::from_millis(http.retry_backoff.max_ms),
            );

        builder = match &http.rate_limit {
            Some(limit) => builder.rate_limit(RateLimiterConfig::new(
                limit.requests_per_second,
                limit.burst_size,
            )),
            None => builder.no_rate_limit(),
        };

        for (key, value) in &self.headers {
            builder = builder.header(key, value);
        }

        builder.build()
    }
}

// ============================================================================
// HTTP Config
// ============================================================================

/// HTTP client settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,

    /// Maximum number of retries
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// Retry backoff configuration
    #[serde(default)]
    pub retry_backoff: BackoffConfig,

    /// Rate limiting configuration (`null` disables it)
    #[serde(default = "default_rate_limit")]
    pub rate_limit: Option<RateLimitConfig>,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: default_timeout(),
            max_retries: default_max_retries(),
            retry_backoff: BackoffConfig::default(),
            rate_limit: default_rate_limit(),
        }
    }
}

fn default_timeout() -> u64 {
    30
}

fn default_max_retries() -> u32 {
    3
}

fn default_rate_limit() -> Option<RateLimitConfig> {
    Some(RateLimitConfig::default())
}

/// Backoff configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BackoffConfig {
    /// Type of backoff
    #[serde(rename = "type", default)]
    pub backoff_type: BackoffType,

    /// Initial delay in milliseconds
    #[serde(default = "default_initial_ms")]
    pub initial_ms: u64,

    /// Maximum delay in milliseconds
    #[serde(default = "default_max_ms")]
    pub max_ms: u64,
}

impl Default for BackoffConfig {
    fn default() -> Self {
        Self {
            backoff_type: BackoffType::Exponential,
            initial_ms: default_initial_ms(),
            max_ms: default_max_ms(),
        }
    }
}

fn default_initial_ms() -> u64 {
    100
}

fn default_max_ms() -> u64 {
    20_000
}

/// Rate limiting configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateLimitConfig {
    /// Requests per second limit
    #[serde(default = "default_rps")]
    pub requests_per_second: u32,

    /// Burst size
    #[serde(default = "default_rps")]
    pub burst_size: u32,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            requests_per_second: default_rps(),
            burst_size: default_rps(),
        }
    }
}

fn default_rps() -> u32 {
    5
}
