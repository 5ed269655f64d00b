use std::time::Duration;

use serde::Deserialize;

use crate::utils::constants::{
    DEFAULT_FALLBACK_SERVICE, DEFAULT_INTERFACE, DEFAULT_RENEWAL_BUFFER_SECS,
    DEFAULT_REQUEST_TIMEOUT_MS, DEFAULT_SERVICE,
};

/// ================================
/// Authenticator settings
/// ================================
#[derive(Debug, Deserialize, Clone)]
pub struct SettingsConfig {
    /// token is renewed when it expires within this window
    #[serde(default = "default_renewal_buffer_seconds")]
    pub renewal_buffer_seconds: u64,
    /// upper bound of a single identity exchange
    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,
    #[serde(default)]
    pub renewal_mode: RenewalMode,
    #[serde(default)]
    pub catalog: CatalogConfig,
    pub logging: Option<LoggingConfig>,
    #[serde(default)]
    pub metrics: MetricsConfig,
}

impl Default for SettingsConfig {
    fn default() -> Self {
        Self {
            renewal_buffer_seconds: DEFAULT_RENEWAL_BUFFER_SECS,
            request_timeout_ms: DEFAULT_REQUEST_TIMEOUT_MS,
            renewal_mode: RenewalMode::default(),
            catalog: CatalogConfig::default(),
            logging: None,
            metrics: MetricsConfig::default(),
        }
    }
}

impl SettingsConfig {
    pub fn renewal_buffer(&self) -> Duration {
        Duration::from_secs(self.renewal_buffer_seconds)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }
}

/// How concurrent callers renew an expiring token.
#[derive(Debug, Deserialize, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RenewalMode {
    /// every caller that sees a stale token issues its own exchange
    #[default]
    Concurrent,
    /// the first caller renews, the others wait for its result
    SingleFlight,
}

/// Which catalog service is looked up after issuance
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct CatalogConfig {
    #[serde(default = "default_service")]
    pub service: String,
    #[serde(default = "default_fallback_service")]
    pub fallback_service: String,
    #[serde(default = "default_interface")]
    pub interface: String,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            service: default_service(),
            fallback_service: default_fallback_service(),
            interface: default_interface(),
        }
    }
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct MetricsConfig {
    #[serde(default)]
    pub is_enabled: bool,
}

/// ================================
/// Logging
/// ================================
#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    pub level: String, // allowed: trace, debug, info, warn, error
    pub format: LogFormat,
}

impl LoggingConfig {
    pub fn new(level: String, format: LogFormat) -> Self {
        Self { level, format }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self::new("info".to_owned(), LogFormat::Compact)
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Json,
    Compact,
}

fn default_renewal_buffer_seconds() -> u64 {
    DEFAULT_RENEWAL_BUFFER_SECS
}

fn default_request_timeout_ms() -> u64 {
    DEFAULT_REQUEST_TIMEOUT_MS
}

fn default_service() -> String {
    DEFAULT_SERVICE.to_string()
}

fn default_fallback_service() -> String {
    DEFAULT_FALLBACK_SERVICE.to_string()
}

fn default_interface() -> String {
    DEFAULT_INTERFACE.to_string()
}
