//! Configuration types for histovar

use crate::resolver::BasePricePolicy;
use serde::Deserialize;

/// Root configuration structure
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub source: SourceConfig,
    #[serde(default)]
    pub resolver: ResolverConfig,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

/// Data source configuration
#[derive(Debug, Clone, Deserialize)]
pub struct SourceConfig {
    /// Base URL of the PostgREST endpoint
    pub base_url: String,
    /// API key (publishable)
    pub api_key: String,
    /// Positions table name
    #[serde(default = "default_positions_table")]
    pub positions_table: String,
    /// Price-history table name
    #[serde(default = "default_prices_table")]
    pub prices_table: String,
    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

/// Resolver configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ResolverConfig {
    /// Base-price selection policy
    #[serde(default)]
    pub base_price_policy: BasePricePolicy,
    /// Confidence level used when the caller does not supply one
    #[serde(default = "default_confidence")]
    pub default_confidence: f64,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            base_price_policy: BasePricePolicy::default(),
            default_confidence: default_confidence(),
        }
    }
}

/// Web server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Socket address to bind, e.g. "0.0.0.0:5000"
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
        }
    }
}

/// Telemetry configuration
#[derive(Debug, Clone, Deserialize)]
pub struct TelemetryConfig {
    /// Log level when RUST_LOG is unset
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

fn default_positions_table() -> String {
    "RV.Positions".to_string()
}

fn default_prices_table() -> String {
    "RV.Price".to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_confidence() -> f64 {
    0.95
}

fn default_bind_addr() -> String {
    "0.0.0.0:5000".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<std::path::Path>) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }
}
