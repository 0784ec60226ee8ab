//! CLI interface for histovar
//!
//! Provides subcommands for:
//! - `compute`: Calculate VaR for one position
//! - `validate`: Check data-source connectivity and tables
//! - `serve`: Run the web front-end
//! - `config`: Show effective configuration

mod compute;
mod serve;
mod validate;

pub use compute::ComputeArgs;
pub use serve::ServeArgs;
pub use validate::ValidateArgs;

use crate::config::Config;
use crate::resolver::PositionResolver;
use crate::source::{DataSource, RestSource, RestSourceConfig};
use clap::{Parser, Subcommand};
use std::sync::Arc;
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(name = "histovar")]
#[command(about = "Historical-simulation Value-at-Risk for single positions")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to configuration file
    #[arg(short, long, default_value = "config.toml")]
    pub config: String,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Calculate VaR for one position
    Compute(ComputeArgs),
    /// Check data-source connectivity and tables
    Validate(ValidateArgs),
    /// Run the web front-end
    Serve(ServeArgs),
    /// Show effective configuration
    Config,
}

/// Build the REST data source from configuration
pub(crate) fn build_source(config: &Config) -> Arc<dyn DataSource> {
    Arc::new(RestSource::new(RestSourceConfig {
        base_url: config.source.base_url.clone(),
        api_key: config.source.api_key.clone(),
        positions_table: config.source.positions_table.clone(),
        prices_table: config.source.prices_table.clone(),
        timeout: Duration::from_secs(config.source.timeout_secs),
    }))
}

/// Build the resolver over the configured source and policy
pub(crate) fn build_resolver(config: &Config, source: Arc<dyn DataSource>) -> Arc<PositionResolver> {
    Arc::new(PositionResolver::new(
        source,
        config.resolver.base_price_policy,
    ))
}
