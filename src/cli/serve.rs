//! Serve command implementation

use crate::config::Config;
use crate::server::{self, AppState};
use clap::Args;

#[derive(Args, Debug)]
pub struct ServeArgs {
    /// Override the configured bind address
    #[arg(short, long)]
    pub bind: Option<String>,
}

impl ServeArgs {
    pub async fn execute(&self, config: &Config) -> anyhow::Result<()> {
        let source = super::build_source(config);
        let resolver = super::build_resolver(config, source.clone());

        let state = AppState {
            resolver,
            source,
            default_confidence: config.resolver.default_confidence,
        };

        let bind_addr = self.bind.as_deref().unwrap_or(&config.server.bind_addr);
        server::serve(state, bind_addr).await
    }
}
