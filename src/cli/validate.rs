//! Validate command implementation

use crate::config::Config;
use clap::Args;

#[derive(Args, Debug)]
pub struct ValidateArgs {}

impl ValidateArgs {
    pub async fn execute(&self, config: &Config) -> anyhow::Result<()> {
        println!("Validating data source at {}", config.source.base_url);

        let source = super::build_source(config);
        let validation = source.validate().await;

        for msg in &validation.messages {
            println!("  {msg}");
        }

        if validation.is_ok() {
            println!("Validation passed");
            Ok(())
        } else {
            anyhow::bail!("validation failed")
        }
    }
}
