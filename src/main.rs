use clap::Parser;
use histovar::cli::{Cli, Commands};
use histovar::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = Config::load(&cli.config).unwrap_or_else(|e| {
        eprintln!("Warning: Could not load config from {}: {}", cli.config, e);
        eprintln!("Using default configuration");
        toml::from_str(include_str!("../config.toml.example")).expect("Invalid default config")
    });

    // Initialize telemetry
    histovar::telemetry::init_telemetry(&config.telemetry)?;

    match cli.command {
        Commands::Compute(args) => {
            args.execute(&config).await?;
        }
        Commands::Validate(args) => {
            args.execute(&config).await?;
        }
        Commands::Serve(args) => {
            tracing::info!("Starting web server");
            args.execute(&config).await?;
        }
        Commands::Config => {
            println!("Current configuration:");
            println!("  Source: {}", config.source.base_url);
            println!(
                "  Tables: {} / {}",
                config.source.positions_table, config.source.prices_table
            );
            println!(
                "  Base price policy: {:?}",
                config.resolver.base_price_policy
            );
            println!(
                "  Default confidence: {}",
                config.resolver.default_confidence
            );
            println!("  Server: {}", config.server.bind_addr);
        }
    }

    Ok(())
}
