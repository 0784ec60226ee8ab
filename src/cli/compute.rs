//! Compute command implementation

use crate::config::Config;
use crate::export::write_simulations_csv;
use crate::resolver::{format_date, VarReport};
use clap::Args;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub struct ComputeArgs {
    /// Analysis date (DD/MM/YYYY or YYYY-MM-DD); defaults to the most
    /// recent position date
    #[arg(short, long)]
    pub date: Option<String>,

    /// Asset code
    #[arg(short, long, default_value = "AAPL")]
    pub asset: String,

    /// Confidence level in (0, 1); defaults to the configured value
    #[arg(long)]
    pub confidence: Option<f64>,

    /// Output path for the simulation detail CSV
    #[arg(short, long, default_value = "historical_var_simulations.csv")]
    pub output: PathBuf,

    /// Skip writing the simulation CSV
    #[arg(long)]
    pub no_export: bool,
}

impl ComputeArgs {
    pub async fn execute(&self, config: &Config) -> anyhow::Result<()> {
        let confidence = self
            .confidence
            .unwrap_or(config.resolver.default_confidence);
        if !(0.0 < confidence && confidence < 1.0) {
            anyhow::bail!("confidence must be strictly between 0 and 1, got {confidence}");
        }

        let source = super::build_source(config);
        let resolver = super::build_resolver(config, source);

        let report = resolver
            .resolve_and_compute(self.date.as_deref(), &self.asset, confidence)
            .await?;

        print_report(&report);

        if !self.no_export {
            write_simulations_csv(&report, &self.output)?;
            println!("Simulations written to {}", self.output.display());
        }

        Ok(())
    }
}

fn print_report(r: &VarReport) {
    let conf_pct = r.confidence * 100.0;
    println!("{}", "=".repeat(70));
    println!("VaR - Historical Simulation");
    println!("{}", "=".repeat(70));
    println!("Asset: {}", r.entity_id);
    println!("Analysis date: {}", format_date(r.analysis_date));
    println!("Nominal (position): {} units", r.nominal);
    println!("Confidence: {conf_pct:.0}%");
    println!(
        "Price range: {} to {}",
        format_date(r.first_date),
        format_date(r.last_date)
    );
    println!("Historical prices: {}", r.num_prices);
    println!("Shocks: {}", r.num_shocks);
    println!("{}", "-".repeat(70));
    println!("Base price: ${:.2}", r.result.base_price);
    println!("MtM base: ${:.2}", r.result.mtm_base);
    println!("VaR ({conf_pct:.0}%): ${:.2}", r.result.var);
    println!("P&L percentile: ${:.2}", r.result.percentile_value);
    println!("{}", "=".repeat(70));
}
