//! CSV export of per-shock simulation detail

use crate::resolver::VarReport;
use std::path::Path;

/// Write the report's simulation rows (date, shock, simulated price,
/// simulated MtM, P&L) as a flat CSV file.
pub fn write_simulations_csv(report: &VarReport, path: impl AsRef<Path>) -> anyhow::Result<()> {
    let mut writer = csv::Writer::from_path(path.as_ref())?;

    for row in &report.simulations {
        writer.serialize(row)?;
    }
    writer.flush()?;

    tracing::info!(
        path = %path.as_ref().display(),
        rows = report.simulations.len(),
        "Simulations exported"
    );

    Ok(())
}
