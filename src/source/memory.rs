//! In-memory data source for tests and fixtures

use super::{DataSource, PositionRecord, PriceObservation, SourceError};
use async_trait::async_trait;

/// Data source backed by in-memory tables.
///
/// Returns its rows verbatim; useful for unit tests and offline runs.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    positions: Vec<PositionRecord>,
    prices: Vec<PriceObservation>,
}

impl MemorySource {
    /// Create a source over the given tables
    pub fn new(positions: Vec<PositionRecord>, prices: Vec<PriceObservation>) -> Self {
        Self { positions, prices }
    }
}

#[async_trait]
impl DataSource for MemorySource {
    async fn fetch_positions(&self) -> Result<Vec<PositionRecord>, SourceError> {
        Ok(self.positions.clone())
    }

    async fn fetch_prices(&self) -> Result<Vec<PriceObservation>, SourceError> {
        Ok(self.prices.clone())
    }
}
