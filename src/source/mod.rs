//! Data access layer
//!
//! Fetches the positions and price-history tables from a PostgREST-style
//! API. The `DataSource` trait is the seam the resolver is built against,
//! so tests can substitute an in-memory implementation.

mod memory;
mod rest;
mod types;

pub use memory::MemorySource;
pub use rest::{RestSource, RestSourceConfig};
pub use types::{PositionRecord, PriceObservation};

use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;

/// Data source errors
#[derive(Debug, Error)]
pub enum SourceError {
    /// Transport-level failure reaching the API
    #[error("data source unreachable: {0}")]
    Transport(#[from] reqwest::Error),
    /// Non-success HTTP status from the API
    #[error("data source returned HTTP {status} for table {table}: {body}")]
    Http {
        table: String,
        status: u16,
        body: String,
    },
}

/// Outcome of a connection/table validation pass
#[derive(Debug, Clone, Serialize)]
pub struct SourceValidation {
    pub connected: bool,
    pub positions_ok: bool,
    pub prices_ok: bool,
    pub messages: Vec<String>,
}

impl SourceValidation {
    /// True when the source and both tables are usable
    pub fn is_ok(&self) -> bool {
        self.connected && self.positions_ok && self.prices_ok
    }
}

/// Trait for tabular data source implementations
#[async_trait]
pub trait DataSource: Send + Sync {
    /// Fetch all position rows. An `Ok` with an empty vec means the
    /// table itself is empty or unreadable; callers treat that as a
    /// reportable error state, never as "no data, carry on".
    async fn fetch_positions(&self) -> Result<Vec<PositionRecord>, SourceError>;

    /// Fetch all price-history rows. Same empty-table contract.
    async fn fetch_prices(&self) -> Result<Vec<PriceObservation>, SourceError>;

    /// Validate connectivity and the presence of both tables.
    async fn validate(&self) -> SourceValidation {
        let mut v = SourceValidation {
            connected: false,
            positions_ok: false,
            prices_ok: false,
            messages: Vec::new(),
        };

        match self.fetch_positions().await {
            Ok(rows) if !rows.is_empty() => {
                v.connected = true;
                v.positions_ok = true;
                v.messages
                    .push(format!("positions table ok: {} rows", rows.len()));
            }
            Ok(_) => {
                v.connected = true;
                v.messages.push("positions table is empty".to_string());
            }
            Err(e) => {
                v.messages.push(format!("positions table failed: {e}"));
            }
        }

        match self.fetch_prices().await {
            Ok(rows) if !rows.is_empty() => {
                v.connected = true;
                v.prices_ok = true;
                v.messages
                    .push(format!("price table ok: {} rows", rows.len()));
            }
            Ok(_) => {
                v.connected = true;
                v.messages.push("price table is empty".to_string());
            }
            Err(e) => {
                v.messages.push(format!("price table failed: {e}"));
            }
        }

        v
    }
}
