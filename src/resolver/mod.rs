//! Position resolver
//!
//! Orchestrates one VaR request: normalizes the analysis date, selects
//! the nominal and the eligible price sub-series from the fetched
//! tables, picks the base price per the configured policy, and hands
//! the numeric series to the engine. Its selection rules are what make
//! the resulting VaR figure mean what it claims to mean.

mod dates;

pub use dates::{format_date, parse_analysis_date};

use crate::engine::{compute_historical_var, EngineError, VarResult};
use crate::source::{DataSource, PriceObservation};
use chrono::NaiveDate;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;

/// How the base price for P&L projection is chosen.
///
/// The two variants carry different business meanings: valuing the
/// position at the latest quote available up to the analysis date,
/// versus insisting on a quote dated exactly on it. A deployment picks
/// one explicitly; they are never mixed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BasePricePolicy {
    /// Use the most recent price at or before the analysis date
    #[default]
    LatestAvailable,
    /// Require a price observation exactly on the analysis date
    ExactDateRequired,
}

/// Resolver errors
#[derive(Debug, Error)]
pub enum ResolveError {
    /// Analysis date could not be parsed in either accepted format
    #[error("invalid analysis date '{input}': use DD/MM/YYYY or YYYY-MM-DD")]
    InvalidDate { input: String },
    /// No position row for the entity on the analysis date
    #[error("no position for {} on {}{}", .entity_id, .date, available_hint(.available))]
    NoPosition {
        entity_id: String,
        date: String,
        /// Entities that do have a position on that date
        available: Vec<String>,
    },
    /// Fewer than two prices at or before the analysis date
    #[error("insufficient price history for {entity_id} up to {date}: {count} price(s), need at least 2")]
    InsufficientPriceHistory {
        entity_id: String,
        date: String,
        count: usize,
    },
    /// Exact-date policy is active and no price exists on the analysis date
    #[error("no price observation for {entity_id} exactly on {date}")]
    NoExactPrice { entity_id: String, date: String },
    /// A price in the selected sub-series is zero or negative
    #[error("invalid price {price} for {entity_id} on {date}: prices must be positive")]
    InvalidPrice {
        entity_id: String,
        date: String,
        price: Decimal,
    },
    /// The data source returned nothing usable
    #[error("data source unavailable: {table} table is empty or unreachable")]
    DataSourceUnavailable { table: &'static str },
    /// Engine rejected the series
    #[error(transparent)]
    Engine(#[from] EngineError),
}

fn available_hint(available: &[String]) -> String {
    if available.is_empty() {
        String::new()
    } else {
        format!(". Entities with positions on that date: {}", available.join(", "))
    }
}

/// One row of the per-shock simulation detail, dated by the later
/// price of each shock pair.
#[derive(Debug, Clone, Serialize)]
pub struct SimulationRow {
    pub date: NaiveDate,
    pub shock: f64,
    pub simulated_price: f64,
    pub mtm_simulated: f64,
    pub pnl: f64,
}

/// Engine output wrapped with the request metadata callers render.
#[derive(Debug, Clone, Serialize)]
pub struct VarReport {
    pub entity_id: String,
    pub analysis_date: NaiveDate,
    pub nominal: Decimal,
    pub confidence: f64,
    /// Oldest date in the selected price sub-series
    pub first_date: NaiveDate,
    /// Newest date in the selected price sub-series
    pub last_date: NaiveDate,
    pub num_prices: usize,
    pub num_shocks: usize,
    pub result: VarResult,
    pub simulations: Vec<SimulationRow>,
}

/// Resolves a (date, entity) request against the data source and runs
/// the VaR engine over the selected series.
pub struct PositionResolver {
    source: Arc<dyn DataSource>,
    policy: BasePricePolicy,
}

impl PositionResolver {
    /// Create a resolver over a data source with the given base-price policy
    pub fn new(source: Arc<dyn DataSource>, policy: BasePricePolicy) -> Self {
        Self { source, policy }
    }

    /// The configured base-price policy
    pub fn policy(&self) -> BasePricePolicy {
        self.policy
    }

    /// Distinct entity ids present in the positions table, sorted.
    /// Used by the web form's asset dropdown.
    pub async fn known_entities(&self) -> Result<Vec<String>, ResolveError> {
        let positions = self.source.fetch_positions().await.map_err(|e| {
            tracing::warn!(error = %e, "Failed to fetch positions");
            ResolveError::DataSourceUnavailable { table: "positions" }
        })?;

        let mut entities: Vec<String> = positions.into_iter().map(|p| p.entity_id).collect();
        entities.sort();
        entities.dedup();
        Ok(entities)
    }

    /// Resolve the request and compute VaR.
    ///
    /// `analysis_date` accepts `DD/MM/YYYY` or ISO and defaults to the
    /// most recent position date when omitted.
    pub async fn resolve_and_compute(
        &self,
        analysis_date: Option<&str>,
        entity_id: &str,
        confidence: f64,
    ) -> Result<VarReport, ResolveError> {
        let positions = self.source.fetch_positions().await.map_err(|e| {
            tracing::warn!(error = %e, "Failed to fetch positions");
            ResolveError::DataSourceUnavailable { table: "positions" }
        })?;
        if positions.is_empty() {
            return Err(ResolveError::DataSourceUnavailable { table: "positions" });
        }

        let prices = self.source.fetch_prices().await.map_err(|e| {
            tracing::warn!(error = %e, "Failed to fetch prices");
            ResolveError::DataSourceUnavailable { table: "prices" }
        })?;
        if prices.is_empty() {
            return Err(ResolveError::DataSourceUnavailable { table: "prices" });
        }

        let analysis_date = match analysis_date {
            Some(input) => {
                parse_analysis_date(input).ok_or_else(|| ResolveError::InvalidDate {
                    input: input.to_string(),
                })?
            }
            // default: most recent position date (positions is non-empty)
            None => positions
                .iter()
                .map(|p| p.date)
                .max()
                .ok_or(ResolveError::DataSourceUnavailable { table: "positions" })?,
        };

        // Nominal: first matching row wins when the table holds duplicates
        let position = positions
            .iter()
            .find(|p| p.date == analysis_date && p.entity_id == entity_id)
            .ok_or_else(|| {
                let mut available: Vec<String> = positions
                    .iter()
                    .filter(|p| p.date == analysis_date)
                    .map(|p| p.entity_id.clone())
                    .collect();
                available.sort();
                available.dedup();
                ResolveError::NoPosition {
                    entity_id: entity_id.to_string(),
                    date: format_date(analysis_date),
                    available,
                }
            })?;

        // Eligible sub-series: prices at or before the analysis date,
        // chronological order
        let mut series: Vec<PriceObservation> = prices
            .into_iter()
            .filter(|p| p.date <= analysis_date && p.entity_id == entity_id)
            .collect();
        series.sort_by_key(|p| p.date);

        if series.len() < 2 {
            return Err(ResolveError::InsufficientPriceHistory {
                entity_id: entity_id.to_string(),
                date: format_date(analysis_date),
                count: series.len(),
            });
        }

        let price_values = self.validated_prices(&series)?;

        let base_price = match self.policy {
            BasePricePolicy::LatestAvailable => None,
            BasePricePolicy::ExactDateRequired => {
                let exact = series
                    .iter()
                    .zip(&price_values)
                    .rev()
                    .find(|(obs, _)| obs.date == analysis_date)
                    .map(|(_, price)| *price)
                    .ok_or_else(|| ResolveError::NoExactPrice {
                        entity_id: entity_id.to_string(),
                        date: format_date(analysis_date),
                    })?;
                Some(exact)
            }
        };

        let nominal_f = position.nominal.to_f64().unwrap_or_default();
        let result = compute_historical_var(&price_values, nominal_f, confidence, base_price)?;

        tracing::info!(
            entity = %entity_id,
            date = %analysis_date,
            prices = price_values.len(),
            var = result.var,
            "VaR computed"
        );

        let simulations = series
            .iter()
            .skip(1)
            .zip(result.shocks.iter().enumerate())
            .map(|(obs, (i, shock))| SimulationRow {
                date: obs.date,
                shock: *shock,
                simulated_price: result.simulated_prices[i],
                mtm_simulated: result.mtm_simulated[i],
                pnl: result.pnl[i],
            })
            .collect();

        Ok(VarReport {
            entity_id: entity_id.to_string(),
            analysis_date,
            nominal: position.nominal,
            confidence,
            first_date: series[0].date,
            last_date: series[series.len() - 1].date,
            num_prices: price_values.len(),
            num_shocks: result.shocks.len(),
            result,
            simulations,
        })
    }

    /// Reject non-positive prices and convert the series to f64.
    ///
    /// Without this guard a zero price would flow through the engine as
    /// an Inf/NaN shock; the resolver turns that into a reported error.
    fn validated_prices(&self, series: &[PriceObservation]) -> Result<Vec<f64>, ResolveError> {
        series
            .iter()
            .map(|obs| {
                if obs.price <= Decimal::ZERO {
                    return Err(ResolveError::InvalidPrice {
                        entity_id: obs.entity_id.clone(),
                        date: format_date(obs.date),
                        price: obs.price,
                    });
                }
                obs.price
                    .to_f64()
                    .ok_or_else(|| ResolveError::InvalidPrice {
                        entity_id: obs.entity_id.clone(),
                        date: format_date(obs.date),
                        price: obs.price,
                    })
            })
            .collect()
    }
}
