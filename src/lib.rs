//! histovar: Historical-simulation Value-at-Risk for single positions
//!
//! This library provides the core components for:
//! - Pure historical-simulation VaR math over price series
//! - Position resolution (date normalization, nominal lookup,
//!   price sub-series selection, base-price policy)
//! - Tabular data access from a PostgREST-style API
//! - CSV export of per-shock simulation detail
//! - CLI and minimal web front-ends over the same calculation

pub mod cli;
pub mod config;
pub mod engine;
pub mod export;
pub mod resolver;
pub mod server;
pub mod source;
pub mod telemetry;

pub use engine::{compute_historical_var, VarResult};
pub use resolver::{BasePricePolicy, PositionResolver, VarReport};
