//! VaR engine
//!
//! Pure historical-simulation math over in-memory price series. No I/O,
//! no shared state; concurrent calls are independent.

mod percentile;
mod var;

pub use percentile::percentile;
pub use var::{compute_historical_var, EngineError, VarResult};
