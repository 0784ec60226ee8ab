//! Table row types returned by the data source

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One row of the positions table.
///
/// `nominal` is a signed quantity; positive means long. Aliases accept
/// the column names of the original Supabase deployment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PositionRecord {
    /// Instrument code
    #[serde(alias = "Nemonico", alias = "symbol")]
    pub entity_id: String,
    /// Position date
    #[serde(alias = "Fecha")]
    pub date: NaiveDate,
    /// Signed quantity held
    #[serde(alias = "Nominal")]
    pub nominal: Decimal,
}

/// One row of the price-history table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceObservation {
    /// Instrument code
    #[serde(alias = "Nemonico", alias = "symbol")]
    pub entity_id: String,
    /// Observation date
    #[serde(alias = "Fecha")]
    pub date: NaiveDate,
    /// Closing price
    #[serde(alias = "Precio")]
    pub price: Decimal,
}
