//! PostgREST data source
//!
//! Reads the positions and price tables from a Supabase/PostgREST API:
//! `GET {base_url}/{table}?select=*` with `apikey` and bearer headers.

use super::{DataSource, PositionRecord, PriceObservation, SourceError};
use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;

/// Configuration for the REST source
#[derive(Debug, Clone)]
pub struct RestSourceConfig {
    /// Base URL of the REST endpoint (e.g. `https://x.supabase.co/rest/v1`)
    pub base_url: String,
    /// API key, sent as both `apikey` and bearer token
    pub api_key: String,
    /// Positions table name
    pub positions_table: String,
    /// Price-history table name
    pub prices_table: String,
    /// Request timeout
    pub timeout: Duration,
}

impl Default for RestSourceConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            api_key: String::new(),
            positions_table: "RV.Positions".to_string(),
            prices_table: "RV.Price".to_string(),
            timeout: Duration::from_secs(10),
        }
    }
}

/// Client for a PostgREST-style tabular API
pub struct RestSource {
    config: RestSourceConfig,
    client: Client,
}

impl RestSource {
    /// Create a new REST source
    pub fn new(config: RestSourceConfig) -> Self {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .expect("Failed to create HTTP client");

        Self { config, client }
    }

    /// Fetch every row of `table` as JSON.
    ///
    /// Rows that fail to deserialize (null price, malformed date) are
    /// dropped with a warning rather than failing the whole fetch, the
    /// same way the original pipeline drops non-numeric price rows.
    async fn fetch_table<T: DeserializeOwned>(&self, table: &str) -> Result<Vec<T>, SourceError> {
        let url = format!("{}/{}", self.config.base_url, table);

        tracing::debug!(url = %url, "Fetching table");

        let response = self
            .client
            .get(&url)
            .query(&[("select", "*")])
            .header("apikey", &self.config.api_key)
            .bearer_auth(&self.config.api_key)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(SourceError::Http {
                table: table.to_string(),
                status,
                body,
            });
        }

        let raw: Vec<serde_json::Value> = response.json().await?;
        let total = raw.len();

        let rows: Vec<T> = raw
            .into_iter()
            .filter_map(|v| serde_json::from_value(v).ok())
            .collect();

        if rows.len() < total {
            tracing::warn!(
                table = %table,
                dropped = total - rows.len(),
                "Dropped rows that failed to parse"
            );
        }

        Ok(rows)
    }
}

#[async_trait]
impl DataSource for RestSource {
    async fn fetch_positions(&self) -> Result<Vec<PositionRecord>, SourceError> {
        self.fetch_table(&self.config.positions_table).await
    }

    async fn fetch_prices(&self) -> Result<Vec<PriceObservation>, SourceError> {
        self.fetch_table(&self.config.prices_table).await
    }
}
