//! Request handlers

use super::pages;
use super::AppState;
use axum::extract::{Form, State};
use axum::http::StatusCode;
use axum::response::Html;
use axum::Json;
use serde::{Deserialize, Serialize};

/// Health check response
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
}

/// Form fields for a VaR request
#[derive(Debug, Deserialize)]
pub struct VarForm {
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub asset: String,
    /// Blank means "use the configured default"
    #[serde(default)]
    pub confidence: String,
}

/// GET / - render the request form
pub async fn index(State(state): State<AppState>) -> Html<String> {
    let assets = state.resolver.known_entities().await.unwrap_or_default();
    Html(pages::render_index(&assets, None, None))
}

/// POST / - run the calculation and render the report
pub async fn compute(State(state): State<AppState>, Form(form): Form<VarForm>) -> Html<String> {
    let assets = state.resolver.known_entities().await.unwrap_or_default();

    if form.asset.is_empty() {
        return Html(pages::render_index(&assets, None, Some("Please select an asset")));
    }

    let date = if form.date.is_empty() {
        None
    } else {
        Some(form.date.as_str())
    };
    let confidence = match form.confidence.trim() {
        "" => state.default_confidence,
        raw => match raw.parse::<f64>() {
            Ok(c) if 0.0 < c && c < 1.0 => c,
            _ => {
                return Html(pages::render_index(
                    &assets,
                    None,
                    Some("Confidence must be a number strictly between 0 and 1"),
                ))
            }
        },
    };

    match state
        .resolver
        .resolve_and_compute(date, &form.asset, confidence)
        .await
    {
        Ok(report) => Html(pages::render_index(&assets, Some(&report), None)),
        Err(e) => Html(pages::render_index(&assets, None, Some(&e.to_string()))),
    }
}

/// GET /health
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        service: "histovar",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// GET /api/validate - data source connectivity check
pub async fn validate(
    State(state): State<AppState>,
) -> (StatusCode, Json<crate::source::SourceValidation>) {
    let validation = state.source.validate().await;
    let status = if validation.is_ok() {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };
    (status, Json(validation))
}
