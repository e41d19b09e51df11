// =============================================================================
// REST API Endpoints — Axum 0.7
// =============================================================================
//
// Public, read-only endpoints:
//   GET /                                  — liveness text
//   GET /api/v1/health                     — JSON health
//   GET /api/v1/stocks/:symbol             — enriched records, newest first
//   GET /api/v1/stocks/:symbol/valid       — symbol-validity probe
//   GET /api/v1/stocks/:symbol/download    — transposed CSV attachment
//
// `?range=` overrides the configured default query range on both stock
// endpoints. CORS is configured permissively for development.
// =============================================================================

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tower_http::cors::{Any, CorsLayer};
use tracing::{info, warn};

use crate::app_state::AppState;
use crate::config::VALID_RANGES;
use crate::csv_export::{to_csv, to_csv_reversed};
use crate::pipeline::{assemble::StockRecord, process_stock_data};

/// Filename offered for CSV downloads.
const CSV_DOWNLOAD_NAME: &str = "stock-data.csv";

// =============================================================================
// Router construction
// =============================================================================

/// Build the full REST router with CORS middleware and shared state.
pub fn router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(root))
        .route("/api/v1/health", get(health))
        .route("/api/v1/stocks/:symbol", get(get_stock))
        .route("/api/v1/stocks/:symbol/valid", get(validate_stock))
        .route("/api/v1/stocks/:symbol/download", get(download_stock))
        .layer(cors)
        .with_state(state)
}

// =============================================================================
// Liveness & health
// =============================================================================

async fn root() -> &'static str {
    "Stock report app is running."
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    server_time: i64,
}

async fn health() -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok",
        server_time: chrono::Utc::now().timestamp_millis(),
    })
}

// =============================================================================
// Stock report endpoints
// =============================================================================

#[derive(Deserialize)]
struct StockQuery {
    #[serde(default)]
    range: Option<String>,
    /// Download only: emit each CSV row's values newest-first.
    #[serde(default)]
    reversed: bool,
}

type ApiError = (StatusCode, Json<serde_json::Value>);

fn bad_request(message: String) -> ApiError {
    (
        StatusCode::BAD_REQUEST,
        Json(serde_json::json!({ "error": message })),
    )
}

/// Resolve the effective range: query parameter if present and valid,
/// otherwise the configured default.
fn resolve_range(state: &AppState, query: &StockQuery) -> Result<String, ApiError> {
    match &query.range {
        Some(r) if VALID_RANGES.contains(&r.as_str()) => Ok(r.clone()),
        Some(r) => Err(bad_request(format!(
            "invalid range '{r}'; expected one of {VALID_RANGES:?}"
        ))),
        None => Ok(state.config.stock_range.clone()),
    }
}

/// Fetch, repair, and enrich one ticker's daily series.
async fn build_report(
    state: &AppState,
    symbol: &str,
    range: &str,
) -> Result<Vec<StockRecord>, ApiError> {
    let series = state.yahoo.fetch_daily(symbol, range).await.map_err(|e| {
        warn!(symbol = %symbol, error = %e, "stock fetch failed");
        (
            StatusCode::BAD_GATEWAY,
            Json(serde_json::json!({
                "error": format!("stock data for {symbol} is unavailable, try again later"),
            })),
        )
    })?;

    process_stock_data(
        symbol,
        &series.timestamps,
        &series.closing_prices,
        &series.volumes,
    )
    .map_err(|e| {
        warn!(symbol = %symbol, error = %e, "pipeline rejected series");
        (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(serde_json::json!({ "error": e.to_string() })),
        )
    })
}

/// `GET /api/v1/stocks/:symbol` — JSON records sorted by id descending so
/// the most recent trading day comes first.
async fn get_stock(
    State(state): State<Arc<AppState>>,
    Path(symbol): Path<String>,
    Query(query): Query<StockQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let range = resolve_range(&state, &query)?;
    let mut records = build_report(&state, &symbol, &range).await?;
    records.sort_by(|a, b| b.id.cmp(&a.id));

    info!(symbol = %symbol, range = %range, days = records.len(), "stock report served");
    Ok(Json(serde_json::json!({ "status": 200, "data": records })))
}

/// `GET /api/v1/stocks/:symbol/valid` — lightweight probe reporting whether
/// the symbol resolves to a non-empty chart. Advisory only: the report
/// endpoints never gate on it.
async fn validate_stock(
    State(state): State<Arc<AppState>>,
    Path(symbol): Path<String>,
) -> impl IntoResponse {
    let valid = state.yahoo.is_symbol_valid(&symbol).await;
    info!(symbol = %symbol, valid, "symbol validity probe");
    Json(serde_json::json!({ "stockSymbol": symbol, "valid": valid }))
}

/// `GET /api/v1/stocks/:symbol/download` — the same report rendered as a
/// transposed CSV attachment, built in memory (no temp file on disk).
async fn download_stock(
    State(state): State<Arc<AppState>>,
    Path(symbol): Path<String>,
    Query(query): Query<StockQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let range = resolve_range(&state, &query)?;
    let records = build_report(&state, &symbol, &range).await?;
    let csv = if query.reversed {
        to_csv_reversed(&records)
    } else {
        to_csv(&records)
    };

    info!(symbol = %symbol, range = %range, bytes = csv.len(), "CSV download served");
    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{CSV_DOWNLOAD_NAME}\""),
            ),
        ],
        csv,
    ))
}

// =============================================================================
// Unit Tests
// =============================================================================
#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;

    fn state_with_range(range: &str) -> AppState {
        let mut config = AppConfig::default();
        config.stock_range = range.to_string();
        AppState::new(config)
    }

    #[test]
    fn resolve_range_prefers_valid_query() {
        let state = state_with_range("1y");
        let query = StockQuery {
            range: Some("1mo".to_string()),
            reversed: false,
        };
        assert_eq!(resolve_range(&state, &query).unwrap(), "1mo");
    }

    #[test]
    fn resolve_range_falls_back_to_config() {
        let state = state_with_range("6mo");
        let query = StockQuery {
            range: None,
            reversed: false,
        };
        assert_eq!(resolve_range(&state, &query).unwrap(), "6mo");
    }

    #[test]
    fn resolve_range_rejects_unknown_token() {
        let state = state_with_range("1y");
        let query = StockQuery {
            range: Some("2w".to_string()),
            reversed: false,
        };
        let (status, _) = resolve_range(&state, &query).unwrap_err();
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}
