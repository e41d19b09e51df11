// =============================================================================
// Yahoo Finance REST Client — daily chart queries
// =============================================================================
//
// GET {base}/v8/finance/chart/{SYMBOL}.TW?interval=1d&range={range}
//
// Taiwan-listed tickers carry the `.TW` suffix. Unix timestamps are
// rendered as `YYYY/MM/DD` labels in Taipei local time (UTC+8) so record
// labels match the exchange's trading days. Closes and volumes arrive with
// nulls on days the feed has gaps; those pass through untouched for the
// pipeline to repair.
// =============================================================================

use anyhow::{Context, Result};
use chrono::{DateTime, FixedOffset};
use serde::Deserialize;
use tracing::{debug, instrument};

/// Default chart API host.
const BASE_URL: &str = "https://query1.finance.yahoo.com";

/// Taipei is UTC+8 year-round (no daylight saving).
const TAIPEI_OFFSET_SECS: i32 = 8 * 3600;

// =============================================================================
// Wire format
// =============================================================================

#[derive(Debug, Deserialize)]
struct ChartResponse {
    chart: Chart,
}

#[derive(Debug, Deserialize)]
struct Chart {
    #[serde(default)]
    result: Option<Vec<ChartResult>>,
}

#[derive(Debug, Deserialize)]
struct ChartResult {
    #[serde(default)]
    timestamp: Vec<i64>,
    indicators: Indicators,
}

#[derive(Debug, Deserialize)]
struct Indicators {
    quote: Vec<Quote>,
}

#[derive(Debug, Deserialize)]
struct Quote {
    #[serde(default)]
    close: Vec<Option<f64>>,
    #[serde(default)]
    volume: Vec<Option<f64>>,
}

// =============================================================================
// Output
// =============================================================================

/// The three parallel arrays the pipeline consumes: ascending date labels
/// plus nullable closes and volumes, index-aligned per trading day.
#[derive(Debug, Clone)]
pub struct RawSeries {
    pub timestamps: Vec<String>,
    pub closing_prices: Vec<Option<f64>>,
    pub volumes: Vec<Option<f64>>,
}

// =============================================================================
// Client
// =============================================================================

/// Thin reqwest wrapper around the Yahoo Finance chart endpoint.
#[derive(Clone)]
pub struct YahooClient {
    base_url: String,
    client: reqwest::Client,
}

impl Default for YahooClient {
    fn default() -> Self {
        Self::new()
    }
}

impl YahooClient {
    pub fn new() -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(10))
            .build()
            .expect("failed to build reqwest client");

        Self {
            base_url: BASE_URL.to_string(),
            client,
        }
    }

    /// Fetch the daily series for `symbol` over `range` (one of the Yahoo
    /// range tokens, e.g. `1mo`, `1y`, `max`).
    #[instrument(skip(self), name = "yahoo::fetch_daily")]
    pub async fn fetch_daily(&self, symbol: &str, range: &str) -> Result<RawSeries> {
        let url = format!(
            "{}/v8/finance/chart/{}.TW?interval=1d&range={}",
            self.base_url, symbol, range
        );

        let resp = self
            .client
            .get(&url)
            .send()
            .await
            .with_context(|| format!("chart request for {symbol} failed"))?;

        // Status first: error pages are rarely JSON, so a failed parse must
        // not mask the status code.
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            anyhow::bail!("Yahoo chart API returned {status} for {symbol}: {body}");
        }

        let body: ChartResponse = resp
            .json()
            .await
            .with_context(|| format!("failed to parse chart response for {symbol}"))?;

        let series = parse_chart(body)
            .with_context(|| format!("chart payload for {symbol} has no usable result"))?;

        debug!(symbol = %symbol, days = series.timestamps.len(), "daily series fetched");
        Ok(series)
    }

    /// Probe whether `symbol` resolves to a chart with at least one result.
    ///
    /// Network failures, non-JSON bodies, and empty chart results all count
    /// as invalid.
    #[instrument(skip(self), name = "yahoo::is_symbol_valid")]
    pub async fn is_symbol_valid(&self, symbol: &str) -> bool {
        let url = format!("{}/v8/finance/chart/{}.TW", self.base_url, symbol);

        match self.client.get(&url).send().await {
            Ok(resp) => match resp.json::<ChartResponse>().await {
                Ok(body) => has_chart_result(&body),
                Err(_) => false,
            },
            Err(_) => false,
        }
    }

    /// Point the client at a different host. Test-only.
    #[cfg(test)]
    fn with_base_url(base_url: String) -> Self {
        let mut client = Self::new();
        client.base_url = base_url;
        client
    }
}

/// A chart payload is considered valid when it carries at least one result.
fn has_chart_result(body: &ChartResponse) -> bool {
    body.chart.result.as_deref().is_some_and(|r| !r.is_empty())
}

/// Flatten the nested chart payload into the three parallel arrays.
fn parse_chart(body: ChartResponse) -> Result<RawSeries> {
    let result = body
        .chart
        .result
        .and_then(|mut r| if r.is_empty() { None } else { Some(r.remove(0)) })
        .context("empty chart result")?;

    let quote = result
        .indicators
        .quote
        .into_iter()
        .next()
        .context("chart result carries no quote block")?;

    let tz = FixedOffset::east_opt(TAIPEI_OFFSET_SECS).expect("valid fixed offset");
    let timestamps: Vec<String> = result
        .timestamp
        .iter()
        .filter_map(|&ts| DateTime::from_timestamp(ts, 0))
        .map(|dt| dt.with_timezone(&tz).format("%Y/%m/%d").to_string())
        .collect();

    Ok(RawSeries {
        timestamps,
        closing_prices: quote.close,
        volumes: quote.volume,
    })
}
