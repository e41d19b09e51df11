// =============================================================================
// Report Pipeline — gap repair, indicators, crossover, record assembly
// =============================================================================
//
// The algorithmic core of the service. Everything here is synchronous and
// pure over already-materialized arrays: no network, no filesystem, no
// shared state between runs, so independent tickers can be processed in
// parallel without coordination.
//
// Data flow:
//   raw arrays -> interpolate -> SMA/RSI (+ left padding) -> crossover
//   classification -> one StockRecord per index.
// =============================================================================

pub mod assemble;
pub mod crossover;
pub mod interpolate;
pub mod volume;

use anyhow::{bail, Result};

use crate::indicators::{calculate_rsi, calculate_sma, pad_left};
use crate::pipeline::assemble::{assemble, AssembleInput, StockRecord};
use crate::pipeline::interpolate::{interpolate, DEFAULT_WINDOW_SIZE};

/// Short moving-average window (days).
pub const SMA_SHORT_PERIOD: usize = 10;
/// Long moving-average window (days).
pub const SMA_LONG_PERIOD: usize = 50;
/// RSI look-back window (days).
pub const RSI_PERIOD: usize = 14;

/// Run the full pipeline for one ticker.
///
/// Takes the three parallel arrays delivered by the fetch layer — ascending
/// date labels plus nullable closes and volumes — and returns one enriched
/// record per trading day, index-ascending.
///
/// # Errors
/// - The three arrays must share one length; a mismatch is a caller bug and
///   aborts the run.
/// - A gap whose entire interpolation window is null cannot be repaired;
///   rather than silently feeding a hole into the indicator math, the run
///   aborts naming the first unrepairable index.
pub fn process_stock_data(
    symbol: &str,
    timestamps: &[String],
    closing_prices: &[Option<f64>],
    volumes: &[Option<f64>],
) -> Result<Vec<StockRecord>> {
    let n = timestamps.len();
    if closing_prices.len() != n || volumes.len() != n {
        bail!(
            "parallel array length mismatch: {} timestamps, {} closes, {} volumes",
            n,
            closing_prices.len(),
            volumes.len()
        );
    }

    // ── 1. Gap repair ─────────────────────────────────────────────────────
    let interpolated_prices = require_repaired(
        interpolate(closing_prices, DEFAULT_WINDOW_SIZE),
        "closing price",
    )?;
    let interpolated_volumes = require_repaired(
        interpolate(volumes, DEFAULT_WINDOW_SIZE),
        "volume",
    )?;

    // ── 2. Indicators, re-aligned to length n ─────────────────────────────
    let sma10 = pad_left(calculate_sma(&interpolated_prices, SMA_SHORT_PERIOD), n);
    let sma50 = pad_left(calculate_sma(&interpolated_prices, SMA_LONG_PERIOD), n);
    let rsi = pad_left(calculate_rsi(&interpolated_prices, RSI_PERIOD), n);

    // ── 3. Assembly (crossover state carried inside) ──────────────────────
    Ok(assemble(AssembleInput {
        symbol,
        timestamps,
        interpolated_prices: &interpolated_prices,
        sma10: &sma10,
        sma50: &sma50,
        rsi: &rsi,
        interpolated_volumes: &interpolated_volumes,
        raw_closes: closing_prices,
        raw_volumes: volumes,
    }))
}

/// Unwrap an interpolated series, failing on the first residual gap.
fn require_repaired(series: Vec<Option<f64>>, what: &str) -> Result<Vec<f64>> {
    series
        .into_iter()
        .enumerate()
        .map(|(i, v)| match v {
            Some(x) => Ok(x),
            None => bail!("unrepairable {what} gap at index {i}: interpolation window is empty"),
        })
        .collect()
}
