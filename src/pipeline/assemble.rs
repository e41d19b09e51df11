// =============================================================================
// Record Assembly — one enriched output record per trading day
// =============================================================================
//
// Zips the repaired series and the padded indicator series into immutable
// `StockRecord`s, running the crossover tracker incrementally along the
// way. Nothing is mutated: the formatted raw volume is a new field, and a
// raw volume that was null stays null (never coerced to "0").
// =============================================================================

use serde::Serialize;

use crate::pipeline::crossover::{CrossType, CrossoverTracker, Strength};
use crate::pipeline::volume::format_lots;

/// One fully-derived row of the stock report.
///
/// `id` is 1-based and index-ascending (oldest day first); presentation
/// layers that want newest-first sort by `id` descending themselves.
/// Field names serialize camelCase to match the original JSON wire shape.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StockRecord {
    pub id: usize,
    pub timestamp: String,
    pub interpolated_price: f64,
    pub sma10: Option<f64>,
    pub sma50: Option<f64>,
    pub rsi: Option<f64>,
    /// Repaired volume, formatted in lot units ("張").
    pub interpolated_volume: String,
    pub is_sma10_strong: Strength,
    pub cross_type: Option<CrossType>,
    /// Original close, still null where the feed had a gap.
    pub closing_price: Option<f64>,
    /// Original volume formatted in lot units; null gaps preserved.
    pub volume: Option<String>,
    pub stock_symbol: String,
}

/// Per-index inputs consumed by [`assemble`]. All slices must share the
/// same length; the caller (`process_stock_data`) enforces that.
pub struct AssembleInput<'a> {
    pub symbol: &'a str,
    pub timestamps: &'a [String],
    pub interpolated_prices: &'a [f64],
    pub sma10: &'a [Option<f64>],
    pub sma50: &'a [Option<f64>],
    pub rsi: &'a [Option<f64>],
    pub interpolated_volumes: &'a [f64],
    pub raw_closes: &'a [Option<f64>],
    pub raw_volumes: &'a [Option<f64>],
}

/// Walk indices `0..n` once, carrying crossover state across the pass, and
/// emit one record per index.
pub fn assemble(input: AssembleInput<'_>) -> Vec<StockRecord> {
    let mut tracker = CrossoverTracker::new();

    input
        .timestamps
        .iter()
        .enumerate()
        .map(|(i, timestamp)| {
            let (strength, cross) = tracker.update(input.sma10[i], input.sma50[i]);

            StockRecord {
                id: i + 1,
                timestamp: timestamp.clone(),
                interpolated_price: input.interpolated_prices[i],
                sma10: input.sma10[i],
                sma50: input.sma50[i],
                rsi: input.rsi[i],
                interpolated_volume: format_lots(input.interpolated_volumes[i]),
                is_sma10_strong: strength,
                cross_type: cross,
                closing_price: input.raw_closes[i],
                volume: input.raw_volumes[i].map(format_lots),
                stock_symbol: input.symbol.to_string(),
            }
        })
        .collect()
}
