// =============================================================================
// Technical Indicators Module
// =============================================================================
//
// Pure, side-effect-free implementations of the indicators used by the
// report pipeline.  The raw calculators return compact `Vec<f64>` series
// (shorter than the input by their warm-up length); `pad_left` re-aligns
// them with the source series using `Option<f64>` sentinels so downstream
// code never has to reason about floating-point NaN.

pub mod rsi;
pub mod sma;

pub use rsi::calculate_rsi;
pub use sma::calculate_sma;

/// Left-pad `series` with `None` so the result has length `total_len` and
/// the last `series.len()` entries line up with the last entries of the
/// original input.
///
/// Padding count is `total_len - series.len()`; a series already at full
/// length is returned unchanged (wrapped in `Some`).
pub fn pad_left(series: Vec<f64>, total_len: usize) -> Vec<Option<f64>> {
    let pad = total_len.saturating_sub(series.len());
    let mut padded = Vec::with_capacity(pad + series.len());
    padded.extend(std::iter::repeat(None).take(pad));
    padded.extend(series.into_iter().map(Some));
    padded
}

// =============================================================================
// Unit Tests
// =============================================================================
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pad_left_fills_front_with_none() {
        let padded = pad_left(vec![1.0, 2.0], 5);
        assert_eq!(padded.len(), 5);
        assert_eq!(&padded[..3], &[None, None, None]);
        assert_eq!(padded[3], Some(1.0));
        assert_eq!(padded[4], Some(2.0));
    }

    #[test]
    fn pad_left_full_length_is_identity() {
        let padded = pad_left(vec![1.0, 2.0, 3.0], 3);
        assert_eq!(padded, vec![Some(1.0), Some(2.0), Some(3.0)]);
    }

    #[test]
    fn pad_left_empty_series_is_all_none() {
        let padded = pad_left(Vec::new(), 4);
        assert_eq!(padded, vec![None; 4]);
    }

    #[test]
    fn sma_sentinel_count_matches_warmup() {
        // SMA(period) leaves exactly min(period-1, n) sentinels after padding.
        let values: Vec<f64> = (1..=20).map(|x| x as f64).collect();
        let padded = pad_left(calculate_sma(&values, 10), values.len());
        assert_eq!(padded.iter().filter(|v| v.is_none()).count(), 9);

        let short = vec![1.0, 2.0, 3.0];
        let padded = pad_left(calculate_sma(&short, 10), short.len());
        assert_eq!(padded.iter().filter(|v| v.is_none()).count(), 3);
    }

    #[test]
    fn rsi_sentinel_count_matches_warmup() {
        // RSI(period) consumes `period` deltas before its first value.
        let values: Vec<f64> = (1..=30).map(|x| x as f64).collect();
        let padded = pad_left(calculate_rsi(&values, 14), values.len());
        assert_eq!(padded.iter().filter(|v| v.is_none()).count(), 14);
    }

    #[test]
    fn padded_series_always_full_length() {
        for n in 0..12 {
            let values: Vec<f64> = (1..=n).map(|x| x as f64).collect();
            assert_eq!(pad_left(calculate_sma(&values, 10), n).len(), n);
            assert_eq!(pad_left(calculate_rsi(&values, 14), n).len(), n);
        }
    }
}
