// =============================================================================
// Rolling-Average Interpolation — gap repair for daily series
// =============================================================================
//
// Exchange feeds occasionally deliver days with a missing close or volume.
// Each gap is filled with the arithmetic mean of the non-null values inside
// a local window of the ORIGINAL series; already-filled values never feed a
// neighboring window, so the result is independent of scan direction.
// =============================================================================

/// Default half-width of the interpolation window (days on each side).
pub const DEFAULT_WINDOW_SIZE: usize = 3;

/// Fill `None` gaps in `series` with the mean of the non-null values in the
/// closed window `[max(0, i - window_size), min(n, i + window_size + 1))`.
///
/// Returns a new vector of the same length; the input is never mutated.
/// Window values are always read from the original `series`, not from the
/// partially-filled result.
///
/// # Edge cases
/// - A window containing no non-null value leaves the entry `None` — a
///   residual gap the caller must handle (see `pipeline::process_stock_data`).
/// - Gap-free input is returned unchanged.
pub fn interpolate(series: &[Option<f64>], window_size: usize) -> Vec<Option<f64>> {
    let n = series.len();
    let mut filled = series.to_vec();

    for i in 0..n {
        if series[i].is_some() {
            continue;
        }

        let start = i.saturating_sub(window_size);
        let end = (i + window_size + 1).min(n);

        let surrounding: Vec<f64> = series[start..end].iter().filter_map(|v| *v).collect();
        if !surrounding.is_empty() {
            let sum: f64 = surrounding.iter().sum();
            filled[i] = Some(sum / surrounding.len() as f64);
        }
    }

    filled
}

// =============================================================================
// Unit Tests
// =============================================================================
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gap_free_input_is_identity() {
        let series = vec![Some(1.0), Some(2.0), Some(3.0)];
        assert_eq!(interpolate(&series, DEFAULT_WINDOW_SIZE), series);
    }

    #[test]
    fn empty_input() {
        assert!(interpolate(&[], DEFAULT_WINDOW_SIZE).is_empty());
    }

    #[test]
    fn single_gap_filled_with_window_mean() {
        // Window around index 1 covers the whole series; mean of {10,12,13,14}.
        let series = vec![Some(10.0), None, Some(12.0), Some(13.0), Some(14.0)];
        let filled = interpolate(&series, 3);
        assert_eq!(filled.len(), 5);
        assert!((filled[1].unwrap() - 12.25).abs() < 1e-10);
        // Known values untouched.
        assert_eq!(filled[0], Some(10.0));
        assert_eq!(filled[4], Some(14.0));
    }

    #[test]
    fn window_clamped_at_series_edges() {
        // Gap at index 0 with window 1: only index 1 contributes.
        let series = vec![None, Some(4.0), Some(100.0)];
        let filled = interpolate(&series, 1);
        assert_eq!(filled[0], Some(4.0));
    }

    #[test]
    fn replacements_do_not_feed_neighboring_windows() {
        // Two adjacent gaps with window 1: each sees only the original
        // values, so the fill for index 2 must not use the fill at index 1.
        let series = vec![Some(10.0), None, None, Some(40.0)];
        let filled = interpolate(&series, 1);
        assert_eq!(filled[1], Some(10.0)); // window [0, 3): {10}
        assert_eq!(filled[2], Some(40.0)); // window [1, 4): {40}
    }

    #[test]
    fn all_null_window_leaves_residual_gap() {
        let series = vec![None, None, None];
        let filled = interpolate(&series, 1);
        assert_eq!(filled, vec![None, None, None]);
    }

    #[test]
    fn input_is_not_mutated() {
        let series = vec![Some(1.0), None, Some(3.0)];
        let _ = interpolate(&series, 3);
        assert_eq!(series[1], None);
    }
}
