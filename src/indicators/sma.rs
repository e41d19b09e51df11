// =============================================================================
// Simple Moving Average (SMA)
// =============================================================================
//
// The arithmetic mean of a trailing window of `period` closes.  The report
// pipeline uses SMA(10) against SMA(50) to classify golden / death crosses.
//
// Formula:
//   SMA_t = (close_{t-period+1} + ... + close_t) / period
//
// The first value is defined at index `period - 1` of the input.
// =============================================================================

/// Compute the SMA series for the given `values` slice and window `period`.
///
/// Returns one value per input element starting at index `period - 1`, so
/// the output length is `values.len() - period + 1`.
///
/// # Edge cases
/// - `period == 0` => empty vec (division by zero guard)
/// - `values.len() < period` => empty vec
/// - A non-finite window mean stops the series early — downstream consumers
///   should not trust a broken tail.
pub fn calculate_sma(values: &[f64], period: usize) -> Vec<f64> {
    if period == 0 || values.len() < period {
        return Vec::new();
    }

    let period_f = period as f64;
    let mut result = Vec::with_capacity(values.len() - period + 1);

    // Rolling sum: seed with the first window, then slide.
    let mut sum: f64 = values[..period].iter().sum();
    let first = sum / period_f;
    if !first.is_finite() {
        return Vec::new();
    }
    result.push(first);

    for i in period..values.len() {
        sum += values[i] - values[i - period];
        let mean = sum / period_f;
        if !mean.is_finite() {
            break;
        }
        result.push(mean);
    }

    result
}

// =============================================================================
// Unit Tests
// =============================================================================
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sma_empty_input() {
        assert!(calculate_sma(&[], 10).is_empty());
    }

    #[test]
    fn sma_period_zero() {
        assert!(calculate_sma(&[1.0, 2.0, 3.0], 0).is_empty());
    }

    #[test]
    fn sma_insufficient_data() {
        assert!(calculate_sma(&[1.0, 2.0], 5).is_empty());
    }

    #[test]
    fn sma_period_equals_length() {
        let sma = calculate_sma(&[2.0, 4.0, 6.0], 3);
        assert_eq!(sma.len(), 1);
        assert!((sma[0] - 4.0).abs() < 1e-10);
    }

    #[test]
    fn sma_known_values() {
        // 3-period SMA of [1..6]: [2, 3, 4, 5]
        let values: Vec<f64> = (1..=6).map(|x| x as f64).collect();
        let sma = calculate_sma(&values, 3);
        assert_eq!(sma.len(), 4);
        for (got, want) in sma.iter().zip([2.0, 3.0, 4.0, 5.0]) {
            assert!((got - want).abs() < 1e-10, "got {got}, expected {want}");
        }
    }

    #[test]
    fn sma_flat_series_is_constant() {
        let sma = calculate_sma(&[7.0; 20], 10);
        assert_eq!(sma.len(), 11);
        for &v in &sma {
            assert!((v - 7.0).abs() < 1e-10);
        }
    }

    #[test]
    fn sma_output_length_property() {
        for n in 10..30 {
            let values: Vec<f64> = (0..n).map(|x| x as f64).collect();
            assert_eq!(calculate_sma(&values, 10).len(), n - 9);
        }
    }
}
