// =============================================================================
// Volume Formatting — share counts to thousands-separated lot strings
// =============================================================================
//
// Taiwanese quotes display volume in round lots of 1 000 shares, with a
// comma every three digits. Volumes are non-negative, so no sign handling.
// =============================================================================

/// Shares per round lot.
pub const SHARES_PER_LOT: f64 = 1000.0;

/// Round `n` to the nearest integer and insert a comma every three digits
/// from the right.
///
/// `format_thousands(1234567.0)` => `"1,234,567"`, `format_thousands(999.0)`
/// => `"999"`.
pub fn format_thousands(n: f64) -> String {
    let rounded = n.round() as u64;
    let digits = rounded.to_string();

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

/// Convert a raw share count to a formatted lot-unit display string.
pub fn format_lots(shares: f64) -> String {
    format_thousands(shares / SHARES_PER_LOT)
}
