// =============================================================================
// CSV Export — transposed spreadsheet rendering with UTF-8 BOM
// =============================================================================
//
// The download format the original consumers expect is TRANSPOSED: each
// field name starts a row and the records run left-to-right as columns,
// rather than the usual one-record-per-row layout. Values containing a
// comma, double quote, or newline are wrapped in double quotes with inner
// quotes doubled (RFC 4180 escaping); everything else is emitted verbatim.
// The whole document is prefixed with a U+FEFF byte-order mark so Excel
// decodes it as UTF-8.
// =============================================================================

use crate::pipeline::assemble::StockRecord;
use crate::pipeline::crossover::{CrossType, Strength};

/// UTF-8 byte-order mark prepended to every rendered document.
pub const UTF8_BOM: &str = "\u{feff}";

/// A record type renderable as one CSV column.
///
/// `keys` fixes the field order; `values` must produce one string per key.
/// Uniformity is guaranteed by the type — every record of one `CsvRecord`
/// implementation shares the same key set.
pub trait CsvRecord {
    fn keys() -> &'static [&'static str];
    fn values(&self) -> Vec<String>;
}

/// Render `records` as transposed CSV: one row per key, records as columns.
pub fn to_csv<R: CsvRecord>(records: &[R]) -> String {
    render(records, false)
}

/// Transposed CSV with each row's values in reverse record order (newest
/// first) while the key column stays put. Used for a reversed time
/// presentation without resorting the assembled records.
pub fn to_csv_reversed<R: CsvRecord>(records: &[R]) -> String {
    render(records, true)
}

fn render<R: CsvRecord>(records: &[R], reversed: bool) -> String {
    let columns: Vec<Vec<String>> = records.iter().map(CsvRecord::values).collect();

    let rows: Vec<String> = R::keys()
        .iter()
        .enumerate()
        .map(|(row, key)| {
            let mut cells: Vec<String> = columns
                .iter()
                .map(|col| escape_field(&col[row]))
                .collect();
            if reversed {
                cells.reverse();
            }
            let mut line = (*key).to_string();
            for cell in cells {
                line.push(',');
                line.push_str(&cell);
            }
            line
        })
        .collect();

    format!("{UTF8_BOM}{}", rows.join("\n"))
}

/// Quote a field when it contains a comma, double quote, or newline,
/// doubling any inner quotes. Clean fields pass through untouched.
fn escape_field(value: &str) -> String {
    if value.contains(',') || value.contains('"') || value.contains('\n') {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

// =============================================================================
// StockRecord column mapping
// =============================================================================

/// Natural string form of an optional numeric field; absent values render
/// as the empty cell.
fn opt_num(v: Option<f64>) -> String {
    v.map(|x| x.to_string()).unwrap_or_default()
}

impl CsvRecord for StockRecord {
    fn keys() -> &'static [&'static str] {
        &[
            "id",
            "timestamp",
            "interpolatedPrice",
            "sma10",
            "sma50",
            "rsi",
            "interpolatedVolume",
            "isSma10Strong",
            "crossType",
            "closingPrice",
            "volume",
            "stockSymbol",
        ]
    }

    fn values(&self) -> Vec<String> {
        let strength = match self.is_sma10_strong {
            Strength::Unknown => "unknown",
            Strength::Weak => "weak",
            Strength::Strong => "strong",
        };
        let cross = match self.cross_type {
            Some(CrossType::GoldenCross) => "golden-cross",
            Some(CrossType::DeathCross) => "death-cross",
            None => "",
        };

        vec![
            self.id.to_string(),
            self.timestamp.clone(),
            self.interpolated_price.to_string(),
            opt_num(self.sma10),
            opt_num(self.sma50),
            opt_num(self.rsi),
            self.interpolated_volume.clone(),
            strength.to_string(),
            cross.to_string(),
            opt_num(self.closing_price),
            self.volume.clone().unwrap_or_default(),
            self.stock_symbol.clone(),
        ]
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
#[cfg(test)]
mod tests {
    use super::*;

    struct Row {
        name: String,
        note: String,
    }

    impl CsvRecord for Row {
        fn keys() -> &'static [&'static str] {
            &["name", "note"]
        }

        fn values(&self) -> Vec<String> {
            vec![self.name.clone(), self.note.clone()]
        }
    }

    fn sample_rows() -> Vec<Row> {
        vec![
            Row {
                name: "alpha".into(),
                note: "plain".into(),
            },
            Row {
                name: "has,comma".into(),
                note: "has \"quote\"".into(),
            },
        ]
    }

    #[test]
    fn starts_with_bom() {
        let csv = to_csv(&sample_rows());
        assert!(csv.starts_with(UTF8_BOM));
    }

    #[test]
    fn transposed_layout_keys_as_rows() {
        let csv = to_csv(&sample_rows());
        let body = csv.strip_prefix(UTF8_BOM).unwrap();
        let lines: Vec<&str> = body.split('\n').collect();
        assert_eq!(lines.len(), 2); // one row per key, not per record
        assert!(lines[0].starts_with("name,"));
        assert!(lines[1].starts_with("note,"));
    }

    #[test]
    fn quoting_applied_only_when_needed() {
        let csv = to_csv(&sample_rows());
        let body = csv.strip_prefix(UTF8_BOM).unwrap();
        let lines: Vec<&str> = body.split('\n').collect();
        assert_eq!(lines[0], "name,alpha,\"has,comma\"");
        assert_eq!(lines[1], "note,plain,\"has \"\"quote\"\"\"");
    }

    #[test]
    fn reversed_variant_flips_record_order_only() {
        let csv = to_csv_reversed(&sample_rows());
        let body = csv.strip_prefix(UTF8_BOM).unwrap();
        let lines: Vec<&str> = body.split('\n').collect();
        assert_eq!(lines[0], "name,\"has,comma\",alpha");
        assert!(lines[1].starts_with("note,")); // header column stays put
    }

    #[test]
    fn empty_record_list_renders_headers_only() {
        let csv = to_csv::<Row>(&[]);
        let body = csv.strip_prefix(UTF8_BOM).unwrap();
        assert_eq!(body, "name\nnote");
    }

    // Minimal transposed-CSV parser for the round-trip check. Splits one
    // line into fields honoring RFC 4180 quoting.
    fn parse_line(line: &str) -> Vec<String> {
        let mut fields = Vec::new();
        let mut field = String::new();
        let mut chars = line.chars().peekable();
        let mut in_quotes = false;
        while let Some(c) = chars.next() {
            match c {
                '"' if in_quotes => {
                    if chars.peek() == Some(&'"') {
                        chars.next();
                        field.push('"');
                    } else {
                        in_quotes = false;
                    }
                }
                '"' => in_quotes = true,
                ',' if !in_quotes => {
                    fields.push(std::mem::take(&mut field));
                }
                other => field.push(other),
            }
        }
        fields.push(field);
        fields
    }

    #[test]
    fn round_trip_recovers_values_exactly() {
        let rows = vec![
            Row {
                name: "a,b".into(),
                note: "line\"one\"".into(),
            },
            Row {
                name: "1,234,567".into(),
                note: "plain".into(),
            },
        ];
        let csv = to_csv(&rows);
        let body = csv.strip_prefix(UTF8_BOM).unwrap();

        let parsed: Vec<Vec<String>> = body.split('\n').map(parse_line).collect();
        // Row 0 = "name" key followed by each record's name.
        assert_eq!(parsed[0][0], "name");
        assert_eq!(parsed[0][1], "a,b");
        assert_eq!(parsed[0][2], "1,234,567");
        assert_eq!(parsed[1][1], "line\"one\"");
        assert_eq!(parsed[1][2], "plain");
    }

    #[test]
    fn stock_record_columns_follow_wire_order() {
        use crate::pipeline::process_stock_data;

        let timestamps: Vec<String> = (1..=3).map(|d| format!("2024/01/0{d}")).collect();
        let closes = vec![Some(10.0), Some(11.0), Some(12.0)];
        let volumes = vec![Some(1_234_567_000.0), Some(2000.0), None];
        let records = process_stock_data("2330", &timestamps, &closes, &volumes).unwrap();

        let csv = to_csv(&records);
        let body = csv.strip_prefix(UTF8_BOM).unwrap();
        let lines: Vec<&str> = body.split('\n').collect();
        assert_eq!(lines.len(), StockRecord::keys().len());
        assert_eq!(lines[0], "id,1,2,3");
        assert!(lines[1].starts_with("timestamp,2024/01/01"));
        // Lot-formatted volume contains grouping commas, so it gets quoted.
        assert!(lines[6].contains("\"1,234,567\""));
        // Null raw volume renders as an empty cell.
        assert!(lines[10].ends_with(","));
    }
}
