//! CLI output formatting.
//!
//! Results arrive as JSON records. Text output walks the record in field
//! order, labelling each field from its camelCase key and formatting
//! amounts with thousands separators.

use std::fmt::Write as _;
use std::io;
use std::path::Path;
use std::time::Duration;

use serde_json::{Map, Value};

use calcof_core::Options;

/// Keys whose values are money amounts.
const CURRENCY_FIELDS: &[&str] = &[
    "netProfit",
    "monthlyPayment",
    "periodicPayment",
    "totalPayment",
    "totalInterest",
    "payment",
    "principal",
    "interest",
    "balance",
    "projectedSavings",
    "totalContributions",
    "totalGrowth",
];

/// Keys whose values are percentages.
const PERCENT_FIELDS: &[&str] = &["roi"];

/// Format a duration for display.
#[must_use]
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
pub fn format_duration(d: Duration) -> String {
    let secs = d.as_secs_f64();
    if secs < 0.001 {
        format!("{:.2}µs", secs * 1_000_000.0)
    } else if secs < 1.0 {
        format!("{:.2}ms", secs * 1000.0)
    } else if secs < 60.0 {
        format!("{secs:.3}s")
    } else {
        let mins = (secs / 60.0).floor() as u64;
        let remaining = secs - (mins as f64 * 60.0);
        format!("{mins}m{remaining:.1}s")
    }
}

/// Insert thousands separators into the integer part of a decimal string.
#[must_use]
pub fn group_thousands(s: &str) -> String {
    let (sign, digits) = s.strip_prefix('-').map_or(("", s), |rest| ("-", rest));
    let (int_part, frac_part) = digits
        .split_once('.')
        .map_or((digits, None), |(i, f)| (i, Some(f)));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, c) in int_part.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    let mut out: String = sign.to_string();
    out.extend(grouped.chars().rev());
    if let Some(frac) = frac_part {
        out.push('.');
        out.push_str(frac);
    }
    out
}

/// Format a number with thousands separators and `precision` decimals.
#[must_use]
pub fn format_amount(value: f64, precision: usize) -> String {
    let s = format!("{value:.precision$}");
    // Avoid "-0.00" for tiny negatives.
    let s = if s.trim_start_matches('-').chars().all(|c| c == '0' || c == '.') {
        s.trim_start_matches('-').to_string()
    } else {
        s
    };
    group_thousands(&s)
}

/// Format a money amount, e.g. `-$1,234.50`.
#[must_use]
pub fn format_currency(value: f64, opts: &Options) -> String {
    let amount = format_amount(value, opts.precision);
    match amount.strip_prefix('-') {
        Some(abs) => format!("-{}{abs}", opts.currency_symbol),
        None => format!("{}{amount}", opts.currency_symbol),
    }
}

/// Turn a camelCase key into a sentence-case label.
#[must_use]
pub fn label(key: &str) -> String {
    let mut out = String::with_capacity(key.len() + 4);
    for (i, c) in key.chars().enumerate() {
        if i == 0 {
            out.push(c.to_ascii_uppercase());
        } else if c.is_ascii_uppercase() {
            out.push(' ');
            out.push(c.to_ascii_lowercase());
        } else if c.is_ascii_digit() && !key[..i].ends_with(|p: char| p.is_ascii_digit()) {
            out.push(' ');
            out.push(c);
        } else {
            out.push(c);
        }
    }
    out
}

/// Format a scalar field value according to its key.
#[must_use]
pub fn format_value(key: &str, value: &Value, opts: &Options) -> String {
    match value {
        Value::Number(n) if n.is_i64() || n.is_u64() => group_thousands(&n.to_string()),
        Value::Number(n) => {
            let v = n.as_f64().unwrap_or_default();
            if CURRENCY_FIELDS.contains(&key) {
                format_currency(v, opts)
            } else if PERCENT_FIELDS.contains(&key) {
                format!("{}%", format_amount(v, opts.precision))
            } else {
                format_amount(v, opts.precision)
            }
        }
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "-".to_string(),
        Value::Object(map) => format_object_inline(map, opts),
        Value::Array(rows) => format!("{} rows", rows.len()),
    }
}

/// Fractions render as `n/d`; other small objects as `key value` pairs.
fn format_object_inline(map: &Map<String, Value>, opts: &Options) -> String {
    let int = |k: &str| map.get(k).and_then(Value::as_i64);
    match (int("whole"), int("numerator"), int("denominator")) {
        (Some(whole), Some(n), Some(d)) if map.len() == 3 => match (whole, n) {
            (w, 0) => w.to_string(),
            (0, n) => format!("{n}/{d}"),
            (w, n) => format!("{w} {n}/{d}"),
        },
        (None, Some(n), Some(d)) if map.len() == 2 => format!("{n}/{d}"),
        _ => map
            .iter()
            .map(|(k, v)| format!("{} {}", label(k).to_lowercase(), format_value(k, v, opts)))
            .collect::<Vec<_>>()
            .join(", "),
    }
}

/// Render an array of records as an aligned table.
#[must_use]
pub fn format_table(rows: &[Value], opts: &Options) -> String {
    let Some(Value::Object(first)) = rows.first() else {
        return String::new();
    };
    let headers: Vec<&String> = first.keys().collect();
    let cells: Vec<Vec<String>> = rows
        .iter()
        .map(|row| {
            headers
                .iter()
                .map(|h| row.get(h.as_str()).map_or_else(String::new, |v| format_value(h, v, opts)))
                .collect()
        })
        .collect();

    let widths: Vec<usize> = headers
        .iter()
        .enumerate()
        .map(|(i, h)| {
            cells
                .iter()
                .map(|r| r[i].chars().count())
                .chain(std::iter::once(label(h).chars().count()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let mut out = String::new();
    for (h, w) in headers.iter().zip(&widths) {
        let _ = write!(out, "  {:>w$}", label(h));
    }
    out.push('\n');
    for row in &cells {
        for (cell, w) in row.iter().zip(&widths) {
            let _ = write!(out, "  {cell:>w$}");
        }
        out.push('\n');
    }
    out
}

/// Render a results record as labelled lines.
#[must_use]
pub fn format_results(results: &Value, opts: &Options) -> String {
    let Value::Object(map) = results else {
        return format_value("", results, opts);
    };
    let width = map.keys().map(|k| label(k).chars().count()).max().unwrap_or(0);

    let mut out = String::new();
    let mut tables = Vec::new();
    for (key, value) in map {
        let _ = writeln!(out, "{:<width$}  {}", label(key), format_value(key, value, opts));
        if let Value::Array(rows) = value {
            if opts.details && !rows.is_empty() {
                tables.push((key, rows));
            }
        }
    }
    for (key, rows) in tables {
        let _ = write!(out, "\n{}:\n{}", label(key), format_table(rows, opts));
    }
    out
}

/// The first field of a results record, for quiet output.
#[must_use]
pub fn format_primary(results: &Value, opts: &Options) -> String {
    match results {
        Value::Object(map) => map
            .iter()
            .next()
            .map(|(k, v)| format_value(k, v, opts))
            .unwrap_or_default(),
        other => format_value("", other, opts),
    }
}

/// Write a results record to a file as pretty JSON.
///
/// # Errors
///
/// Returns an I/O error if the file cannot be created or written.
pub fn write_to_file(path: impl AsRef<Path>, results: &Value) -> io::Result<()> {
    let content = serde_json::to_string_pretty(results).map_err(io::Error::other)?;
    std::fs::write(path, content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn format_duration_micro() {
        let s = format_duration(Duration::from_nanos(500));
        assert!(s.contains("µs"));
    }

    #[test]
    fn format_duration_milli() {
        let s = format_duration(Duration::from_millis(42));
        assert!(s.contains("ms"));
    }

    #[test]
    fn group_thousands_cases() {
        assert_eq!(group_thousands("1000000"), "1,000,000");
        assert_eq!(group_thousands("42"), "42");
        assert_eq!(group_thousands("-1234.567"), "-1,234.567");
        assert_eq!(group_thousands("123456.7"), "123,456.7");
    }

    #[test]
    fn format_amount_rounds() {
        assert_eq!(format_amount(1234.567, 2), "1,234.57");
        assert_eq!(format_amount(-0.001, 2), "0.00");
        assert_eq!(format_amount(3.0, 0), "3");
    }

    #[test]
    fn format_currency_places_sign_first() {
        let opts = Options::default();
        assert_eq!(format_currency(1199.1, &opts), "$1,199.10");
        assert_eq!(format_currency(-10_000.0, &opts), "-$10,000.00");
    }

    #[test]
    fn labels_from_keys() {
        assert_eq!(label("netProfit"), "Net profit");
        assert_eq!(label("bmi"), "Bmi");
        assert_eq!(label("numerator1"), "Numerator 1");
        assert_eq!(label("value12"), "Value 12");
    }

    #[test]
    fn format_value_by_key() {
        let opts = Options::default();
        assert_eq!(format_value("roi", &json!(70.0), &opts), "70.00%");
        assert_eq!(format_value("netProfit", &json!(70000.0), &opts), "$70,000.00");
        assert_eq!(format_value("mealsPerDay", &json!(2), &opts), "2");
        assert_eq!(format_value("category", &json!("Obese"), &opts), "Obese");
        assert_eq!(
            format_value("fraction", &json!({"numerator": 2, "denominator": 3}), &opts),
            "2/3"
        );
        assert_eq!(
            format_value(
                "mixed",
                &json!({"whole": 1, "numerator": 1, "denominator": 2}),
                &opts
            ),
            "1 1/2"
        );
        assert_eq!(
            format_value("healthyWeightRange", &json!({"min": 53.465, "max": 71.961}), &opts),
            "min 53.47, max 71.96"
        );
    }

    #[test]
    fn format_results_aligns_labels() {
        let opts = Options::default();
        let text = format_results(&json!({"bmi": 24.22, "category": "Normal weight"}), &opts);
        assert_eq!(text, "Bmi       24.22\nCategory  Normal weight\n");
    }

    #[test]
    fn format_results_tables_only_with_details() {
        let results = json!({
            "periodicPayment": 100.0,
            "amortizationSchedule": [
                {"period": 1, "payment": 100.0, "principal": 90.0, "interest": 10.0, "balance": 910.0}
            ]
        });
        let brief = format_results(&results, &Options::default());
        assert!(brief.contains("1 rows"));
        assert!(!brief.contains("Amortization schedule:"));

        let opts = Options {
            details: true,
            ..Options::default()
        };
        let full = format_results(&results, &opts);
        assert!(full.contains("Amortization schedule:"));
        assert!(full.contains("Balance"));
        assert!(full.contains("$910.00"));
    }

    #[test]
    fn format_primary_takes_first_field() {
        let opts = Options::default();
        assert_eq!(format_primary(&json!({"result": 25.0, "formula": "x"}), &opts), "25.00");
    }

    #[test]
    fn write_results_file() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("out.json");
        write_to_file(&path, &json!({"bmi": 24.2})).unwrap();
        let back: Value = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(back["bmi"], 24.2);
    }
}
