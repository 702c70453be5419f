//! Display formatting for estimates and reliability figures.

/// Coerce a JSON value into a number the way the results view expects.
///
/// Accepts numbers and numeric strings; everything else (null, booleans,
/// arrays, non-numeric strings) is treated as absent.
pub fn json_number(value: &serde_json::Value) -> Option<f64> {
    match value {
        serde_json::Value::Number(number) => number.as_f64(),
        serde_json::Value::String(text) => text.trim().parse::<f64>().ok(),
        _ => None,
    }
}

/// Format a value rounded to zero decimals with thousands separators.
///
/// Absent or non-finite values render as `-`.
pub fn format_number(value: Option<f64>) -> String {
    let Some(value) = value else {
        return "-".to_string();
    };
    if !value.is_finite() {
        return "-".to_string();
    }
    let rounded = value.round() as i64;
    group_thousands(rounded)
}

/// Format a 0..1 fraction as a percentage with one decimal place.
pub fn format_percent(fraction: f64) -> String {
    format!("{:.1}%", fraction * 100.0)
}

fn group_thousands(value: i64) -> String {
    let digits = value.abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if value < 0 {
        grouped.push('-');
    }
    let lead = digits.len() % 3;
    if lead > 0 {
        grouped.push_str(&digits[..lead]);
        if digits.len() > lead {
            grouped.push(',');
        }
    }
    let mut chunks = digits[lead..].as_bytes().chunks(3).peekable();
    while let Some(chunk) = chunks.next() {
        grouped.push_str(std::str::from_utf8(chunk).expect("ascii digits"));
        if chunks.peek().is_some() {
            grouped.push(',');
        }
    }
    grouped
}
