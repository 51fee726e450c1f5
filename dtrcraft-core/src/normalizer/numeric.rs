use crate::reader::RawCell;

/// Render a numeric cell with two decimals; non-numeric values pass through
pub fn format_numeric(value: &RawCell) -> String {
    match value {
        RawCell::Empty => String::new(),
        RawCell::Number(n) if n.is_finite() => format!("{:.2}", n),
        RawCell::Number(_) => value.display(),
        RawCell::Text(s) if s.trim().is_empty() => String::new(),
        RawCell::Text(s) => match parse_finite(s) {
            Some(n) => format!("{:.2}", n),
            None => s.clone(),
        },
    }
}

/// Parse text as a finite float ("NaN" and "inf" are rejected)
pub fn parse_finite(s: &str) -> Option<f64> {
    s.trim().parse::<f64>().ok().filter(|n| n.is_finite())
}

/// Zero written any way a spreadsheet might write it
pub fn is_zero_text(s: &str) -> bool {
    parse_finite(s).is_some_and(|n| n == 0.0)
}
