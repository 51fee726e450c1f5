//! Excel date decoding
//!
//! Dates reach us in several shapes: US-style `M/D/YYYY` text, Excel serial
//! numbers, abbreviated `16-Jan` labels, or anything else a person typed.
//! Every branch renders `YYYY-MM-DD`; a value no branch understands is
//! passed through unchanged.

use crate::reader::RawCell;
use chrono::{DateTime, Datelike, Duration, Local, NaiveDate, NaiveDateTime};
use regex::Regex;
use std::sync::OnceLock;

/// Month abbreviations, indexed by month - 1
const MONTHS: [&str; 12] = [
    "jan", "feb", "mar", "apr", "may", "jun", "jul", "aug", "sep", "oct", "nov", "dec",
];

const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m-%d-%Y",
    "%b %d, %Y",
    "%B %d, %Y",
    "%b %d %Y",
    "%B %d %Y",
    "%d %b %Y",
    "%d %B %Y",
    "%d-%b-%Y",
    "%a %b %d %Y",
];

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
];

/// Largest serial we try to decode (Excel stops at 9999-12-31)
const MAX_SERIAL: f64 = 2_958_465.0;

fn us_date_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^(\d{1,2})/(\d{1,2})/(\d{4})$").unwrap())
}

fn short_date_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^(\d{1,2})[-/]([A-Za-z]{3,})$").unwrap())
}

/// Day zero of the Excel serial calendar (1900 leap-year bug included)
pub fn excel_epoch() -> NaiveDate {
    NaiveDate::from_ymd_opt(1899, 12, 30).unwrap_or_default()
}

/// Decode a cell into `YYYY-MM-DD`, using the current year for `D-Mon` labels
pub fn format_excel_date(value: &RawCell) -> String {
    format_excel_date_in_year(value, Local::now().year())
}

/// Decode a cell into `YYYY-MM-DD`, using `year` for `D-Mon` labels
pub fn format_excel_date_in_year(value: &RawCell, year: i32) -> String {
    match value {
        RawCell::Empty => String::new(),
        RawCell::Number(n) => serial_to_date(*n)
            .map(iso)
            .unwrap_or_else(|| value.display()),
        RawCell::Text(s) if s.is_empty() => String::new(),
        RawCell::Text(s) => decode_text(s, year).unwrap_or_else(|| {
            tracing::debug!(value = %s, "date left as-is");
            s.clone()
        }),
    }
}

fn decode_text(s: &str, year: i32) -> Option<String> {
    let trimmed = s.trim();

    if let Some(caps) = us_date_re().captures(trimmed) {
        let month: u32 = caps[1].parse().ok()?;
        let day: u32 = caps[2].parse().ok()?;
        let year: i32 = caps[3].parse().ok()?;
        return NaiveDate::from_ymd_opt(year, month, day).map(iso);
    }

    if let Some(caps) = short_date_re().captures(trimmed) {
        let day: u32 = caps[1].parse().ok()?;
        let month = month_from_name(&caps[2])?;
        return NaiveDate::from_ymd_opt(year, month, day).map(iso);
    }

    parse_generic_date(trimmed).map(iso)
}

/// Serial day count to calendar date; the fractional (time) part is dropped
pub fn serial_to_date(serial: f64) -> Option<NaiveDate> {
    if !serial.is_finite() || serial.abs() > MAX_SERIAL {
        return None;
    }
    excel_epoch().checked_add_signed(Duration::days(serial.floor() as i64))
}

/// Month number from a name or abbreviation, matched on its first three letters
pub fn month_from_name(name: &str) -> Option<u32> {
    let prefix: String = name.chars().take(3).collect::<String>().to_lowercase();
    MONTHS
        .iter()
        .position(|m| *m == prefix)
        .map(|index| index as u32 + 1)
}

/// Best-effort parse of free-form date text
pub fn parse_generic_date(s: &str) -> Option<NaiveDate> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.date_naive());
    }

    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt.date());
        }
    }

    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
}

fn iso(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}
