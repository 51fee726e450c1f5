//! Excel time decoding into `hh:mm AM/PM`

use crate::reader::RawCell;
use chrono::{DateTime, NaiveDateTime, NaiveTime, Timelike};
use regex::Regex;
use std::sync::OnceLock;

/// Strings that mean "no punch" rather than midnight
pub const ZERO_TIME_STRINGS: &[&str] = &["0", "0:00", "00:00", "0:00:00", "00:00:00"];

/// Numbers closer to zero than this are treated as blank
const ZERO_EPSILON: f64 = 0.0001;

const SECONDS_PER_DAY: i64 = 86_400;

const TIME_FORMATS: &[&str] = &[
    "%H:%M:%S%.f",
    "%I:%M%p",
    "%I:%M %p",
    "%I:%M:%S%p",
    "%I:%M:%S %p",
    "%I%p",
    "%I %p",
];

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
    "%m/%d/%Y %I:%M %p",
];

fn twelve_hour_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)^\d{1,2}:\d{2}(:\d{2})?\s*(AM|PM)$").unwrap())
}

fn twenty_four_hour_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^(\d{1,2}):(\d{2})(?::(\d{2}))?$").unwrap())
}

/// Check for the textual zero forms a biometric export writes for a missing punch
pub fn is_zero_time_string(s: &str) -> bool {
    ZERO_TIME_STRINGS.contains(&s.trim())
}

/// Decode a cell into `hh:mm AM/PM`; blanks and zero punches become `""`
pub fn format_excel_time(value: &RawCell) -> String {
    match value {
        RawCell::Empty => String::new(),
        RawCell::Number(n) => {
            if !n.is_finite() {
                value.display()
            } else if n.abs() < ZERO_EPSILON {
                String::new()
            } else {
                format_fraction(*n)
            }
        }
        RawCell::Text(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() || is_zero_time_string(trimmed) {
                return String::new();
            }
            if twelve_hour_re().is_match(trimmed) {
                return s.clone();
            }
            decode_text(trimmed).unwrap_or_else(|| {
                tracing::debug!(value = %s, "time left as-is");
                s.clone()
            })
        }
    }
}

/// Fractional day to clock time. Whole days are discarded, so a date-time serial keeps its time of day.
fn format_fraction(fraction: f64) -> String {
    let total_seconds = (fraction * SECONDS_PER_DAY as f64).round() as i64;
    let seconds = total_seconds.rem_euclid(SECONDS_PER_DAY);
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    twelve_hour(hours as u32, minutes as u32)
}

fn decode_text(s: &str) -> Option<String> {
    if let Some(caps) = twenty_four_hour_re().captures(s) {
        let hours: u32 = caps[1].parse().ok()?;
        let minutes: u32 = caps[2].parse().ok()?;
        if hours < 24 && minutes < 60 {
            return Some(twelve_hour(hours, minutes));
        }
    }

    parse_generic_time(s).map(|t| twelve_hour(t.hour(), t.minute()))
}

/// Best-effort parse of free-form time or date-time text
pub fn parse_generic_time(s: &str) -> Option<NaiveTime> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.time());
    }

    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt.time());
        }
    }

    TIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveTime::parse_from_str(s, fmt).ok())
}

/// `hh:mm AM/PM` with both fields zero padded
pub fn twelve_hour(hours: u32, minutes: u32) -> String {
    let period = if hours % 24 >= 12 { "PM" } else { "AM" };
    let display_hours = match hours % 12 {
        0 => 12,
        h => h,
    };
    format!("{:02}:{:02} {}", display_hours, minutes, period)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> RawCell {
        RawCell::text(s)
    }

    #[test]
    fn test_fractional_days() {
        assert_eq!(format_excel_time(&RawCell::Number(0.5)), "12:00 PM");
        assert_eq!(format_excel_time(&RawCell::Number(0.25)), "06:00 AM");
        assert_eq!(format_excel_time(&RawCell::Number(0.75)), "06:00 PM");
        // 8:30 AM, with float noise
        assert_eq!(format_excel_time(&RawCell::Number(0.354166666)), "08:30 AM");
        // Serial with a date part keeps its time of day
        assert_eq!(format_excel_time(&RawCell::Number(45307.5)), "12:00 PM");
    }

    #[test]
    fn test_zero_and_near_zero_are_blank() {
        assert_eq!(format_excel_time(&RawCell::Number(0.0)), "");
        assert_eq!(format_excel_time(&RawCell::Number(0.00001)), "");
        assert_eq!(format_excel_time(&RawCell::Empty), "");
        for zero in ZERO_TIME_STRINGS {
            assert_eq!(format_excel_time(&text(zero)), "", "{zero}");
        }
        assert_eq!(format_excel_time(&text("")), "");
    }

    #[test]
    fn test_twelve_hour_text_unchanged() {
        assert_eq!(format_excel_time(&text("8:00 AM")), "8:00 AM");
        assert_eq!(format_excel_time(&text("08:15:30 pm")), "08:15:30 pm");
        assert_eq!(format_excel_time(&text("5:00PM")), "5:00PM");
    }

    #[test]
    fn test_twenty_four_hour_text() {
        assert_eq!(format_excel_time(&text("8:00")), "08:00 AM");
        assert_eq!(format_excel_time(&text("17:00")), "05:00 PM");
        assert_eq!(format_excel_time(&text("12:30")), "12:30 PM");
        assert_eq!(format_excel_time(&text("00:15")), "12:15 AM");
        assert_eq!(format_excel_time(&text("23:59:59")), "11:59 PM");
    }

    #[test]
    fn test_generic_text() {
        assert_eq!(format_excel_time(&text("2024-01-16 17:45:00")), "05:45 PM");
        assert_eq!(format_excel_time(&text("2024-01-16T06:05:00+08:00")), "06:05 AM");
    }

    #[test]
    fn test_unparseable_text_passes_through() {
        assert_eq!(format_excel_time(&text("25:00")), "25:00");
        assert_eq!(format_excel_time(&text("absent")), "absent");
    }

    #[test]
    fn test_twelve_hour_helper() {
        assert_eq!(twelve_hour(0, 0), "12:00 AM");
        assert_eq!(twelve_hour(12, 0), "12:00 PM");
        assert_eq!(twelve_hour(13, 5), "01:05 PM");
    }
}
