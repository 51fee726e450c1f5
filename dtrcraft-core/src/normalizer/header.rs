//! Header text normalization and column role inference

use crate::reader::RawCell;
use serde::Serialize;
use std::fmt;

/// Role a column plays in an attendance import
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnRole {
    EmployeeId,
    Date,
    Day,
    TimeIn,
    TimeOut,
    NextDay,
    Hours,
    Unknown,
}

impl ColumnRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            ColumnRole::EmployeeId => "employee_id",
            ColumnRole::Date => "date",
            ColumnRole::Day => "day",
            ColumnRole::TimeIn => "time_in",
            ColumnRole::TimeOut => "time_out",
            ColumnRole::NextDay => "next_day",
            ColumnRole::Hours => "hours",
            ColumnRole::Unknown => "unknown",
        }
    }

    /// Role assumed for a column whose header matched nothing
    pub fn positional_default(index: usize) -> Self {
        match index {
            0 => ColumnRole::EmployeeId,
            1 => ColumnRole::Date,
            2 => ColumnRole::Day,
            _ => ColumnRole::Unknown,
        }
    }
}

impl fmt::Display for ColumnRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

const EMPLOYEE: &[&str] = &["employee", "employeedate", "employee_no", "idno", "id"];
const DATE: &[&str] = &["date", "employeedate"];
const DAY: &[&str] = &["day"];
const TIME_IN_EXACT: &[&str] = &["in"];
const TIME_IN_FALLBACK: &[&str] = &["time_in", "timein"];
const TIME_OUT_EXACT: &[&str] = &["out"];
const TIME_OUT_FALLBACK: &[&str] = &["time_out", "timeout"];
const NEXT_DAY: &[&str] = &["next_day", "nextday", "next"];
const HOURS: &[&str] = &["hours_work", "hours", "work_hours", "hours_worked"];

/// Synonym table, in matching order. Employee precedes date so a combined
/// `employeedate` column keeps its value untouched.
const ROLE_SYNONYMS: &[(ColumnRole, &[&str])] = &[
    (ColumnRole::EmployeeId, EMPLOYEE),
    (ColumnRole::Date, DATE),
    (ColumnRole::Day, DAY),
    (ColumnRole::TimeIn, TIME_IN_EXACT),
    (ColumnRole::TimeIn, TIME_IN_FALLBACK),
    (ColumnRole::TimeOut, TIME_OUT_EXACT),
    (ColumnRole::TimeOut, TIME_OUT_FALLBACK),
    (ColumnRole::NextDay, NEXT_DAY),
    (ColumnRole::Hours, HOURS),
];

/// Labels reported for missing required categories, in reporting order
pub const REQUIRED_COLUMNS: [&str; 4] = ["employee_no", "date", "in", "out"];

/// Lower-case, trim, collapse whitespace runs to `_`, strip trailing dots
pub fn normalize_header_text(raw: &RawCell) -> String {
    match raw {
        RawCell::Text(s) => normalize_str(s),
        _ => String::new(),
    }
}

fn normalize_str(s: &str) -> String {
    let collapsed = s
        .trim()
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_");
    collapsed.trim_end_matches('.').to_string()
}

/// Resolve the role of a normalized header, if any synonym matches
pub fn role_for_header(normalized: &str) -> Option<ColumnRole> {
    ROLE_SYNONYMS
        .iter()
        .find(|(_, synonyms)| synonyms.contains(&normalized))
        .map(|(role, _)| *role)
}

/// Column roles for a whole header row, with positional defaults for unmatched columns
pub fn resolve_roles(header_row: &[RawCell]) -> Vec<ColumnRole> {
    header_row
        .iter()
        .enumerate()
        .map(|(index, cell)| {
            role_for_header(&normalize_header_text(cell))
                .unwrap_or_else(|| ColumnRole::positional_default(index))
        })
        .collect()
}

/// Outcome of checking a header row
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HeaderValidationResult {
    pub valid: bool,
    pub missing_columns: Vec<String>,
    pub format: String,
}

fn any_in(headers: &[String], synonyms: &[&str]) -> bool {
    headers.iter().any(|h| synonyms.contains(&h.as_str()))
}

/// Check that a header row names every required column category
pub fn classify_headers(header_row: &[RawCell]) -> HeaderValidationResult {
    let headers: Vec<String> = header_row.iter().map(normalize_header_text).collect();

    let has_employee = any_in(&headers, EMPLOYEE);
    let has_date = any_in(&headers, DATE);

    let exact_in = any_in(&headers, TIME_IN_EXACT);
    let exact_out = any_in(&headers, TIME_OUT_EXACT);
    let has_in = exact_in || any_in(&headers, TIME_IN_FALLBACK);
    let has_out = exact_out || any_in(&headers, TIME_OUT_FALLBACK);

    let present = [has_employee, has_date, has_in, has_out];
    let missing_columns: Vec<String> = REQUIRED_COLUMNS
        .iter()
        .zip(present)
        .filter(|(_, ok)| !ok)
        .map(|(label, _)| label.to_string())
        .collect();

    let valid = missing_columns.is_empty();
    let format = if !valid {
        String::new()
    } else if exact_in && exact_out {
        "standard".to_string()
    } else {
        "simple".to_string()
    };

    if valid {
        tracing::debug!(
            format = %format,
            next_day = any_in(&headers, NEXT_DAY),
            hours = any_in(&headers, HOURS),
            "header accepted"
        );
    }

    HeaderValidationResult {
        valid,
        missing_columns,
        format,
    }
}

/// Header row of the biometric DTR export
pub const STANDARD_HEADER: [&str; 9] = [
    "Employee No.",
    "Date",
    "Day",
    "In",
    "Out",
    "In",
    "Out",
    "Next day",
    "Hours Work",
];
