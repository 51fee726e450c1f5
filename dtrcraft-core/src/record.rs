//! Attendance records as listed by the backend

use crate::normalizer::date::parse_generic_date;
use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::fs;
use std::path::Path;

/// One processed attendance row. Read-only input to the detector.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AttendanceRecord {
    #[serde(deserialize_with = "de_opt_string")]
    pub id: Option<String>,
    #[serde(deserialize_with = "de_opt_string")]
    pub employee_id: Option<String>,
    #[serde(deserialize_with = "de_opt_string")]
    pub employee_name: Option<String>,
    #[serde(deserialize_with = "de_opt_string")]
    pub attendance_date: Option<String>,
    #[serde(deserialize_with = "de_opt_string")]
    pub time_in: Option<String>,
    #[serde(deserialize_with = "de_opt_string")]
    pub time_out: Option<String>,
    #[serde(deserialize_with = "de_opt_string")]
    pub break_in: Option<String>,
    #[serde(deserialize_with = "de_opt_string")]
    pub break_out: Option<String>,
    #[serde(deserialize_with = "de_opt_string")]
    pub next_day_timeout: Option<String>,
    #[serde(deserialize_with = "de_bool")]
    pub is_nightshift: bool,
    #[serde(deserialize_with = "de_f64")]
    pub hours_worked: f64,
    #[serde(deserialize_with = "de_bool")]
    pub restday: bool,
    #[serde(deserialize_with = "de_f64")]
    pub overtime: f64,
}

/// A time field counts as present when it holds non-blank text
pub fn is_present(field: &Option<String>) -> bool {
    field.as_deref().is_some_and(|s| !s.trim().is_empty())
}

impl AttendanceRecord {
    pub fn has_time_in(&self) -> bool {
        is_present(&self.time_in)
    }

    pub fn has_time_out(&self) -> bool {
        is_present(&self.time_out)
    }

    pub fn has_break_in(&self) -> bool {
        is_present(&self.break_in)
    }

    pub fn has_break_out(&self) -> bool {
        is_present(&self.break_out)
    }

    pub fn has_next_day_timeout(&self) -> bool {
        is_present(&self.next_day_timeout)
    }

    /// Any punch at all. Records without one are rest days or absences, not problems.
    pub fn has_any_time_data(&self) -> bool {
        self.has_time_in()
            || self.has_time_out()
            || self.has_break_in()
            || self.has_break_out()
            || self.has_next_day_timeout()
    }

    /// Calendar date of the record. Accepts `YYYY-MM-DD`, a date-time starting with one,
    /// or anything the generic date parser understands.
    pub fn date(&self) -> Option<NaiveDate> {
        let raw = self.attendance_date.as_deref()?.trim();
        raw.get(..10)
            .and_then(|prefix| NaiveDate::parse_from_str(prefix, "%Y-%m-%d").ok())
            .or_else(|| parse_generic_date(raw))
    }
}

impl fmt::Display for AttendanceRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let who = match (&self.employee_name, &self.employee_id) {
            (Some(name), Some(id)) => format!("{} ({})", name, id),
            (Some(name), None) => name.clone(),
            (None, Some(id)) => id.clone(),
            (None, None) => self
                .id
                .as_ref()
                .map(|id| format!("record #{}", id))
                .unwrap_or_else(|| "unknown employee".to_string()),
        };
        match &self.attendance_date {
            Some(date) => write!(f, "{} on {}", who, date),
            None => f.write_str(&who),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RecordList {
    Bare(Vec<AttendanceRecord>),
    Wrapped { data: Vec<AttendanceRecord> },
}

/// Parse a JSON listing: either a bare array or `{"data": [...]}`
pub fn parse_records(json: &str) -> Result<Vec<AttendanceRecord>> {
    let list: RecordList =
        serde_json::from_str(json).context("Expected an array of records or an object with a `data` array")?;
    Ok(match list {
        RecordList::Bare(records) => records,
        RecordList::Wrapped { data } => data,
    })
}

/// Load a JSON listing from disk
pub fn load_records<P: AsRef<Path>>(path: P) -> Result<Vec<AttendanceRecord>> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read records from {}", path.display()))?;
    let records = parse_records(&content)
        .with_context(|| format!("Failed to parse records from {}", path.display()))?;
    tracing::debug!(count = records.len(), path = %path.display(), "loaded records");
    Ok(records)
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Loose {
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

/// Text, numbers or null into an optional string
fn de_opt_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Loose>::deserialize(deserializer)? {
        None => None,
        Some(Loose::Text(s)) => Some(s),
        Some(Loose::Int(i)) => Some(i.to_string()),
        Some(Loose::Float(f)) => Some(f.to_string()),
        Some(Loose::Bool(b)) => Some(b.to_string()),
    })
}

/// Numbers, numeric strings or null into a float (null and "" are zero)
fn de_f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    match Option::<Loose>::deserialize(deserializer)? {
        None => Ok(0.0),
        Some(Loose::Int(i)) => Ok(i as f64),
        Some(Loose::Float(f)) => Ok(f),
        Some(Loose::Bool(b)) => Ok(if b { 1.0 } else { 0.0 }),
        Some(Loose::Text(s)) if s.trim().is_empty() => Ok(0.0),
        Some(Loose::Text(s)) => s
            .trim()
            .parse::<f64>()
            .map_err(|_| D::Error::custom(format!("invalid number: {}", s))),
    }
}

/// Booleans, 0/1 or their string forms into a bool
fn de_bool<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    match Option::<Loose>::deserialize(deserializer)? {
        None => Ok(false),
        Some(Loose::Bool(b)) => Ok(b),
        Some(Loose::Int(i)) => Ok(i != 0),
        Some(Loose::Float(f)) => Ok(f != 0.0),
        Some(Loose::Text(s)) => match s.trim().to_ascii_lowercase().as_str() {
            "" | "0" | "false" | "no" => Ok(false),
            "1" | "true" | "yes" => Ok(true),
            other => Err(D::Error::custom(format!("invalid boolean: {}", other))),
        },
    }
}
