//! DTR rule system

pub mod registry;

// Rule implementations
pub mod hours001_excessive_hours;
pub mod hours002_negative_hours;
pub mod punch001_missing_time_in;
pub mod punch002_missing_time_out;
pub mod punch003_missing_break_times;
pub mod shift001_night_shift_issues;
pub mod shift002_weekend_attendance;

use crate::problem::{Problem, ProblemType};
use crate::record::AttendanceRecord;
use thiserror::Error;

/// Failure inside a single rule. The detector logs it and skips that rule only.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuleError {
    #[error("invalid attendance date: {0:?}")]
    InvalidDate(Option<String>),
}

/// Trait that all DTR rules must implement
pub trait DtrRule: Send + Sync {
    /// Unique rule identifier (e.g., "PUNCH001")
    fn id(&self) -> &str;

    /// Human-readable rule name
    fn name(&self) -> &str;

    /// Rule category
    fn category(&self) -> RuleCategory;

    /// Problem type this rule reports
    fn problem_type(&self) -> ProblemType;

    /// Check one record. Only called for records that carry at least one punch.
    fn check(&self, record: &AttendanceRecord) -> Result<Option<Problem>, RuleError>;
}

/// Rule categories
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleCategory {
    Punches,
    Hours,
    Shift,
}

impl RuleCategory {
    /// Rule ID prefix, also accepted as a selector in configuration
    pub fn prefix(&self) -> &'static str {
        match self {
            RuleCategory::Punches => "PUNCH",
            RuleCategory::Hours => "HOURS",
            RuleCategory::Shift => "SHIFT",
        }
    }
}
