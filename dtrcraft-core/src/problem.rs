//! Problem reporting for attendance records

use serde::{Deserialize, Serialize};
use std::fmt;

/// Severity level of a problem
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Low => "low",
            Severity::Medium => "medium",
            Severity::High => "high",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind of problem found on a record
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProblemType {
    MissingTimeIn,
    MissingTimeOut,
    MissingBreakTimes,
    ExcessiveHours,
    NegativeHours,
    NightShiftIssues,
    WeekendAttendance,
}

impl ProblemType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProblemType::MissingTimeIn => "missing_time_in",
            ProblemType::MissingTimeOut => "missing_time_out",
            ProblemType::MissingBreakTimes => "missing_break_times",
            ProblemType::ExcessiveHours => "excessive_hours",
            ProblemType::NegativeHours => "negative_hours",
            ProblemType::NightShiftIssues => "night_shift_issues",
            ProblemType::WeekendAttendance => "weekend_attendance",
        }
    }

    /// Short label for badges and summaries
    pub fn label(&self) -> &'static str {
        match self {
            ProblemType::MissingTimeIn => "Missing Time In",
            ProblemType::MissingTimeOut => "Missing Time Out",
            ProblemType::MissingBreakTimes => "Incomplete Breaks",
            ProblemType::ExcessiveHours => "Excessive Hours",
            ProblemType::NegativeHours => "Negative Hours",
            ProblemType::NightShiftIssues => "Night Shift Issue",
            ProblemType::WeekendAttendance => "Weekend Attendance",
        }
    }
}

impl fmt::Display for ProblemType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single problem detected on an attendance record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Problem {
    /// Rule ID (e.g., "PUNCH001")
    pub rule_id: String,
    #[serde(rename = "type")]
    pub problem_type: ProblemType,
    /// Human-readable message
    pub message: String,
    pub severity: Severity,
}

impl Problem {
    pub fn new(
        rule_id: impl Into<String>,
        problem_type: ProblemType,
        message: impl Into<String>,
        severity: Severity,
    ) -> Self {
        Self {
            rule_id: rule_id.into(),
            problem_type,
            message: message.into(),
            severity,
        }
    }
}

/// Highest severity among `problems`; `None` means the record is clean
pub fn aggregate_severity(problems: &[Problem]) -> Option<Severity> {
    problems.iter().map(|p| p.severity).max()
}
