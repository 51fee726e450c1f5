//! DTR problem detection over attendance records

use crate::config::DtrConfig;
use crate::problem::{Problem, Severity, aggregate_severity};
use crate::record::AttendanceRecord;
use crate::rules::{self, DtrRule};
use rayon::prelude::*;
use serde::Serialize;

/// Runs the enabled rules, in order, against attendance records
pub struct Detector {
    config: DtrConfig,
    rules: Vec<Box<dyn DtrRule>>,
}

impl Detector {
    /// Create a new detector with default configuration
    pub fn new() -> Self {
        Self::with_config(DtrConfig::default())
    }

    /// Create a new detector with custom configuration
    pub fn with_config(config: DtrConfig) -> Self {
        let rules = rules::registry::create_enabled_rules(&config);
        Self { config, rules }
    }

    pub fn rules(&self) -> &[Box<dyn DtrRule>] {
        &self.rules
    }

    /// Every problem on one record. A record without a single punch is clean.
    pub fn detect(&self, record: &AttendanceRecord) -> Vec<Problem> {
        if !record.has_any_time_data() {
            return Vec::new();
        }

        let employee_id = record.employee_id.as_deref();
        let mut problems = Vec::new();

        for rule in &self.rules {
            if let Some(employee_id) = employee_id {
                if !self.config.is_rule_enabled_for_employee(rule.id(), employee_id) {
                    continue;
                }
            }

            match rule.check(record) {
                Ok(Some(problem)) => problems.push(problem),
                Ok(None) => {}
                Err(e) => {
                    tracing::debug!(
                        rule = rule.id(),
                        name = rule.name(),
                        record = %record,
                        error = %e,
                        "rule skipped"
                    );
                }
            }
        }

        problems
    }

    /// Build a report for one record
    pub fn report(&self, record: &AttendanceRecord) -> RecordReport {
        RecordReport::new(record, self.detect(record))
    }

    /// Reports for many records, in input order
    pub fn detect_all(&self, records: &[AttendanceRecord]) -> Vec<RecordReport> {
        records.par_iter().map(|record| self.report(record)).collect()
    }
}

impl Default for Detector {
    fn default() -> Self {
        Self::new()
    }
}

/// Detect problems on a record with the default rule set
pub fn detect(record: &AttendanceRecord) -> Vec<Problem> {
    Detector::new().detect(record)
}

/// Problems found on one record, with enough identity to display them
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecordReport {
    pub id: Option<String>,
    pub employee_id: Option<String>,
    pub employee_name: Option<String>,
    pub attendance_date: Option<String>,
    /// Highest problem severity; absent when the record is clean
    pub severity: Option<Severity>,
    pub problems: Vec<Problem>,
}

impl RecordReport {
    pub fn new(record: &AttendanceRecord, problems: Vec<Problem>) -> Self {
        Self {
            id: record.id.clone(),
            employee_id: record.employee_id.clone(),
            employee_name: record.employee_name.clone(),
            attendance_date: record.attendance_date.clone(),
            severity: aggregate_severity(&problems),
            problems,
        }
    }

    pub fn is_clean(&self) -> bool {
        self.problems.is_empty()
    }

    /// Label used in listings: name or id, then date
    pub fn label(&self) -> String {
        let who = self
            .employee_name
            .as_deref()
            .or(self.employee_id.as_deref())
            .or(self.id.as_deref())
            .unwrap_or("unknown");
        match &self.attendance_date {
            Some(date) => format!("{} {}", date, who),
            None => who.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::problem::ProblemType;

    fn types(problems: &[Problem]) -> Vec<ProblemType> {
        problems.iter().map(|p| p.problem_type).collect()
    }

    fn punched(date: &str) -> AttendanceRecord {
        AttendanceRecord {
            employee_id: Some("1001".to_string()),
            attendance_date: Some(date.to_string()),
            time_in: Some("08:00:00".to_string()),
            time_out: Some("17:00:00".to_string()),
            hours_worked: 8.0,
            ..Default::default()
        }
    }

    #[test]
    fn test_no_punches_is_clean() {
        let record = AttendanceRecord {
            attendance_date: Some("2024-01-13".to_string()),
            hours_worked: 20.0,
            is_nightshift: true,
            ..Default::default()
        };
        assert!(detect(&record).is_empty());
    }

    #[test]
    fn test_complete_weekday_is_clean() {
        assert!(detect(&punched("2024-01-16")).is_empty());
    }

    #[test]
    fn test_missing_time_out_reported_once() {
        let record = AttendanceRecord {
            time_out: None,
            ..punched("2024-01-16")
        };
        let problems = detect(&record);
        let missing: Vec<_> = problems
            .iter()
            .filter(|p| p.problem_type == ProblemType::MissingTimeOut)
            .collect();
        assert_eq!(missing.len(), 1);
        assert_eq!(missing[0].severity, Severity::High);
    }

    #[test]
    fn test_night_shift_with_next_day_timeout() {
        let record = AttendanceRecord {
            time_in: Some("22:00:00".to_string()),
            time_out: None,
            next_day_timeout: Some("06:00:00".to_string()),
            is_nightshift: true,
            ..punched("2024-01-16")
        };
        let problems = detect(&record);
        assert!(!types(&problems).contains(&ProblemType::MissingTimeOut));
        assert!(!types(&problems).contains(&ProblemType::NightShiftIssues));
    }

    #[test]
    fn test_all_matching_rules_in_order() {
        // Saturday, only a time out and a break in, 20 hours credited
        let record = AttendanceRecord {
            time_in: None,
            break_in: Some("12:00:00".to_string()),
            hours_worked: 20.0,
            ..punched("2024-01-13")
        };
        assert_eq!(
            types(&detect(&record)),
            vec![
                ProblemType::MissingTimeIn,
                ProblemType::MissingBreakTimes,
                ProblemType::ExcessiveHours,
                ProblemType::WeekendAttendance,
            ]
        );
    }

    #[test]
    fn test_hours_bounds() {
        let over = AttendanceRecord {
            hours_worked: 20.0,
            ..punched("2024-01-16")
        };
        assert!(types(&detect(&over)).contains(&ProblemType::ExcessiveHours));

        let negative = AttendanceRecord {
            hours_worked: -1.0,
            ..punched("2024-01-16")
        };
        assert!(types(&detect(&negative)).contains(&ProblemType::NegativeHours));
    }

    #[test]
    fn test_bad_date_only_suppresses_weekend_rule() {
        let record = AttendanceRecord {
            attendance_date: Some("garbage".to_string()),
            time_out: None,
            ..punched("")
        };
        assert_eq!(types(&detect(&record)), vec![ProblemType::MissingTimeOut]);
    }

    #[test]
    fn test_employee_disabled_rules() {
        let config = DtrConfig::from_toml(
            r#"
            [employees.1001]
            disabled_rules = ["SHIFT"]
            "#,
        )
        .unwrap();
        let detector = Detector::with_config(config);

        assert!(detector.detect(&punched("2024-01-13")).is_empty());

        let other = AttendanceRecord {
            employee_id: Some("1002".to_string()),
            ..punched("2024-01-13")
        };
        assert_eq!(
            types(&detector.detect(&other)),
            vec![ProblemType::WeekendAttendance]
        );
    }

    #[test]
    fn test_detect_all_preserves_order() {
        let records: Vec<AttendanceRecord> = (10..=16)
            .map(|day| punched(&format!("2024-01-{}", day)))
            .collect();
        let reports = Detector::new().detect_all(&records);

        assert_eq!(reports.len(), records.len());
        for (report, record) in reports.iter().zip(&records) {
            assert_eq!(report.attendance_date, record.attendance_date);
        }
        // 13th and 14th are the weekend
        assert_eq!(reports[3].severity, Some(Severity::Low));
        assert_eq!(reports[4].severity, Some(Severity::Low));
        assert!(reports[0].is_clean());
        assert_eq!(reports[0].severity, None);
    }

    #[test]
    fn test_report_label() {
        let report = Detector::new().report(&punched("2024-01-16"));
        assert_eq!(report.label(), "2024-01-16 1001");
    }
}
