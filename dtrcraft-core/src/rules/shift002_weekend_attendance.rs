//! SHIFT002: Weekend attendance

use super::{DtrRule, RuleCategory, RuleError};
use crate::problem::{Problem, ProblemType, Severity};
use crate::record::AttendanceRecord;
use chrono::{Datelike, Weekday};

/// Flags punches on a Saturday or Sunday that is neither a rest day nor overtime.
///
/// A record whose date cannot be read yields [`RuleError::InvalidDate`]; the
/// detector treats that as "rule did not fire".
pub struct WeekendAttendanceRule;

impl DtrRule for WeekendAttendanceRule {
    fn id(&self) -> &str {
        "SHIFT002"
    }

    fn name(&self) -> &str {
        "Weekend attendance"
    }

    fn category(&self) -> RuleCategory {
        RuleCategory::Shift
    }

    fn problem_type(&self) -> ProblemType {
        ProblemType::WeekendAttendance
    }

    fn check(&self, record: &AttendanceRecord) -> Result<Option<Problem>, RuleError> {
        if !record.has_any_time_data() || record.restday || record.overtime != 0.0 {
            return Ok(None);
        }

        let date = record
            .date()
            .ok_or_else(|| RuleError::InvalidDate(record.attendance_date.clone()))?;

        let day = match date.weekday() {
            Weekday::Sat => "Saturday",
            Weekday::Sun => "Sunday",
            _ => return Ok(None),
        };

        Ok(Some(Problem::new(
            self.id(),
            self.problem_type(),
            format!("Attendance on a {} without rest day or overtime", day),
            Severity::Low,
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(date: &str) -> AttendanceRecord {
        AttendanceRecord {
            attendance_date: Some(date.to_string()),
            time_in: Some("08:00:00".to_string()),
            time_out: Some("17:00:00".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_saturday_and_sunday() {
        // 2024-01-13 is a Saturday
        let problem = WeekendAttendanceRule.check(&record("2024-01-13")).unwrap().unwrap();
        assert_eq!(problem.severity, Severity::Low);
        assert!(problem.message.contains("Saturday"));

        let problem = WeekendAttendanceRule.check(&record("2024-01-14")).unwrap().unwrap();
        assert!(problem.message.contains("Sunday"));
    }

    #[test]
    fn test_weekday() {
        assert_eq!(WeekendAttendanceRule.check(&record("2024-01-16")).unwrap(), None);
    }

    #[test]
    fn test_rest_day_or_overtime_excuses_weekend() {
        let rest = AttendanceRecord {
            restday: true,
            ..record("2024-01-13")
        };
        assert_eq!(WeekendAttendanceRule.check(&rest).unwrap(), None);

        let overtime = AttendanceRecord {
            overtime: 4.0,
            ..record("2024-01-13")
        };
        assert_eq!(WeekendAttendanceRule.check(&overtime).unwrap(), None);
    }

    #[test]
    fn test_unreadable_date_is_an_error() {
        let err = WeekendAttendanceRule.check(&record("n/a")).unwrap_err();
        assert_eq!(err, RuleError::InvalidDate(Some("n/a".to_string())));
    }
}
