//! PUNCH002: Missing time out

use super::{DtrRule, RuleCategory, RuleError};
use crate::problem::{Problem, ProblemType, Severity};
use crate::record::AttendanceRecord;

/// Flags a time in with no matching time out.
///
/// Night-shift records close on the next-day time out instead, so a night
/// shift with `next_day_timeout` set is complete without `time_out`.
pub struct MissingTimeOutRule;

impl DtrRule for MissingTimeOutRule {
    fn id(&self) -> &str {
        "PUNCH002"
    }

    fn name(&self) -> &str {
        "Missing time out"
    }

    fn category(&self) -> RuleCategory {
        RuleCategory::Punches
    }

    fn problem_type(&self) -> ProblemType {
        ProblemType::MissingTimeOut
    }

    fn check(&self, record: &AttendanceRecord) -> Result<Option<Problem>, RuleError> {
        let closed_next_day = record.is_nightshift && record.has_next_day_timeout();

        if record.has_time_in() && !record.has_time_out() && !closed_next_day {
            return Ok(Some(Problem::new(
                self.id(),
                self.problem_type(),
                "Missing time out",
                Severity::High,
            )));
        }
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn open_record() -> AttendanceRecord {
        AttendanceRecord {
            time_in: Some("08:00:00".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_day_shift_without_time_out() {
        let problem = MissingTimeOutRule.check(&open_record()).unwrap().unwrap();
        assert_eq!(problem.severity, Severity::High);
        assert_eq!(problem.rule_id, "PUNCH002");
    }

    #[test]
    fn test_night_shift_closed_next_day() {
        let record = AttendanceRecord {
            is_nightshift: true,
            next_day_timeout: Some("06:00:00".to_string()),
            ..open_record()
        };
        assert_eq!(MissingTimeOutRule.check(&record).unwrap(), None);
    }

    #[test]
    fn test_next_day_timeout_ignored_for_day_shift() {
        let record = AttendanceRecord {
            next_day_timeout: Some("06:00:00".to_string()),
            ..open_record()
        };
        assert!(MissingTimeOutRule.check(&record).unwrap().is_some());
    }
}
