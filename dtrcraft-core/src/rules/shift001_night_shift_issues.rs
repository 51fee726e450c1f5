//! SHIFT001: Night shift without next-day time out

use super::{DtrRule, RuleCategory, RuleError};
use crate::problem::{Problem, ProblemType, Severity};
use crate::record::AttendanceRecord;

pub struct NightShiftIssuesRule;

impl DtrRule for NightShiftIssuesRule {
    fn id(&self) -> &str {
        "SHIFT001"
    }

    fn name(&self) -> &str {
        "Night shift issues"
    }

    fn category(&self) -> RuleCategory {
        RuleCategory::Shift
    }

    fn problem_type(&self) -> ProblemType {
        ProblemType::NightShiftIssues
    }

    fn check(&self, record: &AttendanceRecord) -> Result<Option<Problem>, RuleError> {
        if record.is_nightshift && record.has_time_in() && !record.has_next_day_timeout() {
            return Ok(Some(Problem::new(
                self.id(),
                self.problem_type(),
                "Night shift is missing its next-day time out",
                Severity::Medium,
            )));
        }
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_night_shift_without_next_day() {
        let record = AttendanceRecord {
            is_nightshift: true,
            time_in: Some("22:00:00".to_string()),
            time_out: Some("23:59:00".to_string()),
            ..Default::default()
        };
        let problem = NightShiftIssuesRule.check(&record).unwrap().unwrap();
        assert_eq!(problem.severity, Severity::Medium);
    }

    #[test]
    fn test_day_shift_is_ignored() {
        let record = AttendanceRecord {
            time_in: Some("08:00:00".to_string()),
            ..Default::default()
        };
        assert_eq!(NightShiftIssuesRule.check(&record).unwrap(), None);
    }
}
