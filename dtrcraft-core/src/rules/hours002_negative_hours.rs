//! HOURS002: Negative hours worked

use super::{DtrRule, RuleCategory, RuleError};
use crate::problem::{Problem, ProblemType, Severity};
use crate::record::AttendanceRecord;

/// Flags records whose computed hours went below zero
pub struct NegativeHoursRule;

impl DtrRule for NegativeHoursRule {
    fn id(&self) -> &str {
        "HOURS002"
    }

    fn name(&self) -> &str {
        "Negative hours"
    }

    fn category(&self) -> RuleCategory {
        RuleCategory::Hours
    }

    fn problem_type(&self) -> ProblemType {
        ProblemType::NegativeHours
    }

    fn check(&self, record: &AttendanceRecord) -> Result<Option<Problem>, RuleError> {
        if record.hours_worked < 0.0 {
            return Ok(Some(Problem::new(
                self.id(),
                self.problem_type(),
                format!("Negative hours worked: {:.2}", record.hours_worked),
                Severity::High,
            )));
        }
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_negative_hours() {
        let record = AttendanceRecord {
            time_in: Some("22:00:00".to_string()),
            hours_worked: -1.0,
            ..Default::default()
        };
        let problem = NegativeHoursRule.check(&record).unwrap().unwrap();
        assert_eq!(problem.message, "Negative hours worked: -1.00");
    }

    #[test]
    fn test_zero_hours_is_fine() {
        let record = AttendanceRecord {
            time_in: Some("08:00:00".to_string()),
            ..Default::default()
        };
        assert_eq!(NegativeHoursRule.check(&record).unwrap(), None);
    }
}
