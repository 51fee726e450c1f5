//! PUNCH001: Missing time in

use super::{DtrRule, RuleCategory, RuleError};
use crate::problem::{Problem, ProblemType, Severity};
use crate::record::AttendanceRecord;

/// Flags records with punches but no time in
pub struct MissingTimeInRule;

impl DtrRule for MissingTimeInRule {
    fn id(&self) -> &str {
        "PUNCH001"
    }

    fn name(&self) -> &str {
        "Missing time in"
    }

    fn category(&self) -> RuleCategory {
        RuleCategory::Punches
    }

    fn problem_type(&self) -> ProblemType {
        ProblemType::MissingTimeIn
    }

    fn check(&self, record: &AttendanceRecord) -> Result<Option<Problem>, RuleError> {
        if record.has_any_time_data() && !record.has_time_in() {
            return Ok(Some(Problem::new(
                self.id(),
                self.problem_type(),
                "Missing time in",
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
    fn test_time_out_without_time_in() {
        let record = AttendanceRecord {
            time_out: Some("17:00:00".to_string()),
            ..Default::default()
        };
        let problem = MissingTimeInRule.check(&record).unwrap().unwrap();
        assert_eq!(problem.problem_type, ProblemType::MissingTimeIn);
        assert_eq!(problem.severity, Severity::High);
    }

    #[test]
    fn test_complete_record() {
        let record = AttendanceRecord {
            time_in: Some("08:00:00".to_string()),
            time_out: Some("17:00:00".to_string()),
            ..Default::default()
        };
        assert_eq!(MissingTimeInRule.check(&record).unwrap(), None);
    }
}
