//! PUNCH003: Incomplete break punches

use super::{DtrRule, RuleCategory, RuleError};
use crate::problem::{Problem, ProblemType, Severity};
use crate::record::AttendanceRecord;

/// Flags records where only one of break in / break out was punched
pub struct MissingBreakTimesRule;

impl DtrRule for MissingBreakTimesRule {
    fn id(&self) -> &str {
        "PUNCH003"
    }

    fn name(&self) -> &str {
        "Missing break times"
    }

    fn category(&self) -> RuleCategory {
        RuleCategory::Punches
    }

    fn problem_type(&self) -> ProblemType {
        ProblemType::MissingBreakTimes
    }

    fn check(&self, record: &AttendanceRecord) -> Result<Option<Problem>, RuleError> {
        if !record.has_any_time_data() || record.has_break_in() == record.has_break_out() {
            return Ok(None);
        }

        let missing = if record.has_break_in() {
            "break out"
        } else {
            "break in"
        };
        Ok(Some(Problem::new(
            self.id(),
            self.problem_type(),
            format!("Incomplete break times: missing {}", missing),
            Severity::Medium,
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(break_in: Option<&str>, break_out: Option<&str>) -> AttendanceRecord {
        AttendanceRecord {
            time_in: Some("08:00:00".to_string()),
            time_out: Some("17:00:00".to_string()),
            break_in: break_in.map(str::to_string),
            break_out: break_out.map(str::to_string),
            ..Default::default()
        }
    }

    #[test]
    fn test_only_one_break_punch() {
        let problem = MissingBreakTimesRule
            .check(&record(Some("12:00:00"), None))
            .unwrap()
            .unwrap();
        assert_eq!(problem.severity, Severity::Medium);
        assert!(problem.message.contains("break out"));

        let problem = MissingBreakTimesRule
            .check(&record(None, Some("13:00:00")))
            .unwrap()
            .unwrap();
        assert!(problem.message.contains("break in"));
    }

    #[test]
    fn test_both_or_neither() {
        assert_eq!(MissingBreakTimesRule.check(&record(None, None)).unwrap(), None);
        assert_eq!(
            MissingBreakTimesRule
                .check(&record(Some("12:00:00"), Some("13:00:00")))
                .unwrap(),
            None
        );
    }
}
