//! HOURS001: Excessive hours worked

use super::{DtrRule, RuleCategory, RuleError};
use crate::config::DtrConfig;
use crate::problem::{Problem, ProblemType, Severity};
use crate::record::AttendanceRecord;

/// Default ceiling on credited hours for one day
pub const DEFAULT_MAX_HOURS: f64 = 16.0;

/// Flags records crediting more hours than a single shift can plausibly hold.
///
/// Configuration:
/// - `max_hours`: the ceiling (default: 16), overridable per employee
pub struct ExcessiveHoursRule {
    config: DtrConfig,
}

impl ExcessiveHoursRule {
    pub fn new(config: &DtrConfig) -> Self {
        Self {
            config: config.clone(),
        }
    }

    fn max_hours(&self, employee_id: Option<&str>) -> f64 {
        self.config
            .get_param_float("max_hours", employee_id)
            .unwrap_or(DEFAULT_MAX_HOURS)
    }
}

impl Default for ExcessiveHoursRule {
    fn default() -> Self {
        Self::new(&DtrConfig::default())
    }
}

impl DtrRule for ExcessiveHoursRule {
    fn id(&self) -> &str {
        "HOURS001"
    }

    fn name(&self) -> &str {
        "Excessive hours"
    }

    fn category(&self) -> RuleCategory {
        RuleCategory::Hours
    }

    fn problem_type(&self) -> ProblemType {
        ProblemType::ExcessiveHours
    }

    fn check(&self, record: &AttendanceRecord) -> Result<Option<Problem>, RuleError> {
        let limit = self.max_hours(record.employee_id.as_deref());

        if record.hours_worked > limit {
            return Ok(Some(Problem::new(
                self.id(),
                self.problem_type(),
                format!(
                    "Excessive hours worked: {:.2} (limit {})",
                    record.hours_worked, limit
                ),
                Severity::High,
            )));
        }
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(hours: f64) -> AttendanceRecord {
        AttendanceRecord {
            employee_id: Some("1001".to_string()),
            time_in: Some("06:00:00".to_string()),
            hours_worked: hours,
            ..Default::default()
        }
    }

    #[test]
    fn test_default_limit() {
        let rule = ExcessiveHoursRule::default();
        let problem = rule.check(&record(20.0)).unwrap().unwrap();
        assert_eq!(problem.severity, Severity::High);
        assert!(problem.message.contains("20.00"));

        assert_eq!(rule.check(&record(16.0)).unwrap(), None);
    }

    #[test]
    fn test_employee_limit_override() {
        let config = DtrConfig::from_toml(
            r#"
            [employees.1001]
            max_hours = 24
            "#,
        )
        .unwrap();
        let rule = ExcessiveHoursRule::new(&config);
        assert_eq!(rule.check(&record(20.0)).unwrap(), None);

        let other = AttendanceRecord {
            employee_id: Some("1002".to_string()),
            ..record(20.0)
        };
        assert!(rule.check(&other).unwrap().is_some());
    }
}
