//! Rule registry for managing and creating rule instances

use super::*;
use crate::config::DtrConfig;
use std::collections::HashSet;

/// Get all valid configuration tokens (Rule IDs, Category Prefixes, "ALL")
pub fn get_all_valid_tokens() -> HashSet<String> {
    let mut tokens = HashSet::new();
    tokens.insert("ALL".to_string());

    for category in [RuleCategory::Punches, RuleCategory::Hours, RuleCategory::Shift] {
        tokens.insert(category.prefix().to_string());
    }

    let config = DtrConfig::default();
    for rule in create_all_rules(&config) {
        tokens.insert(rule.id().to_string());
    }

    tokens
}

/// Create all enabled rules based on configuration
pub fn create_enabled_rules(config: &DtrConfig) -> Vec<Box<dyn DtrRule>> {
    create_all_rules(config)
        .into_iter()
        .filter(|rule| config.is_rule_enabled(rule.id()))
        .collect()
}

/// Create instances of all available rules, in evaluation order
pub fn create_all_rules(config: &DtrConfig) -> Vec<Box<dyn DtrRule>> {
    vec![
        Box::new(punch001_missing_time_in::MissingTimeInRule),
        Box::new(punch002_missing_time_out::MissingTimeOutRule),
        Box::new(punch003_missing_break_times::MissingBreakTimesRule),
        Box::new(hours001_excessive_hours::ExcessiveHoursRule::new(config)),
        Box::new(hours002_negative_hours::NegativeHoursRule),
        Box::new(shift001_night_shift_issues::NightShiftIssuesRule),
        Box::new(shift002_weekend_attendance::WeekendAttendanceRule),
    ]
}
