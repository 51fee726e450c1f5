//! Configuration for detector rules and import previews

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::Path;

/// File looked up in the working directory when no config path is given
pub const DEFAULT_CONFIG_FILE: &str = "dtrcraft.toml";

/// Main configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DtrConfig {
    #[serde(default)]
    pub global: GlobalConfig,
    /// Per-employee overrides, keyed by employee id
    #[serde(default)]
    pub employees: HashMap<String, EmployeeConfig>,
}

impl DtrConfig {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let config: DtrConfig = toml::from_str(content)?;
        Ok(config)
    }

    /// Check if a rule is enabled globally
    pub fn is_rule_enabled(&self, rule_id: &str) -> bool {
        if self
            .global
            .disabled_rules
            .iter()
            .any(|selector| matches_rule_selector(selector, rule_id))
        {
            return false;
        }

        // Nothing listed means everything is on
        if self.global.enabled_rules.is_empty() {
            return true;
        }

        self.global
            .enabled_rules
            .iter()
            .any(|selector| matches_rule_selector(selector, rule_id))
    }

    /// Check if a rule is enabled for a specific employee
    pub fn is_rule_enabled_for_employee(&self, rule_id: &str, employee_id: &str) -> bool {
        if !self.is_rule_enabled(rule_id) {
            return false;
        }

        if let Some(employee) = self.employees.get(employee_id) {
            if employee
                .disabled_rules
                .iter()
                .any(|selector| matches_rule_selector(selector, rule_id))
            {
                return false;
            }
        }

        true
    }

    /// Reject selectors that name no rule or category. `ALL` may enable but never disable.
    pub fn validate_rules(&self, valid_tokens: &HashSet<String>) -> Result<()> {
        if self.global.disabled_rules.contains("ALL") {
            bail!("`ALL` cannot go in [global] disabled_rules; list categories or rule ids instead");
        }

        let global = [
            ("[global] enabled_rules".to_string(), &self.global.enabled_rules),
            ("[global] disabled_rules".to_string(), &self.global.disabled_rules),
        ];
        let per_employee = self.employees.iter().map(|(id, employee)| {
            (
                format!("[employees.{}] disabled_rules", id),
                &employee.disabled_rules,
            )
        });

        for (section, selectors) in global.into_iter().chain(per_employee) {
            if let Some(unknown) = selectors.iter().find(|s| !valid_tokens.contains(*s)) {
                bail!("Unknown rule selector '{}' in {}", unknown, section);
            }
        }

        Ok(())
    }

    /// Validate against the selectors the built-in rule set understands
    pub fn validate(&self) -> Result<()> {
        self.validate_rules(&crate::rules::registry::get_all_valid_tokens())
    }

    /// Load and validate the configuration the command-line tools run with.
    ///
    /// An explicit `path` must exist. Without one, [`DEFAULT_CONFIG_FILE`] in
    /// the working directory is used when present, otherwise the defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(path) => Some(path),
            None => Some(Path::new(DEFAULT_CONFIG_FILE)).filter(|p| p.exists()),
        };

        let config = match path {
            Some(path) => Self::from_file(path)
                .with_context(|| format!("Failed to load config from {}", path.display()))?,
            None => Self::default(),
        };

        config.validate().context("Invalid configuration")?;
        Ok(config)
    }

    fn param(&self, key: &str, employee_id: Option<&str>) -> Option<&toml::Value> {
        employee_id
            .and_then(|id| self.employees.get(id))
            .and_then(|employee| employee.params.get(key))
            .or_else(|| self.global.params.get(key))
    }

    /// Get an integer parameter with fallback chain: employee -> global
    pub fn get_param_int(&self, key: &str, employee_id: Option<&str>) -> Option<i64> {
        self.param(key, employee_id).and_then(|v| v.as_integer())
    }

    /// Get a float parameter with fallback chain: employee -> global. Integers are accepted.
    pub fn get_param_float(&self, key: &str, employee_id: Option<&str>) -> Option<f64> {
        self.param(key, employee_id)
            .and_then(|v| v.as_float().or(v.as_integer().map(|i| i as f64)))
    }

    /// Number of data rows to show in import previews
    pub fn preview_rows(&self) -> usize {
        self.get_param_int("preview_rows", None)
            .and_then(|n| usize::try_from(n).ok())
            .unwrap_or(crate::normalizer::DEFAULT_PREVIEW_ROWS)
    }
}

/// Global configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GlobalConfig {
    /// List of enabled rules (empty means all enabled)
    #[serde(default)]
    pub enabled_rules: HashSet<String>,
    /// List of disabled rules
    #[serde(default)]
    pub disabled_rules: HashSet<String>,
    #[serde(flatten)]
    pub params: HashMap<String, toml::Value>,
}

/// Employee-specific configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EmployeeConfig {
    /// Rules disabled for this employee
    #[serde(default)]
    pub disabled_rules: HashSet<String>,
    #[serde(flatten)]
    pub params: HashMap<String, toml::Value>,
}

fn matches_rule_selector(selector: &str, rule_id: &str) -> bool {
    if selector == "ALL" {
        return true;
    }
    rule_id == selector || rule_id.starts_with(selector)
}
