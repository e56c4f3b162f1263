use std::fmt;
use std::str::FromStr;

/// How an edited assigned amount is mapped to a backend resource
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AssignedTarget {
    /// `PATCH /categories/{id}` with the id rendered into the input
    #[default]
    Direct,
    /// Resolve the id through `GET /categories?category_name=` first
    ByCategoryName,
    /// Resolve a month-scoped line through `GET /budgets?category_name=&year=&month=`
    MonthlyBudget,
}

impl FromStr for AssignedTarget {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "direct" => Ok(AssignedTarget::Direct),
            "by-name" | "by_category_name" | "name" => Ok(AssignedTarget::ByCategoryName),
            "monthly" | "monthly-budget" | "budget" => Ok(AssignedTarget::MonthlyBudget),
            other => Err(format!("unknown assigned target: {}", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum LogLevel {
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warn => "WARN",
            LogLevel::Error => "ERROR",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "debug" | "trace" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" | "warning" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            other => Err(format!("unknown log level: {}", other)),
        }
    }
}

/// Runtime settings for the frontend
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// API prefix, e.g. `/api/v1` or `http://localhost:9000/api/v1`
    pub api_base: String,
    /// Budget the pages operate on.
    ///
    /// The backend serves categories and transactions only under
    /// `{api_base}/budgets/{budget_id}`, so `BUDGET_ID` must be set for a real
    /// deployment. Empty means unscoped routes, which only a stub server answers.
    pub budget_id: String,
    pub assigned_target: AssignedTarget,
    pub log_level: LogLevel,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base: "/api/v1".to_string(),
            budget_id: String::new(),
            assigned_target: AssignedTarget::default(),
            log_level: LogLevel::default(),
        }
    }
}

impl AppConfig {
    /// Build a config from optional raw values; blank or unparseable values
    /// keep their defaults.
    pub fn from_values(
        api_base: Option<&str>,
        budget_id: Option<&str>,
        assigned_target: Option<&str>,
        log_level: Option<&str>,
    ) -> Self {
        fn non_blank(v: Option<&str>) -> Option<&str> {
            v.map(str::trim).filter(|v| !v.is_empty())
        }

        let defaults = Self::default();

        Self {
            api_base: non_blank(api_base)
                .map(|v| v.trim_end_matches('/').to_string())
                .unwrap_or(defaults.api_base),
            budget_id: non_blank(budget_id).map(str::to_string).unwrap_or(defaults.budget_id),
            assigned_target: non_blank(assigned_target)
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.assigned_target),
            log_level: non_blank(log_level)
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.log_level),
        }
    }

    pub fn is_budget_scoped(&self) -> bool {
        !self.budget_id.is_empty()
    }

    /// Values baked in at build time through `BUDGET_*` environment variables
    pub fn from_build_env() -> Self {
        Self::from_values(
            option_env!("BUDGET_API_BASE"),
            option_env!("BUDGET_ID"),
            option_env!("BUDGET_ASSIGNED_TARGET"),
            option_env!("BUDGET_LOG_LEVEL"),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::from_values(None, None, None, None);
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.api_base, "/api/v1");
        assert_eq!(config.assigned_target, AssignedTarget::Direct);
        assert_eq!(config.log_level, LogLevel::Info);
    }

    #[test]
    fn test_values_are_trimmed_and_parsed() {
        let config = AppConfig::from_values(
            Some("http://localhost:9000/api/v1/"),
            Some(" ed903d5b "),
            Some("Monthly"),
            Some("warning"),
        );
        assert_eq!(config.api_base, "http://localhost:9000/api/v1");
        assert_eq!(config.budget_id, "ed903d5b");
        assert_eq!(config.assigned_target, AssignedTarget::MonthlyBudget);
        assert_eq!(config.log_level, LogLevel::Warn);
    }

    #[test]
    fn test_unknown_values_fall_back() {
        let config = AppConfig::from_values(Some("   "), None, Some("sideways"), Some("loud"));
        assert_eq!(config.api_base, "/api/v1");
        assert_eq!(config.assigned_target, AssignedTarget::Direct);
        assert_eq!(config.log_level, LogLevel::Info);
    }

    #[test]
    fn test_budget_scope_follows_budget_id() {
        assert!(!AppConfig::from_values(None, None, None, None).is_budget_scoped());
        assert!(!AppConfig::from_values(None, Some("  "), None, None).is_budget_scoped());
        assert!(AppConfig::from_values(None, Some("b-1"), None, None).is_budget_scoped());
    }

    #[test]
    fn test_log_level_ordering() {
        assert!(LogLevel::Debug < LogLevel::Info);
        assert!(LogLevel::Warn < LogLevel::Error);
        assert_eq!(LogLevel::Warn.to_string(), "WARN");
    }
}
