//! Query configuration
//!
//! Names of the control parameters the remote resource understands, and the
//! sentinel used by `all()`. Every value can be overridden from the environment.

use std::env;
use thiserror::Error;

/// Maximum number of results requested by `all()`
pub const MAX_RESULTS: u64 = 9999;

/// Per-page size used when none is given to `for_page`
pub const DEFAULT_PER_PAGE: u64 = 15;

/// Control parameter names and limits for query building
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryConfig {
    pub max_results: u64,
    pub limit_key: String,
    pub page_key: String,
    pub total_key: String,
    pub per_page_key: String,
    pub current_page_key: String,
    pub data_key: String,
    pub trashed_key: String,
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            max_results: MAX_RESULTS,
            limit_key: "limit".to_string(),
            page_key: "page".to_string(),
            total_key: "total".to_string(),
            per_page_key: "per_page".to_string(),
            current_page_key: "current_page".to_string(),
            data_key: "data".to_string(),
            trashed_key: "trashed".to_string(),
        }
    }
}

impl QueryConfig {
    /// Load configuration from environment variables, falling back to defaults
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let max_results = get_env_or_default("API_MAX_RESULTS", &defaults.max_results.to_string());
        let max_results = max_results.parse::<u64>().map_err(|_| ConfigError::InvalidValue {
            field: "max_results".to_string(),
            value: max_results,
            expected: "positive integer".to_string(),
        })?;

        Ok(QueryConfig {
            max_results,
            limit_key: get_env_or_default("API_LIMIT_KEY", &defaults.limit_key),
            page_key: get_env_or_default("API_PAGE_KEY", &defaults.page_key),
            total_key: get_env_or_default("API_TOTAL_KEY", &defaults.total_key),
            per_page_key: get_env_or_default("API_PER_PAGE_KEY", &defaults.per_page_key),
            current_page_key: get_env_or_default(
                "API_CURRENT_PAGE_KEY",
                &defaults.current_page_key,
            ),
            data_key: get_env_or_default("API_DATA_KEY", &defaults.data_key),
            trashed_key: get_env_or_default("API_TRASHED_KEY", &defaults.trashed_key),
        })
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_results == 0 {
            return Err(ConfigError::ValidationFailed {
                field: "max_results".to_string(),
                reason: "Max results cannot be 0".to_string(),
            });
        }

        let keys = [
            ("limit_key", &self.limit_key),
            ("page_key", &self.page_key),
            ("total_key", &self.total_key),
            ("per_page_key", &self.per_page_key),
            ("current_page_key", &self.current_page_key),
            ("data_key", &self.data_key),
            ("trashed_key", &self.trashed_key),
        ];
        for (field, value) in keys {
            if value.is_empty() {
                return Err(ConfigError::ValidationFailed {
                    field: field.to_string(),
                    reason: "Parameter name cannot be empty".to_string(),
                });
            }
        }

        if self.limit_key == self.page_key {
            return Err(ConfigError::ValidationFailed {
                field: "page_key".to_string(),
                reason: format!("Page key must differ from limit key '{}'", self.limit_key),
            });
        }

        Ok(())
    }

    /// Whether `field` is one of the control keys reserved for pagination
    pub fn is_reserved(&self, field: &str) -> bool {
        field == self.limit_key || field == self.page_key
    }
}

fn get_env_or_default(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("Invalid value for {field}: '{value}', expected {expected}")]
    InvalidValue { field: String, value: String, expected: String },

    #[error("Validation failed for {field}: {reason}")]
    ValidationFailed { field: String, reason: String },
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    const VARS: [&str; 8] = [
        "API_MAX_RESULTS",
        "API_LIMIT_KEY",
        "API_PAGE_KEY",
        "API_TOTAL_KEY",
        "API_PER_PAGE_KEY",
        "API_CURRENT_PAGE_KEY",
        "API_DATA_KEY",
        "API_TRASHED_KEY",
    ];

    fn clean_test_env() {
        for var in VARS {
            env::remove_var(var);
        }
    }

    #[test]
    #[serial]
    fn test_defaults_without_env() {
        clean_test_env();

        let config = QueryConfig::from_env().unwrap();
        assert_eq!(config, QueryConfig::default());
        assert_eq!(config.max_results, 9999);
        assert!(config.validate().is_ok());
    }

    #[test]
    #[serial]
    fn test_from_env_overrides() {
        clean_test_env();
        env::set_var("API_MAX_RESULTS", "500");
        env::set_var("API_LIMIT_KEY", "per_page");
        env::set_var("API_DATA_KEY", "items");

        let config = QueryConfig::from_env().unwrap();
        assert_eq!(config.max_results, 500);
        assert_eq!(config.limit_key, "per_page");
        assert_eq!(config.data_key, "items");
        assert_eq!(config.page_key, "page");

        clean_test_env();
    }

    #[test]
    #[serial]
    fn test_invalid_max_results() {
        clean_test_env();
        env::set_var("API_MAX_RESULTS", "lots");

        let result = QueryConfig::from_env();
        assert!(matches!(result, Err(ConfigError::InvalidValue { ref field, .. }) if field == "max_results"));

        clean_test_env();
    }

    #[test]
    fn test_validation_failures() {
        let config = QueryConfig {
            max_results: 0,
            ..QueryConfig::default()
        };
        assert!(config.validate().is_err());

        let config = QueryConfig {
            page_key: "limit".to_string(),
            ..QueryConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ValidationFailed { ref field, .. }) if field == "page_key"
        ));

        let config = QueryConfig {
            data_key: String::new(),
            ..QueryConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_reserved_keys() {
        let config = QueryConfig::default();
        assert!(config.is_reserved("limit"));
        assert!(config.is_reserved("page"));
        assert!(!config.is_reserved("total"));
    }
}
