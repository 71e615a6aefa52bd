//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading a planner
//! configuration from a YAML file and validating it.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::{PlannerError, PlannerResult};

use super::types::PlannerConfig;

/// Loads and validates planner configuration.
///
/// # File Format
///
/// ```text
/// weekday_hours:
///   monday: 8.0
///   friday: 7.0
/// reserve_hours: 1.5
/// lunch_hours: 1.0
/// off_days: [2025-05-01, 2025-05-08]
/// small_job_threshold: 8
/// ```
///
/// Omitted fields fall back to [`PlannerConfig::default`].
///
/// # Example
///
/// ```no_run
/// use maintenance_planner::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/planner.yaml")?;
/// println!("Reserve: {}h", loader.config().reserve_hours);
/// # Ok::<(), maintenance_planner::error::PlannerError>(())
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: PlannerConfig,
}

impl ConfigLoader {
    /// Loads configuration from a YAML file.
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` on success, or an error if:
    /// - The file is missing (`ConfigNotFound`)
    /// - The file contains invalid YAML (`ConfigParseError`)
    /// - A value is out of range (`InvalidConfig`)
    pub fn load<P: AsRef<Path>>(path: P) -> PlannerResult<Self> {
        let path = path.as_ref();
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| PlannerError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        let config: PlannerConfig =
            serde_yaml::from_str(&content).map_err(|e| PlannerError::ConfigParseError {
                path: path_str.clone(),
                message: e.to_string(),
            })?;

        debug!(path = %path_str, off_days = config.off_days.len(), "Loaded planner configuration");
        Self::from_config(config)
    }

    /// Parses configuration from an in-memory YAML document.
    pub fn from_yaml_str(yaml: &str) -> PlannerResult<Self> {
        let config: PlannerConfig =
            serde_yaml::from_str(yaml).map_err(|e| PlannerError::ConfigParseError {
                path: "<inline>".to_string(),
                message: e.to_string(),
            })?;
        Self::from_config(config)
    }

    /// Wraps an already-built configuration after validating it.
    pub fn from_config(config: PlannerConfig) -> PlannerResult<Self> {
        validate(&config)?;
        Ok(Self { config })
    }

    /// Returns the validated configuration.
    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    /// Consumes the loader, returning the configuration.
    pub fn into_config(self) -> PlannerConfig {
        self.config
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self {
            config: PlannerConfig::default(),
        }
    }
}

/// Rejects negative or non-finite hours and thresholds.
pub fn validate(config: &PlannerConfig) -> PlannerResult<()> {
    for (day, hours) in config.weekday_hours.entries() {
        check_non_negative(&format!("weekday_hours.{}", day), hours)?;
    }
    check_non_negative("reserve_hours", config.reserve_hours)?;
    check_non_negative("lunch_hours", config.lunch_hours)?;
    check_non_negative("small_job_threshold", config.small_job_threshold)?;
    Ok(())
}

fn check_non_negative(field: &str, value: f64) -> PlannerResult<()> {
    if !value.is_finite() {
        return Err(PlannerError::InvalidConfig {
            field: field.to_string(),
            message: format!("must be a finite number, got {}", value),
        });
    }
    if value < 0.0 {
        return Err(PlannerError::InvalidConfig {
            field: field.to_string(),
            message: format!("must not be negative, got {}", value),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::io::Write;

    #[test]
    fn test_load_valid_configuration_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "weekday_hours:\n  friday: 7.0\nreserve_hours: 1.0\nlunch_hours: 0\noff_days:\n  - 2025-05-01\nsmall_job_threshold: 5"
        )
        .unwrap();

        let loader = ConfigLoader::load(file.path()).unwrap();
        let config = loader.config();
        assert_eq!(config.weekday_hours.friday, 7.0);
        assert_eq!(config.weekday_hours.monday, 8.0);
        assert_eq!(config.reserve_hours, 1.0);
        assert_eq!(config.lunch_hours, 0.0);
        assert_eq!(config.small_job_threshold, 5.0);
        assert!(
            config
                .off_days
                .contains(&NaiveDate::from_ymd_opt(2025, 5, 1).unwrap())
        );
    }

    #[test]
    fn test_load_missing_file_returns_error() {
        let result = ConfigLoader::load("/nonexistent/planner.yaml");
        match result {
            Err(PlannerError::ConfigNotFound { path }) => {
                assert!(path.contains("planner.yaml"));
            }
            _ => panic!("Expected ConfigNotFound error"),
        }
    }

    #[test]
    fn test_invalid_yaml_returns_parse_error() {
        let result = ConfigLoader::from_yaml_str("reserve_hours: [not, a, number]");
        assert!(matches!(
            result,
            Err(PlannerError::ConfigParseError { .. })
        ));
    }

    #[test]
    fn test_negative_reserve_is_rejected() {
        let result = ConfigLoader::from_yaml_str("reserve_hours: -1.0");
        match result {
            Err(PlannerError::InvalidConfig { field, .. }) => {
                assert_eq!(field, "reserve_hours");
            }
            _ => panic!("Expected InvalidConfig error"),
        }
    }

    #[test]
    fn test_negative_weekday_hours_names_the_day() {
        let result = ConfigLoader::from_yaml_str("weekday_hours:\n  tuesday: -2");
        match result {
            Err(PlannerError::InvalidConfig { field, .. }) => {
                assert_eq!(field, "weekday_hours.tuesday");
            }
            _ => panic!("Expected InvalidConfig error"),
        }
    }

    #[test]
    fn test_empty_document_yields_defaults() {
        let loader = ConfigLoader::from_yaml_str("{}").unwrap();
        assert_eq!(loader.into_config(), PlannerConfig::default());
    }
}
