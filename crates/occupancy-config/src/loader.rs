//! Configuration loading utilities

use crate::schema::{Config, Granularity, SelectionOccupancy};
use occupancy_common::OccupancyError;
use std::env;
use std::path::Path;
use thiserror::Error;
use tracing::{debug, info};

/// Environment variable naming the configuration file.
pub const CONFIG_PATH_ENV: &str = "OCCUPANCY_CONFIG_PATH";

/// Files probed in the working directory when no path is given.
pub const DEFAULT_CONFIG_FILES: [&str; 3] = ["occupancy.yaml", "occupancy.yml", "occupancy.toml"];

/// Configuration loading errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O error when reading configuration file
    #[error("Failed to read configuration file: {0}")]
    IoError(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML configuration: {0}")]
    ParseError(#[from] serde_yaml::Error),

    /// TOML parsing error
    #[error("Failed to parse TOML configuration: {0}")]
    TomlParseError(#[from] toml::de::Error),

    /// Configuration validation error
    #[error("Configuration validation failed: {0}")]
    ValidationError(#[from] validator::ValidationErrors),

    /// Environment variable parsing error
    #[error("Failed to parse environment variable '{var}': {source}")]
    EnvParseError {
        /// Variable name
        var: String,
        /// Underlying parse failure
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// File extension that maps to no known format
    #[error("Unsupported configuration format: {0}")]
    UnsupportedFormat(String),
}

impl From<ConfigError> for OccupancyError {
    fn from(err: ConfigError) -> Self {
        let message = err.to_string();
        Self::config_with_source(message, err)
    }
}

/// Configuration loader for the report
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from a YAML or TOML file with environment variable overrides
    pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;

        let mut config: Config = match path.extension().and_then(|ext| ext.to_str()) {
            Some("yaml" | "yml") => serde_yaml::from_str(&content)?,
            Some("toml") => toml::from_str(&content)?,
            other => {
                return Err(ConfigError::UnsupportedFormat(
                    other.unwrap_or("<none>").to_string(),
                ))
            }
        };

        Self::apply_env_overrides(&mut config)?;
        config.validate_all()?;

        info!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Load configuration from the environment-named file, a default file, or defaults
    pub fn load() -> occupancy_common::Result<Config> {
        if let Ok(config_path) = env::var(CONFIG_PATH_ENV) {
            return Ok(Self::load_config(config_path)?);
        }

        if let Some(path) = DEFAULT_CONFIG_FILES
            .iter()
            .map(Path::new)
            .find(|path| path.exists())
        {
            return Ok(Self::load_config(path)?);
        }

        debug!("No configuration file found, using defaults");
        let mut config = Config::default();
        Self::apply_env_overrides(&mut config)?;
        config.validate_all().map_err(ConfigError::ValidationError)?;
        Ok(config)
    }

    /// Load configuration from a specific file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> occupancy_common::Result<Config> {
        Ok(Self::load_config(path)?)
    }

    /// Apply environment variable overrides to configuration
    pub fn apply_env_overrides(config: &mut Config) -> Result<(), ConfigError> {
        Self::apply_overrides_from(config, |name| env::var(name).ok())
    }

    /// Apply overrides read through `lookup`, which maps a variable name to its value
    pub fn apply_overrides_from<F>(config: &mut Config, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = lookup("OCCUPANCY_INCLUDE_BLOCKED") {
            config.report.include_blocked = parse_var("OCCUPANCY_INCLUDE_BLOCKED", &value)?;
        }

        if let Some(value) = lookup("OCCUPANCY_SHOW_YOY") {
            config.report.show_yoy = parse_var("OCCUPANCY_SHOW_YOY", &value)?;
        }

        if let Some(value) = lookup("OCCUPANCY_GRANULARITY") {
            config.report.granularity = parse_var::<Granularity>("OCCUPANCY_GRANULARITY", &value)?;
        }

        if let Some(value) = lookup("OCCUPANCY_TAILS") {
            config.report.tails = parse_var("OCCUPANCY_TAILS", &value)?;
        }

        if let Some(value) = lookup("OCCUPANCY_SELECTION_OCCUPANCY") {
            config.report.selection_occupancy =
                parse_var::<SelectionOccupancy>("OCCUPANCY_SELECTION_OCCUPANCY", &value)?;
        }

        if let Some(level) = lookup("OCCUPANCY_LOG_LEVEL") {
            config.logging.level = level;
        }

        if let Some(file) = lookup("OCCUPANCY_LOG_FILE") {
            config.logging.file_path = Some(file);
        }

        Ok(())
    }
}

fn parse_var<T>(var: &str, value: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    value.trim().parse().map_err(|e| ConfigError::EnvParseError {
        var: var.to_string(),
        source: Box::new(e),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;
    use tempfile::NamedTempFile;

    /// Create a temporary config file with the given extension for testing
    fn create_test_config_file(content: &str, suffix: &str) -> NamedTempFile {
        let mut file = tempfile::Builder::new()
            .suffix(suffix)
            .tempfile()
            .expect("Failed to create temp file");
        file.write_all(content.as_bytes())
            .expect("Failed to write to temp file");
        file
    }

    fn vars(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn test_parse_yaml_config() {
        let yaml_content = "report:\n  include_blocked: true\n  show_yoy: true\n  granularity: weekly\n  tails: 3\nfilters:\n  date_range:\n    start: 2025-01-01\n    end: 2025-03-01\n  site_ids: [\"site-1\", \"site-2\"]\nlogging:\n  level: debug";

        let config: Config = serde_yaml::from_str(yaml_content).expect("Failed to parse config");

        assert!(config.report.include_blocked);
        assert!(config.report.show_yoy);
        assert_eq!(config.report.granularity, Granularity::Weekly);
        assert_eq!(config.report.tails, 3);
        assert_eq!(config.filters.date_range.days(), 59);
        assert_eq!(config.filters.site_ids.len(), 2);
        assert_eq!(config.logging.level, "debug");
        assert!(config.validate_all().is_ok());
    }

    #[test]
    fn test_partial_yaml_uses_defaults() {
        let config: Config = serde_yaml::from_str("report:\n  show_yoy: true").unwrap();
        assert!(config.report.show_yoy);
        assert_eq!(config.report.tails, 2);
        assert_eq!(config.filters, crate::schema::ReportFilters::default());
    }

    #[test]
    fn test_load_toml_config() {
        let toml_content = "[report]\ngranularity = \"monthly\"\nselection_occupancy = \"overlap-only\"\n\n[filters]\nsite_type_ids = [\"type-4\"]\n";
        let file = create_test_config_file(toml_content, ".toml");

        let config = ConfigLoader::load_config(file.path()).expect("Failed to load config");
        assert_eq!(config.report.granularity, Granularity::Monthly);
        assert_eq!(
            config.report.selection_occupancy,
            SelectionOccupancy::OverlapOnly
        );
        assert_eq!(config.filters.site_type_ids.len(), 1);
    }

    #[test]
    fn test_invalid_yaml() {
        let file = create_test_config_file("report:\n  tails: [unclosed", ".yaml");
        let result = ConfigLoader::load_config(file.path());
        assert!(matches!(result.unwrap_err(), ConfigError::ParseError(_)));
    }

    #[test]
    fn test_validation_error() {
        let file = create_test_config_file("report:\n  tails: 9", ".yml");
        let result = ConfigLoader::load_config(file.path());
        assert!(matches!(
            result.unwrap_err(),
            ConfigError::ValidationError(_)
        ));
    }

    #[test]
    fn test_unsupported_extension() {
        let file = create_test_config_file("{}", ".json");
        let result = ConfigLoader::load_config(file.path());
        assert!(matches!(
            result.unwrap_err(),
            ConfigError::UnsupportedFormat(ext) if ext == "json"
        ));
    }

    #[test]
    fn test_missing_config_file() {
        let result = ConfigLoader::load_config("/nonexistent/path/occupancy.yaml");
        assert!(matches!(result.unwrap_err(), ConfigError::IoError(_)));
    }

    #[test]
    fn test_overrides_replace_file_values() {
        let env = vars(&[
            ("OCCUPANCY_INCLUDE_BLOCKED", "true"),
            ("OCCUPANCY_SHOW_YOY", "true"),
            ("OCCUPANCY_GRANULARITY", "daily"),
            ("OCCUPANCY_TAILS", " 4 "),
            ("OCCUPANCY_LOG_LEVEL", "warn"),
        ]);
        let mut config = Config::default();

        ConfigLoader::apply_overrides_from(&mut config, |name| env.get(name).cloned()).unwrap();

        assert!(config.report.include_blocked);
        assert!(config.report.show_yoy);
        assert_eq!(config.report.granularity, Granularity::Daily);
        assert_eq!(config.report.tails, 4);
        assert_eq!(config.logging.level, "warn");
    }

    #[test]
    fn test_override_parse_error_names_variable() {
        let env = vars(&[("OCCUPANCY_TAILS", "many")]);
        let mut config = Config::default();

        let err = ConfigLoader::apply_overrides_from(&mut config, |name| env.get(name).cloned())
            .unwrap_err();
        match err {
            ConfigError::EnvParseError { var, .. } => assert_eq!(var, "OCCUPANCY_TAILS"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_config_error_converts_to_occupancy_error() {
        let err: OccupancyError = ConfigError::UnsupportedFormat("ini".to_string()).into();
        assert!(err.to_string().contains("Unsupported configuration format: ini"));
    }
}
