//! Layered configuration loading and validation.

use anyhow::{Context, Result};
use figment::providers::{Env, Format, Serialized, Yaml};
use figment::Figment;
use thiserror::Error;

use crate::domain::models::config::Config;

/// Configuration error types
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Store address cannot be empty")]
    EmptyStoreAddress,

    #[error("Invalid connect_timeout_ms: {0}. Must be at least 1")]
    InvalidConnectTimeout(u64),

    #[error("Invalid operation_timeout_ms: {0}. Must be at least 1")]
    InvalidOperationTimeout(u64),

    #[error("Invalid sweep_interval_secs: {0}. Must be at least 1")]
    InvalidSweepInterval(u64),

    #[error("Invalid retention_secs: {0}. Must be at least 1")]
    InvalidRetention(u64),

    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    #[error("Invalid log format: {0}. Must be one of: json, pretty")]
    InvalidLogFormat(String),

    #[error("Invalid log rotation: {0}. Must be one of: daily, hourly, never")]
    InvalidLogRotation(String),
}

/// Environment variable prefix for overrides, e.g. `PIPELINE_CACHE_STORE__ADDRESS`.
pub const ENV_PREFIX: &str = "PIPELINE_CACHE_";

/// Configuration loader with hierarchical merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration with hierarchical merging
    ///
    /// Precedence (lowest to highest):
    /// 1. Programmatic defaults (Serialized)
    /// 2. .pipeline-cache/config.yaml (project config)
    /// 3. .pipeline-cache/local.yaml (local overrides, optional)
    /// 4. Environment variables (PIPELINE_CACHE_* prefix, highest priority)
    pub fn load() -> Result<Config> {
        let config: Config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Yaml::file(".pipeline-cache/config.yaml"))
            .merge(Yaml::file(".pipeline-cache/local.yaml"))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()
            .context("Failed to extract configuration from figment")?;

        Self::validate(&config)?;
        Ok(config)
    }

    /// Load configuration from a specific file, still honoring env overrides
    pub fn load_from_file(path: impl AsRef<std::path::Path>) -> Result<Config> {
        let config: Config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Yaml::file(path.as_ref()))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()
            .context(format!(
                "Failed to load config from {}",
                path.as_ref().display()
            ))?;

        Self::validate(&config)?;
        Ok(config)
    }

    /// Validate configuration after loading
    pub fn validate(config: &Config) -> Result<(), ConfigError> {
        let store = &config.store;
        if store.address.trim().is_empty() {
            return Err(ConfigError::EmptyStoreAddress);
        }
        if store.connect_timeout_ms == 0 {
            return Err(ConfigError::InvalidConnectTimeout(store.connect_timeout_ms));
        }
        if store.operation_timeout_ms == 0 {
            return Err(ConfigError::InvalidOperationTimeout(store.operation_timeout_ms));
        }
        if store.sweep_interval_secs == 0 {
            return Err(ConfigError::InvalidSweepInterval(store.sweep_interval_secs));
        }

        if config.cache.retention_secs == 0 {
            return Err(ConfigError::InvalidRetention(config.cache.retention_secs));
        }

        let valid_log_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_log_levels.contains(&config.logging.level.as_str()) {
            return Err(ConfigError::InvalidLogLevel(config.logging.level.clone()));
        }

        let valid_log_formats = ["json", "pretty"];
        if !valid_log_formats.contains(&config.logging.format.as_str()) {
            return Err(ConfigError::InvalidLogFormat(config.logging.format.clone()));
        }

        let valid_rotations = ["daily", "hourly", "never"];
        if !valid_rotations.contains(&config.logging.rotation.as_str()) {
            return Err(ConfigError::InvalidLogRotation(config.logging.rotation.clone()));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::config::{StoreBackend, StoreConfig};
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.store.backend, StoreBackend::Redis);
        assert_eq!(config.store.address, "localhost:6379");
        assert_eq!(config.cache.retention_secs, 900);
        assert_eq!(config.logging.level, "info");
        ConfigLoader::validate(&config).expect("Default config should be valid");
    }

    #[test]
    fn test_yaml_parsing() {
        let yaml = r"
store:
  backend: memory
  address: cache.internal:6380
  operation_timeout_ms: 250
cache:
  retention_secs: 60
logging:
  level: debug
  format: pretty
";

        let config: Config = serde_yaml::from_str(yaml).expect("YAML should parse");

        assert_eq!(config.store.backend, StoreBackend::Memory);
        assert_eq!(config.store.address, "cache.internal:6380");
        assert_eq!(config.store.operation_timeout_ms, 250);
        assert_eq!(config.store.connect_timeout_ms, 5_000);
        assert_eq!(config.cache.retention_secs, 60);
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.logging.format, "pretty");
        assert_eq!(config.logging.rotation, "daily");

        ConfigLoader::validate(&config).expect("Parsed config should be valid");
    }

    #[test]
    fn test_load_from_file_with_env_override() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "store:\n  address: from-file:6379\ncache:\n  retention_secs: 120").unwrap();

        temp_env::with_vars(
            [
                ("PIPELINE_CACHE_STORE__ADDRESS", Some("from-env:6379")),
                ("PIPELINE_CACHE_STORE__BACKEND", Some("memory")),
            ],
            || {
                let config = ConfigLoader::load_from_file(file.path()).unwrap();
                assert_eq!(config.store.address, "from-env:6379");
                assert_eq!(config.store.backend, StoreBackend::Memory);
                assert_eq!(config.cache.retention_secs, 120);
            },
        );
    }

    #[test]
    fn test_load_from_file_rejects_invalid_values() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "cache:\n  retention_secs: 0").unwrap();

        let err = ConfigLoader::load_from_file(file.path()).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ConfigError>(),
            Some(ConfigError::InvalidRetention(0))
        ));
    }

    #[test]
    fn test_validate_empty_address() {
        let config = Config {
            store: StoreConfig {
                address: "   ".to_string(),
                ..Default::default()
            },
            ..Default::default()
        };

        assert!(matches!(
            ConfigLoader::validate(&config).unwrap_err(),
            ConfigError::EmptyStoreAddress
        ));
    }

    #[test]
    fn test_validate_zero_timeouts() {
        let mut config = Config::default();
        config.store.connect_timeout_ms = 0;
        assert!(matches!(
            ConfigLoader::validate(&config).unwrap_err(),
            ConfigError::InvalidConnectTimeout(0)
        ));

        let mut config = Config::default();
        config.store.operation_timeout_ms = 0;
        assert!(matches!(
            ConfigLoader::validate(&config).unwrap_err(),
            ConfigError::InvalidOperationTimeout(0)
        ));

        let mut config = Config::default();
        config.store.sweep_interval_secs = 0;
        assert!(matches!(
            ConfigLoader::validate(&config).unwrap_err(),
            ConfigError::InvalidSweepInterval(0)
        ));
    }

    #[test]
    fn test_validate_invalid_log_level() {
        let mut config = Config::default();
        config.logging.level = "invalid".to_string();

        match ConfigLoader::validate(&config).unwrap_err() {
            ConfigError::InvalidLogLevel(level) => assert_eq!(level, "invalid"),
            other => panic!("Expected InvalidLogLevel error, got {other:?}"),
        }
    }

    #[test]
    fn test_validate_invalid_log_format() {
        let mut config = Config::default();
        config.logging.format = "xml".to_string();

        match ConfigLoader::validate(&config).unwrap_err() {
            ConfigError::InvalidLogFormat(format) => assert_eq!(format, "xml"),
            other => panic!("Expected InvalidLogFormat error, got {other:?}"),
        }
    }

    #[test]
    fn test_validate_invalid_rotation() {
        let mut config = Config::default();
        config.logging.rotation = "weekly".to_string();

        assert!(matches!(
            ConfigLoader::validate(&config).unwrap_err(),
            ConfigError::InvalidLogRotation(_)
        ));
    }
}
