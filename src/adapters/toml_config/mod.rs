// TOML config adapter - Configuration management using TOML files

use crate::domain::errors::*;
use crate::error::{ClipreelError, ClipreelResult};
use crate::ports::*;
use async_trait::async_trait;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Table holding clipreel settings in a config file
pub const CONFIG_SECTION: &str = "clipreel";

/// Recognised configuration keys
pub mod keys {
    pub const LOG_LEVEL: &str = "log_level";
    pub const LOG_FORMAT: &str = "log_format";
    pub const POSITION_POLL_MS: &str = "position_poll_ms";
    pub const SURFACE_START_DELAY_MS: &str = "surface_start_delay_ms";
    pub const SURFACE_NATURAL_LENGTH_SECS: &str = "surface_natural_length_secs";
    pub const WATCH_BASE_URL: &str = "watch_base_url";

    pub const ALL: &[&str] = &[
        LOG_LEVEL,
        LOG_FORMAT,
        POSITION_POLL_MS,
        SURFACE_START_DELAY_MS,
        SURFACE_NATURAL_LENGTH_SECS,
        WATCH_BASE_URL,
    ];
}

/// Built-in defaults for every key
pub const DEFAULTS: &[(&str, &str)] = &[
    (keys::LOG_LEVEL, "info"),
    (keys::LOG_FORMAT, "text"),
    (keys::POSITION_POLL_MS, "1000"),
    (keys::SURFACE_START_DELAY_MS, "300"),
    (keys::SURFACE_NATURAL_LENGTH_SECS, "30"),
    (keys::WATCH_BASE_URL, "https://youtube.com/watch?v="),
];

/// TOML configuration adapter
pub struct TomlConfigAdapter {
    config: Arc<RwLock<HashMap<String, String>>>,
}

impl TomlConfigAdapter {
    /// Create new TOML config adapter holding the defaults
    pub fn new() -> Self {
        let config = DEFAULTS
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();

        Self {
            config: Arc::new(RwLock::new(config)),
        }
    }

    fn read(&self) -> ClipreelResult<RwLockReadGuard<'_, HashMap<String, String>>> {
        self.config
            .read()
            .map_err(|_| DomainError::Internal("Config lock poisoned".to_string()).into())
    }

    fn write(&self) -> ClipreelResult<RwLockWriteGuard<'_, HashMap<String, String>>> {
        self.config
            .write()
            .map_err(|_| DomainError::Internal("Config lock poisoned".to_string()).into())
    }

    /// Merge the `[clipreel]` table of a TOML document into the configuration.
    /// Integers and booleans are accepted alongside strings.
    pub fn merge_toml(&self, toml_content: &str) -> ClipreelResult<usize> {
        let parsed: toml::Value = toml::from_str(toml_content)?;

        let Some(table) = parsed.get(CONFIG_SECTION).and_then(|section| section.as_table()) else {
            return Ok(0);
        };

        let mut config = self.write()?;
        let mut merged = 0;
        for (key, value) in table {
            let value = match value {
                toml::Value::String(s) => s.clone(),
                toml::Value::Integer(i) => i.to_string(),
                toml::Value::Boolean(b) => b.to_string(),
                other => {
                    return Err(ClipreelError::Config {
                        message: format!("Unsupported value for {}: {}", key, other),
                    })
                }
            };
            config.insert(key.clone(), value);
            merged += 1;
        }

        Ok(merged)
    }

    fn validate_number(config: &HashMap<String, String>, key: &str) -> Result<(), DomainError> {
        if let Some(value) = config.get(key) {
            value.parse::<u64>().map_err(|e| {
                DomainError::BadArgs(format!("Invalid value for {}: '{}' ({})", key, value, e))
            })?;
        }
        Ok(())
    }
}

impl Default for TomlConfigAdapter {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ConfigPort for TomlConfigAdapter {
    async fn get_config_or_default(&self, key: &str, default: &str) -> ClipreelResult<String> {
        let config = self.read()?;
        Ok(config
            .get(key)
            .cloned()
            .unwrap_or_else(|| default.to_string()))
    }

    async fn set_config(&self, key: &str, value: &str) -> ClipreelResult<()> {
        let mut config = self.write()?;
        config.insert(key.to_string(), value.to_string());
        tracing::debug!("Set config {} = {}", key, value);
        Ok(())
    }

    async fn load_config(&self, file_path: &str) -> ClipreelResult<()> {
        let path = PathBuf::from(file_path);

        if !path.exists() {
            return Err(ClipreelError::Config {
                message: format!("Config file does not exist: {}", file_path),
            });
        }

        let content = std::fs::read_to_string(&path)?;
        let merged = self.merge_toml(&content)?;
        tracing::debug!("Loaded {} settings from {}", merged, file_path);
        Ok(())
    }

    async fn validate_config(&self) -> ClipreelResult<()> {
        let config = self.read()?;

        for key in config.keys() {
            if !keys::ALL.contains(&key.as_str()) {
                return Err(DomainError::BadArgs(format!("Unknown configuration key: {}", key)).into());
            }
        }

        if let Some(log_level) = config.get(keys::LOG_LEVEL) {
            LogLevel::parse(log_level)?;
        }

        if let Some(log_format) = config.get(keys::LOG_FORMAT) {
            LogFormat::parse(log_format)?;
        }

        Self::validate_number(&config, keys::POSITION_POLL_MS)?;
        Self::validate_number(&config, keys::SURFACE_START_DELAY_MS)?;
        Self::validate_number(&config, keys::SURFACE_NATURAL_LENGTH_SECS)?;

        if let Some(base) = config.get(keys::WATCH_BASE_URL) {
            if url::Url::parse(base).is_err() {
                return Err(DomainError::BadArgs(format!("Invalid watch_base_url: {}", base)).into());
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[tokio::test]
    async fn test_defaults_are_valid() {
        let adapter = TomlConfigAdapter::new();
        adapter.validate_config().await.unwrap();
        for (key, value) in DEFAULTS {
            assert_eq!(adapter.get_config_or_default(key, "").await.unwrap(), *value);
        }
    }

    #[tokio::test]
    async fn test_load_config_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[clipreel]\nlog_level = \"debug\"\nposition_poll_ms = 250").unwrap();

        let adapter = TomlConfigAdapter::new();
        adapter
            .load_config(file.path().to_str().unwrap())
            .await
            .unwrap();

        assert_eq!(
            adapter.get_config_or_default(keys::LOG_LEVEL, "info").await.unwrap(),
            "debug"
        );
        assert_eq!(
            adapter.get_config_or_default(keys::POSITION_POLL_MS, "1000").await.unwrap(),
            "250"
        );
        adapter.validate_config().await.unwrap();
    }

    #[tokio::test]
    async fn test_missing_file_is_an_error() {
        let adapter = TomlConfigAdapter::new();
        let result = adapter.load_config("/definitely/not/here.toml").await;
        assert!(matches!(result, Err(ClipreelError::Config { .. })));
    }

    #[tokio::test]
    async fn test_invalid_toml_is_an_error() {
        let adapter = TomlConfigAdapter::new();
        assert!(matches!(adapter.merge_toml("[clipreel"), Err(ClipreelError::Toml(_))));
    }

    #[tokio::test]
    async fn test_other_sections_are_ignored() {
        let adapter = TomlConfigAdapter::new();
        assert_eq!(adapter.merge_toml("[other]\nlog_level = \"trace\"").unwrap(), 0);
        assert_eq!(
            adapter.get_config_or_default(keys::LOG_LEVEL, "").await.unwrap(),
            "info"
        );
    }

    #[tokio::test]
    async fn test_validation_rejects_bad_values() {
        let adapter = TomlConfigAdapter::new();
        adapter.set_config(keys::POSITION_POLL_MS, "soon").await.unwrap();
        assert!(adapter.validate_config().await.is_err());

        let adapter = TomlConfigAdapter::new();
        adapter.set_config(keys::LOG_LEVEL, "loud").await.unwrap();
        assert!(adapter.validate_config().await.is_err());

        let adapter = TomlConfigAdapter::new();
        adapter.set_config("volume", "11").await.unwrap();
        assert!(adapter.validate_config().await.is_err());
    }

    #[tokio::test]
    async fn test_get_config_or_default() {
        let adapter = TomlConfigAdapter::new();
        assert_eq!(
            adapter.get_config_or_default("missing", "fallback").await.unwrap(),
            "fallback"
        );
    }
}
