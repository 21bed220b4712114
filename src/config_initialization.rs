//! Configuration initialization and hierarchy management

use std::path::{Path, PathBuf};
use std::time::Duration;

use tracing::{debug, info};

use crate::adapters::simulated_surface::SimulatedSurfaceSettings;
use crate::adapters::toml_config::{keys, DEFAULTS};
use crate::app::player_interactor::PlayerSettings;
use crate::cli::{Cli, Commands};
use crate::domain::errors::DomainError;
use crate::error::ClipreelResult;
use crate::ports::{ConfigPort, LogFormat, LogLevel};
use crate::scheduler::DriverSettings;

/// Config file picked up from the working directory when `--config` is absent
pub const DEFAULT_CONFIG_FILE: &str = "clipreel.toml";

/// Prefix of environment overrides, e.g. `CLIPREEL_LOG_LEVEL`
pub const ENV_PREFIX: &str = "CLIPREEL_";

/// Typed view of the resolved configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub log_level: LogLevel,
    pub log_format: LogFormat,
    /// `None` disables position polling
    pub position_poll: Option<Duration>,
    pub surface: SimulatedSurfaceSettings,
    pub watch_base_url: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            log_level: LogLevel::Info,
            log_format: LogFormat::Text,
            position_poll: Some(Duration::from_millis(1000)),
            surface: SimulatedSurfaceSettings::default(),
            watch_base_url: "https://youtube.com/watch?v=".to_string(),
        }
    }
}

impl Settings {
    /// Read every key from a config port. Missing keys take their default.
    pub async fn from_config(config: &dyn ConfigPort) -> ClipreelResult<Self> {
        let log_level = LogLevel::parse(&Self::value(config, keys::LOG_LEVEL).await?)?;
        let log_format = LogFormat::parse(&Self::value(config, keys::LOG_FORMAT).await?)?;
        let poll_ms = Self::number(config, keys::POSITION_POLL_MS).await?;
        let start_delay_ms = Self::number(config, keys::SURFACE_START_DELAY_MS).await?;
        let natural_length_secs = Self::number(config, keys::SURFACE_NATURAL_LENGTH_SECS).await?;
        let watch_base_url = Self::value(config, keys::WATCH_BASE_URL).await?;

        Ok(Self {
            log_level,
            log_format,
            position_poll: (poll_ms > 0).then(|| Duration::from_millis(poll_ms)),
            surface: SimulatedSurfaceSettings {
                start_delay: Duration::from_millis(start_delay_ms),
                natural_length: Duration::from_secs(natural_length_secs),
            },
            watch_base_url,
        })
    }

    pub fn player_settings(&self) -> PlayerSettings {
        PlayerSettings {
            driver: DriverSettings {
                position_poll: self.position_poll,
            },
            surface: self.surface,
        }
    }

    async fn value(config: &dyn ConfigPort, key: &str) -> ClipreelResult<String> {
        let default = DEFAULTS
            .iter()
            .find(|(name, _)| *name == key)
            .map(|(_, value)| *value)
            .unwrap_or_default();
        config.get_config_or_default(key, default).await
    }

    async fn number(config: &dyn ConfigPort, key: &str) -> ClipreelResult<u64> {
        let value = Self::value(config, key).await?;
        value.trim().parse::<u64>().map_err(|e| {
            DomainError::BadArgs(format!("Invalid value for {}: '{}' ({})", key, value, e)).into()
        })
    }
}

/// Where the resolved configuration came from
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigSources {
    pub config_file: Option<PathBuf>,
    /// Names of the `CLIPREEL_*` variables that were applied
    pub env_overrides: Vec<String>,
    pub cli_overrides: usize,
}

impl ConfigSources {
    /// Log how the configuration was assembled. Call once logging is initialized.
    pub fn log_summary(&self, settings: &Settings) {
        match &self.config_file {
            Some(path) => info!("Loaded configuration from: {}", path.display()),
            None => debug!("No configuration file found"),
        }
        for env_var in &self.env_overrides {
            debug!("Found environment override: {}", env_var);
        }
        if !self.env_overrides.is_empty() {
            info!("Applied {} environment variable overrides", self.env_overrides.len());
        }
        if self.cli_overrides > 0 {
            debug!("Applied {} CLI configuration overrides", self.cli_overrides);
        }
        debug!(?settings, "Configuration hierarchy initialized");
    }
}

/// Settings together with the sources they were read from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    pub settings: Settings,
    pub sources: ConfigSources,
}

/// Initialize configuration hierarchy following precedence: CLI > Env > File > Defaults
pub async fn initialize_configuration_hierarchy(
    config: &dyn ConfigPort,
    cli: &Cli,
) -> ClipreelResult<ResolvedConfig> {
    // Defaults are already held by the adapter
    let config_file = load_config_file(config, cli.config.as_deref()).await?;
    let env_overrides = load_environment_variables(config, |name| std::env::var(name).ok()).await?;
    let cli_overrides = apply_cli_configuration_overrides(config, cli).await?;

    config.validate_config().await?;
    let settings = Settings::from_config(config).await?;
    Ok(ResolvedConfig {
        settings,
        sources: ConfigSources {
            config_file,
            env_overrides,
            cli_overrides,
        },
    })
}

/// Load an explicit config file, or `clipreel.toml` if one is present.
/// An explicit file that cannot be read is an error.
pub async fn load_config_file(
    config: &dyn ConfigPort,
    explicit: Option<&Path>,
) -> ClipreelResult<Option<PathBuf>> {
    let path = match explicit {
        Some(path) => path.to_path_buf(),
        None if Path::new(DEFAULT_CONFIG_FILE).exists() => PathBuf::from(DEFAULT_CONFIG_FILE),
        None => return Ok(None),
    };

    config.load_config(&path.to_string_lossy()).await?;
    Ok(Some(path))
}

/// Apply `CLIPREEL_*` environment overrides. `lookup` resolves a variable name.
/// Returns the names of the variables that were applied.
pub async fn load_environment_variables<F>(
    config: &dyn ConfigPort,
    lookup: F,
) -> ClipreelResult<Vec<String>>
where
    F: Fn(&str) -> Option<String>,
{
    let mut applied = Vec::new();
    for key in keys::ALL {
        let env_var = format!("{}{}", ENV_PREFIX, key.to_uppercase());
        if let Some(value) = lookup(&env_var) {
            config.set_config(key, &value).await?;
            applied.push(env_var);
        }
    }
    Ok(applied)
}

/// Apply CLI argument overrides to configuration
pub async fn apply_cli_configuration_overrides(config: &dyn ConfigPort, cli: &Cli) -> ClipreelResult<usize> {
    let mut cli_overrides = 0;

    if let Some(level) = &cli.log_level {
        config.set_config(keys::LOG_LEVEL, level).await?;
        cli_overrides += 1;
    }
    if cli.log_json {
        config.set_config(keys::LOG_FORMAT, "json").await?;
        cli_overrides += 1;
    }

    if let Commands::Play(args) = &cli.command {
        if let Some(poll_ms) = args.poll_ms {
            config
                .set_config(keys::POSITION_POLL_MS, &poll_ms.to_string())
                .await?;
            cli_overrides += 1;
        }
    }

    Ok(cli_overrides)
}
