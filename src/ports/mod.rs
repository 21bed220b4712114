// Ports - Interface definitions (contracts)

use async_trait::async_trait;
use tokio::sync::mpsc;

use crate::domain::errors::*;
use crate::domain::model::*;
use crate::error::ClipreelResult;

/// Port for the external video surface that renders clips.
///
/// Only the playback driver calls it. Calls are best effort: a failure is
/// logged and the driver keeps waiting for the surface's signals.
#[async_trait]
pub trait VideoSurface: Send + Sync {
    /// Load a clip and seek to its start
    async fn load(&self, request: &LoadRequest) -> Result<(), DomainError>;

    /// Start or resume rendering of the loaded clip
    async fn play(&self) -> Result<(), DomainError>;

    /// Current playback position. Advisory, used for status displays only.
    async fn current_position_seconds(&self) -> Result<f64, DomainError>;
}

/// Asynchronous notifications from the video surface. Each carries the
/// ticket of the load it refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurfaceSignal {
    PlaybackStarted(LoadTicket),
    NaturallyEnded(LoadTicket),
}

pub type SignalSender = mpsc::UnboundedSender<SurfaceSignal>;
pub type SignalReceiver = mpsc::UnboundedReceiver<SurfaceSignal>;

/// Channel a surface uses to report its signals to the driver
pub fn signal_channel() -> (SignalSender, SignalReceiver) {
    mpsc::unbounded_channel()
}

/// Port for configuration management
#[async_trait]
pub trait ConfigPort: Send + Sync {
    /// Get configuration value with default
    async fn get_config_or_default(&self, key: &str, default: &str) -> ClipreelResult<String>;

    /// Set configuration value
    async fn set_config(&self, key: &str, value: &str) -> ClipreelResult<()>;

    /// Load configuration from file
    async fn load_config(&self, file_path: &str) -> ClipreelResult<()>;

    /// Validate configuration
    async fn validate_config(&self) -> ClipreelResult<()>;
}

/// Log level enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    /// Parse log level from string
    pub fn parse(level_str: &str) -> Result<Self, DomainError> {
        match level_str.to_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            _ => Err(DomainError::BadArgs(format!(
                "Invalid log level: {}. Valid levels: trace, debug, info, warn, error",
                level_str
            ))),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

impl LogFormat {
    pub fn parse(format_str: &str) -> Result<Self, DomainError> {
        match format_str.to_lowercase().as_str() {
            "text" => Ok(LogFormat::Text),
            "json" => Ok(LogFormat::Json),
            _ => Err(DomainError::BadArgs(format!(
                "Invalid log format: {}. Valid formats: text, json",
                format_str
            ))),
        }
    }
}
