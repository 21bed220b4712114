//! Error handling module for clipreel

use thiserror::Error;

use crate::domain::errors::DomainError;

/// Main error type for clipreel operations
#[derive(Error, Debug)]
pub enum ClipreelError {
    /// Playlist, token or input error from the domain layer
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Configuration error
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML parse error
    #[error("Failed to parse TOML config: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Result type alias for clipreel operations
pub type ClipreelResult<T> = std::result::Result<T, ClipreelError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_domain_errors_display_transparently() {
        let error: ClipreelError = DomainError::Format("bad token".to_string()).into();
        assert_eq!(error.to_string(), "Invalid format: bad token");
    }

    #[test]
    fn test_config_error_display() {
        let error = ClipreelError::Config {
            message: "missing".to_string(),
        };
        assert_eq!(error.to_string(), "Configuration error: missing");
    }
}
