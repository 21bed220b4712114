// Domain errors - Error types for the domain layer

use std::fmt;

/// Domain-specific error types
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Clip URL could not be turned into a reference
    InvalidReference(String),
    /// Malformed share token, transport record or time string
    Format(String),
    /// Invalid arguments or configuration values
    BadArgs(String),
    /// Internal error
    Internal(String),
}

impl DomainError {
    /// True for errors caused by user input rather than the program state
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            DomainError::InvalidReference(_) | DomainError::Format(_) | DomainError::BadArgs(_)
        )
    }
}

impl fmt::Display for DomainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DomainError::InvalidReference(msg) => write!(f, "Invalid clip reference: {}", msg),
            DomainError::Format(msg) => write!(f, "Invalid format: {}", msg),
            DomainError::BadArgs(msg) => write!(f, "Bad arguments: {}", msg),
            DomainError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for DomainError {}
