//! Application-wide error type

use parley_core::DomainError;

/// Errors raised outside the domain layer
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    // Authentication
    #[error("invalid session token")]
    InvalidToken,

    #[error("session token expired")]
    TokenExpired,

    // Configuration
    #[error("configuration error: {0}")]
    Config(String),

    // Wrapped domain errors
    #[error(transparent)]
    Domain(#[from] DomainError),

    // Anything else
    #[error("internal error")]
    Internal(#[source] anyhow::Error),
}

impl AppError {
    /// Stable error code for responses and logs
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidToken => "INVALID_TOKEN",
            Self::TokenExpired => "TOKEN_EXPIRED",
            Self::Config(_) => "CONFIG_ERROR",
            Self::Domain(e) => {
                if e.is_not_found() {
                    "NOT_FOUND"
                } else if e.is_validation() {
                    "VALIDATION_ERROR"
                } else if e.is_conflict() {
                    "CONFLICT"
                } else {
                    "INTERNAL_ERROR"
                }
            }
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }
}
