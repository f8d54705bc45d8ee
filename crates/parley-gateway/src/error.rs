//! Gateway error taxonomy

use parley_common::AppError;
use parley_core::DomainError;
use thiserror::Error;

/// Errors raised by event handlers and caught at the dispatch boundary
#[derive(Debug, Error)]
pub enum GatewayError {
    /// Malformed or disallowed payload fields
    #[error("{0}")]
    Validation(String),

    /// Referenced entity absent
    #[error("{0}")]
    NotFound(String),

    /// Invalid or expired session token
    #[error("{0}")]
    Auth(String),

    /// Authenticated but insufficient bitmask or hierarchy
    #[error("{0}")]
    Permission(String),

    /// Operation violates a stated invariant
    #[error("{0}")]
    Conflict(String),

    /// Internal fault; the detail goes to logs, never to the client
    #[error("internal error: {0}")]
    Internal(String),
}

impl GatewayError {
    /// Stable error code carried in the ERROR envelope
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::NotFound(_) => "NOT_FOUND",
            Self::Auth(_) => "AUTH_ERROR",
            Self::Permission(_) => "MISSING_PERMISSIONS",
            Self::Conflict(_) => "CONFLICT",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Message safe to send to the originating connection
    #[must_use]
    pub fn public_message(&self) -> String {
        match self {
            Self::Internal(_) => "internal error".to_string(),
            other => other.to_string(),
        }
    }
}

impl From<DomainError> for GatewayError {
    fn from(err: DomainError) -> Self {
        if err.is_not_found() {
            Self::NotFound(err.to_string())
        } else if err.is_validation() {
            Self::Validation(err.to_string())
        } else if err.is_conflict() {
            Self::Conflict(err.to_string())
        } else {
            Self::Internal(err.to_string())
        }
    }
}

impl From<AppError> for GatewayError {
    fn from(err: AppError) -> Self {
        match err {
            AppError::InvalidToken | AppError::TokenExpired => Self::Auth(err.to_string()),
            AppError::Domain(domain) => domain.into(),
            other => Self::Internal(other.to_string()),
        }
    }
}

/// Result type for handler and guard operations
pub type GatewayResult<T> = Result<T, GatewayError>;
