//! # parley-common
//!
//! Shared utilities: configuration, session-token handling, application
//! errors, and telemetry setup.

pub mod auth;
pub mod config;
pub mod error;
pub mod telemetry;

// Re-export commonly used types at crate root
pub use auth::{SessionClaims, SessionTokens};
pub use config::{
    AppConfig, AppSettings, ConfigError, Environment, PreviewConfig, ServerConfig,
    SnowflakeConfig, TokenConfig,
};
pub use error::AppError;
pub use telemetry::{try_init_tracing, try_init_tracing_with_config, TracingConfig, TracingError};
