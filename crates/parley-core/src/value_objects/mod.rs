//! Value objects shared across the domain

mod permissions;
mod snowflake;

pub use permissions::Permissions;
pub use snowflake::{Snowflake, SnowflakeGenerator, SnowflakeParseError};
