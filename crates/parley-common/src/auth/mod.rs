//! Session token handling

mod tokens;

pub use tokens::{SessionClaims, SessionTokens};
