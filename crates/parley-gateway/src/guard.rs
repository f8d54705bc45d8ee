//! Permission guard
//!
//! Authenticates a connection's identity from its session token and
//! authorizes actions against required permissions or ownership. Identity
//! is re-validated per guarded action; a revoked token is rejected on the
//! next guarded call even if the connection stays open.

use parley_core::{Permissions, Snowflake};
use serde_json::Value;

use crate::context::GatewayContext;
use crate::error::{GatewayError, GatewayResult};
use crate::registry::Connection;

/// Fields a user may change about themselves through the profile path
///
/// `guilds` is allowed for reordering only; the length check happens in the
/// handler before the patch is applied.
pub const UPDATABLE_USER_KEYS: &[&str] = &["username", "avatar", "status", "guilds"];

/// Authorization checks composed by handlers
pub struct Guard<'a> {
    ctx: &'a GatewayContext,
}

impl<'a> Guard<'a> {
    /// Create a guard over a context
    #[must_use]
    pub fn new(ctx: &'a GatewayContext) -> Self {
        Self { ctx }
    }

    /// Validate a session token and return the identity it asserts
    pub fn decode_key(&self, key: &str) -> GatewayResult<Snowflake> {
        self.ctx
            .tokens()
            .decode(key)
            .map_err(|e| GatewayError::Auth(e.to_string()))
    }

    /// Assert the connection's bound identity equals `expected`
    ///
    /// Used for "only the author/owner may do X" checks.
    pub fn validate_is_user(
        &self,
        connection: &Connection,
        expected: Snowflake,
    ) -> GatewayResult<()> {
        match connection.user_id() {
            Some(bound) if bound == expected => Ok(()),
            Some(_) => Err(GatewayError::Permission(
                "action reserved for another user".to_string(),
            )),
            None => Err(GatewayError::Auth("connection not identified".to_string())),
        }
    }

    /// Check the connection's member holds a required permission in a guild
    ///
    /// Resolves the member row, ORs the role bitmasks, and tests the
    /// required bit. The guild owner passes unconditionally.
    pub async fn can(
        &self,
        connection: &Connection,
        guild_id: Snowflake,
        required: Permissions,
    ) -> GatewayResult<()> {
        let guild = self
            .ctx
            .guilds()
            .find_by_id(guild_id)
            .await?
            .ok_or_else(|| GatewayError::NotFound(format!("guild not found: {guild_id}")))?;

        let user_id = connection
            .user_id()
            .ok_or_else(|| GatewayError::Auth("connection not identified".to_string()))?;

        if guild.is_owner(user_id) {
            return Ok(());
        }

        let member = self
            .ctx
            .members()
            .find(guild_id, user_id)
            .await?
            .ok_or_else(|| {
                GatewayError::Permission("not a member of this guild".to_string())
            })?;

        let effective = self
            .ctx
            .hierarchy()
            .effective_permissions(&member.role_ids)
            .await?;

        if effective.has(required) {
            Ok(())
        } else {
            Err(GatewayError::Permission(format!(
                "missing permission: {required}"
            )))
        }
    }

    /// Restrict a partial user update to the allow-listed field names
    pub fn validate_user_keys(&self, partial: &Value) -> GatewayResult<()> {
        let object = partial.as_object().ok_or_else(|| {
            GatewayError::Validation("partial update must be an object".to_string())
        })?;

        for key in object.keys() {
            if !UPDATABLE_USER_KEYS.contains(&key.as_str()) {
                return Err(GatewayError::Validation(format!(
                    "field not updatable: {key}"
                )));
            }
        }

        Ok(())
    }
}
