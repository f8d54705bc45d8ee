//! USER_UPDATE handler
//!
//! Profile update authenticated by session key. Guild membership must not
//! change through this path: a `guilds` field is accepted for reordering
//! only, so a length change is a conflict.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use parley_core::UserPatch;

use crate::context::GatewayContext;
use crate::dispatch::{params, EventHandler};
use crate::error::{GatewayError, GatewayResult};
use crate::protocol::EventType;
use crate::registry::Connection;

#[derive(Debug, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
struct UserUpdateParams {
    key: String,
    partial_user: Value,
}

#[derive(Debug, serde::Serialize)]
#[serde(rename_all = "camelCase")]
struct UserUpdatedPayload {
    partial_user: Value,
}

/// Handles `USER_UPDATE`
pub struct UserUpdateHandler;

#[async_trait]
impl EventHandler for UserUpdateHandler {
    fn name(&self) -> EventType {
        EventType::UserUpdate
    }

    async fn handle(
        &self,
        ctx: &GatewayContext,
        connection: &Arc<Connection>,
        payload: Value,
    ) -> GatewayResult<()> {
        let UserUpdateParams { key, partial_user } = params(payload)?;

        let guard = ctx.guard();
        let user_id = guard.decode_key(&key)?;

        let user = ctx
            .users()
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| GatewayError::NotFound(format!("user not found: {user_id}")))?;

        if let Some(guilds) = partial_user.get("guilds") {
            let incoming = guilds
                .as_array()
                .ok_or_else(|| GatewayError::Validation("guilds must be an array".to_string()))?;
            if incoming.len() != user.guilds.len() {
                return Err(GatewayError::Conflict(
                    "guild membership cannot change through a profile update".to_string(),
                ));
            }
        }

        guard.validate_user_keys(&partial_user)?;

        let patch: UserPatch = serde_json::from_value(partial_user.clone())
            .map_err(|e| GatewayError::Validation(format!("invalid partial user: {e}")))?;

        ctx.users().apply_patch(user_id, &patch).await?;

        tracing::debug!(user_id = %user_id, "profile updated");

        ctx.fanout()
            .emit_to(
                connection.id(),
                EventType::UserUpdate,
                &UserUpdatedPayload { partial_user },
            )
            .await;

        Ok(())
    }
}
