//! REMOVE_FRIEND handler
//!
//! Symmetric and idempotent: each side is pulled from the other's friends
//! list with an atomic array-remove, and pulling an absent entry is a
//! no-op. Both parties receive their updated user documents so clients can
//! refresh the friend lists without a refetch.

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use parley_core::{Snowflake, User};

use crate::context::GatewayContext;
use crate::dispatch::{params, EventHandler};
use crate::error::{GatewayError, GatewayResult};
use crate::protocol::EventType;
use crate::registry::Connection;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RemoveFriendParams {
    sender_id: Snowflake,
    friend_id: Snowflake,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct FriendRemovedPayload {
    sender: User,
    friend: User,
}

/// Handles `REMOVE_FRIEND`
pub struct RemoveFriendHandler;

#[async_trait]
impl EventHandler for RemoveFriendHandler {
    fn name(&self) -> EventType {
        EventType::RemoveFriend
    }

    async fn handle(
        &self,
        ctx: &GatewayContext,
        _connection: &Arc<Connection>,
        payload: Value,
    ) -> GatewayResult<()> {
        let RemoveFriendParams {
            sender_id,
            friend_id,
        } = params(payload)?;

        ctx.users().pull_friend(sender_id, friend_id).await?;
        ctx.users().pull_friend(friend_id, sender_id).await?;

        let sender = ctx
            .users()
            .find_by_id(sender_id)
            .await?
            .ok_or_else(|| GatewayError::NotFound(format!("user not found: {sender_id}")))?;
        let friend = ctx
            .users()
            .find_by_id(friend_id)
            .await?
            .ok_or_else(|| GatewayError::NotFound(format!("user not found: {friend_id}")))?;

        tracing::debug!(sender_id = %sender_id, friend_id = %friend_id, "friendship removed");

        ctx.fanout()
            .broadcast(
                &[sender_id.to_string(), friend_id.to_string()],
                EventType::RemoveFriend,
                &FriendRemovedPayload { sender, friend },
            )
            .await;

        Ok(())
    }
}
