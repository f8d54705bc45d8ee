//! READY handler
//!
//! First event a client sends after connecting. Decodes the session key,
//! binds the identity, and joins the connection to its personal room plus
//! every guild and channel room of the user's guilds.

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
struct ReadyParams {
    key: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ReadyReply {
    user: User,
    guild_ids: Vec<Snowflake>,
    channel_ids: Vec<Snowflake>,
}

/// Handles `READY`
pub struct ReadyHandler;

#[async_trait]
impl EventHandler for ReadyHandler {
    fn name(&self) -> EventType {
        EventType::Ready
    }

    async fn handle(
        &self,
        ctx: &GatewayContext,
        connection: &Arc<Connection>,
        payload: Value,
    ) -> GatewayResult<()> {
        let ReadyParams { key } = params(payload)?;

        let user_id = ctx.guard().decode_key(&key)?;

        let user = ctx
            .users()
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| GatewayError::NotFound(format!("user not found: {user_id}")))?;

        ctx.registry().bind(connection.id(), user_id);
        ctx.registry().join(connection.id(), &user_id.to_string());

        let mut channel_ids = Vec::new();
        for guild_id in &user.guilds {
            ctx.registry().join(connection.id(), &guild_id.to_string());

            for channel in ctx.channels().find_by_guild(*guild_id).await? {
                ctx.registry().join(connection.id(), &channel.id.to_string());
                channel_ids.push(channel.id);
            }
        }

        tracing::info!(
            connection_id = %connection.id(),
            user_id = %user_id,
            guilds = user.guilds.len(),
            "connection ready"
        );

        let reply = ReadyReply {
            guild_ids: user.guilds.clone(),
            channel_ids,
            user,
        };
        ctx.fanout()
            .emit_to(connection.id(), EventType::Ready, &reply)
            .await;

        Ok(())
    }
}
