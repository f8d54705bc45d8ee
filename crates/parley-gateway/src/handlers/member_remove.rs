//! GUILD_MEMBER_REMOVE handler
//!
//! Removes a user from a guild: deletes the member row, pulls the guild
//! from the user's membership projection, and leaves every room of that
//! guild for the departing user's connections. The room work happens
//! before the broadcast so nothing is delivered to a room after its owning
//! membership is gone.

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use parley_core::Snowflake;

use crate::context::{GatewayContext, RemovalPrecondition};
use crate::dispatch::{params, EventHandler};
use crate::error::{GatewayError, GatewayResult};
use crate::protocol::EventType;
use crate::registry::Connection;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MemberRemoveParams {
    guild_id: Snowflake,
    user_id: Snowflake,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct MemberRemovedPayload {
    user_id: Snowflake,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GuildLeavePayload {
    guild_id: Snowflake,
}

/// Handles `GUILD_MEMBER_REMOVE`
pub struct MemberRemoveHandler;

#[async_trait]
impl EventHandler for MemberRemoveHandler {
    fn name(&self) -> EventType {
        EventType::GuildMemberRemove
    }

    async fn handle(
        &self,
        ctx: &GatewayContext,
        _connection: &Arc<Connection>,
        payload: Value,
    ) -> GatewayResult<()> {
        let MemberRemoveParams { guild_id, user_id } = params(payload)?;

        let row_present = ctx.members().exists(guild_id, user_id).await?;
        match ctx.policies().removal_precondition {
            RemovalPrecondition::RequireMemberRow => {
                if !row_present {
                    return Err(GatewayError::NotFound(
                        "member not found in guild".to_string(),
                    ));
                }
            }
            RemovalPrecondition::RejectWhenRowPresent => {
                if row_present {
                    return Err(GatewayError::Conflict(
                        "member row present".to_string(),
                    ));
                }
            }
        }

        // Two sequential single-document writes; membership consistency is
        // only as strong as both completing.
        ctx.members().delete(guild_id, user_id).await?;
        ctx.users().pull_guild(user_id, guild_id).await?;

        let guild_room = guild_id.to_string();
        let channels = ctx.channels().find_by_guild(guild_id).await?;

        for departing in ctx.registry().members_of(&user_id.to_string()) {
            ctx.registry().leave(departing.id(), &guild_room);
            for channel in &channels {
                ctx.registry().leave(departing.id(), &channel.id.to_string());
            }
        }

        tracing::info!(guild_id = %guild_id, user_id = %user_id, "member removed");

        ctx.fanout()
            .broadcast(
                &[guild_room],
                EventType::GuildMemberRemove,
                &MemberRemovedPayload { user_id },
            )
            .await;

        for departing in ctx.registry().members_of(&user_id.to_string()) {
            ctx.fanout()
                .emit_to(
                    departing.id(),
                    EventType::GuildLeave,
                    &GuildLeavePayload { guild_id },
                )
                .await;
        }

        Ok(())
    }
}
