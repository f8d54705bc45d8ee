//! MESSAGE_UPDATE handler
//!
//! Only the author may edit. When an embed refresh is requested, the first
//! URL in the new content goes through the external link-preview lookup;
//! a failed or absent lookup leaves the edit intact with no embed.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use parley_core::{Message, Snowflake};

use crate::context::GatewayContext;
use crate::dispatch::{params, EventHandler};
use crate::error::{GatewayError, GatewayResult};
use crate::preview::extract_first_url;
use crate::protocol::EventType;
use crate::registry::Connection;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MessageUpdateParams {
    message_id: Snowflake,
    partial_message: PartialMessage,
    #[serde(default)]
    with_embed: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PartialMessage {
    content: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct MessageUpdatedPayload {
    message: Message,
}

/// Handles `MESSAGE_UPDATE`
pub struct MessageUpdateHandler;

#[async_trait]
impl EventHandler for MessageUpdateHandler {
    fn name(&self) -> EventType {
        EventType::MessageUpdate
    }

    async fn handle(
        &self,
        ctx: &GatewayContext,
        connection: &Arc<Connection>,
        payload: Value,
    ) -> GatewayResult<()> {
        let MessageUpdateParams {
            message_id,
            partial_message,
            with_embed,
        } = params(payload)?;

        let mut message = ctx
            .messages()
            .find_by_id(message_id)
            .await?
            .ok_or_else(|| GatewayError::NotFound(format!("message not found: {message_id}")))?;

        ctx.guard().validate_is_user(connection, message.author_id)?;

        message.content = partial_message.content;
        message.updated_at = Utc::now();

        if with_embed {
            message.embed = match extract_first_url(&message.content) {
                Some(url) => ctx.preview().fetch_preview(url).await,
                None => None,
            };
        }

        ctx.messages().update(&message).await?;

        tracing::debug!(message_id = %message_id, with_embed, "message edited");

        let channel_room = message.channel_id.to_string();
        ctx.fanout()
            .broadcast(
                &[channel_room],
                EventType::MessageUpdate,
                &MessageUpdatedPayload { message },
            )
            .await;

        Ok(())
    }
}
