//! GUILD_ROLE_CREATE handler

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use validator::Validate;

use parley_core::{Permissions, Role, Snowflake};

use crate::context::GatewayContext;
use crate::dispatch::{params, EventHandler};
use crate::error::{GatewayError, GatewayResult};
use crate::protocol::EventType;
use crate::registry::Connection;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RoleCreateParams {
    guild_id: Snowflake,
    partial_role: PartialRole,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
struct PartialRole {
    #[validate(length(min = 1, max = 100, message = "name must be 1-100 characters"))]
    name: String,
    #[validate(range(min = 0, message = "position must not be negative"))]
    position: i32,
    permissions: Permissions,
    #[serde(default)]
    mentionable: bool,
    #[serde(default)]
    hoisted: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct RoleCreatedPayload {
    role: Role,
}

/// Handles `GUILD_ROLE_CREATE`
pub struct RoleCreateHandler;

#[async_trait]
impl EventHandler for RoleCreateHandler {
    fn name(&self) -> EventType {
        EventType::GuildRoleCreate
    }

    async fn handle(
        &self,
        ctx: &GatewayContext,
        connection: &Arc<Connection>,
        payload: Value,
    ) -> GatewayResult<()> {
        let RoleCreateParams {
            guild_id,
            partial_role,
        } = params(payload)?;

        ctx.guard()
            .can(connection, guild_id, Permissions::MANAGE_ROLES)
            .await?;

        partial_role
            .validate()
            .map_err(|e| GatewayError::Validation(e.to_string()))?;

        let mut role = Role::new(
            ctx.snowflakes().generate(),
            guild_id,
            partial_role.name,
            partial_role.permissions,
        );
        role.position = partial_role.position;
        role.mentionable = partial_role.mentionable;
        role.hoisted = partial_role.hoisted;

        ctx.roles().create(&role).await?;
        ctx.guilds().push_role(guild_id, role.id).await?;

        tracing::info!(guild_id = %guild_id, role_id = %role.id, "role created");

        ctx.fanout()
            .broadcast(
                &[guild_id.to_string()],
                EventType::GuildRoleCreate,
                &RoleCreatedPayload { role },
            )
            .await;

        Ok(())
    }
}
