//! Gateway context
//!
//! Explicit collaborator container threaded into every handler call. The
//! context is the only way handlers reach shared infrastructure; there are
//! no ambient globals and no raw transport handles inside handlers.

use std::sync::Arc;

use parley_common::SessionTokens;
use parley_core::{
    ChannelStore, GuildStore, MemberStore, MessageStore, RoleStore, SnowflakeGenerator, UserStore,
};

use crate::fanout::Fanout;
use crate::guard::Guard;
use crate::hierarchy::{HierarchyOrder, RoleHierarchy};
use crate::preview::LinkPreview;
use crate::registry::ConnectionRegistry;

/// Whether member removal requires the member row to exist
///
/// The upstream behavior rejected removal when the row *was* present, the
/// reverse of what its guard name implied. Both readings are kept behind
/// this policy; `RequireMemberRow` is the default since a removal that can
/// never succeed is not a useful operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RemovalPrecondition {
    #[default]
    RequireMemberRow,
    RejectWhenRowPresent,
}

/// Named policy switches decided at boot
#[derive(Debug, Clone, Copy, Default)]
pub struct GatewayPolicies {
    pub hierarchy_order: HierarchyOrder,
    pub removal_precondition: RemovalPrecondition,
}

/// Shared dependencies for event handlers
pub struct GatewayContext {
    users: Arc<dyn UserStore>,
    guilds: Arc<dyn GuildStore>,
    members: Arc<dyn MemberStore>,
    roles: Arc<dyn RoleStore>,
    channels: Arc<dyn ChannelStore>,
    messages: Arc<dyn MessageStore>,
    registry: Arc<ConnectionRegistry>,
    fanout: Fanout,
    tokens: Arc<SessionTokens>,
    snowflakes: Arc<SnowflakeGenerator>,
    preview: Arc<dyn LinkPreview>,
    policies: GatewayPolicies,
}

impl GatewayContext {
    pub fn users(&self) -> &dyn UserStore {
        self.users.as_ref()
    }

    pub fn guilds(&self) -> &dyn GuildStore {
        self.guilds.as_ref()
    }

    pub fn members(&self) -> &dyn MemberStore {
        self.members.as_ref()
    }

    pub fn roles(&self) -> &dyn RoleStore {
        self.roles.as_ref()
    }

    pub fn channels(&self) -> &dyn ChannelStore {
        self.channels.as_ref()
    }

    pub fn messages(&self) -> &dyn MessageStore {
        self.messages.as_ref()
    }

    pub fn registry(&self) -> &ConnectionRegistry {
        &self.registry
    }

    pub fn fanout(&self) -> &Fanout {
        &self.fanout
    }

    pub fn tokens(&self) -> &SessionTokens {
        &self.tokens
    }

    pub fn snowflakes(&self) -> &SnowflakeGenerator {
        &self.snowflakes
    }

    pub fn preview(&self) -> &dyn LinkPreview {
        self.preview.as_ref()
    }

    pub fn policies(&self) -> GatewayPolicies {
        self.policies
    }

    /// Permission guard bound to this context
    pub fn guard(&self) -> Guard<'_> {
        Guard::new(self)
    }

    /// Role hierarchy resolver bound to this context's role store and policy
    pub fn hierarchy(&self) -> RoleHierarchy<'_> {
        RoleHierarchy::new(self.roles.as_ref(), self.policies.hierarchy_order)
    }
}

impl std::fmt::Debug for GatewayContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GatewayContext")
            .field("registry", &self.registry)
            .field("policies", &self.policies)
            .finish()
    }
}

/// Builder for `GatewayContext`
///
/// Every collaborator must be supplied; `build` reports the first missing
/// one by name.
#[derive(Default)]
pub struct GatewayContextBuilder {
    users: Option<Arc<dyn UserStore>>,
    guilds: Option<Arc<dyn GuildStore>>,
    members: Option<Arc<dyn MemberStore>>,
    roles: Option<Arc<dyn RoleStore>>,
    channels: Option<Arc<dyn ChannelStore>>,
    messages: Option<Arc<dyn MessageStore>>,
    registry: Option<Arc<ConnectionRegistry>>,
    tokens: Option<Arc<SessionTokens>>,
    snowflakes: Option<Arc<SnowflakeGenerator>>,
    preview: Option<Arc<dyn LinkPreview>>,
    policies: GatewayPolicies,
}

impl GatewayContextBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn users(mut self, users: Arc<dyn UserStore>) -> Self {
        self.users = Some(users);
        self
    }

    #[must_use]
    pub fn guilds(mut self, guilds: Arc<dyn GuildStore>) -> Self {
        self.guilds = Some(guilds);
        self
    }

    #[must_use]
    pub fn members(mut self, members: Arc<dyn MemberStore>) -> Self {
        self.members = Some(members);
        self
    }

    #[must_use]
    pub fn roles(mut self, roles: Arc<dyn RoleStore>) -> Self {
        self.roles = Some(roles);
        self
    }

    #[must_use]
    pub fn channels(mut self, channels: Arc<dyn ChannelStore>) -> Self {
        self.channels = Some(channels);
        self
    }

    #[must_use]
    pub fn messages(mut self, messages: Arc<dyn MessageStore>) -> Self {
        self.messages = Some(messages);
        self
    }

    #[must_use]
    pub fn registry(mut self, registry: Arc<ConnectionRegistry>) -> Self {
        self.registry = Some(registry);
        self
    }

    #[must_use]
    pub fn tokens(mut self, tokens: Arc<SessionTokens>) -> Self {
        self.tokens = Some(tokens);
        self
    }

    #[must_use]
    pub fn snowflakes(mut self, snowflakes: Arc<SnowflakeGenerator>) -> Self {
        self.snowflakes = Some(snowflakes);
        self
    }

    #[must_use]
    pub fn preview(mut self, preview: Arc<dyn LinkPreview>) -> Self {
        self.preview = Some(preview);
        self
    }

    #[must_use]
    pub fn policies(mut self, policies: GatewayPolicies) -> Self {
        self.policies = policies;
        self
    }

    /// Build the context, failing on any missing collaborator
    pub fn build(self) -> Result<GatewayContext, String> {
        let registry = self.registry.ok_or("registry is required")?;
        Ok(GatewayContext {
            users: self.users.ok_or("users store is required")?,
            guilds: self.guilds.ok_or("guilds store is required")?,
            members: self.members.ok_or("members store is required")?,
            roles: self.roles.ok_or("roles store is required")?,
            channels: self.channels.ok_or("channels store is required")?,
            messages: self.messages.ok_or("messages store is required")?,
            fanout: Fanout::new(registry.clone()),
            registry,
            tokens: self.tokens.ok_or("token service is required")?,
            snowflakes: self.snowflakes.ok_or("snowflake generator is required")?,
            preview: self.preview.ok_or("link preview lookup is required")?,
            policies: self.policies,
        })
    }
}
