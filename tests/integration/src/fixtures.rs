//! Seed data builders for gateway tests

use parley_core::{
    Channel, ChannelStore, Guild, GuildMember, GuildStore, MemberStore, Message, MessageStore,
    Permissions, Role, RoleStore, Snowflake, User, UserStore,
};

use crate::helpers::TestGateway;

/// Seed a user, optionally pre-joined to guilds
pub async fn seed_user(gw: &TestGateway, id: i64, username: &str, guilds: &[i64]) -> User {
    let mut user = User::new(Snowflake::new(id), username.to_string());
    user.guilds = guilds.iter().map(|g| Snowflake::new(*g)).collect();
    gw.stores.users.create(&user).await.expect("seed user");
    user
}

/// Seed a guild
pub async fn seed_guild(gw: &TestGateway, id: i64, owner_id: i64) -> Guild {
    let guild = Guild::new(
        Snowflake::new(id),
        format!("guild-{id}"),
        Snowflake::new(owner_id),
    );
    gw.stores.guilds.create(&guild).await.expect("seed guild");
    guild
}

/// Seed a member row with the given roles
pub async fn seed_member(gw: &TestGateway, guild_id: i64, user_id: i64, role_ids: &[i64]) {
    let mut member = GuildMember::new(Snowflake::new(guild_id), Snowflake::new(user_id));
    member.role_ids = role_ids.iter().map(|r| Snowflake::new(*r)).collect();
    gw.stores.members.create(&member).await.expect("seed member");
}

/// Seed a role with explicit position and permissions
pub async fn seed_role(
    gw: &TestGateway,
    id: i64,
    guild_id: i64,
    position: i32,
    permissions: Permissions,
) -> Role {
    let mut role = Role::new(
        Snowflake::new(id),
        Snowflake::new(guild_id),
        format!("role-{id}"),
        permissions,
    );
    role.position = position;
    gw.stores.roles.create(&role).await.expect("seed role");
    role
}

/// Seed a text channel in a guild
pub async fn seed_channel(gw: &TestGateway, id: i64, guild_id: i64) -> Channel {
    let channel = Channel::new_text(
        Snowflake::new(id),
        Snowflake::new(guild_id),
        format!("channel-{id}"),
    );
    gw.stores
        .channels
        .create(&channel)
        .await
        .expect("seed channel");
    channel
}

/// Seed a message
pub async fn seed_message(
    gw: &TestGateway,
    id: i64,
    channel_id: i64,
    author_id: i64,
    content: &str,
) -> Message {
    let message = Message::new(
        Snowflake::new(id),
        Snowflake::new(channel_id),
        Snowflake::new(author_id),
        content.to_string(),
    );
    gw.stores
        .messages
        .create(&message)
        .await
        .expect("seed message");
    message
}
