//! Gateway dispatch tests
//!
//! End-to-end handler tests against the in-memory stores and a
//! channel-backed connection registry.
//!
//! Run with: cargo test -p integration-tests --test gateway_tests

use std::sync::Arc;

use serde_json::json;

use integration_tests::{
    assert_error, assert_no_event, recv_event, seed_channel, seed_guild, seed_member,
    seed_message, seed_role, seed_user, FailingPreview, StaticPreview, TestGateway,
};
use parley_core::{
    Embed, GuildStore, MemberStore, MessageStore, Permissions, RoleStore, Snowflake, UserStore,
};
use parley_gateway::{GatewayPolicies, HierarchyOrder, RemovalPrecondition};

// ============================================================================
// Permission guard
// ============================================================================

#[tokio::test]
async fn effective_bitmask_is_or_of_role_bitmasks() {
    let gw = TestGateway::new();
    seed_role(&gw, 1, 100, 1, Permissions::VIEW_CHANNELS).await; // 0b001
    seed_role(&gw, 2, 100, 2, Permissions::SEND_MESSAGES).await; // 0b010

    let effective = gw
        .ctx
        .hierarchy()
        .effective_permissions(&[Snowflake::new(1), Snowflake::new(2)])
        .await
        .unwrap();

    assert_eq!(
        effective,
        Permissions::VIEW_CHANNELS | Permissions::SEND_MESSAGES
    );
}

#[tokio::test]
async fn can_rejects_missing_bit_with_permission_error() {
    let gw = TestGateway::new();
    seed_guild(&gw, 100, 1).await;
    seed_user(&gw, 2, "member", &[100]).await;
    seed_role(&gw, 1, 100, 1, Permissions::VIEW_CHANNELS).await;
    seed_role(&gw, 2, 100, 2, Permissions::SEND_MESSAGES).await;
    seed_member(&gw, 100, 2, &[1, 2]).await;

    let (conn, _rx) = gw.connect_as("c1", Snowflake::new(2));

    // 0b001 | 0b010 grants either bit
    gw.ctx
        .guard()
        .can(&conn, Snowflake::new(100), Permissions::SEND_MESSAGES)
        .await
        .unwrap();

    // 0b100 is not granted
    let err = gw
        .ctx
        .guard()
        .can(&conn, Snowflake::new(100), Permissions::MANAGE_MESSAGES)
        .await
        .unwrap_err();
    assert_eq!(err.code(), "MISSING_PERMISSIONS");
}

#[tokio::test]
async fn can_distinguishes_not_found_auth_and_permission() {
    let gw = TestGateway::new();
    seed_guild(&gw, 100, 1).await;

    // Unknown guild
    let (conn, _rx) = gw.connect_as("c1", Snowflake::new(2));
    let err = gw
        .ctx
        .guard()
        .can(&conn, Snowflake::new(999), Permissions::MANAGE_ROLES)
        .await
        .unwrap_err();
    assert_eq!(err.code(), "NOT_FOUND");

    // Unidentified connection
    let (anon, _rx) = gw.connect("anon");
    let err = gw
        .ctx
        .guard()
        .can(&anon, Snowflake::new(100), Permissions::MANAGE_ROLES)
        .await
        .unwrap_err();
    assert_eq!(err.code(), "AUTH_ERROR");

    // Identified but no member row
    let err = gw
        .ctx
        .guard()
        .can(&conn, Snowflake::new(100), Permissions::MANAGE_ROLES)
        .await
        .unwrap_err();
    assert_eq!(err.code(), "MISSING_PERMISSIONS");
}

#[tokio::test]
async fn guild_owner_passes_every_check() {
    let gw = TestGateway::new();
    seed_guild(&gw, 100, 1).await;

    let (owner, _rx) = gw.connect_as("c1", Snowflake::new(1));
    gw.ctx
        .guard()
        .can(&owner, Snowflake::new(100), Permissions::MANAGE_GUILD)
        .await
        .unwrap();
}

// ============================================================================
// READY
// ============================================================================

#[tokio::test]
async fn ready_binds_identity_and_joins_rooms() {
    let gw = TestGateway::new();
    seed_guild(&gw, 100, 1).await;
    seed_channel(&gw, 10, 100).await;
    seed_user(&gw, 2, "ada", &[100]).await;

    let (conn, mut rx) = gw.connect("c1");
    let key = gw.issue_key(Snowflake::new(2));
    gw.send(&conn, "READY", json!({ "key": key })).await;

    let reply = recv_event(&mut rx);
    assert_eq!(reply.name, "READY");
    assert_eq!(reply.payload["user"]["id"], "2");
    assert_eq!(reply.payload["guildIds"][0], "100");
    assert_eq!(reply.payload["channelIds"][0], "10");

    assert_eq!(gw.ctx.registry().user_of("c1"), Some(Snowflake::new(2)));
    let mut rooms = gw.ctx.registry().rooms_of("c1");
    rooms.sort();
    assert_eq!(rooms, vec!["10", "100", "2"]);
}

#[tokio::test]
async fn ready_rejects_garbage_key() {
    let gw = TestGateway::new();

    let (conn, mut rx) = gw.connect("c1");
    gw.send(&conn, "READY", json!({ "key": "not-a-token" }))
        .await;

    assert_error(&mut rx, "AUTH_ERROR");
    assert!(gw.ctx.registry().user_of("c1").is_none());
}

// ============================================================================
// GUILD_MEMBER_REMOVE
// ============================================================================

#[tokio::test]
async fn member_removal_restores_invariants() {
    let gw = TestGateway::new();
    seed_guild(&gw, 100, 1).await;
    seed_channel(&gw, 10, 100).await;
    seed_user(&gw, 2, "departing", &[100]).await;
    seed_member(&gw, 100, 2, &[]).await;

    // The departing user's connection, joined to every room of the guild
    let (_departing, mut departing_rx) = gw.connect_as("dep", Snowflake::new(2));
    gw.ctx.registry().join("dep", "100");
    gw.ctx.registry().join("dep", "10");

    // A moderator connection observing the guild room
    let (moderator, mut moderator_rx) = gw.connect_as("mod", Snowflake::new(1));
    gw.ctx.registry().join("mod", "100");

    gw.send(
        &moderator,
        "GUILD_MEMBER_REMOVE",
        json!({ "guildId": "100", "userId": "2" }),
    )
    .await;

    // Membership gone on both sides
    assert!(!gw
        .stores
        .members
        .exists(Snowflake::new(100), Snowflake::new(2))
        .await
        .unwrap());
    let user = gw
        .stores
        .users
        .find_by_id(Snowflake::new(2))
        .await
        .unwrap()
        .unwrap();
    assert!(user.guilds.is_empty());

    // Only the personal room remains
    assert_eq!(gw.ctx.registry().rooms_of("dep"), vec!["2"]);

    // The guild room heard the removal; the departing connection did not
    let event = recv_event(&mut moderator_rx);
    assert_eq!(event.name, "GUILD_MEMBER_REMOVE");
    assert_eq!(event.payload["userId"], "2");

    let event = recv_event(&mut departing_rx);
    assert_eq!(event.name, "GUILD_LEAVE");
    assert_eq!(event.payload["guildId"], "100");
    assert_no_event(&mut departing_rx);
}

#[tokio::test]
async fn member_removal_requires_row_by_default() {
    let gw = TestGateway::new();
    seed_guild(&gw, 100, 1).await;
    seed_user(&gw, 2, "ghost", &[]).await;

    let (conn, mut rx) = gw.connect_as("c1", Snowflake::new(1));
    gw.send(
        &conn,
        "GUILD_MEMBER_REMOVE",
        json!({ "guildId": "100", "userId": "2" }),
    )
    .await;

    assert_error(&mut rx, "NOT_FOUND");
}

#[tokio::test]
async fn member_removal_reference_policy_rejects_present_row() {
    let policies = GatewayPolicies {
        removal_precondition: RemovalPrecondition::RejectWhenRowPresent,
        hierarchy_order: HierarchyOrder::default(),
    };
    let gw = TestGateway::with(policies, Arc::new(FailingPreview));
    seed_guild(&gw, 100, 1).await;
    seed_user(&gw, 2, "member", &[100]).await;
    seed_member(&gw, 100, 2, &[]).await;

    let (conn, mut rx) = gw.connect_as("c1", Snowflake::new(1));
    gw.send(
        &conn,
        "GUILD_MEMBER_REMOVE",
        json!({ "guildId": "100", "userId": "2" }),
    )
    .await;

    assert_error(&mut rx, "CONFLICT");
    // Nothing was mutated
    assert!(gw
        .stores
        .members
        .exists(Snowflake::new(100), Snowflake::new(2))
        .await
        .unwrap());
}

// ============================================================================
// GUILD_ROLE_CREATE
// ============================================================================

#[tokio::test]
async fn role_create_without_manage_roles_changes_nothing() {
    let gw = TestGateway::new();
    seed_guild(&gw, 100, 1).await;
    seed_user(&gw, 2, "pleb", &[100]).await;
    seed_role(&gw, 1, 100, 1, Permissions::VIEW_CHANNELS).await;
    seed_member(&gw, 100, 2, &[1]).await;

    let (conn, mut rx) = gw.connect_as("c1", Snowflake::new(2));
    gw.ctx.registry().join("c1", "100");

    let (_observer, mut observer_rx) = gw.connect_as("c2", Snowflake::new(1));
    gw.ctx.registry().join("c2", "100");

    gw.send(
        &conn,
        "GUILD_ROLE_CREATE",
        json!({
            "guildId": "100",
            "partialRole": {
                "name": "Sneaky",
                "position": 3,
                "permissions": "511"
            }
        }),
    )
    .await;

    assert_error(&mut rx, "MISSING_PERMISSIONS");
    assert_no_event(&mut observer_rx);

    let guild = gw
        .stores
        .guilds
        .find_by_id(Snowflake::new(100))
        .await
        .unwrap()
        .unwrap();
    assert!(guild.roles.is_empty());
}

#[tokio::test]
async fn role_create_appends_and_broadcasts() {
    let gw = TestGateway::new();
    seed_guild(&gw, 100, 1).await;
    seed_user(&gw, 2, "mod", &[100]).await;
    seed_role(&gw, 1, 100, 5, Permissions::MANAGE_ROLES).await;
    seed_member(&gw, 100, 2, &[1]).await;

    let (conn, mut rx) = gw.connect_as("c1", Snowflake::new(2));
    gw.ctx.registry().join("c1", "100");

    gw.send(
        &conn,
        "GUILD_ROLE_CREATE",
        json!({
            "guildId": "100",
            "partialRole": {
                "name": "Helper",
                "position": 2,
                "permissions": Permissions::SEND_MESSAGES.to_string(),
                "mentionable": true
            }
        }),
    )
    .await;

    let event = recv_event(&mut rx);
    assert_eq!(event.name, "GUILD_ROLE_CREATE");
    assert_eq!(event.payload["role"]["name"], "Helper");
    assert_eq!(event.payload["role"]["position"], 2);
    assert_eq!(event.payload["role"]["mentionable"], true);

    let role_id: Snowflake = event.payload["role"]["id"]
        .as_str()
        .unwrap()
        .parse()
        .unwrap();
    assert!(gw
        .stores
        .roles
        .find_by_id(role_id)
        .await
        .unwrap()
        .is_some());

    let guild = gw
        .stores
        .guilds
        .find_by_id(Snowflake::new(100))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(guild.roles, vec![role_id]);
}

#[tokio::test]
async fn role_create_validates_partial_role() {
    let gw = TestGateway::new();
    seed_guild(&gw, 100, 1).await;

    let (owner, mut rx) = gw.connect_as("c1", Snowflake::new(1));
    gw.send(
        &owner,
        "GUILD_ROLE_CREATE",
        json!({
            "guildId": "100",
            "partialRole": {
                "name": "",
                "position": -1,
                "permissions": "0"
            }
        }),
    )
    .await;

    assert_error(&mut rx, "VALIDATION_ERROR");
}

// ============================================================================
// MESSAGE_UPDATE
// ============================================================================

#[tokio::test]
async fn edit_without_embed_flag_preserves_embed() {
    let gw = TestGateway::new();
    let mut message = seed_message(&gw, 1, 10, 2, "original https://example.com").await;
    message.embed = Some(Embed {
        title: Some("Old".to_string()),
        ..Embed::default()
    });
    gw.stores.messages.update(&message).await.unwrap();

    let (author, _rx) = gw.connect_as("c1", Snowflake::new(2));
    gw.ctx.registry().join("c1", "10");

    gw.send(
        &author,
        "MESSAGE_UPDATE",
        json!({
            "messageId": "1",
            "partialMessage": { "content": "edited" }
        }),
    )
    .await;

    let stored = gw
        .stores
        .messages
        .find_by_id(Snowflake::new(1))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.content, "edited");
    assert_eq!(stored.embed.unwrap().title.as_deref(), Some("Old"));
}

#[tokio::test]
async fn edit_with_embed_and_no_url_clears_embed() {
    let gw = TestGateway::new();
    let mut message = seed_message(&gw, 1, 10, 2, "has embed").await;
    message.embed = Some(Embed::default());
    gw.stores.messages.update(&message).await.unwrap();

    let (author, _rx) = gw.connect_as("c1", Snowflake::new(2));
    gw.send(
        &author,
        "MESSAGE_UPDATE",
        json!({
            "messageId": "1",
            "partialMessage": { "content": "no links anymore" },
            "withEmbed": true
        }),
    )
    .await;

    let stored = gw
        .stores
        .messages
        .find_by_id(Snowflake::new(1))
        .await
        .unwrap()
        .unwrap();
    assert!(stored.embed.is_none());
}

#[tokio::test]
async fn edit_survives_failing_preview_lookup() {
    // Default harness uses FailingPreview
    let gw = TestGateway::new();
    seed_message(&gw, 1, 10, 2, "old").await;

    let (author, mut rx) = gw.connect_as("c1", Snowflake::new(2));
    gw.ctx.registry().join("c1", "10");

    gw.send(
        &author,
        "MESSAGE_UPDATE",
        json!({
            "messageId": "1",
            "partialMessage": { "content": "see https://example.com" },
            "withEmbed": true
        }),
    )
    .await;

    // The edit persisted and the channel room heard about it
    let event = recv_event(&mut rx);
    assert_eq!(event.name, "MESSAGE_UPDATE");
    assert_eq!(event.payload["message"]["content"], "see https://example.com");
    assert!(event.payload["message"]["embed"].is_null());

    let stored = gw
        .stores
        .messages
        .find_by_id(Snowflake::new(1))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.content, "see https://example.com");
    assert!(stored.embed.is_none());
}

#[tokio::test]
async fn edit_with_embed_attaches_preview() {
    let preview = StaticPreview(Embed {
        title: Some("Example".to_string()),
        description: Some("An example page".to_string()),
        image_url: None,
    });
    let gw = TestGateway::with(GatewayPolicies::default(), Arc::new(preview));
    seed_message(&gw, 1, 10, 2, "old").await;

    let (author, _rx) = gw.connect_as("c1", Snowflake::new(2));
    gw.send(
        &author,
        "MESSAGE_UPDATE",
        json!({
            "messageId": "1",
            "partialMessage": { "content": "see https://example.com" },
            "withEmbed": true
        }),
    )
    .await;

    let stored = gw
        .stores
        .messages
        .find_by_id(Snowflake::new(1))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.embed.unwrap().title.as_deref(), Some("Example"));
}

#[tokio::test]
async fn only_the_author_may_edit() {
    let gw = TestGateway::new();
    seed_message(&gw, 1, 10, 2, "original").await;

    let (intruder, mut rx) = gw.connect_as("c1", Snowflake::new(3));
    gw.send(
        &intruder,
        "MESSAGE_UPDATE",
        json!({
            "messageId": "1",
            "partialMessage": { "content": "hijacked" }
        }),
    )
    .await;

    assert_error(&mut rx, "MISSING_PERMISSIONS");

    let stored = gw
        .stores
        .messages
        .find_by_id(Snowflake::new(1))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.content, "original");
}

// ============================================================================
// REMOVE_FRIEND
// ============================================================================

#[tokio::test]
async fn friend_removal_is_symmetric_and_idempotent() {
    let gw = TestGateway::new();
    let mut alice = parley_core::User::new(Snowflake::new(1), "alice".to_string());
    let mut bob = parley_core::User::new(Snowflake::new(2), "bob".to_string());
    alice.friends.push(bob.id);
    bob.friends.push(alice.id);
    gw.stores.users.create(&alice).await.unwrap();
    gw.stores.users.create(&bob).await.unwrap();

    let (conn, mut alice_rx) = gw.connect_as("a", Snowflake::new(1));
    let (_bob_conn, mut bob_rx) = gw.connect_as("b", Snowflake::new(2));

    gw.send(
        &conn,
        "REMOVE_FRIEND",
        json!({ "senderId": "1", "friendId": "2" }),
    )
    .await;

    // Both personal rooms hear it, one copy each, carrying the updated
    // user documents
    let event = recv_event(&mut alice_rx);
    assert_eq!(event.name, "REMOVE_FRIEND");
    assert_eq!(event.payload["sender"]["id"], "1");
    assert_eq!(event.payload["friend"]["id"], "2");
    assert!(event.payload["sender"]["friends"]
        .as_array()
        .is_some_and(Vec::is_empty));
    assert!(event.payload["friend"]["friends"]
        .as_array()
        .is_some_and(Vec::is_empty));
    assert_no_event(&mut alice_rx);

    let event = recv_event(&mut bob_rx);
    assert_eq!(event.name, "REMOVE_FRIEND");
    assert_no_event(&mut bob_rx);

    // Both sides of the relationship are gone
    let stored = gw
        .stores
        .users
        .find_by_id(Snowflake::new(1))
        .await
        .unwrap()
        .unwrap();
    assert!(stored.friends.is_empty());
    let stored = gw
        .stores
        .users
        .find_by_id(Snowflake::new(2))
        .await
        .unwrap()
        .unwrap();
    assert!(stored.friends.is_empty());

    // Removing an already-absent relationship neither errors nor mutates
    gw.send(
        &conn,
        "REMOVE_FRIEND",
        json!({ "senderId": "1", "friendId": "2" }),
    )
    .await;
    let event = recv_event(&mut alice_rx);
    assert_eq!(event.name, "REMOVE_FRIEND");
}

// ============================================================================
// USER_UPDATE
// ============================================================================

#[tokio::test]
async fn profile_update_cannot_change_guild_membership() {
    let gw = TestGateway::new();
    seed_user(&gw, 1, "ada", &[100, 200]).await;

    let (conn, mut rx) = gw.connect_as("c1", Snowflake::new(1));
    let key = gw.issue_key(Snowflake::new(1));

    gw.send(
        &conn,
        "USER_UPDATE",
        json!({
            "key": key,
            "partialUser": { "guilds": ["100"] }
        }),
    )
    .await;

    assert_error(&mut rx, "CONFLICT");

    let user = gw
        .stores
        .users
        .find_by_id(Snowflake::new(1))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(user.guilds.len(), 2);
}

#[tokio::test]
async fn profile_update_allows_guild_reordering() {
    let gw = TestGateway::new();
    seed_user(&gw, 1, "ada", &[100, 200]).await;

    let (conn, mut rx) = gw.connect_as("c1", Snowflake::new(1));
    let key = gw.issue_key(Snowflake::new(1));

    gw.send(
        &conn,
        "USER_UPDATE",
        json!({
            "key": key,
            "partialUser": { "guilds": ["200", "100"] }
        }),
    )
    .await;

    let event = recv_event(&mut rx);
    assert_eq!(event.name, "USER_UPDATE");

    let user = gw
        .stores
        .users
        .find_by_id(Snowflake::new(1))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(user.guilds, vec![Snowflake::new(200), Snowflake::new(100)]);
}

#[tokio::test]
async fn profile_update_rejects_disallowed_fields() {
    let gw = TestGateway::new();
    seed_user(&gw, 1, "ada", &[]).await;

    let (conn, mut rx) = gw.connect_as("c1", Snowflake::new(1));
    let key = gw.issue_key(Snowflake::new(1));

    gw.send(
        &conn,
        "USER_UPDATE",
        json!({
            "key": key,
            "partialUser": { "friends": [] }
        }),
    )
    .await;

    assert_error(&mut rx, "VALIDATION_ERROR");
}

#[tokio::test]
async fn profile_update_echoes_to_acting_connection_only() {
    let gw = TestGateway::new();
    seed_user(&gw, 1, "ada", &[]).await;

    let (conn, mut rx) = gw.connect_as("c1", Snowflake::new(1));
    // A second connection of the same user, same personal room
    let (_other, mut other_rx) = gw.connect_as("c2", Snowflake::new(1));

    let key = gw.issue_key(Snowflake::new(1));
    gw.send(
        &conn,
        "USER_UPDATE",
        json!({
            "key": key,
            "partialUser": { "username": "grace", "status": "AWAY" }
        }),
    )
    .await;

    let event = recv_event(&mut rx);
    assert_eq!(event.name, "USER_UPDATE");
    assert_eq!(event.payload["partialUser"]["username"], "grace");
    assert_eq!(event.payload["partialUser"]["status"], "AWAY");
    assert_no_event(&mut other_rx);

    let user = gw
        .stores
        .users
        .find_by_id(Snowflake::new(1))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(user.username, "grace");
}

#[tokio::test]
async fn profile_update_rejects_bad_key() {
    let gw = TestGateway::new();
    seed_user(&gw, 1, "ada", &[]).await;

    let (conn, mut rx) = gw.connect_as("c1", Snowflake::new(1));
    gw.send(
        &conn,
        "USER_UPDATE",
        json!({
            "key": "forged",
            "partialUser": { "username": "oops" }
        }),
    )
    .await;

    assert_error(&mut rx, "AUTH_ERROR");
}

// ============================================================================
// Dispatch boundary
// ============================================================================

#[tokio::test]
async fn unknown_event_answers_validation_error() {
    let gw = TestGateway::new();

    let (conn, mut rx) = gw.connect("c1");
    gw.send(&conn, "NO_SUCH_EVENT", json!({})).await;

    assert_error(&mut rx, "VALIDATION_ERROR");
}

#[tokio::test]
async fn handler_failure_does_not_poison_the_connection() {
    let gw = TestGateway::new();
    seed_user(&gw, 1, "ada", &[]).await;

    let (conn, mut rx) = gw.connect("c1");

    // Malformed payload shape
    gw.send(&conn, "GUILD_MEMBER_REMOVE", json!({ "guildId": "x" }))
        .await;
    assert_error(&mut rx, "VALIDATION_ERROR");

    // The same connection keeps working
    let key = gw.issue_key(Snowflake::new(1));
    gw.send(&conn, "READY", json!({ "key": key })).await;
    let event = recv_event(&mut rx);
    assert_eq!(event.name, "READY");
}

#[tokio::test]
async fn error_responses_reach_only_the_originator() {
    let gw = TestGateway::new();

    let (conn, mut rx) = gw.connect("c1");
    let (_bystander, mut bystander_rx) = gw.connect("c2");

    gw.send(&conn, "NO_SUCH_EVENT", json!({})).await;

    assert_error(&mut rx, "VALIDATION_ERROR");
    assert_no_event(&mut bystander_rx);
}
