use serde_json::{json, Value};

use super::*;
use crate::{test::*, Error};

#[test]
fn full_context() {
    let ctx = context();

    let channel = ctx.channel();
    assert_eq!(channel.id(), "1");
    assert_eq!(channel.login(), "aiden");
    assert_eq!(channel.display_name(), "Aiden");
    assert!(channel.avatar_url().ends_with("300x300.jpeg"));
    assert_eq!(channel.slug(), "aiden");
    assert_eq!(channel.broadcaster_type(), "affiliate");
    assert_eq!(channel.provider(), "twitch");
    assert_eq!(channel.provider_id(), "87763385");
    assert_eq!(channel.created_at().timestamp(), 1_625_890_805);
    assert_eq!(channel.stream_timestamp().timestamp(), 1_663_442_247);
    assert!(channel.is_live());

    let message = ctx.message().unwrap();
    assert_eq!(message.id(), "ae9a4e3e-d495-4d75-aec6-8965e7c4ccd0");
    assert_eq!(message.content(), "!testcommand");
    assert_eq!(message.provider(), "twitch");

    let user = message.user();
    assert_eq!(user.provider_id(), "87763385");
    assert_eq!(user.login(), "aiden");
    assert_eq!(user.display_name(), "Aiden");

    let roles = user
        .roles()
        .iter()
        .map(|role| (role.id(), role.name(), role.kind()))
        .collect::<Vec<_>>();
    assert_eq!(
        roles,
        vec![
            ("1", "Broadcaster", "broadcaster"),
            ("3", "Moderator", "moderator"),
            ("5", "Subscriber", "subscriber"),
            ("269", "test", "custom"),
            ("14", "Admin", "custom"),
        ]
    );
}

#[test]
fn context_without_message() {
    let ctx = Context::from_body(CONTEXT_NO_MESSAGE_BODY).unwrap();
    assert!(ctx.message().is_none());
    assert_eq!(ctx.channel(), context().channel());

    let ctx = Context::from_body(&CONTEXT_NO_MESSAGE_BODY.replacen('{', r#"{"message": null,"#, 1))
        .unwrap();
    assert!(ctx.message().is_none());
}

#[test]
fn user_without_roles() {
    let user = User::from_value(json!({
        "provider_id": "1",
        "login": "someone",
        "display_name": "Someone",
    }))
    .unwrap();
    assert!(user.roles().is_empty());
    assert!(!user.is_elevated());

    let user = User::from_value(json!({
        "provider_id": "1",
        "login": "someone",
        "display_name": "Someone",
        "roles": [],
    }))
    .unwrap();
    assert!(user.roles().is_empty());
}

#[test]
fn invalid_context() {
    assert!(Context::from_body(INVALID_CONTEXT_BODY).is_err());
    assert!(Context::from_body("{}").is_err());
    assert!(Context::from_body("[]").is_err());

    let bad = CONTEXT_BODY.replace(r#""is_live": true"#, r#""is_live": "yes""#);
    assert!(Context::from_body(&bad).is_err());

    let bad = CONTEXT_BODY.replace("2021-07-10T04:20:05.599789Z", "not a date");
    let err = Context::from_body(&bad).unwrap_err();
    assert!(err.to_string().contains("invalid timestamp"));
}

#[test]
fn lookup_by_key() {
    let ctx = context();
    let channel = ctx.channel();

    assert_eq!(channel.get("login").unwrap(), channel.login());
    assert_eq!(channel.get("avatar_url").unwrap(), channel.avatar_url());
    assert_eq!(channel.get("is_live").unwrap(), true);
    assert_eq!(
        channel.get("created_at").unwrap(),
        "2021-07-10T04:20:05.599789Z"
    );
    assert_eq!(
        channel.get("stream_timestamp").unwrap(),
        "2022-09-17T19:17:27Z"
    );

    let role = &ctx.message().unwrap().user().roles()[1];
    assert_eq!(role.get("type").unwrap(), "moderator");
    assert_eq!(role.get("name").unwrap(), "Moderator");

    let user = ctx.message().unwrap().user();
    assert_eq!(user.get("roles").unwrap().as_array().unwrap().len(), 5);

    assert!(ctx.get("message").unwrap().is_object());
    assert!(Context::from_body(CONTEXT_NO_MESSAGE_BODY)
        .unwrap()
        .get("message")
        .unwrap()
        .is_null());
}

#[test]
fn lookup_unknown_key() {
    let ctx = context();
    for key in &["avatar", "Login", "", "kind"] {
        match ctx.channel().get(key).unwrap_err() {
            Error::InvalidArgument { model, key: k } => {
                assert_eq!(model, "channel");
                assert_eq!(k, *key);
            }
            err => panic!("expected an invalid argument, got: {:?}", err),
        }
    }

    let err = ctx.message().unwrap().user().roles()[0].get("kind").unwrap_err();
    assert_eq!(err.to_string(), "cannot find role data for key [kind]");
}

#[test]
fn fields_keep_declaration_order() {
    let ctx = context();

    let keys = ctx.channel().fields().keys().cloned().collect::<Vec<_>>();
    assert_eq!(
        keys,
        vec![
            "id",
            "login",
            "display_name",
            "avatar_url",
            "slug",
            "broadcaster_type",
            "provider",
            "provider_id",
            "created_at",
            "stream_timestamp",
            "is_live",
        ]
    );

    let keys = ctx.message().unwrap().fields().keys().cloned().collect::<Vec<_>>();
    assert_eq!(keys, vec!["id", "content", "provider", "user"]);

    let keys = ctx.fields().keys().cloned().collect::<Vec<_>>();
    assert_eq!(keys, vec!["channel", "message"]);
}

#[test]
fn json_snapshot() {
    let ctx = context();
    let json = ctx.to_json();
    assert_eq!(ctx.to_string(), json);

    let value: Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["channel"]["login"], "aiden");
    assert_eq!(value["message"]["user"]["roles"][3]["type"], "custom");

    // snapshots read back in, even with the renamed avatar key
    assert_eq!(Context::from_body(&json).unwrap(), ctx);
}

#[test]
fn equality_ignores_timestamp_offsets() {
    let ctx = context();
    let shifted = CONTEXT_BODY.replace(
        "2021-07-10T04:20:05.599789Z",
        "2021-07-10T06:20:05.599789+02:00",
    );
    let shifted = Context::from_body(&shifted).unwrap();

    assert_eq!(shifted.channel(), ctx.channel());
    assert_eq!(shifted.channel().created_at(), ctx.channel().created_at());
    assert_ne!(shifted.channel().fields(), ctx.channel().fields());
    assert_eq!(
        shifted.channel().get("created_at").unwrap(),
        "2021-07-10T06:20:05.599789+02:00"
    );
}

#[test]
fn nested_models_match() {
    let ctx = context();
    let value: Value = serde_json::from_str(CONTEXT_BODY).unwrap();

    let message = Message::from_value(value["message"].clone()).unwrap();
    assert_eq!(&message, ctx.message().unwrap());

    let channel = Channel::from_value(value["channel"].clone()).unwrap();
    assert_eq!(&channel, ctx.channel());

    let role = Role::from_value(value["message"]["user"]["roles"][0].clone()).unwrap();
    assert_eq!(role.kind(), "broadcaster");
}

#[test]
fn elevated_users() {
    let ctx = context();
    let user = ctx.message().unwrap().user();
    assert!(user.is_elevated());
    assert!(user.has_role_type("moderator"));
    assert!(user.has_role_type("Subscriber"));
    assert!(!user.has_role_type("vip"));

    let viewer = User::from_value(json!({
        "provider_id": "2",
        "login": "viewer",
        "display_name": "Viewer",
        "roles": [{ "id": "5", "name": "Subscriber", "type": "subscriber" }],
    }))
    .unwrap();
    assert!(!viewer.is_elevated());
}

#[test]
fn parse_command() {
    let message = |content: &str| {
        Message::from_value(json!({
            "id": "1",
            "content": content,
            "provider": "twitch",
            "user": { "provider_id": "1", "login": "a", "display_name": "A" },
        }))
        .unwrap()
    };

    assert_eq!(context().message().unwrap().command(), Some(("testcommand", None)));

    let msg = message("!hello   world  ");
    assert_eq!(msg.command(), Some(("hello", Some("world"))));

    let msg = message("  !so @someone else");
    assert_eq!(msg.command(), Some(("so", Some("@someone else"))));

    for content in &["hello", "!", "! hello", ""] {
        assert_eq!(message(*content).command(), None, "{}", content);
    }
}
