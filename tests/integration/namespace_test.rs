//! Key namespacing: several contexts sharing one session.

use serde_json::{Value, json};

use warden::core::config::AuthContextConfig;
use warden::core::traits::SessionStore;

use crate::helpers::{TestApp, policy};

#[test]
fn test_clear_leaves_other_contexts_untouched() {
    let app = TestApp::new();
    let admin = app.context("admin", AuthContextConfig::default());
    let main = app.context("main", AuthContextConfig::default());

    main.set("user", json!("alice")).unwrap();
    admin.set("user", json!("root")).unwrap();
    app.session.set("unrelated", json!(true)).unwrap();

    admin.clear().unwrap();

    let all = app.session.all().unwrap();
    assert!(all.keys().all(|key| !key.starts_with("admin/")));
    assert_eq!(all.get("main/user"), Some(&json!("alice")));
    assert_eq!(all.get("unrelated"), Some(&json!(true)));
    assert_eq!(main.get("user", Value::Null).unwrap(), json!("alice"));
}

#[test]
fn test_similar_names_do_not_overlap() {
    let app = TestApp::new();
    let short = app.context("adm", AuthContextConfig::default());
    let long = app.context("admin", AuthContextConfig::default());

    long.set("user", json!("root")).unwrap();
    short.clear().unwrap();

    assert_eq!(long.get("user", Value::Null).unwrap(), json!("root"));
}

#[test]
fn test_remove_deletes_only_named_field() {
    let app = TestApp::new();
    let ctx = app.context("main", AuthContextConfig::default());
    ctx.set("user", json!("alice")).unwrap();

    ctx.remove("user").unwrap();

    assert_eq!(app.session.get("main/user").unwrap(), None);
    assert!(app.session.get("main/expires").unwrap().is_some());
    assert!(app.session.get("main/login").unwrap().is_some());
}

#[test]
fn test_expiry_in_one_context_keeps_the_other() {
    let app = TestApp::new();
    let short = app.context("short", policy(10, 0, 30));
    let long = app.context("long", policy(1_000, 0, 30));

    long.set("user", json!("alice")).unwrap();
    short.set("user", json!("bob")).unwrap();

    app.advance(11);
    assert_eq!(short.get("user", Value::Null).unwrap(), Value::Null);
    assert_eq!(long.get("user", Value::Null).unwrap(), json!("alice"));
}

#[test]
fn test_is_default_reflects_config() {
    let app = TestApp::new();
    let main = app.context("main", AuthContextConfig::default());
    let admin = app.context(
        "admin",
        AuthContextConfig {
            is_default: false,
            ..AuthContextConfig::default()
        },
    );
    assert!(main.is_default());
    assert!(!admin.is_default());
}
