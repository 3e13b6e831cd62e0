//! Absolute, idle and destroy deadlines as observed through `get("user")`.

use serde_json::{Value, json};

use warden::core::traits::SessionStore;

use crate::helpers::{START, TestApp, policy};

#[test]
fn test_ttl_expiry() {
    let app = TestApp::new();
    let ctx = app.context("main", policy(100, 0, 30));
    ctx.set("user", json!("alice")).unwrap();

    app.advance(100);
    assert_eq!(ctx.get("user", Value::Null).unwrap(), json!("alice"));

    app.advance(1);
    assert_eq!(ctx.get("user", json!("guest")).unwrap(), json!("guest"));
    assert!(app.session.all().unwrap().is_empty());
}

#[test]
fn test_ttl_is_not_extended_by_activity() {
    let app = TestApp::new();
    let ctx = app.context("main", policy(100, 60, 30));
    ctx.set("user", json!("alice")).unwrap();

    for _ in 0..4 {
        app.advance(25);
        assert_eq!(ctx.get("user", Value::Null).unwrap(), json!("alice"));
    }

    app.advance(1);
    assert_eq!(ctx.get("user", Value::Null).unwrap(), Value::Null);
}

#[test]
fn test_idle_timeout() {
    let app = TestApp::new();
    let ctx = app.context("main", policy(3600, 60, 30));
    ctx.set("user", json!("alice")).unwrap();

    app.advance(61);
    assert_eq!(ctx.get("user", Value::Null).unwrap(), Value::Null);
    assert_eq!(ctx.get("login", Value::Null).unwrap(), Value::Null);
}

#[test]
fn test_activity_extends_idle_deadline() {
    let app = TestApp::new();
    let ctx = app.context("main", policy(3600, 60, 30));
    ctx.set("user", json!("alice")).unwrap();

    app.advance(59);
    assert_eq!(ctx.get("user", Value::Null).unwrap(), json!("alice"));
    assert_eq!(
        app.session.get("main/active").unwrap(),
        Some(json!(START + 59))
    );

    app.advance(59);
    assert_eq!(ctx.get("user", Value::Null).unwrap(), json!("alice"));

    app.advance(61);
    assert_eq!(ctx.get("user", Value::Null).unwrap(), Value::Null);
}

#[test]
fn test_disabled_idle_timeout_never_expires_early() {
    let app = TestApp::new();
    let ctx = app.context("main", policy(10_000, 0, 30));
    ctx.set("user", json!("alice")).unwrap();

    app.advance(9_999);
    assert_eq!(ctx.get("user", Value::Null).unwrap(), json!("alice"));
}

#[test]
fn test_reads_of_other_fields_do_not_refresh_activity() {
    let app = TestApp::new();
    let ctx = app.context("main", policy(3600, 60, 30));
    ctx.set("user", json!("alice")).unwrap();

    app.advance(50);
    ctx.get("login", Value::Null).unwrap();
    assert_eq!(app.session.get("main/active").unwrap(), Some(json!(START)));

    app.advance(20);
    assert_eq!(ctx.get("user", Value::Null).unwrap(), Value::Null);
}

#[test]
fn test_validity_matches_earliest_deadline() {
    for (ttl, timeout) in [(50u64, 0u64), (50, 20), (20, 50), (30, 30)] {
        let app = TestApp::new();
        let ctx = app.context("main", policy(ttl, timeout, 30));
        ctx.set("user", json!("alice")).unwrap();

        let mut active = START;
        let mut now = START;
        for step in [10i64, 15, 5, 25, 40] {
            app.advance(step);
            now += step;

            let idle = if timeout == 0 {
                i64::MAX
            } else {
                active + timeout as i64
            };
            let clear_at = (START + ttl as i64).min(idle);
            let got = ctx.get("user", Value::Null).unwrap();

            if now <= clear_at {
                assert_eq!(got, json!("alice"), "ttl={ttl} timeout={timeout} now={now}");
                active = now;
            } else {
                assert_eq!(got, Value::Null, "ttl={ttl} timeout={timeout} now={now}");
                assert!(app.session.all().unwrap().is_empty());
                break;
            }
        }
    }
}
