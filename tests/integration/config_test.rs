//! Contexts built from configuration.

use std::sync::Arc;

use serde_json::{Value, json};

use warden::AuthContext;
use warden::core::config::WardenConfig;
use warden::core::error::ErrorKind;
use warden::core::traits::{Clock, SessionStore};

use crate::helpers::TestApp;

const CONFIG: &str = r#"
[contexts.admin]
default = false
ttl = 600
timeout = 60

[contexts.admin.destroy]
delay = 5

[[contexts.admin.paths]]
pattern = "^/admin"
roles = ["admin", "ops"]

[[contexts.admin.paths]]
pattern = "^/"
roles = []

[contexts.main]
ttl = 3600
"#;

fn build(app: &TestApp, config: &WardenConfig) -> Vec<AuthContext> {
    config
        .contexts
        .iter()
        .map(|(name, section)| {
            let store: Arc<dyn SessionStore> = app.session.clone();
            let clock: Arc<dyn Clock> = Arc::new(app.clock.clone());
            AuthContext::from_config(store, name.as_str(), section, clock).unwrap()
        })
        .collect()
}

#[test]
fn test_contexts_from_config() {
    let app = TestApp::new();
    let config = WardenConfig::from_toml_str(CONFIG).unwrap();
    let contexts = build(&app, &config);

    let admin = contexts.iter().find(|c| c.name() == "admin").unwrap();
    let main = contexts.iter().find(|c| c.name() == "main").unwrap();

    assert!(!admin.is_default());
    assert!(main.is_default());
    assert_eq!(admin.config().destroy.delay, 5);
    assert_eq!(main.config().timeout, 0);
    assert_eq!(admin.get_roles("/admin/panel").len(), 2);
    assert!(!admin.is_shielded("/home"));
    assert!(!main.is_shielded("/admin"));

    admin.set("user", json!("root")).unwrap();
    app.advance(61);
    assert_eq!(admin.get("user", Value::Null).unwrap(), Value::Null);
}

#[test]
fn test_malformed_pattern_is_a_configuration_error() {
    let app = TestApp::new();
    let config = WardenConfig::from_toml_str(
        r#"
        [[contexts.main.paths]]
        pattern = "^/(admin"
        roles = ["admin"]
        "#,
    )
    .unwrap();

    let store: Arc<dyn SessionStore> = app.session.clone();
    let clock: Arc<dyn Clock> = Arc::new(app.clock.clone());
    let err = AuthContext::from_config(store, "main", &config.contexts["main"], clock)
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::Configuration);
}
