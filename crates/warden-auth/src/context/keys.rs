//! Session key builders for authentication context fields.
//!
//! Every key a context writes is `"<namespace>/<field>"`. Centralising key
//! construction keeps contexts sharing one store from colliding.

use warden_core::config::{DESTROY_FIELD, NAMESPACE_SEPARATOR};

/// The authenticated principal. Its presence means "logged in".
pub const USER: &str = "user";
/// Login timestamp.
pub const LOGIN: &str = "login";
/// Last authenticated read timestamp.
pub const ACTIVE: &str = "active";
/// Absolute expiry deadline.
pub const EXPIRES: &str = "expires";
/// Deferred destruction deadline of a replaced session identity.
pub const DESTROY: &str = DESTROY_FIELD;

/// Prefix shared by every key in `namespace`.
pub fn namespace_prefix(namespace: &str) -> String {
    format!("{namespace}{NAMESPACE_SEPARATOR}")
}

/// Session key for `field` in `namespace`.
pub fn field_key(namespace: &str, field: &str) -> String {
    format!("{namespace}{NAMESPACE_SEPARATOR}{field}")
}

/// Whether `key` lies under `prefix` as built by [`namespace_prefix`].
pub fn in_namespace(prefix: &str, key: &str) -> bool {
    key.starts_with(prefix)
}
