//! Session store trait for pluggable session backends.

use std::collections::BTreeMap;

use serde_json::Value;

use crate::result::AppResult;
use crate::types::SessionId;

/// An opaque key/value session bound to one request.
///
/// The store owns identity (cookie issuance, persistence, serialization);
/// callers only see string keys mapped to JSON values. Implementations must
/// make `start` and `regenerate` atomic with respect to concurrent requests
/// on the same session, since callers perform no locking of their own.
pub trait SessionStore: Send + Sync + std::fmt::Debug {
    /// Whether the session has been started for this request.
    fn is_started(&self) -> AppResult<bool>;

    /// Start the session. Starting an already started session is a no-op.
    fn start(&self) -> AppResult<()>;

    /// Rotate the session identity while preserving its data.
    fn regenerate(&self) -> AppResult<()>;

    /// Current session identity, if the session has one.
    fn id(&self) -> AppResult<Option<SessionId>>;

    /// Get a value by key. Returns `None` if the key is absent.
    fn get(&self, key: &str) -> AppResult<Option<Value>>;

    /// Set a value, replacing any previous one.
    fn set(&self, key: &str, value: Value) -> AppResult<()>;

    /// Remove a key. Removing an absent key is a no-op.
    fn remove(&self, key: &str) -> AppResult<()>;

    /// Remove every key in the session.
    fn clear(&self) -> AppResult<()>;

    /// Snapshot of every key/value pair in the session.
    fn all(&self) -> AppResult<BTreeMap<String, Value>>;
}
