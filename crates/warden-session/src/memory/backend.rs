//! Shared storage behind every in-memory session handle.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use serde_json::Value;
use tracing::debug;

use warden_core::config::{DESTROY_FIELD, NAMESPACE_SEPARATOR};
use warden_core::types::SessionId;

use super::session::MemorySession;

/// Data held by one session identity.
pub(crate) type SessionData = BTreeMap<String, Value>;

/// Process-wide map of session identities to their data.
///
/// Cloning is cheap and every clone sees the same sessions. Suitable for
/// single-node deployments and tests.
#[derive(Debug, Clone, Default)]
pub struct MemorySessionBackend {
    /// Session data keyed by identity.
    pub(crate) sessions: Arc<DashMap<SessionId, SessionData>>,
}

impl MemorySessionBackend {
    /// Create an empty backend.
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a handle for a request that carries no session identity yet.
    pub fn open(&self) -> MemorySession {
        MemorySession::new(self.clone(), None)
    }

    /// Open a handle for a request that arrived with identity `id`.
    ///
    /// The handle is not started; the first `start` attaches it to the stored
    /// data, or to a fresh empty session if `id` is unknown.
    pub fn resume(&self, id: SessionId) -> MemorySession {
        MemorySession::new(self.clone(), Some(id))
    }

    /// Snapshot of the data stored under `id`.
    pub fn session(&self, id: SessionId) -> Option<BTreeMap<String, Value>> {
        self.sessions.get(&id).map(|data| data.value().clone())
    }

    /// Whether a session with identity `id` exists.
    pub fn contains(&self, id: SessionId) -> bool {
        self.sessions.contains_key(&id)
    }

    /// Drop identities no request can use any more and return how many were
    /// removed.
    ///
    /// An identity is stale when it holds no data, or when it carries at
    /// least one staged `<namespace>/destroy` deadline and every such
    /// deadline is before `now`.
    pub fn purge(&self, now: DateTime<Utc>) -> usize {
        let now = now.timestamp();
        let suffix = format!("{NAMESPACE_SEPARATOR}{DESTROY_FIELD}");

        let mut purged = 0;
        self.sessions.retain(|_, data| {
            let stale = is_stale(data, &suffix, now);
            purged += usize::from(stale);
            !stale
        });

        if purged > 0 {
            debug!(purged, remaining = self.sessions.len(), "Purged stale session identities");
        }
        purged
    }

    /// Remove `id` if its data is empty.
    pub(crate) fn drop_if_empty(&self, id: SessionId) {
        self.sessions.remove_if(&id, |_, data| data.is_empty());
    }

    /// Number of stored session identities.
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    /// Whether no session is stored.
    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

fn is_stale(data: &SessionData, destroy_suffix: &str, now: i64) -> bool {
    if data.is_empty() {
        return true;
    }

    let mut staged = false;
    for (key, value) in data {
        if !key.ends_with(destroy_suffix) {
            continue;
        }
        match value.as_i64() {
            Some(deadline) if deadline < now => staged = true,
            _ => return false,
        }
    }
    staged
}
