//! Per-request session handle over [`MemorySessionBackend`].

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};

use parking_lot::RwLock;
use serde_json::Value;
use tracing::debug;

use warden_core::error::AppError;
use warden_core::result::AppResult;
use warden_core::traits::session::SessionStore;
use warden_core::types::SessionId;

use super::backend::MemorySessionBackend;

/// Identity and lifecycle state of one handle.
#[derive(Debug, Default)]
struct HandleState {
    /// Identity the handle is bound to, if any.
    id: Option<SessionId>,
    /// Whether `start` has been called.
    started: bool,
}

/// A session as seen by one request.
///
/// Several handles may point at the same identity, which is how two
/// in-flight requests sharing a session cookie are modelled.
#[derive(Debug)]
pub struct MemorySession {
    /// Shared session storage.
    backend: MemorySessionBackend,
    /// Handle state.
    state: RwLock<HandleState>,
    /// When set, every operation fails as if the backend were unreachable.
    failing: AtomicBool,
}

impl MemorySession {
    pub(crate) fn new(backend: MemorySessionBackend, id: Option<SessionId>) -> Self {
        Self {
            backend,
            state: RwLock::new(HandleState { id, started: false }),
            failing: AtomicBool::new(false),
        }
    }

    /// Make every subsequent operation fail (or succeed again).
    pub fn set_failure(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    fn check_available(&self) -> AppResult<()> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(AppError::service_unavailable("Session backend unavailable"));
        }
        Ok(())
    }

    /// Identity of a started session.
    fn current_id(&self) -> AppResult<SessionId> {
        self.check_available()?;
        let state = self.state.read();
        match (state.started, state.id) {
            (true, Some(id)) => Ok(id),
            _ => Err(AppError::session("Session has not been started")),
        }
    }
}

impl SessionStore for MemorySession {
    fn is_started(&self) -> AppResult<bool> {
        self.check_available()?;
        Ok(self.state.read().started)
    }

    fn start(&self) -> AppResult<()> {
        self.check_available()?;
        let mut state = self.state.write();
        if state.started {
            return Ok(());
        }

        let id = *state.id.get_or_insert_with(SessionId::new);
        self.backend.sessions.entry(id).or_default();
        state.started = true;

        debug!(session_id = %id, "Session started");
        Ok(())
    }

    fn regenerate(&self) -> AppResult<()> {
        let old_id = self.current_id()?;
        let new_id = SessionId::new();

        let data = self
            .backend
            .sessions
            .get(&old_id)
            .map(|data| data.value().clone())
            .unwrap_or_default();
        self.backend.sessions.insert(new_id, data);
        self.state.write().id = Some(new_id);

        debug!(old_session_id = %old_id, new_session_id = %new_id, "Session regenerated");
        Ok(())
    }

    fn id(&self) -> AppResult<Option<SessionId>> {
        self.check_available()?;
        Ok(self.state.read().id)
    }

    fn get(&self, key: &str) -> AppResult<Option<Value>> {
        let id = self.current_id()?;
        Ok(self
            .backend
            .sessions
            .get(&id)
            .and_then(|data| data.get(key).cloned()))
    }

    fn set(&self, key: &str, value: Value) -> AppResult<()> {
        let id = self.current_id()?;
        self.backend
            .sessions
            .entry(id)
            .or_default()
            .insert(key.to_string(), value);
        Ok(())
    }

    fn remove(&self, key: &str) -> AppResult<()> {
        let id = self.current_id()?;
        if let Some(mut data) = self.backend.sessions.get_mut(&id) {
            data.remove(key);
        }
        self.backend.drop_if_empty(id);
        Ok(())
    }

    fn clear(&self) -> AppResult<()> {
        let id = self.current_id()?;
        self.backend.sessions.remove(&id);
        Ok(())
    }

    fn all(&self) -> AppResult<BTreeMap<String, Value>> {
        let id = self.current_id()?;
        Ok(self
            .backend
            .sessions
            .get(&id)
            .map(|data| data.value().clone())
            .unwrap_or_default())
    }
}
