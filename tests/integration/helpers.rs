//! Shared test helpers for integration tests.

use std::sync::Arc;

use chrono::Duration;

use warden::core::config::AuthContextConfig;
use warden::core::traits::{Clock, ManualClock, SessionStore};
use warden::core::types::SessionId;
use warden::session::{MemorySession, MemorySessionBackend};
use warden::{AuthContext, PathRoleMap};

/// Fixed starting instant for every test clock.
pub const START: i64 = 1_700_000_000;

/// A backend, a controllable clock, and one request's session.
pub struct TestApp {
    /// Storage shared by every request.
    pub backend: MemorySessionBackend,
    /// Clock handed to every context.
    pub clock: ManualClock,
    /// Session of the "current" request.
    pub session: Arc<MemorySession>,
}

impl TestApp {
    /// Create a fresh backend with one unstarted request session.
    pub fn new() -> Self {
        let backend = MemorySessionBackend::new();
        let session = Arc::new(backend.open());
        Self {
            backend,
            clock: ManualClock::at_timestamp(START),
            session,
        }
    }

    /// Build a context over the current request's session.
    pub fn context(&self, name: &str, config: AuthContextConfig) -> AuthContext {
        self.context_with_paths(name, config, PathRoleMap::default())
    }

    /// Build a context with path rules over the current request's session.
    pub fn context_with_paths(
        &self,
        name: &str,
        config: AuthContextConfig,
        paths: PathRoleMap,
    ) -> AuthContext {
        let store: Arc<dyn SessionStore> = self.session.clone();
        let clock: Arc<dyn Clock> = Arc::new(self.clock.clone());
        AuthContext::new(store, name, paths, config, clock).expect("valid context")
    }

    /// A second request arriving with session identity `id`.
    pub fn request_with(&self, id: SessionId) -> Arc<MemorySession> {
        Arc::new(self.backend.resume(id))
    }

    /// Identity of the current request's session.
    pub fn session_id(&self) -> SessionId {
        self.session
            .id()
            .expect("store available")
            .expect("session started")
    }

    /// Move time forward.
    pub fn advance(&self, seconds: i64) {
        self.clock.advance(Duration::seconds(seconds));
    }
}

/// Policy with the given ttl/timeout/destroy delay (seconds).
pub fn policy(ttl: u64, timeout: u64, delay: u64) -> AuthContextConfig {
    let mut config = AuthContextConfig {
        ttl,
        timeout,
        ..AuthContextConfig::default()
    };
    config.destroy.delay = delay;
    config
}
