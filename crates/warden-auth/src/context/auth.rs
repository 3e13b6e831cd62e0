//! Namespaced authentication state kept in a session store.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use tracing::{debug, info};

use warden_core::config::{AuthContextConfig, ContextConfig, validate_namespace};
use warden_core::error::AppError;
use warden_core::traits::{Clock, RequestPath, SessionStore};
use warden_core::types::RoleSet;

use crate::rbac::PathRoleMap;

use super::keys;
use super::lifetime::{self, SessionTimes, Validity};

/// Tracks one principal's login lifecycle inside a shared session store.
///
/// Every field is stored as `"<name>/<field>"`, so several contexts with
/// distinct names can share one session. The context keeps no state of its
/// own; all of it lives in the store.
///
/// Validity of the `user` field is checked lazily on each `get("user", ..)`:
/// once `now` passes the earliest of the absolute expiry, the idle deadline
/// and a pending destruction deadline, every field in the namespace is
/// wiped and callers receive their default.
#[derive(Debug, Clone)]
pub struct AuthContext {
    /// Namespace name.
    name: String,
    /// `"<name>/"`, cached for bulk operations.
    prefix: String,
    /// Session of the current request.
    store: Arc<dyn SessionStore>,
    /// Protected path rules.
    path_roles: PathRoleMap,
    /// Time-based policy.
    config: AuthContextConfig,
    /// Time source.
    clock: Arc<dyn Clock>,
}

impl AuthContext {
    /// Creates a context named `name` over `store`.
    ///
    /// Fails if `name` is empty or contains the namespace separator.
    pub fn new(
        store: Arc<dyn SessionStore>,
        name: impl Into<String>,
        path_roles: PathRoleMap,
        config: AuthContextConfig,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, AppError> {
        let name = name.into();
        validate_namespace(&name)?;

        Ok(Self {
            prefix: keys::namespace_prefix(&name),
            name,
            store,
            path_roles,
            config,
            clock,
        })
    }

    /// Creates a context from its configuration section, compiling path rules.
    pub fn from_config(
        store: Arc<dyn SessionStore>,
        name: impl Into<String>,
        config: &ContextConfig,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, AppError> {
        let path_roles = PathRoleMap::from_config(&config.paths)?;
        Self::new(store, name, path_roles, config.settings.clone(), clock)
    }

    /// The same context bound to another request's session.
    pub fn for_session(&self, store: Arc<dyn SessionStore>) -> Self {
        Self {
            store,
            ..self.clone()
        }
    }

    /// Namespace name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Time-based policy.
    pub fn config(&self) -> &AuthContextConfig {
        &self.config
    }

    /// Protected path rules.
    pub fn path_roles(&self) -> &PathRoleMap {
        &self.path_roles
    }

    /// Whether this context is the fallback among several.
    pub fn is_default(&self) -> bool {
        self.config.is_default
    }

    /// Store `value` under `name`.
    ///
    /// Setting `user` is a login: the current session identity is staged for
    /// destruction after the configured delay, the identity is regenerated,
    /// and fresh login/activity/expiry timestamps are written to the new
    /// identity before the principal itself.
    pub fn set(&self, name: &str, value: Value) -> Result<(), AppError> {
        self.ensure_started()?;

        if name == keys::USER {
            let now = self.now();

            // Must land on the old identity, before regeneration, so requests
            // still holding it find the marker and log themselves out.
            self.write(keys::DESTROY, json!(now.saturating_add(self.destroy_delay())))?;
            self.store.regenerate()?;
            self.store.remove(&self.key(keys::DESTROY))?;

            self.write(keys::LOGIN, json!(now))?;
            self.write(keys::ACTIVE, json!(now))?;
            self.write(keys::EXPIRES, json!(now.saturating_add(self.ttl())))?;

            info!(context = %self.name, login = now, "Session identity regenerated for login");
        }

        self.write(name, value)
    }

    /// Read `name`, or `default` if it is absent.
    ///
    /// Reading `user` first applies the expiry policy: an elapsed session is
    /// wiped (so `default` comes back), a live one has its activity refreshed.
    pub fn get(&self, name: &str, default: Value) -> Result<Value, AppError> {
        self.ensure_started()?;

        if name == keys::USER {
            let now = self.now();
            let times = self.session_times()?;

            match times.evaluate(now, self.idle_timeout()) {
                Validity::Valid => self.write(keys::ACTIVE, json!(now))?,
                Validity::Expired(cause) => {
                    if times.expires.is_some() {
                        info!(context = %self.name, %cause, "Authentication expired; clearing context");
                    } else {
                        debug!(context = %self.name, "No login recorded; clearing context");
                    }
                    self.clear_namespace()?;
                }
            }
        }

        Ok(self.store.get(&self.key(name))?.unwrap_or(default))
    }

    /// Read `name` and deserialize it. Absent (or null) values yield `None`.
    pub fn get_json<T: DeserializeOwned>(&self, name: &str) -> Result<Option<T>, AppError> {
        match self.get(name, Value::Null)? {
            Value::Null => Ok(None),
            value => Ok(Some(serde_json::from_value(value)?)),
        }
    }

    /// Delete `name` only.
    pub fn remove(&self, name: &str) -> Result<(), AppError> {
        self.ensure_started()?;
        self.store.remove(&self.key(name))
    }

    /// Delete every field of this context. Other namespaces are untouched.
    pub fn clear(&self) -> Result<(), AppError> {
        self.ensure_started()?;
        self.clear_namespace()
    }

    /// Whether the request path requires any role.
    pub fn is_shielded<R: RequestPath + ?Sized>(&self, request: &R) -> bool {
        !self.get_roles(request).is_empty()
    }

    /// Roles of the first path rule matching the request, or none.
    pub fn get_roles<R: RequestPath + ?Sized>(&self, request: &R) -> RoleSet {
        self.path_roles.roles_for(request.path())
    }

    fn ensure_started(&self) -> Result<(), AppError> {
        if !self.store.is_started()? {
            self.store.start()?;
        }
        Ok(())
    }

    fn key(&self, field: &str) -> String {
        keys::field_key(&self.name, field)
    }

    fn write(&self, field: &str, value: Value) -> Result<(), AppError> {
        self.store.set(&self.key(field), value)
    }

    fn session_times(&self) -> Result<SessionTimes, AppError> {
        Ok(SessionTimes {
            expires: lifetime::timestamp(self.store.get(&self.key(keys::EXPIRES))?),
            destroy: lifetime::timestamp(self.store.get(&self.key(keys::DESTROY))?),
            active: lifetime::timestamp(self.store.get(&self.key(keys::ACTIVE))?),
        })
    }

    fn clear_namespace(&self) -> Result<(), AppError> {
        let owned: Vec<String> = self
            .store
            .all()?
            .into_keys()
            .filter(|key| keys::in_namespace(&self.prefix, key))
            .collect();

        for key in &owned {
            self.store.remove(key)?;
        }

        debug!(context = %self.name, removed = owned.len(), "Cleared context namespace");
        Ok(())
    }

    fn now(&self) -> i64 {
        self.clock.now().timestamp()
    }

    fn ttl(&self) -> i64 {
        seconds(self.config.ttl)
    }

    fn destroy_delay(&self) -> i64 {
        seconds(self.config.destroy.delay)
    }

    fn idle_timeout(&self) -> Option<i64> {
        self.config.idle_timeout().map(seconds)
    }
}

fn seconds(value: u64) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}
