//! # warden-auth
//!
//! Session-backed authentication contexts for Warden.
//!
//! ## Modules
//!
//! - `context` — [`AuthContext`]: login state, absolute/idle expiry and
//!   deferred destruction, stored under a per-context key namespace
//! - `rbac` — [`PathRoleMap`]: ordered path pattern rules mapping request
//!   paths to the roles they require

pub mod context;
pub mod rbac;

pub use context::{AuthContext, ExpiryCause, SessionTimes, Validity};
pub use rbac::{PathRoleMap, PathRule};
