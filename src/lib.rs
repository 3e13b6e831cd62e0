//! Warden: session-backed authentication contexts.
//!
//! Wires the workspace crates together:
//!
//! - [`core`] — errors, configuration, logging, collaborator traits
//! - [`session`] — in-memory session store
//! - [`auth`] — [`AuthContext`] and path role rules

pub use warden_auth as auth;
pub use warden_core as core;
pub use warden_session as session;

pub use warden_auth::{AuthContext, PathRoleMap, PathRule};
pub use warden_core::{AppError, AppResult};
