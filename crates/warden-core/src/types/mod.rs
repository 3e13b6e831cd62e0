//! Shared types.

pub mod id;
pub mod role;

pub use id::SessionId;
pub use role::{Role, RoleSet};
