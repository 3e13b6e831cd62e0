//! Path-based role requirements.

pub mod path_roles;

pub use path_roles::{PathRoleMap, PathRule};
