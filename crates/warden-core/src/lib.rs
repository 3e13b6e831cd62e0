//! # warden-core
//!
//! Core crate for Warden. Contains the collaborator traits an authentication
//! context is wired against (session store, clock, request path), configuration
//! schemas, shared types, logging setup, and the unified error system.
//!
//! This crate has **no** internal dependencies on other Warden crates.

pub mod config;
pub mod error;
pub mod logging;
pub mod result;
pub mod traits;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
