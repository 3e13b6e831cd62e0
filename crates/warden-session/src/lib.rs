//! # warden-session
//!
//! Session store implementations for Warden.
//!
//! - **memory**: In-process store backed by [dashmap](https://crates.io/crates/dashmap).
//!   One shared [`MemorySessionBackend`] holds every session; each request
//!   works through its own [`MemorySession`] handle.
//!
//! Hosts with a persistent backend implement
//! [`warden_core::traits::SessionStore`] themselves.

#[cfg(feature = "memory")]
pub mod memory;

#[cfg(feature = "memory")]
pub use memory::{MemorySession, MemorySessionBackend};
