//! In-memory session storage.

pub mod backend;
pub mod session;

pub use backend::MemorySessionBackend;
pub use session::MemorySession;
