//! Authentication context: namespaced login state with time-based expiry.

pub mod auth;
pub mod keys;
pub mod lifetime;

pub use auth::AuthContext;
pub use lifetime::{ExpiryCause, SessionTimes, Validity};
