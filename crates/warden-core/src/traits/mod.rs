//! Collaborator traits defined in `warden-core` and implemented by other crates
//! or by the host application.

pub mod clock;
pub mod request;
pub mod session;

pub use clock::{Clock, ManualClock, SystemClock};
pub use request::RequestPath;
pub use session::SessionStore;
