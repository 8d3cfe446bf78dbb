//! Access-code checks and session identifiers.

mod password;
mod session;

pub use password::AccessCode;
pub use session::{ClosedSession, SessionId};
