//! HTTP building blocks shared by the feature routers.

pub mod error;
pub mod extract;
mod health;
pub mod router;
pub mod state;

pub use error::{ApiError, ErrorBody};
pub use extract::ApiJson;
pub use state::{ApiState, ApiStateBuilder, ApiStateError};
