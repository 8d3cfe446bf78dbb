//! Access slice: a single shared access code guards the service.
//!
//! A correct code opens an in-memory session; the session token is accepted as
//! a bearer token or through the `recap_session` cookie.

mod error;
mod gatekeeper;
#[cfg(feature = "server")]
mod middleware;
#[cfg(feature = "server")]
mod routes;
mod token;

pub use error::{AccessError, AccessErrorExt};
pub use gatekeeper::{Gatekeeper, Session};
#[cfg(feature = "server")]
pub use middleware::require_session;
#[cfg(feature = "server")]
pub use routes::{LoginRequest, LoginResponse, routes};
pub use token::session_token;

#[cfg(feature = "server")]
use recap_domain::config::ApiConfig;
#[cfg(feature = "server")]
use recap_kernel::config::Secrets;
#[cfg(feature = "server")]
use recap_kernel::domain::registry::InitializedSlice;

/// Access feature state.
#[recap_derive::recap_slice]
pub struct AccessSlice {
    pub gatekeeper: Gatekeeper,
}

/// Builds the access slice from the session settings and the configured code.
///
/// # Errors
/// [`AccessError::Config`] when the access code is blank.
#[cfg(feature = "server")]
pub fn init(config: &ApiConfig, secrets: &Secrets) -> Result<InitializedSlice, AccessError> {
    let code = secrets.app_password.expose();
    if code.trim().is_empty() {
        return Err(AccessError::Config { message: "access code is blank".into(), context: None });
    }

    let gatekeeper = Gatekeeper::new(code, &config.security.session);
    tracing::info!(
        ttl_seconds = config.security.session.ttl_seconds,
        source = %secrets.app_password.source(),
        "Access slice initialized"
    );

    Ok(InitializedSlice::new(AccessSlice::new(AccessSliceInner { gatekeeper })))
}
