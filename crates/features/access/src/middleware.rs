use crate::AccessSlice;
use crate::token::session_token;
use axum::extract::{Request, State};
use axum::http::header::{AUTHORIZATION, COOKIE};
use axum::http::HeaderMap;
use axum::middleware::Next;
use axum::response::Response;
use recap_kernel::security::SessionId;
use recap_kernel::server::{ApiError, ApiState};
use tracing::debug;

pub(crate) fn request_token(headers: &HeaderMap) -> Option<SessionId> {
    let authorization = headers.get(AUTHORIZATION).and_then(|value| value.to_str().ok());
    let cookies = headers.get_all(COOKIE).iter().filter_map(|value| value.to_str().ok());
    session_token(authorization, cookies)
}

/// Rejects requests without a live session and exposes the caller's
/// [`SessionId`] as a request extension.
///
/// ```rust,ignore
/// let protected = report_routes()
///     .route_layer(axum::middleware::from_fn_with_state(state.clone(), require_session));
/// ```
///
/// # Errors
/// `401` when the token is missing, malformed or expired.
pub async fn require_session(
    State(state): State<ApiState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let access = state.try_get_slice::<AccessSlice>()?;

    let Some(id) = request_token(request.headers()) else {
        debug!(path = %request.uri().path(), "Request without session token");
        return Err(ApiError::unauthorized("Sign in with the access code first."));
    };
    let Some(session) = access.gatekeeper.session(&id).await else {
        return Err(ApiError::unauthorized("Session expired or unknown. Sign in again."));
    };

    request.extensions_mut().insert(session.id);
    Ok(next.run(request).await)
}
