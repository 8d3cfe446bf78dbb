use crate::ReportSlice;
use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;
use recap_kernel::security::ClosedSession;
use recap_kernel::server::ApiState;
use tracing::debug;

/// Drops the latest report of a session once a response reports it closed.
///
/// ```rust,ignore
/// let auth = access_routes()
///     .layer(axum::middleware::from_fn_with_state(state.clone(), forget_closed_sessions));
/// ```
pub async fn forget_closed_sessions(
    State(state): State<ApiState>,
    request: Request,
    next: Next,
) -> Response {
    let response = next.run(request).await;

    let closed = response.extensions().get::<ClosedSession>().cloned();
    if let (Some(ClosedSession(id)), Some(reports)) = (closed, state.get_slice::<ReportSlice>()) {
        reports.forget(&id).await;
        debug!(session = ?id, "Latest report dropped");
    }
    response
}
