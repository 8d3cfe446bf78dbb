use crate::AccessSlice;
use crate::middleware::request_token;
use axum::extract::State;
use axum::http::header::SET_COOKIE;
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::{Extension, Json};
use recap_derive::{api_handler, api_model};
use recap_domain::constants::{AUTH_TAG, SESSION_COOKIE};
use recap_kernel::security::ClosedSession;
use recap_kernel::server::{ApiError, ApiJson, ApiState, ErrorBody};
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

#[api_model]
pub struct LoginRequest {
    /// The shared access code.
    pub password: String,
}

#[api_model]
pub struct LoginResponse {
    /// Session token; send it as `Authorization: Bearer <token>`.
    pub token: String,
    /// Seconds until the session expires.
    pub expires_in: u64,
}

/// `POST /api/auth/login` and `POST /api/auth/logout`.
pub fn routes() -> OpenApiRouter<ApiState> {
    OpenApiRouter::new().routes(routes!(login)).routes(routes!(logout))
}

#[api_handler(
    post,
    path = "/api/auth/login",
    request_body = LoginRequest,
    responses(
        (status = OK, description = "Session opened", body = LoginResponse),
        (status = UNAUTHORIZED, description = "Wrong access code", body = ErrorBody),
    ),
    tag = AUTH_TAG,
)]
pub(crate) async fn login(
    State(state): State<ApiState>,
    ApiJson(body): ApiJson<LoginRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let access = state.try_get_slice::<AccessSlice>()?;
    let session = access.gatekeeper.login(&body.password).await?;

    let max_age = access.gatekeeper.ttl().as_secs();
    let cookie = format!(
        "{SESSION_COOKIE}={}; Path=/; HttpOnly; SameSite=Strict; Max-Age={max_age}",
        session.id.as_str()
    );
    let body = LoginResponse { token: session.id.as_str().to_owned(), expires_in: max_age };

    Ok(([(SET_COOKIE, cookie)], Json(body)))
}

#[api_handler(
    post,
    path = "/api/auth/logout",
    responses((status = NO_CONTENT, description = "Session closed")),
    tag = AUTH_TAG,
)]
pub(crate) async fn logout(
    State(state): State<ApiState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, ApiError> {
    let access = state.try_get_slice::<AccessSlice>()?;
    let closed = match request_token(&headers) {
        Some(id) => access.gatekeeper.logout(&id).await.then(|| Extension(ClosedSession(id))),
        None => None,
    };

    let expired = format!("{SESSION_COOKIE}=; Path=/; HttpOnly; SameSite=Strict; Max-Age=0");
    Ok((StatusCode::NO_CONTENT, closed, [(SET_COOKIE, expired)]))
}
