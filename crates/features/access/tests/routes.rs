#![cfg(feature = "server")]

use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use axum::middleware::from_fn_with_state;
use axum::routing::get;
use axum::{Extension, Router};
use recap_access::{AccessSlice, init, require_session, routes};
use recap_domain::config::ApiConfig;
use recap_domain::constants::{APP_PASSWORD, SESSION_COOKIE};
use recap_kernel::config::resolve_secrets;
use recap_kernel::security::{ClosedSession, SessionId};
use recap_kernel::server::ApiState;
use serde_json::{Value, json};
use tower::ServiceExt;

fn state() -> ApiState {
    let secrets = resolve_secrets(
        |key| (key == APP_PASSWORD).then(|| "open-sesame".to_owned()),
        |_| None,
    );
    let config = ApiConfig::default();
    let slice = init(&config, &secrets).expect("access slice");
    ApiState::builder().config(config).register_slice(slice).build().expect("state")
}

async fn private(Extension(id): Extension<SessionId>) -> String {
    id.as_str().to_owned()
}

fn app(state: &ApiState) -> Router {
    let (auth, _api) = routes().split_for_parts();
    let private = Router::new()
        .route("/private", get(private))
        .route_layer(from_fn_with_state(state.clone(), require_session));

    auth.merge(private).with_state(state.clone())
}

fn login_request(password: &str) -> Request<Body> {
    Request::post("/api/auth/login")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(json!({ "password": password }).to_string()))
        .expect("request")
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.expect("body");
    serde_json::from_slice(&bytes).expect("json body")
}

async fn login(app: &Router) -> String {
    let response = app.clone().oneshot(login_request("open-sesame")).await.expect("response");
    assert_eq!(response.status(), StatusCode::OK);

    let cookie = response.headers().get(header::SET_COOKIE).expect("cookie").to_str().unwrap();
    assert!(cookie.starts_with(&format!("{SESSION_COOKIE}=")));
    assert!(cookie.contains("HttpOnly"));

    let body = body_json(response).await;
    assert_eq!(body["expiresIn"], 28_800);
    body["token"].as_str().expect("token").to_owned()
}

#[tokio::test]
async fn login_then_reach_private_route() {
    let state = state();
    let app = app(&state);
    let token = login(&app).await;

    let by_bearer = Request::get("/private")
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(by_bearer).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert_eq!(bytes, token.as_bytes());

    let by_cookie = Request::get("/private")
        .header(header::COOKIE, format!("{SESSION_COOKIE}={token}"))
        .body(Body::empty())
        .unwrap();
    assert_eq!(app.oneshot(by_cookie).await.unwrap().status(), StatusCode::OK);

    assert!(state.get_slice::<AccessSlice>().is_some());
}

#[tokio::test]
async fn wrong_password_is_unauthorized() {
    let app = app(&state());
    let response = app.oneshot(login_request("guess")).await.unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = body_json(response).await;
    assert_eq!(body["error"], "unauthorized");
    assert_eq!(body["message"], "Invalid access code. Please verify and try again.");
}

#[tokio::test]
async fn private_route_needs_a_live_session() {
    let app = app(&state());

    let anonymous = Request::get("/private").body(Body::empty()).unwrap();
    let response = app.clone().oneshot(anonymous).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let forged = Request::get("/private")
        .header(header::AUTHORIZATION, format!("Bearer {}", SessionId::generate().as_str()))
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(forged).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(response).await["error"], "unauthorized");
}

#[tokio::test]
async fn logout_ends_the_session() {
    let app = app(&state());
    let token = login(&app).await;

    let logout = Request::post("/api/auth/logout")
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(logout).await.unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    let cleared = response.headers().get(header::SET_COOKIE).unwrap().to_str().unwrap();
    assert!(cleared.contains("Max-Age=0"));
    let closed = response.extensions().get::<ClosedSession>().unwrap();
    assert_eq!(closed.0.as_str(), token);

    let again = Request::get("/private")
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();
    assert_eq!(app.oneshot(again).await.unwrap().status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn unknown_fields_in_login_are_rejected() {
    let app = app(&state());
    let request = Request::post("/api/auth/login")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(r#"{"password":"open-sesame","remember":true}"#))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}
