#![cfg(feature = "server")]

use axum::body::Body;
use axum::extract::Path;
use axum::http::{HeaderMap, Request, StatusCode, header};
use axum::middleware::from_fn_with_state;
use axum::routing::{get, post};
use axum::{Extension, Json, Router};
use recap_domain::config::ApiConfig;
use recap_domain::constants::{BENZINGA_API_KEY, OPENAI_API_KEY};
use recap_kernel::config::resolve_secrets;
use recap_kernel::security::{ClosedSession, SessionId};
use recap_kernel::server::ApiState;
use recap_report::{forget_closed_sessions, init, routes};
use serde_json::{Value, json};
use tower::ServiceExt;

const REPORT_LINE: &str = "Equities closed the week higher on strong earnings.\n";

async fn chart(Path(symbol): Path<String>) -> Json<Value> {
    Json(json!({
        "chart": {
            "result": [{
                "meta": { "symbol": symbol },
                "timestamp": [1, 2],
                "indicators": { "quote": [{ "close": [100.0, 110.0] }] }
            }],
            "error": null
        }
    }))
}

async fn news() -> Json<Value> {
    Json(json!([
        {
            "id": 1,
            "title": "Nvidia earnings beat estimates",
            "teaser": "Revenue grew for a third quarter",
            "created": "Mon, 12 Oct 2026 08:00:00 -0400",
            "url": "https://www.benzinga.com/news/1"
        },
        {
            "id": 2,
            "title": "Fed signals patience",
            "teaser": "Powell spoke on Wednesday",
            "created": "Wed, 07 Oct 2026 14:00:00 -0400",
            "url": "https://www.benzinga.com/news/2"
        }
    ]))
}

async fn chat(headers: HeaderMap, Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
    let authorized = headers
        .get(header::AUTHORIZATION)
        .is_some_and(|value| value.as_bytes() == b"Bearer sk-test");
    if !authorized {
        return (StatusCode::UNAUTHORIZED, Json(json!({ "error": { "message": "bad key" } })));
    }

    let system = body["messages"][0]["content"].as_str().unwrap_or_default();
    let content = if system.contains("translator") {
        "Bản tin thị trường".to_owned()
    } else {
        REPORT_LINE.repeat(30)
    };
    (StatusCode::OK, Json(json!({ "choices": [{ "message": { "content": content } }] })))
}

async fn upstream() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    let app = Router::new()
        .route("/v8/finance/chart/{symbol}", get(chart))
        .route("/api/v2/news", get(news))
        .route("/v1/chat/completions", post(chat));
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    format!("http://{addr}")
}

async fn app() -> Router {
    let base = upstream().await;
    let mut config = ApiConfig::default();
    config.providers.market.base_url.clone_from(&base);
    config.providers.benzinga.base_url = format!("{base}/api");
    config.providers.openai.base_url = format!("{base}/v1");

    let secrets = resolve_secrets(
        |key| match key {
            BENZINGA_API_KEY => Some("bz-test".to_owned()),
            OPENAI_API_KEY => Some("sk-test".to_owned()),
            _ => None,
        },
        |_| None,
    );
    let slice = init(&config, &secrets).expect("report slice");
    let state =
        ApiState::builder().config(config).register_slice(slice).build().expect("state");

    // Stands in for the access slice's logout, which tags its response.
    let session = SessionId::generate();
    let closed = ClosedSession(session.clone());
    let logout = Router::new()
        .route(
            "/logout",
            post(move || {
                let closed = closed.clone();
                async move { (StatusCode::NO_CONTENT, Extension(closed)) }
            }),
        )
        .layer(from_fn_with_state(state.clone(), forget_closed_sessions));

    let (router, _api) = routes().split_for_parts();
    router.merge(logout).layer(Extension(session)).with_state(state)
}

fn generate_request(body: &Value) -> Request<Body> {
    Request::post("/api/reports")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("request")
}

fn get_request(uri: &str) -> Request<Body> {
    Request::get(uri).body(Body::empty()).expect("request")
}

async fn body_bytes(response: axum::response::Response) -> Vec<u8> {
    axum::body::to_bytes(response.into_body(), usize::MAX).await.expect("body").to_vec()
}

async fn body_json(response: axum::response::Response) -> Value {
    serde_json::from_slice(&body_bytes(response).await).expect("json body")
}

fn week() -> Value {
    json!({ "startDate": "2026-10-05", "endDate": "2026-10-12" })
}

#[tokio::test]
async fn options_describe_the_form() {
    let app = app().await;
    let response = app.oneshot(get_request("/api/reports/options")).await.expect("response");
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    let languages: Vec<&str> =
        body["languages"].as_array().unwrap().iter().filter_map(Value::as_str).collect();
    assert_eq!(
        languages,
        ["English", "Thai", "Simplified Chinese", "Traditional Chinese", "Vietnamese"]
    );
    assert_eq!(body["formats"].as_array().unwrap().len(), 5);
    assert_eq!(body["articlesLimit"]["default"], 200.0);
    assert_eq!(body["articlesLimit"]["min"], 50.0);
    assert_eq!(body["storiesPerTheme"]["max"], 5.0);
    assert_eq!(body["features"]["include_sectors"], true);
}

#[tokio::test]
async fn generates_and_keeps_the_latest_report() {
    let app = app().await;

    let response = app.clone().oneshot(get_request("/api/reports/latest")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = app.clone().oneshot(generate_request(&week())).await.expect("response");
    assert_eq!(response.status(), StatusCode::OK);
    let report = body_json(response).await;

    assert_eq!(report["periodLabel"], "October 05, 2026 to October 12, 2026");
    assert_eq!(report["days"], 8);
    assert_eq!(report["language"], "English");
    assert_eq!(report["articlesCount"], 2);
    assert_eq!(report["themesCount"], 2);
    assert_eq!(report["content"], REPORT_LINE.repeat(30).trim());
    assert_eq!(report["truncated"], true);
    assert_eq!(report["preview"].as_str().unwrap().chars().count(), 1000);
    assert_eq!(report["exports"], json!(["report", "executive", "email", "json", "csv"]));

    let response = app.oneshot(get_request("/api/reports/latest")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["content"], report["content"]);
}

#[tokio::test]
async fn closing_the_session_drops_its_latest_report() {
    let app = app().await;
    let response = app.clone().oneshot(generate_request(&week())).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let logout = Request::post("/logout").body(Body::empty()).unwrap();
    let response = app.clone().oneshot(logout).await.unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = app.clone().oneshot(get_request("/api/reports/latest")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let response = app.oneshot(get_request("/api/reports/latest/csv")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn translated_reports_use_the_requested_language() {
    let app = app().await;
    let mut request = week();
    request["language"] = json!("Vietnamese");

    let response = app.oneshot(generate_request(&request)).await.expect("response");
    assert_eq!(response.status(), StatusCode::OK);

    let report = body_json(response).await;
    assert_eq!(report["language"], "Vietnamese");
    assert_eq!(report["content"], "Bản tin thị trường");
    assert_eq!(report["truncated"], false);
}

#[tokio::test]
async fn downloads_exports_as_attachments() {
    let app = app().await;
    let response = app.clone().oneshot(generate_request(&week())).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app.clone().oneshot(get_request("/api/reports/latest/csv")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let headers = response.headers().clone();
    assert_eq!(headers[header::CONTENT_TYPE], "text/csv; charset=utf-8");
    assert_eq!(
        headers[header::CONTENT_DISPOSITION],
        "attachment; filename=\"market_intelligence_20261012_analytics.csv\""
    );
    assert_eq!(headers[header::CACHE_CONTROL], "no-store");
    let csv = String::from_utf8(body_bytes(response).await).unwrap();
    assert!(csv.contains("Articles Analyzed,2"), "{csv}");

    let response = app.clone().oneshot(get_request("/api/reports/latest/json")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let data: Value = serde_json::from_slice(&body_bytes(response).await).unwrap();
    assert_eq!(data["report_metadata"]["configuration"]["articles_analyzed"], 2);

    let response = app.oneshot(get_request("/api/reports/latest/pdf")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn disabled_email_export_is_not_served() {
    let app = app().await;
    let mut request = week();
    request["features"] = json!({ "email_format": false });

    let response = app.clone().oneshot(generate_request(&request)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let report = body_json(response).await;
    assert_eq!(report["exports"], json!(["report", "executive", "json", "csv"]));
    assert_eq!(report["features"]["include_sectors"], true);

    let response = app.oneshot(get_request("/api/reports/latest/email")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["error"], "not_found");
}

#[tokio::test]
async fn rejects_bad_requests() {
    let app = app().await;

    let inverted = json!({ "startDate": "2026-10-12", "endDate": "2026-10-05" });
    let response = app.clone().oneshot(generate_request(&inverted)).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let mut hot = week();
    hot["temperature"] = json!(1.5);
    let response = app.clone().oneshot(generate_request(&hot)).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body_json(response).await["error"], "validation_failed");

    let unknown = json!({ "startDate": "2026-10-05", "tone": "cheerful" });
    let response = app.oneshot(generate_request(&unknown)).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}
