use axum::extract::{Path, Query};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use chrono::NaiveDate;
use recap_domain::config::MarketConfig;
use recap_kernel::period::ReportPeriod;
use recap_market::{MarketError, QuoteSource, YahooClient};
use serde_json::{Value, json};
use std::collections::HashMap;

async fn chart(
    Path(symbol): Path<String>,
    Query(params): Query<HashMap<String, String>>,
) -> (StatusCode, Json<Value>) {
    if symbol == "MISSING" {
        return (
            StatusCode::NOT_FOUND,
            Json(json!({
                "chart": {
                    "result": null,
                    "error": { "code": "Not Found", "description": "No data found" }
                }
            })),
        );
    }

    // Echo the window back as the first close so the test can check the query.
    let period1: f64 = params.get("period1").and_then(|v| v.parse().ok()).unwrap_or_default();
    let period2: f64 = params.get("period2").and_then(|v| v.parse().ok()).unwrap_or_default();
    let interval_ok = params.get("interval").is_some_and(|v| v == "1d");
    let first = if symbol == "^GSPC" && interval_ok { period1 } else { 0.0 };

    (
        StatusCode::OK,
        Json(json!({
            "chart": {
                "result": [{
                    "meta": { "symbol": symbol },
                    "timestamp": [1, 2, 3, 4],
                    "indicators": { "quote": [{ "close": [first, null, period2, 5.5] }] }
                }],
                "error": null
            }
        })),
    )
}

async fn client() -> YahooClient {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    let app = Router::new().route("/v8/finance/chart/{symbol}", get(chart));
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    let config = MarketConfig { base_url: format!("http://{addr}"), ..MarketConfig::default() };
    YahooClient::new(&config).expect("client")
}

fn period() -> ReportPeriod {
    ReportPeriod::new(
        NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
        NaiveDate::from_ymd_opt(2026, 1, 8).unwrap(),
    )
    .unwrap()
}

#[tokio::test]
async fn fetches_closes_and_drops_nulls() {
    let client = client().await;
    let closes = client.daily_closes("^GSPC", &period()).await.expect("closes");

    assert_eq!(closes, vec![1_767_225_600.0, 1_767_225_600.0 + 8.0 * 86_400.0, 5.5]);
}

#[tokio::test]
async fn provider_errors_are_reported() {
    let client = client().await;
    let err = client.daily_closes("MISSING", &period()).await.unwrap_err();

    match err {
        MarketError::Provider { symbol, message, .. } => {
            assert_eq!(symbol, "MISSING");
            assert!(message.contains("No data found"));
        },
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn rejects_unusable_base_url() {
    let config = MarketConfig { base_url: "not a url".to_owned(), ..MarketConfig::default() };
    assert!(matches!(YahooClient::new(&config), Err(MarketError::Config { .. })));
}
