use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use axum::extract::Path;
use axum::http::{HeaderMap, StatusCode, header};
use axum::routing::{get, post};
use axum::{Json, Router};
use predicates::prelude::*;
use serde_json::{Value, json};
use std::fs;
use tempfile::TempDir;

const KEYS: [&str; 3] = ["BENZINGA_API_KEY", "OPENAI_API_KEY", "APP_PASSWORD"];

/// A `recap` command running in an empty directory with no keys in its environment.
fn recap(dir: &TempDir) -> Command {
    let mut cmd = cargo_bin_cmd!("recap");
    cmd.current_dir(dir.path());
    for key in KEYS {
        cmd.env_remove(key);
    }
    cmd
}

fn secrets_file(dir: &TempDir, body: &str) -> String {
    let path = dir.path().join("secrets.toml");
    fs::write(&path, body).unwrap();
    path.display().to_string()
}

#[test]
fn help_lists_commands() {
    let dir = TempDir::new().unwrap();
    recap(&dir)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("generate").and(predicate::str::contains("check")));
}

#[test]
fn check_passes_with_a_complete_secrets_file() {
    let dir = TempDir::new().unwrap();
    let file = secrets_file(
        &dir,
        "BENZINGA_API_KEY = \"bz-123\"\nOPENAI_API_KEY = \"sk-456\"\nAPP_PASSWORD = \"s3cret\"\n",
    );

    recap(&dir)
        .args(["check", "--secrets", &file])
        .assert()
        .success()
        .stdout(predicate::str::contains("ok (secrets file)"))
        .stdout(predicate::str::contains("All required keys are configured."))
        .stdout(predicate::str::contains("bz-123").not());
}

#[test]
fn check_prefers_the_environment() {
    let dir = TempDir::new().unwrap();
    let file = secrets_file(&dir, "BENZINGA_API_KEY = \"bz-123\"\n");

    recap(&dir)
        .args(["check", "--secrets", &file])
        .env("OPENAI_API_KEY", "sk-env")
        .assert()
        .success()
        .stdout(predicate::str::contains("ok (environment)"))
        .stdout(predicate::str::contains("warning: APP_PASSWORD is not set"));
}

#[test]
fn check_fails_on_placeholders() {
    let dir = TempDir::new().unwrap();
    let file = secrets_file(
        &dir,
        "BENZINGA_API_KEY = \"bz-123\"\nOPENAI_API_KEY = \"your_openai_key_here\"\n",
    );

    recap(&dir)
        .args(["check", "--secrets", &file])
        .assert()
        .failure()
        .stdout(predicate::str::contains("PLACEHOLDER"))
        .stderr(predicate::str::contains("Deployment check failed"));
}

#[test]
fn check_fails_without_keys() {
    let dir = TempDir::new().unwrap();

    recap(&dir)
        .arg("check")
        .assert()
        .failure()
        .stdout(predicate::str::contains("MISSING"))
        .stderr(predicate::str::contains("OPENAI_API_KEY"));
}

#[test]
fn generate_validates_before_calling_providers() {
    let dir = TempDir::new().unwrap();
    let file = secrets_file(&dir, "BENZINGA_API_KEY = \"bz-123\"\nOPENAI_API_KEY = \"sk-456\"\n");

    recap(&dir)
        .args(["generate", "--secrets", &file, "--temperature", "3"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("temperature must be between"));

    assert!(!dir.path().join("reports").exists());
}

#[test]
fn generate_rejects_unknown_languages() {
    let dir = TempDir::new().unwrap();

    recap(&dir)
        .args(["generate", "--language", "Klingon"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid value 'Klingon'"));
}

async fn chart(Path(symbol): Path<String>) -> Json<Value> {
    Json(json!({
        "chart": {
            "result": [{
                "meta": { "symbol": symbol },
                "timestamp": [1, 2],
                "indicators": { "quote": [{ "close": [100.0, 104.0] }] }
            }],
            "error": null
        }
    }))
}

async fn news() -> Json<Value> {
    Json(json!([
        {
            "id": 7,
            "title": "Oil jumps as supply tightens",
            "teaser": "Brent crude closed higher",
            "created": "Thu, 08 Oct 2026 10:00:00 -0400",
            "url": "https://www.benzinga.com/news/7"
        }
    ]))
}

async fn chat(headers: HeaderMap) -> (StatusCode, Json<Value>) {
    let authorized = headers
        .get(header::AUTHORIZATION)
        .is_some_and(|value| value.as_bytes() == b"Bearer sk-test");
    if !authorized {
        return (StatusCode::UNAUTHORIZED, Json(json!({ "error": { "message": "bad key" } })));
    }
    let content = "Markets rose on energy strength.\n".repeat(20);
    (StatusCode::OK, Json(json!({ "choices": [{ "message": { "content": content } }] })))
}

/// Serves the chart, news and chat endpoints from a background thread and
/// returns their base URL.
fn upstream() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    listener.set_nonblocking(true).unwrap();
    let addr = listener.local_addr().unwrap();

    std::thread::spawn(move || {
        let runtime = tokio::runtime::Builder::new_current_thread().enable_all().build().unwrap();
        runtime.block_on(async move {
            let listener = tokio::net::TcpListener::from_std(listener).unwrap();
            let app = Router::new()
                .route("/v8/finance/chart/{symbol}", get(chart))
                .route("/api/v2/news", get(news))
                .route("/v1/chat/completions", post(chat));
            let _ = axum::serve(listener, app).await;
        });
    });
    format!("http://{addr}")
}

/// Writes a config pointing every provider at `base` plus a secrets file.
fn provider_files(dir: &TempDir, base: &str) -> (String, String) {
    let config = dir.path().join("recap.toml");
    fs::write(
        &config,
        format!(
            "[providers.market]\nbase_url = \"{base}\"\n\n\
             [providers.benzinga]\nbase_url = \"{base}/api\"\n\n\
             [providers.openai]\nbase_url = \"{base}/v1\"\n"
        ),
    )
    .unwrap();
    let secrets =
        secrets_file(dir, "BENZINGA_API_KEY = \"bz-test\"\nOPENAI_API_KEY = \"sk-test\"\n");
    (config.display().to_string(), secrets)
}

fn written_files(dir: &std::path::Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

#[test]
fn generate_writes_every_export() {
    let dir = TempDir::new().unwrap();
    let (config, secrets) = provider_files(&dir, &upstream());

    let output = recap(&dir)
        .args(["generate", "--config", &config, "--secrets", &secrets])
        .args(["--start", "2026-10-05", "--end", "2026-10-12", "--out", "weekly"])
        .assert()
        .success()
        .stderr(predicate::str::contains("100%"));

    let out = dir.path().join("weekly");
    let names = written_files(&out);
    assert_eq!(
        names,
        [
            "market_intelligence_20261012_analytics.csv",
            "market_intelligence_20261012_data.json",
            "market_intelligence_20261012_email.txt",
            "market_intelligence_20261012_executive.txt",
            "market_intelligence_20261012_report.txt",
        ]
    );

    let stdout = String::from_utf8(output.get_output().stdout.clone()).unwrap();
    for name in &names {
        assert!(stdout.contains(name.as_str()), "{name} missing from {stdout}");
    }

    let report = fs::read_to_string(out.join("market_intelligence_20261012_report.txt")).unwrap();
    assert!(report.contains("Markets rose on energy strength."));
}

#[test]
fn generate_without_email_writes_four_exports() {
    let dir = TempDir::new().unwrap();
    let (config, secrets) = provider_files(&dir, &upstream());

    recap(&dir)
        .args(["generate", "--config", &config, "--secrets", &secrets, "--no-email"])
        .args(["--start", "2026-10-05", "--end", "2026-10-12"])
        .assert()
        .success()
        .stdout(predicate::str::contains("_email.txt").not());

    let names = written_files(&dir.path().join("reports"));
    assert_eq!(names.len(), 4);
    assert!(names.iter().all(|name| name.starts_with("market_intelligence_20261012_")));
    assert!(!names.iter().any(|name| name.ends_with("_email.txt")));
}
