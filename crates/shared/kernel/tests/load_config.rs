use recap_domain::config::ApiConfig;
use recap_kernel::config::{ConfigError, load_config, load_config_with_env, load_secrets};
use std::fs;
use tempfile::tempdir;

#[test]
fn loads_toml_file_over_defaults() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let path = dir.path().join("server.toml");
    fs::write(
        &path,
        r#"
[server]
port = 9100

[providers.market]
concurrency = 4

[report]
articles_limit = 150
"#,
    )?;

    let cfg: ApiConfig = load_config(Some(&path))?;
    assert_eq!(cfg.server.port, 9100);
    assert_eq!(cfg.providers.market.concurrency, 4);
    assert_eq!(cfg.report.articles_limit, 150);
    assert_eq!(cfg.report.stories_per_theme, 3);
    Ok(())
}

#[test]
fn prefixed_variables_override_numeric_keys() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let path = dir.path().join("server.toml");
    fs::write(&path, "[server]\nport = 9100\n")?;

    let vars = [
        ("RECAP__SERVER__PORT", "8080"),
        ("RECAP__PROVIDERS__OPENAI__REPORT_MAX_TOKENS", "1234"),
        ("RECAP__SECURITY__SESSION__TTL_SECONDS", "77"),
        ("RECAP__PROVIDERS__OPENAI__MODEL", "gpt-4o"),
        ("UNRELATED__SERVER__PORT", "1"),
    ]
    .into_iter()
    .map(|(key, value)| (key.to_owned(), value.to_owned()))
    .collect();

    let cfg: ApiConfig = load_config_with_env(Some(&path), Some(vars))?;
    assert_eq!(cfg.server.port, 8080);
    assert_eq!(cfg.providers.openai.report_max_tokens, 1234);
    assert_eq!(cfg.security.session.ttl_seconds, 77);
    assert_eq!(cfg.providers.openai.model, "gpt-4o");
    Ok(())
}

#[test]
fn missing_config_file_is_an_error() {
    let dir = tempdir().expect("tempdir");
    let result = load_config::<ApiConfig>(Some(dir.path().join("absent.toml")));
    assert!(matches!(result, Err(ConfigError::Config { .. })));
}

#[test]
fn missing_secrets_file_is_tolerated() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let secrets = load_secrets(Some(&dir.path().join("secrets.toml")))?;
    assert!(!secrets.app_password.expose().is_empty());
    Ok(())
}
