use recap_domain::config::{ApiConfig, OpenAiConfig, ReportDefaults, ServerConfig};
use recap_domain::features::{FeatureToggles, ReportFeatures};
use serde_json::json;

#[test]
fn config_defaults_match_service_defaults() {
    let server = ServerConfig::default();
    assert_eq!(server.port, 4583);
    assert!(server.ssl.is_none());

    let openai = OpenAiConfig::default();
    assert_eq!(openai.model, "gpt-4o");
    assert_eq!(openai.report_max_tokens, 2500);
    assert_eq!(openai.translation_max_tokens, 3000);

    let report = ReportDefaults::default();
    assert_eq!(report.articles_limit, 200);
    assert_eq!(report.stories_per_theme, 3);

    let cfg = ApiConfig::default();
    assert_eq!(cfg.security.session.ttl_seconds, 28_800);
    assert_eq!(cfg.providers.market.concurrency, 8);
}

#[test]
fn partial_config_keeps_other_defaults() {
    let raw = json!({
        "server": { "port": 8080 },
        "providers": { "openai": { "model": "gpt-4o-mini" } },
        "logging": { "level": "debug", "path": "/tmp/recap-logs" }
    });

    let cfg: ApiConfig = serde_json::from_value(raw).expect("config deserialize");
    assert_eq!(cfg.server.port, 8080);
    assert_eq!(cfg.providers.openai.model, "gpt-4o-mini");
    assert_eq!(cfg.providers.openai.timeout_seconds, 120);
    assert_eq!(cfg.providers.benzinga.base_url, "https://api.benzinga.com/api");
    assert_eq!(cfg.logging.level, "debug");
    assert_eq!(cfg.logging.rotation, "daily");
}

#[test]
fn config_clone_is_copy_on_write() {
    let original = ApiConfig::default();
    let mut changed = original.clone();
    changed.server.port = 9000;

    assert_eq!(original.server.port, 4583);
    assert_eq!(changed.server.port, 9000);
}

#[test]
fn report_features_default_to_everything() {
    assert_eq!(ReportFeatures::default(), ReportFeatures::all());
    let toggles = FeatureToggles::default();
    assert!(toggles.include_sectors && toggles.include_compliance);
    assert!(toggles.include_sources && toggles.email_format);
}

#[test]
fn report_features_use_boolean_shape() {
    let features = ReportFeatures::SECTORS | ReportFeatures::EMAIL;
    let value = serde_json::to_value(features).expect("serialize");
    assert_eq!(
        value,
        json!({
            "include_sectors": true,
            "include_compliance": false,
            "include_sources": false,
            "email_format": true
        })
    );

    let back: ReportFeatures = serde_json::from_value(json!({ "include_sources": false }))
        .expect("missing toggles default to on");
    assert_eq!(back, ReportFeatures::all() - ReportFeatures::SOURCES);
}
