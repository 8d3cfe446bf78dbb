use serde::Deserialize;
use std::net::{IpAddr, Ipv4Addr};
use std::ops::{Deref, DerefMut};
use std::path::PathBuf;
use std::sync::Arc;

/// Every configuration section of the service. Missing sections fall back to defaults.
#[derive(Default, Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApiConfigInner {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub runtime: RuntimeSettings,
    pub security: SecurityConfig,
    pub providers: ProvidersConfig,
    pub report: ReportDefaults,
}

/// Arc-wrapped configuration, cheap to clone into handlers and slices.
#[derive(Default, Debug, Clone, Deserialize)]
#[serde(from = "ApiConfigInner")]
pub struct ApiConfig {
    inner: Arc<ApiConfigInner>,
}

impl From<ApiConfigInner> for ApiConfig {
    fn from(inner: ApiConfigInner) -> Self {
        Self { inner: Arc::new(inner) }
    }
}

impl Deref for ApiConfig {
    type Target = ApiConfigInner;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl DerefMut for ApiConfig {
    fn deref_mut(&mut self) -> &mut ApiConfigInner {
        Arc::make_mut(&mut self.inner)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub address: IpAddr,
    pub port: u16,
    pub ssl: Option<SslConfig>,
}

/// TLS certificate and key in PEM format.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SslConfig {
    pub cert: PathBuf,
    pub key: PathBuf,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default level when `RUST_LOG` is unset.
    pub level: String,
    /// Extra filter directives, e.g. `recap_news=debug`.
    pub filter: Option<String>,
    /// Directory for rolling log files; console only when absent.
    pub path: Option<PathBuf>,
    pub rotation: String,
    pub max_files: usize,
    pub json: bool,
}

#[derive(Default, Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RuntimeSettings {
    pub worker_threads: Option<usize>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SecurityConfig {
    pub session: SessionConfig,
    /// Optional TOML file holding API keys when they are not in the environment.
    pub secrets_file: PathBuf,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub ttl_seconds: u64,
    pub capacity: u64,
}

/// Upstream services feeding the report.
#[derive(Default, Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ProvidersConfig {
    pub benzinga: BenzingaConfig,
    pub openai: OpenAiConfig,
    pub market: MarketConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BenzingaConfig {
    pub base_url: String,
    pub timeout_seconds: u64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OpenAiConfig {
    pub base_url: String,
    pub model: String,
    pub report_max_tokens: u32,
    pub translation_max_tokens: u32,
    pub translation_temperature: f32,
    pub timeout_seconds: u64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MarketConfig {
    pub base_url: String,
    pub timeout_seconds: u64,
    /// Maximum number of symbols fetched at once.
    pub concurrency: usize,
}

/// Defaults applied when a report request leaves a knob unset.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ReportDefaults {
    pub articles_limit: u32,
    pub stories_per_theme: u8,
    pub temperature: f32,
}

// --- Default ---

impl Default for ServerConfig {
    fn default() -> Self {
        Self { address: IpAddr::V4(Ipv4Addr::UNSPECIFIED), port: 4583, ssl: None }
    }
}

impl Default for SslConfig {
    fn default() -> Self {
        Self { cert: PathBuf::from("cert.pem"), key: PathBuf::from("key.pem") }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_owned(),
            filter: None,
            path: None,
            rotation: "daily".to_owned(),
            max_files: 10,
            json: false,
        }
    }
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self { session: SessionConfig::default(), secrets_file: PathBuf::from("secrets.toml") }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self { ttl_seconds: 8 * 60 * 60, capacity: 10_000 }
    }
}

impl Default for BenzingaConfig {
    fn default() -> Self {
        Self { base_url: "https://api.benzinga.com/api".to_owned(), timeout_seconds: 30 }
    }
}

impl Default for OpenAiConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.openai.com/v1".to_owned(),
            model: "gpt-4o".to_owned(),
            report_max_tokens: 2500,
            translation_max_tokens: 3000,
            translation_temperature: 0.3,
            timeout_seconds: 120,
        }
    }
}

impl Default for MarketConfig {
    fn default() -> Self {
        Self {
            base_url: "https://query1.finance.yahoo.com".to_owned(),
            timeout_seconds: 30,
            concurrency: 8,
        }
    }
}

impl Default for ReportDefaults {
    fn default() -> Self {
        Self { articles_limit: 200, stories_per_theme: 3, temperature: 0.7 }
    }
}
