mod secrets;

pub use secrets::{
    Secret, SecretSource, SecretState, SecretStatus, Secrets, is_placeholder, load_secrets,
    resolve_secrets,
};

use config::{Config, Environment, File, Map};
use recap_domain::constants::ENV_PREFIX;
use serde::de::DeserializeOwned;
use std::borrow::Cow;
use std::path::{Path, PathBuf};
use tracing::info;

#[recap_derive::recap_error]
pub enum ConfigError {
    #[error("Config error{}: {source}", format_context(.context))]
    Config { source: config::ConfigError, context: Option<Cow<'static, str>> },

    #[error("Missing required configuration{}: {keys}", format_context(.context))]
    Missing { keys: String, context: Option<Cow<'static, str>> },

    #[error("Placeholder values must be replaced{}: {keys}", format_context(.context))]
    Placeholder { keys: String, context: Option<Cow<'static, str>> },
}

/// Loads a configuration structure from a file with environment overrides.
///
/// 1. The base file (`server.toml` when `path` is `None`) must exist.
/// 2. `RECAP__`-prefixed variables override it; `__` separates nesting levels,
///    so `RECAP__PROVIDERS__OPENAI__MODEL` maps to `providers.openai.model`.
///
/// # Errors
/// Fails when the file is missing or the merged values do not fit `T`.
///
/// ```rust
/// use recap_kernel::config::load_config;
///
/// #[derive(Default, serde::Deserialize)]
/// struct AppConfig {
///     port: u16,
/// }
///
/// let cfg: AppConfig = load_config(Some("config/local")).unwrap_or_default();
/// ```
pub fn load_config<T>(path: Option<impl AsRef<Path>>) -> Result<T, ConfigError>
where
    T: DeserializeOwned,
{
    load_config_with_env(path, None)
}

/// Same as [`load_config`], but reads the overrides from `vars` instead of the
/// process environment when given. Keys keep their `RECAP__` prefix.
///
/// # Errors
/// Fails when the file is missing or the merged values do not fit `T`.
pub fn load_config_with_env<T>(
    path: Option<impl AsRef<Path>>,
    vars: Option<Map<String, String>>,
) -> Result<T, ConfigError>
where
    T: DeserializeOwned,
{
    let path = path.map_or_else(|| PathBuf::from("server"), |p| p.as_ref().to_path_buf());
    info!(path = %path.display(), "Loading configuration");

    let config = Config::builder()
        .add_source(File::from(path.as_path()).required(true))
        .add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("__")
                .separator("__")
                .convert_case(config::Case::Snake)
                .try_parsing(true)
                .source(vars),
        )
        .build()
        .context("Failed to build config")?
        .try_deserialize::<T>()
        .context("Failed to deserialize config")?;

    Ok(config)
}
