use super::{ConfigError, ConfigErrorExt};
use config::{Config, File};
use recap_domain::constants::{APP_PASSWORD, BENZINGA_API_KEY, DEFAULT_APP_PASSWORD, OPENAI_API_KEY};
use std::fmt;
use std::path::Path;
use tracing::{debug, warn};

/// Where a secret value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SecretSource {
    Environment,
    File,
    Default,
}

impl fmt::Display for SecretSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Environment => "environment",
            Self::File => "secrets file",
            Self::Default => "built-in default",
        })
    }
}

/// A secret value. `Debug` never prints the value.
#[derive(Clone, PartialEq, Eq)]
pub struct Secret {
    value: String,
    source: SecretSource,
}

impl Secret {
    #[must_use]
    pub fn new(value: impl Into<String>, source: SecretSource) -> Self {
        Self { value: value.into(), source }
    }

    #[must_use]
    pub fn expose(&self) -> &str {
        &self.value
    }

    #[must_use]
    pub const fn source(&self) -> SecretSource {
        self.source
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Secret")
            .field("value", &"<redacted>")
            .field("source", &self.source)
            .finish()
    }
}

/// Credentials the service needs at runtime.
#[derive(Debug, Clone)]
pub struct Secrets {
    pub benzinga_api_key: Option<Secret>,
    pub openai_api_key: Option<Secret>,
    pub app_password: Secret,
}

/// Result of inspecting one key, as printed by deployment checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SecretState {
    Present(SecretSource),
    Missing,
    Placeholder,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SecretStatus {
    pub key: &'static str,
    pub required: bool,
    pub state: SecretState,
}

impl SecretStatus {
    /// A required key that is missing or still a placeholder.
    #[must_use]
    pub fn is_blocking(&self) -> bool {
        self.required && !matches!(self.state, SecretState::Present(_))
    }
}

impl Secrets {
    /// Status of every known key, required ones first.
    #[must_use]
    pub fn statuses(&self) -> Vec<SecretStatus> {
        vec![
            required_status(BENZINGA_API_KEY, self.benzinga_api_key.as_ref()),
            required_status(OPENAI_API_KEY, self.openai_api_key.as_ref()),
            SecretStatus {
                key: APP_PASSWORD,
                required: false,
                state: SecretState::Present(self.app_password.source),
            },
        ]
    }

    /// Checks that every required key is set to a real value.
    ///
    /// # Errors
    /// [`ConfigError::Missing`] when at least one key is absent (placeholders are
    /// listed in the context), otherwise [`ConfigError::Placeholder`].
    pub fn validate(&self) -> Result<(), ConfigError> {
        let statuses = self.statuses();
        let keys_in = |state: &SecretState| {
            statuses
                .iter()
                .filter(|status| status.required && &status.state == state)
                .map(|status| status.key)
                .collect::<Vec<_>>()
        };
        let missing = keys_in(&SecretState::Missing);
        let placeholders = keys_in(&SecretState::Placeholder);

        if !missing.is_empty() {
            let context = (!placeholders.is_empty())
                .then(|| format!("placeholders: {}", placeholders.join(", ")).into());
            return Err(ConfigError::Missing { keys: missing.join(", "), context });
        }
        if !placeholders.is_empty() {
            return Err(ConfigError::Placeholder { keys: placeholders.join(", "), context: None });
        }
        Ok(())
    }

    /// Non-fatal findings, such as the access code falling back to its default.
    #[must_use]
    pub fn warnings(&self) -> Vec<String> {
        let mut warnings = Vec::new();
        if self.app_password.source == SecretSource::Default {
            warnings.push(format!(
                "{APP_PASSWORD} is not set; using the default access code. Set it in the environment or the secrets file."
            ));
        }
        warnings
    }

    /// Returns a required key or the error `validate` would report for it.
    ///
    /// # Errors
    /// [`ConfigError::Missing`] or [`ConfigError::Placeholder`].
    pub fn require(&self, key: &'static str) -> Result<&str, ConfigError> {
        let secret = match key {
            BENZINGA_API_KEY => self.benzinga_api_key.as_ref(),
            OPENAI_API_KEY => self.openai_api_key.as_ref(),
            APP_PASSWORD => Some(&self.app_password),
            _ => None,
        };
        match secret {
            None => Err(ConfigError::Missing { keys: key.to_owned(), context: None }),
            Some(secret) if is_placeholder(secret.expose()) => {
                Err(ConfigError::Placeholder { keys: key.to_owned(), context: None })
            },
            Some(secret) => Ok(secret.expose()),
        }
    }
}

fn required_status(key: &'static str, secret: Option<&Secret>) -> SecretStatus {
    let state = match secret {
        None => SecretState::Missing,
        Some(secret) if is_placeholder(secret.expose()) => SecretState::Placeholder,
        Some(secret) => SecretState::Present(secret.source),
    };
    SecretStatus { key, required: true, state }
}

/// Template values such as `your_api_key_here`, `<token>` or `changeme`.
#[must_use]
pub fn is_placeholder(value: &str) -> bool {
    let value = value.trim();
    if value.is_empty() {
        return true;
    }
    let lower = value.to_ascii_lowercase();
    lower.starts_with("your_")
        || lower.starts_with("your-")
        || lower.contains("placeholder")
        || lower.contains("changeme")
        || (lower.starts_with('<') && lower.ends_with('>'))
}

/// Resolves secrets from an environment lookup and a file lookup.
///
/// A non-blank environment value wins over the file. `APP_PASSWORD` falls back
/// to the built-in access code.
pub fn resolve_secrets<E, F>(env: E, file: F) -> Secrets
where
    E: Fn(&str) -> Option<String>,
    F: Fn(&str) -> Option<String>,
{
    let lookup = |key: &str| {
        let non_blank = |value: String| (!value.trim().is_empty()).then_some(value);
        env(key)
            .and_then(non_blank)
            .map(|value| Secret::new(value, SecretSource::Environment))
            .or_else(|| {
                file(key).and_then(non_blank).map(|value| Secret::new(value, SecretSource::File))
            })
    };

    let app_password = lookup(APP_PASSWORD).unwrap_or_else(|| {
        warn!("{APP_PASSWORD} not configured; falling back to the default access code");
        Secret::new(DEFAULT_APP_PASSWORD, SecretSource::Default)
    });

    Secrets {
        benzinga_api_key: lookup(BENZINGA_API_KEY),
        openai_api_key: lookup(OPENAI_API_KEY),
        app_password,
    }
}

/// Loads secrets from the process environment, a local `.env` file and an optional TOML file.
///
/// # Errors
/// Fails only when the secrets file exists but cannot be parsed.
pub fn load_secrets(path: Option<&Path>) -> Result<Secrets, ConfigError> {
    match dotenv::dotenv() {
        Ok(env_file) => debug!(path = %env_file.display(), "Loaded .env file"),
        Err(_) => debug!("No .env file loaded"),
    }

    let file = match path {
        Some(path) => Config::builder()
            .add_source(File::from(path).required(false))
            .build()
            .context(format!("Failed to read secrets file {}", path.display()))?,
        None => Config::default(),
    };

    let from_file = |key: &str| {
        file.get_string(key).or_else(|_| file.get_string(&key.to_ascii_lowercase())).ok()
    };

    Ok(resolve_secrets(|key| std::env::var(key).ok(), from_file))
}
