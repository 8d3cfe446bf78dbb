//! Well-known names shared between the server, the CLI and the feature crates.

/// Product name used in exports and the OpenAPI document.
pub const PLATFORM_NAME: &str = "Market Intelligence Platform";
/// Version stamped into JSON exports.
pub const PLATFORM_VERSION: &str = "2.0";

pub const BENZINGA_API_KEY: &str = "BENZINGA_API_KEY";
pub const OPENAI_API_KEY: &str = "OPENAI_API_KEY";
pub const APP_PASSWORD: &str = "APP_PASSWORD";

/// Keys that must be present and non-placeholder before the service starts.
pub const REQUIRED_SECRETS: [&str; 2] = [BENZINGA_API_KEY, OPENAI_API_KEY];

/// Access code used when `APP_PASSWORD` is not configured anywhere.
pub const DEFAULT_APP_PASSWORD: &str = "weekly_report";

/// Cookie carrying the session token for browser clients.
pub const SESSION_COOKIE: &str = "recap_session";

/// Environment prefix for configuration overrides (`RECAP__SERVER__PORT`).
pub const ENV_PREFIX: &str = "RECAP";

/// OpenAPI tags.
pub const SYSTEM_TAG: &str = "System";
pub const AUTH_TAG: &str = "Access";
pub const REPORTS_TAG: &str = "Reports";
