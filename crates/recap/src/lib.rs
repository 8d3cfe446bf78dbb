//! Facade crate for the market recap features and shared modules.
//! Re-exports domain/kernel primitives and aggregates feature initialization.
//! Keep this crate thin: it should compose other crates, not implement business logic.
//!
//! ## Usage
//! - Add `recap` with the `server` feature for the HTTP service.
//! - Call `recap::init` (server) to register feature slices; extend as new slices appear.

pub use recap_domain as domain;
#[cfg(feature = "server")]
use recap_domain::config::ApiConfig;
pub use recap_kernel as kernel;
#[cfg(feature = "server")]
use recap_kernel::config::Secrets;

#[cfg(feature = "server")]
pub mod server {
    pub mod router {
        pub use recap_kernel::server::router::system_router;
    }

    pub mod middleware {
        pub use recap_access::require_session;
    }
}

/// Feature registry for runtime introspection.
pub mod features {
    #[cfg(feature = "server")]
    pub use recap_access as access;
    pub use recap_market as market;
    pub use recap_news as news;
    pub use recap_report as report;

    /// Build-time enabled features (by Cargo feature).
    pub const ENABLED: &[&str] = &[
        "market",
        "news",
        "report",
        #[cfg(feature = "server")]
        "server",
        #[cfg(feature = "server")]
        "access",
    ];

    #[must_use]
    pub fn is_enabled(name: &str) -> bool {
        ENABLED.contains(&name)
    }
}

/// Initialize all enabled features for server mode.
///
/// # Errors
/// Returns an error if any feature initialization fails.
#[cfg(feature = "server")]
pub fn init(
    config: &ApiConfig,
    secrets: &Secrets,
) -> Result<Vec<domain::registry::InitializedSlice>, Box<dyn std::error::Error>> {
    let mut slices = Vec::new();

    // Access code and sessions
    slices.push(features::access::init(config, secrets)?);

    // Report generation
    slices.push(features::report::init(config, secrets)?);

    Ok(slices)
}

#[cfg(test)]
mod tests {
    use super::features;

    #[test]
    fn core_features_are_always_enabled() {
        for name in ["market", "news", "report"] {
            assert!(features::is_enabled(name), "{name}");
        }
        assert!(!features::is_enabled("telemetry"));
        assert_eq!(features::is_enabled("access"), cfg!(feature = "server"));
    }
}
