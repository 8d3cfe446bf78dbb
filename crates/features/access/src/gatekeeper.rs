use crate::error::AccessError;
use chrono::{DateTime, Utc};
use moka::future::Cache;
use recap_domain::config::SessionConfig;
use recap_kernel::security::{AccessCode, SessionId};
use std::time::Duration;
use tracing::{debug, info, warn};

/// A logged-in client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub id: SessionId,
    pub issued_at: DateTime<Utc>,
}

/// Checks the shared access code and tracks the sessions it granted.
///
/// Sessions live in memory only and expire `ttl` after login.
#[derive(Debug, Clone)]
pub struct Gatekeeper {
    code: AccessCode,
    ttl: Duration,
    sessions: Cache<SessionId, Session>,
}

impl Gatekeeper {
    #[must_use]
    pub fn new(access_code: &str, config: &SessionConfig) -> Self {
        let ttl = Duration::from_secs(config.ttl_seconds);
        let sessions = Cache::builder().max_capacity(config.capacity).time_to_live(ttl).build();

        Self { code: AccessCode::new(access_code), ttl, sessions }
    }

    #[must_use]
    pub const fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Opens a session when `password` matches the access code.
    ///
    /// # Errors
    /// [`AccessError::InvalidPassword`] on mismatch.
    pub async fn login(&self, password: &str) -> Result<Session, AccessError> {
        if !self.code.verify(password) {
            warn!("Rejected login attempt");
            return Err(AccessError::InvalidPassword { context: None });
        }

        let session = Session { id: SessionId::generate(), issued_at: Utc::now() };
        self.sessions.insert(session.id.clone(), session.clone()).await;
        info!(session = ?session.id, "Session opened");
        Ok(session)
    }

    /// The live session behind `id`, if any.
    pub async fn session(&self, id: &SessionId) -> Option<Session> {
        self.sessions.get(id).await
    }

    /// Ends a session; returns whether it was still live.
    pub async fn logout(&self, id: &SessionId) -> bool {
        let removed = self.sessions.remove(id).await.is_some();
        debug!(session = ?id, removed, "Session closed");
        removed
    }
}
