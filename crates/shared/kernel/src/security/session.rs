use crate::safe_nanoid;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

const SESSION_ID_LEN: usize = 32;

/// Opaque bearer token identifying a logged-in client.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(Arc<str>);

impl SessionId {
    #[must_use]
    pub fn generate() -> Self {
        Self(Arc::from(safe_nanoid!(SESSION_ID_LEN)))
    }

    /// Accepts a client-supplied token if it has the shape of a generated one.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        let well_formed = raw.chars().count() == SESSION_ID_LEN
            && raw.chars().all(|ch| crate::SAFE_ALPHABET.contains(&ch));
        well_formed.then(|| Self(Arc::from(raw)))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Only a prefix; the full token is a credential.
        let prefix: String = self.0.chars().take(6).collect();
        write!(f, "SessionId({prefix}…)")
    }
}

/// Response extension set when a session is closed, so slices holding
/// per-session state can drop it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClosedSession(pub SessionId);
