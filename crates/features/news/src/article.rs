use serde::{Deserialize, Serialize};

/// A named reference attached to an article (ticker or channel).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tag {
    pub name: String,
}

/// A Benzinga news item. Every field is optional on the wire.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Article {
    pub id: Option<u64>,
    pub title: Option<String>,
    pub teaser: Option<String>,
    /// Publication time as sent by the provider, usually RFC 2822.
    pub created: Option<String>,
    pub url: Option<String>,
    pub author: Option<String>,
    pub stocks: Vec<Tag>,
    pub channels: Vec<Tag>,
}

impl Article {
    /// Lowercased `"{title} {teaser}"`, the text keyword matching runs on.
    #[must_use]
    pub fn search_text(&self) -> String {
        format!(
            "{} {}",
            self.title.as_deref().unwrap_or_default(),
            self.teaser.as_deref().unwrap_or_default()
        )
        .to_lowercase()
    }
}
