use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString};

/// Output language of a report. Everything except English is produced by a
/// translation pass over the English draft.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Display,
    EnumIter,
    EnumString,
    Serialize,
    Deserialize,
)]
#[cfg_attr(feature = "server", derive(utoipa::ToSchema))]
pub enum Language {
    #[default]
    English,
    Thai,
    #[serde(rename = "Simplified Chinese")]
    #[strum(serialize = "Simplified Chinese")]
    SimplifiedChinese,
    #[serde(rename = "Traditional Chinese")]
    #[strum(serialize = "Traditional Chinese")]
    TraditionalChinese,
    Vietnamese,
}

impl Language {
    #[must_use]
    pub const fn is_english(self) -> bool {
        matches!(self, Self::English)
    }
}
