use bitflags::bitflags;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

bitflags! {
    /// Optional sections of a generated report.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct ReportFeatures: u8 {
        /// Sector ETF performance in the market digest.
        const SECTORS = 1 << 0;
        /// Disclaimer and compliance blocks in the text export.
        const COMPLIANCE = 1 << 1;
        /// Source attribution and links in the news digest.
        const SOURCES = 1 << 2;
        /// The email-ready export.
        const EMAIL = 1 << 3;
    }
}

impl Default for ReportFeatures {
    fn default() -> Self {
        Self::all()
    }
}

/// Boolean view of [`ReportFeatures`], the shape used on the wire and in exports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeatureToggles {
    pub include_sectors: bool,
    pub include_compliance: bool,
    pub include_sources: bool,
    pub email_format: bool,
}

impl Default for FeatureToggles {
    fn default() -> Self {
        ReportFeatures::default().into()
    }
}

impl From<FeatureToggles> for ReportFeatures {
    fn from(toggles: FeatureToggles) -> Self {
        let mut features = Self::empty();
        features.set(Self::SECTORS, toggles.include_sectors);
        features.set(Self::COMPLIANCE, toggles.include_compliance);
        features.set(Self::SOURCES, toggles.include_sources);
        features.set(Self::EMAIL, toggles.email_format);
        features
    }
}

impl From<ReportFeatures> for FeatureToggles {
    fn from(features: ReportFeatures) -> Self {
        Self {
            include_sectors: features.contains(ReportFeatures::SECTORS),
            include_compliance: features.contains(ReportFeatures::COMPLIANCE),
            include_sources: features.contains(ReportFeatures::SOURCES),
            email_format: features.contains(ReportFeatures::EMAIL),
        }
    }
}

impl Serialize for ReportFeatures {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        FeatureToggles::from(*self).serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for ReportFeatures {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        FeatureToggles::deserialize(deserializer).map(Self::from)
    }
}
