use crate::language::Language;
use chrono::{DateTime, Utc};
use recap_domain::features::ReportFeatures;
use recap_kernel::period::ReportPeriod;
use recap_market::MarketSnapshot;
use serde::Serialize;

const PREVIEW_CHARS: usize = 1000;

/// A finished report with everything the exports need.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarketReport {
    pub period: ReportPeriod,
    pub language: Language,
    pub content: String,
    pub articles_count: usize,
    /// Themes that received at least one article.
    pub themes_count: usize,
    pub market: MarketSnapshot,
    pub features: ReportFeatures,
    pub generated_at: DateTime<Utc>,
}

/// Leading part of a report for quick display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Preview {
    pub text: String,
    pub truncated: bool,
}

impl MarketReport {
    /// The first 1000 characters of the content.
    #[must_use]
    pub fn preview(&self) -> Preview {
        let mut chars = self.content.chars();
        let text: String = chars.by_ref().take(PREVIEW_CHARS).collect();
        Preview { text, truncated: chars.next().is_some() }
    }

    #[must_use]
    pub fn days(&self) -> i64 {
        self.period.days()
    }
}
