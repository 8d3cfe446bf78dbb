use crate::error::ReportError;
use crate::language::Language;
use chrono::{Days, NaiveDate};
use recap_derive::api_model;
use recap_domain::config::ReportDefaults;
use recap_domain::features::ReportFeatures;
use recap_kernel::period::ReportPeriod;
use std::ops::RangeInclusive;

pub const ARTICLES_LIMIT: RangeInclusive<u32> = 50..=300;
pub const ARTICLES_LIMIT_STEP: u32 = 25;
pub const STORIES_PER_THEME: RangeInclusive<u8> = 1..=5;
pub const TEMPERATURE: RangeInclusive<f32> = 0.1..=1.0;
pub const TEMPERATURE_STEP: f32 = 0.1;
const DEFAULT_SPAN_DAYS: u64 = 7;

/// What the caller asks for. Unset fields fall back to the configured defaults
/// and to the week ending today.
#[api_model]
#[derive(Clone, Default, PartialEq)]
pub struct ReportRequest {
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub language: Language,
    #[serde(default)]
    #[cfg_attr(feature = "server", schema(value_type = Object))]
    pub features: ReportFeatures,
    /// Articles requested from the news provider, 50 to 300.
    #[serde(default)]
    pub articles_limit: Option<u32>,
    /// Top stories kept per theme, 1 to 5.
    #[serde(default)]
    pub stories_per_theme: Option<u8>,
    /// Sampling temperature of the drafting call, 0.1 to 1.0.
    #[serde(default)]
    pub temperature: Option<f32>,
}

/// A validated request, ready for the pipeline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReportPlan {
    pub period: ReportPeriod,
    pub language: Language,
    pub features: ReportFeatures,
    pub articles_limit: u32,
    pub stories_per_theme: u8,
    pub temperature: f32,
}

impl ReportRequest {
    /// Resolves defaults and checks every bound.
    ///
    /// # Errors
    /// [`ReportError::Period`] for an inverted range, [`ReportError::Validation`]
    /// for values outside their bounds.
    pub fn plan(
        &self,
        defaults: &ReportDefaults,
        today: NaiveDate,
    ) -> Result<ReportPlan, ReportError> {
        let end = self.end_date.unwrap_or(today);
        let start = match self.start_date {
            Some(start) => start,
            None => end
                .checked_sub_days(Days::new(DEFAULT_SPAN_DAYS))
                .ok_or("Cannot step back a week from the end date")?,
        };
        let period = ReportPeriod::new(start, end)?;

        let articles_limit = self.articles_limit.unwrap_or(defaults.articles_limit);
        if !ARTICLES_LIMIT.contains(&articles_limit) {
            return Err(out_of_range("articles_limit", articles_limit, &ARTICLES_LIMIT));
        }
        let stories_per_theme = self.stories_per_theme.unwrap_or(defaults.stories_per_theme);
        if !STORIES_PER_THEME.contains(&stories_per_theme) {
            return Err(out_of_range("stories_per_theme", stories_per_theme, &STORIES_PER_THEME));
        }
        let temperature = self.temperature.unwrap_or(defaults.temperature);
        if !TEMPERATURE.contains(&temperature) {
            return Err(out_of_range("temperature", temperature, &TEMPERATURE));
        }

        Ok(ReportPlan {
            period,
            language: self.language,
            features: self.features,
            articles_limit,
            stories_per_theme,
            temperature,
        })
    }
}

fn out_of_range<T: std::fmt::Display>(
    field: &str,
    value: T,
    range: &RangeInclusive<T>,
) -> ReportError {
    ReportError::Validation {
        message: format!(
            "{field} must be between {} and {}, got {value}",
            range.start(),
            range.end()
        )
        .into(),
        context: None,
    }
}
