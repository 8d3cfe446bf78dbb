use recap_kernel::config::ConfigError;
use recap_kernel::period::PeriodError;
use recap_market::MarketError;
use recap_news::NewsError;
use std::borrow::Cow;

#[recap_derive::recap_error]
pub enum ReportError {
    /// The market client could not be built from configuration.
    #[error("Market data unavailable{}: {source}", format_context(.context))]
    Market { source: MarketError, context: Option<Cow<'static, str>> },

    #[error("News unavailable{}: {source}", format_context(.context))]
    News { source: NewsError, context: Option<Cow<'static, str>> },

    #[error("Language model request failed{}: {source}", format_context(.context))]
    Http { source: reqwest::Error, context: Option<Cow<'static, str>> },

    #[error("Language model error{}: {message}", format_context(.context))]
    Model { message: String, context: Option<Cow<'static, str>> },

    #[error(
        "No articles found for {period}. Consider expanding the date range{}",
        format_context(.context)
    )]
    NoArticles { period: String, context: Option<Cow<'static, str>> },

    #[error("Invalid report request{}: {message}", format_context(.context))]
    Validation { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Invalid report period{}: {source}", format_context(.context))]
    Period { source: PeriodError, context: Option<Cow<'static, str>> },

    #[error("Missing credentials{}: {source}", format_context(.context))]
    Secrets { source: ConfigError, context: Option<Cow<'static, str>> },

    #[error("Export serialization failed{}: {source}", format_context(.context))]
    Json { source: serde_json::Error, context: Option<Cow<'static, str>> },

    #[error("Internal report error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

#[cfg(feature = "server")]
impl From<ReportError> for recap_kernel::server::ApiError {
    fn from(err: ReportError) -> Self {
        match err {
            ReportError::Period { source, .. } => source.into(),
            ReportError::Validation { .. } => Self::unprocessable(err.to_string()),
            ReportError::NoArticles { .. } => Self::not_found(err.to_string()),
            ReportError::News { .. } | ReportError::Http { .. } | ReportError::Model { .. } => {
                Self::bad_gateway(err.to_string())
            },
            ReportError::Market { .. }
            | ReportError::Secrets { .. }
            | ReportError::Json { .. }
            | ReportError::Internal { .. } => Self::internal(err.to_string()),
        }
    }
}
