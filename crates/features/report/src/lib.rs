//! Report slice.
//!
//! Combines the market snapshot and ranked news into prompts, drafts the
//! report with a chat model, optionally translates it and renders the exports.

mod error;
mod export;
mod language;
#[cfg(feature = "server")]
mod middleware;
mod model;
mod openai;
mod pipeline;
pub mod prompts;
mod report;
mod request;
#[cfg(feature = "server")]
mod routes;
#[cfg(feature = "server")]
mod slice;

pub use error::{ReportError, ReportErrorExt};
pub use export::{Export, ExportFormat};
pub use language::Language;
#[cfg(feature = "server")]
pub use middleware::forget_closed_sessions;
pub use model::{ChatMessage, ChatModel, ChatRequest, Role};
pub use openai::OpenAiClient;
pub use pipeline::{Phase, PipelineSettings, ReportPipeline};
pub use report::{MarketReport, Preview};
pub use request::{
    ARTICLES_LIMIT, ARTICLES_LIMIT_STEP, ReportPlan, ReportRequest, STORIES_PER_THEME, TEMPERATURE,
    TEMPERATURE_STEP,
};
#[cfg(feature = "server")]
pub use routes::{NumericOption, ReportOptions, ReportView, routes};
#[cfg(feature = "server")]
pub use slice::{ReportSlice, ReportSliceInner, init};

use recap_domain::config::ApiConfig;
use recap_domain::constants::{BENZINGA_API_KEY, OPENAI_API_KEY};
use recap_kernel::config::Secrets;
use recap_market::YahooClient;
use recap_news::BenzingaClient;

/// The pipeline wired to the real providers.
pub type LivePipeline = ReportPipeline<YahooClient, BenzingaClient, OpenAiClient>;

/// Builds the provider clients from configuration and credentials.
///
/// # Errors
/// [`ReportError::Secrets`] when an API key is missing or a placeholder, or a
/// client error for an unusable base URL.
pub fn live_pipeline(config: &ApiConfig, secrets: &Secrets) -> Result<LivePipeline, ReportError> {
    let providers = &config.providers;

    let quotes = YahooClient::new(&providers.market)?;
    let news = BenzingaClient::new(&providers.benzinga, secrets.require(BENZINGA_API_KEY)?)?;
    let model = OpenAiClient::new(&providers.openai, secrets.require(OPENAI_API_KEY)?)?;

    Ok(ReportPipeline::new(quotes, news, model, PipelineSettings::from(providers)))
}
