use crate::error::ReportError;
use crate::model::{ChatMessage, ChatModel, ChatRequest};
use crate::prompts::{REPORT_SYSTEM_PROMPT, report_user_prompt, translation_system_prompt};
use crate::report::MarketReport;
use crate::request::ReportPlan;
use chrono::Utc;
use recap_domain::config::ProvidersConfig;
use recap_domain::features::ReportFeatures;
use recap_market::{QuoteSource, collect_snapshot, performance_digest};
use recap_news::{NewsSource, categorize, key_stories, news_digest};
use strum_macros::Display;
use tracing::{info, instrument, warn};

/// Generation stages with their progress percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum Phase {
    #[strum(to_string = "Retrieving market performance data")]
    MarketData,
    #[strum(to_string = "Collecting financial news articles")]
    News,
    #[strum(to_string = "Analyzing themes and market patterns")]
    Analysis,
    #[strum(to_string = "Generating intelligence report")]
    Drafting,
    #[strum(to_string = "Localizing content")]
    Translation,
    #[strum(to_string = "Market intelligence report generated")]
    Complete,
}

impl Phase {
    #[must_use]
    pub const fn percent(self) -> u8 {
        match self {
            Self::MarketData => 20,
            Self::News => 40,
            Self::Analysis => 60,
            Self::Drafting => 80,
            Self::Translation => 90,
            Self::Complete => 100,
        }
    }
}

/// Model parameters that do not vary per request.
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineSettings {
    pub model: String,
    pub report_max_tokens: u32,
    pub translation_max_tokens: u32,
    pub translation_temperature: f32,
    pub market_concurrency: usize,
}

impl From<&ProvidersConfig> for PipelineSettings {
    fn from(providers: &ProvidersConfig) -> Self {
        Self {
            model: providers.openai.model.clone(),
            report_max_tokens: providers.openai.report_max_tokens,
            translation_max_tokens: providers.openai.translation_max_tokens,
            translation_temperature: providers.openai.translation_temperature,
            market_concurrency: providers.market.concurrency,
        }
    }
}

impl Default for PipelineSettings {
    fn default() -> Self {
        Self::from(&ProvidersConfig::default())
    }
}

/// Market data, news and a chat model combined into one report run.
#[derive(Debug)]
pub struct ReportPipeline<Q, N, M> {
    quotes: Q,
    news: N,
    model: M,
    settings: PipelineSettings,
}

impl<Q, N, M> ReportPipeline<Q, N, M>
where
    Q: QuoteSource,
    N: NewsSource,
    M: ChatModel,
{
    pub const fn new(quotes: Q, news: N, model: M, settings: PipelineSettings) -> Self {
        Self { quotes, news, model, settings }
    }

    #[must_use]
    pub const fn settings(&self) -> &PipelineSettings {
        &self.settings
    }

    #[must_use]
    pub const fn model(&self) -> &M {
        &self.model
    }

    /// # Errors
    /// See [`ReportPipeline::generate_with`].
    pub async fn generate(&self, plan: &ReportPlan) -> Result<MarketReport, ReportError> {
        self.generate_with(plan, |_| {}).await
    }

    /// Runs every phase, reporting each one to `on_phase` before it starts.
    ///
    /// Instruments without price data are left out. A failed translation keeps
    /// the English draft.
    ///
    /// # Errors
    /// [`ReportError::News`] when the news provider fails,
    /// [`ReportError::NoArticles`] when it returns nothing, and model errors
    /// from the drafting call.
    #[instrument(skip_all, fields(period = %plan.period, language = %plan.language))]
    pub async fn generate_with<F>(
        &self,
        plan: &ReportPlan,
        on_phase: F,
    ) -> Result<MarketReport, ReportError>
    where
        F: Fn(Phase) + Send + Sync,
    {
        let enter = |phase: Phase| {
            info!(progress = phase.percent(), "{phase}");
            on_phase(phase);
        };
        let period = plan.period;

        enter(Phase::MarketData);
        let concurrency = self.settings.market_concurrency;
        let market = collect_snapshot(&self.quotes, &period, concurrency).await;

        enter(Phase::News);
        let articles = self.news.articles(&period, plan.articles_limit).await?;
        if articles.is_empty() {
            return Err(ReportError::NoArticles { period: period.label(), context: None });
        }
        let articles_count = articles.len();

        enter(Phase::Analysis);
        let themes = categorize(articles);
        let themes_count = themes.active_count();
        let stories = key_stories(&themes, usize::from(plan.stories_per_theme), Utc::now());
        info!(articles = articles_count, themes = themes_count, "News categorized");

        enter(Phase::Drafting);
        let performance =
            performance_digest(&market, &period, plan.features.contains(ReportFeatures::SECTORS));
        let news = news_digest(&stories, plan.features.contains(ReportFeatures::SOURCES));
        let draft = self
            .model
            .complete(ChatRequest {
                model: self.settings.model.clone(),
                messages: vec![
                    ChatMessage::system(REPORT_SYSTEM_PROMPT),
                    ChatMessage::user(report_user_prompt(&period.label(), &performance, &news)),
                ],
                max_tokens: self.settings.report_max_tokens,
                temperature: plan.temperature,
            })
            .await?;

        let content = if plan.language.is_english() {
            draft
        } else {
            enter(Phase::Translation);
            self.translate(draft, plan).await
        };

        enter(Phase::Complete);
        Ok(MarketReport {
            period,
            language: plan.language,
            content,
            articles_count,
            themes_count,
            market,
            features: plan.features,
            generated_at: Utc::now(),
        })
    }

    async fn translate(&self, draft: String, plan: &ReportPlan) -> String {
        let request = ChatRequest {
            model: self.settings.model.clone(),
            messages: vec![
                ChatMessage::system(translation_system_prompt(plan.language)),
                ChatMessage::user(draft.clone()),
            ],
            max_tokens: self.settings.translation_max_tokens,
            temperature: self.settings.translation_temperature,
        };

        match self.model.complete(request).await {
            Ok(translated) => translated,
            Err(err) => {
                warn!(
                    language = %plan.language,
                    error = %err,
                    "Translation failed; keeping the English report"
                );
                draft
            },
        }
    }
}
