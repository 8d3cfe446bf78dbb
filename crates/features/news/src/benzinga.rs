//! Benzinga news API client.

use crate::article::Article;
use crate::error::{NewsError, NewsErrorExt};
use crate::source::NewsSource;
use recap_domain::config::BenzingaConfig;
use recap_kernel::period::ReportPeriod;
use reqwest::header::ACCEPT;
use reqwest::{Client, Url};
use serde_json::Value;
use std::fmt;
use std::time::Duration;
use tracing::{debug, trace, warn};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// HTTP client for `GET /v2/news`.
#[derive(Clone)]
pub struct BenzingaClient {
    http: Client,
    base_url: Url,
    token: String,
}

impl fmt::Debug for BenzingaClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BenzingaClient")
            .field("base_url", &self.base_url.as_str())
            .finish_non_exhaustive()
    }
}

impl BenzingaClient {
    /// # Errors
    /// [`NewsError::Config`] for an unusable base URL, [`NewsError::Http`]
    /// when the HTTP client cannot be built.
    pub fn new(config: &BenzingaConfig, token: impl Into<String>) -> Result<Self, NewsError> {
        let base_url = Url::parse(&config.base_url)
            .ok()
            .filter(|url| !url.cannot_be_a_base())
            .ok_or_else(|| NewsError::Config {
                message: format!("invalid base url '{}'", config.base_url).into(),
                context: None,
            })?;

        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .context("Building news client")?;

        Ok(Self { http, base_url, token: token.into() })
    }

    fn news_url(&self) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().extend(["v2", "news"]);
        }
        url
    }
}

impl NewsSource for BenzingaClient {
    async fn articles(
        &self,
        period: &ReportPeriod,
        limit: u32,
    ) -> Result<Vec<Article>, NewsError> {
        let url = self.news_url();
        trace!(%url, %period, limit, "Requesting news");

        let response = self
            .http
            .get(url)
            .header(ACCEPT, "application/json")
            .query(&[
                ("pageSize", limit.to_string()),
                ("displayOutput", "full".to_owned()),
                ("dateFrom", period.start().format(DATE_FORMAT).to_string()),
                ("dateTo", period.end().format(DATE_FORMAT).to_string()),
                ("token", self.token.clone()),
            ])
            .send()
            .await
            .context("Fetching news")?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(NewsError::Provider {
                status: status.as_u16(),
                message: message.chars().take(200).collect(),
                context: None,
            });
        }

        let body: Value = response.json().await.context("Decoding news")?;
        let Value::Array(items) = body else {
            warn!("News provider returned a non-list body; treating it as empty");
            return Ok(Vec::new());
        };

        let mut articles: Vec<Article> = items
            .into_iter()
            .filter_map(|item| match serde_json::from_value(item) {
                Ok(article) => Some(article),
                Err(e) => {
                    debug!(error = %e, "Skipping malformed article");
                    None
                },
            })
            .collect();
        articles.truncate(usize::try_from(limit).unwrap_or(usize::MAX));

        debug!(count = articles.len(), "Fetched news");
        Ok(articles)
    }
}
