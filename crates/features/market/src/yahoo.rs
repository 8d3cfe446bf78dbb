//! Daily closes from the Yahoo Finance chart API.

use crate::error::{MarketError, MarketErrorExt};
use crate::source::QuoteSource;
use recap_domain::config::MarketConfig;
use recap_kernel::period::ReportPeriod;
use reqwest::{Client, Url};
use serde::Deserialize;
use std::time::Duration;
use tracing::trace;

const USER_AGENT: &str = concat!("Mozilla/5.0 (compatible; recap/", env!("CARGO_PKG_VERSION"), ")");

#[derive(Debug, Deserialize)]
struct ChartEnvelope {
    chart: Chart,
}

#[derive(Debug, Deserialize)]
struct Chart {
    #[serde(default)]
    result: Option<Vec<ChartResult>>,
    #[serde(default)]
    error: Option<ChartError>,
}

#[derive(Debug, Deserialize)]
struct ChartError {
    #[serde(default)]
    code: String,
    #[serde(default)]
    description: String,
}

#[derive(Debug, Deserialize)]
struct ChartResult {
    #[serde(default)]
    indicators: Indicators,
}

#[derive(Debug, Default, Deserialize)]
struct Indicators {
    #[serde(default)]
    quote: Vec<QuoteSeries>,
}

#[derive(Debug, Default, Deserialize)]
struct QuoteSeries {
    #[serde(default)]
    close: Vec<Option<f64>>,
}

/// HTTP client for `GET /v8/finance/chart/{symbol}`.
#[derive(Debug, Clone)]
pub struct YahooClient {
    http: Client,
    base_url: Url,
}

impl YahooClient {
    /// # Errors
    /// [`MarketError::Config`] for an unusable base URL, [`MarketError::Http`]
    /// when the HTTP client cannot be built.
    pub fn new(config: &MarketConfig) -> Result<Self, MarketError> {
        let base_url = Url::parse(&config.base_url).map_err(|e| MarketError::Config {
            message: format!("invalid base url '{}': {e}", config.base_url).into(),
            context: None,
        })?;
        if base_url.cannot_be_a_base() {
            return Err(MarketError::Config {
                message: format!("'{}' cannot be used as a base url", config.base_url).into(),
                context: None,
            });
        }

        let http = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .context("Building market data client")?;

        Ok(Self { http, base_url })
    }

    fn chart_url(&self, symbol: &str) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().extend(["v8", "finance", "chart", symbol]);
        }
        url
    }
}

impl QuoteSource for YahooClient {
    async fn daily_closes(
        &self,
        symbol: &str,
        period: &ReportPeriod,
    ) -> Result<Vec<f64>, MarketError> {
        let url = self.chart_url(symbol);
        trace!(%url, "Requesting chart");

        let response = self
            .http
            .get(url)
            .query(&[
                ("period1", period.start_utc().timestamp().to_string()),
                ("period2", period.query_end_utc().timestamp().to_string()),
                ("interval", "1d".to_owned()),
            ])
            .send()
            .await
            .context(format!("Fetching {symbol}"))?;

        let status = response.status();
        let envelope: ChartEnvelope =
            response.json().await.context(format!("Decoding chart for {symbol}"))?;

        if let Some(err) = envelope.chart.error {
            return Err(MarketError::Provider {
                symbol: symbol.to_owned(),
                message: format!("{}: {}", err.code, err.description),
                context: None,
            });
        }
        if !status.is_success() {
            return Err(MarketError::Provider {
                symbol: symbol.to_owned(),
                message: format!("HTTP {status}"),
                context: None,
            });
        }

        let closes = envelope
            .chart
            .result
            .unwrap_or_default()
            .into_iter()
            .next()
            .and_then(|result| result.indicators.quote.into_iter().next())
            .map(|series| series.close.into_iter().flatten().collect())
            .unwrap_or_default();

        Ok(closes)
    }
}
