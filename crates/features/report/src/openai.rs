//! OpenAI chat completions client.

use crate::error::{ReportError, ReportErrorExt};
use crate::model::{ChatModel, ChatRequest};
use recap_domain::config::OpenAiConfig;
use reqwest::{Client, Url};
use serde::Deserialize;
use std::fmt;
use std::time::Duration;
use tracing::debug;

#[derive(Debug, Deserialize)]
struct Completion {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    message: String,
}

/// `POST {base}/chat/completions` with bearer authentication.
#[derive(Clone)]
pub struct OpenAiClient {
    http: Client,
    endpoint: Url,
    api_key: String,
}

impl fmt::Debug for OpenAiClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OpenAiClient")
            .field("endpoint", &self.endpoint.as_str())
            .finish_non_exhaustive()
    }
}

impl OpenAiClient {
    /// # Errors
    /// [`ReportError::Validation`] for an unusable base URL, [`ReportError::Http`]
    /// when the HTTP client cannot be built.
    pub fn new(config: &OpenAiConfig, api_key: impl Into<String>) -> Result<Self, ReportError> {
        let mut endpoint = Url::parse(&config.base_url)
            .ok()
            .filter(|url| !url.cannot_be_a_base())
            .ok_or_else(|| ReportError::Validation {
                message: format!("invalid OpenAI base url '{}'", config.base_url).into(),
                context: None,
            })?;
        if let Ok(mut segments) = endpoint.path_segments_mut() {
            segments.pop_if_empty().extend(["chat", "completions"]);
        }

        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .context("Building OpenAI client")?;

        Ok(Self { http, endpoint, api_key: api_key.into() })
    }
}

impl ChatModel for OpenAiClient {
    async fn complete(&self, request: ChatRequest) -> Result<String, ReportError> {
        debug!(model = %request.model, max_tokens = request.max_tokens, "Requesting completion");

        let response = self
            .http
            .post(self.endpoint.clone())
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .context("Sending chat completion")?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let detail = serde_json::from_str::<ErrorEnvelope>(&body)
                .map(|envelope| envelope.error.message)
                .unwrap_or_else(|_| body.chars().take(200).collect());
            return Err(ReportError::Model {
                message: format!("HTTP {status}: {detail}"),
                context: None,
            });
        }

        let completion: Completion = response.json().await.context("Decoding chat completion")?;
        let content = completion
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .map(|content| content.trim().to_owned())
            .unwrap_or_default();

        if content.is_empty() {
            return Err(ReportError::Model {
                message: "completion returned no content".to_owned(),
                context: None,
            });
        }
        Ok(content)
    }
}
