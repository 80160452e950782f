//! Hosted inference adapter for the [`Summarizer`] port.

use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::{non_empty_summary, truncate_input, Summarizer, SummaryFuture};
use crate::config::SummarizerConfig;
use crate::errors::{Error, Result};

const TASK_PREFIX: &str = "summarize: ";
const MAX_SUMMARY_TOKENS: u32 = 150;
const NUM_BEAMS: u32 = 4;

/// Calls a hosted sequence-to-sequence model over HTTP.
pub struct HostedSummarizer {
    client: Client,
    url: String,
    token: Option<String>,
    max_input_chars: usize,
}

#[derive(Serialize)]
struct InferenceRequest<'a> {
    inputs: &'a str,
    parameters: GenerationParameters,
    options: InferenceOptions,
}

#[derive(Serialize)]
struct GenerationParameters {
    max_length: u32,
    num_beams: u32,
    early_stopping: bool,
}

#[derive(Serialize)]
struct InferenceOptions {
    wait_for_model: bool,
}

/// One generated candidate; summarization models answer with
/// `summary_text`, text2text models with `generated_text`.
#[derive(Deserialize)]
struct Generation {
    summary_text: Option<String>,
    generated_text: Option<String>,
}

#[derive(Deserialize)]
struct InferenceError {
    error: String,
}

impl HostedSummarizer {
    pub fn new(config: &SummarizerConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            url: format!("{}/{}", config.endpoint.trim_end_matches('/'), config.model),
            token: config.token.clone(),
            max_input_chars: config.max_input_chars,
        })
    }

    /// Task-prefixed model input, truncated to the configured limit.
    pub fn model_input(&self, text: &str) -> String {
        let prefixed = format!("{}{}", TASK_PREFIX, text);
        truncate_input(&prefixed, self.max_input_chars).to_string()
    }

    async fn request_summary(&self, text: &str) -> Result<String> {
        let inputs = self.model_input(text);
        let body = InferenceRequest {
            inputs: &inputs,
            parameters: GenerationParameters {
                max_length: MAX_SUMMARY_TOKENS,
                num_beams: NUM_BEAMS,
                early_stopping: true,
            },
            options: InferenceOptions {
                wait_for_model: true,
            },
        };

        let mut request = self.client.post(&self.url).json(&body);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        let status = response.status();
        let response_text = response.text().await?;

        if !status.is_success() {
            let message = serde_json::from_str::<InferenceError>(&response_text)
                .map(|e| e.error)
                .unwrap_or(response_text);
            return Err(Error::upstream("Summarizer", status.as_u16(), message));
        }

        let generations: Vec<Generation> = serde_json::from_str(&response_text)?;
        let summary = generations
            .into_iter()
            .next()
            .and_then(|g| g.summary_text.or(g.generated_text))
            .unwrap_or_default();

        non_empty_summary(summary)
    }
}

impl Summarizer for HostedSummarizer {
    fn summarize<'a>(&'a self, text: &'a str) -> SummaryFuture<'a> {
        Box::pin(self.request_summary(text))
    }
}
