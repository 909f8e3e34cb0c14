//! LLM Client — the single point of entry for generative-text calls.
//!
//! The pipeline depends only on the `TextGenerator` trait; `LlmClient` is the
//! OpenAI-compatible HTTP implementation of it.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

pub mod prompts;

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_MODEL: &str = "gpt-4";
const DEFAULT_TIMEOUT_SECS: u64 = 120;
const DEFAULT_MAX_RETRIES: u32 = 3;
const MAX_BACKOFF: Duration = Duration::from_secs(60);

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Rate limited after {retries} retries")]
    RateLimited { retries: u32 },

    #[error("LLM returned empty content")]
    EmptyContent,
}

/// One generative-text request, in either of the two supported call shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Invocation<'a> {
    /// Chat completion: optional system message, then the prompt as the sole user message.
    Chat { system: Option<&'a str>, user: &'a str },
    /// Single-prompt text completion.
    Prompt { prompt: &'a str },
}

/// The generative-text capability as the pipeline sees it: a prompt in, one
/// completion's text out, or an error.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn complete(&self, invocation: &Invocation<'_>) -> Result<String, LlmError>;
}

/// Connection and retry settings for `LlmClient`.
#[derive(Debug, Clone)]
pub struct ClientSettings {
    pub api_key: String,
    pub base_url: String,
    pub model: String,
    /// Omitted from chat requests when `None`. Prompt-style requests fall back
    /// to the provider default, which is very short on the legacy endpoint.
    pub max_tokens: Option<u32>,
    pub timeout: Duration,
    pub max_retries: u32,
    /// First backoff delay; doubles on each further attempt.
    pub retry_base_delay: Duration,
}

impl ClientSettings {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            max_tokens: None,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            max_retries: DEFAULT_MAX_RETRIES,
            retry_base_delay: Duration::from_millis(1000),
        }
    }
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct PromptRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub struct CompletionResponse {
    pub choices: Vec<Choice>,
    pub usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
pub struct Choice {
    /// Present on chat completions.
    pub message: Option<ChoiceMessage>,
    /// Present on prompt-style completions.
    pub text: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ChoiceMessage {
    pub content: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Usage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
}

impl CompletionResponse {
    /// Text of the first choice, whichever endpoint produced it.
    pub fn text(&self) -> Option<&str> {
        let choice = self.choices.first()?;
        choice
            .message
            .as_ref()
            .and_then(|m| m.content.as_deref())
            .or(choice.text.as_deref())
    }
}

#[derive(Debug, Deserialize)]
struct ApiErrorEnvelope {
    error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}

/// OpenAI-compatible completion client with retry on rate limits and server errors.
#[derive(Clone)]
pub struct LlmClient {
    client: Client,
    settings: ClientSettings,
}

impl LlmClient {
    pub fn new(settings: ClientSettings) -> Result<Self, LlmError> {
        let client = Client::builder().timeout(settings.timeout).build()?;
        Ok(Self { client, settings })
    }

    pub fn model(&self) -> &str {
        &self.settings.model
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.settings.base_url.trim_end_matches('/'), path)
    }

    fn request_body(
        &self,
        invocation: &Invocation<'_>,
    ) -> Result<(String, serde_json::Value), LlmError> {
        let model = self.settings.model.as_str();
        let max_tokens = self.settings.max_tokens;
        match *invocation {
            Invocation::Chat { system, user } => {
                let mut messages = Vec::with_capacity(2);
                if let Some(system) = system {
                    messages.push(ChatMessage {
                        role: "system",
                        content: system,
                    });
                }
                messages.push(ChatMessage {
                    role: "user",
                    content: user,
                });
                let body = serde_json::to_value(ChatRequest {
                    model,
                    messages,
                    max_tokens,
                })?;
                Ok((self.endpoint("chat/completions"), body))
            }
            Invocation::Prompt { prompt } => {
                let body = serde_json::to_value(PromptRequest {
                    model,
                    prompt,
                    max_tokens,
                })?;
                Ok((self.endpoint("completions"), body))
            }
        }
    }

    /// Makes a raw call, returning the full response object.
    /// Retries on transport errors, 429 and 5xx with exponential backoff.
    pub async fn call(&self, invocation: &Invocation<'_>) -> Result<CompletionResponse, LlmError> {
        let (url, request_body) = self.request_body(invocation)?;
        let max_retries = self.settings.max_retries.max(1);

        let mut attempt = 0;
        loop {
            let error = match self.send_once(&url, &request_body).await {
                Ok(completion) => return Ok(completion),
                Err(AttemptError::Fatal(e)) => return Err(e),
                Err(AttemptError::Retryable(e)) => e,
            };

            attempt += 1;
            if attempt >= max_retries {
                return Err(match error {
                    LlmError::Api { status: 429, .. } => LlmError::RateLimited { retries: attempt },
                    other => other,
                });
            }

            let delay = backoff_delay(self.settings.retry_base_delay, attempt);
            warn!(
                "LLM call attempt {} failed, retrying after {}ms...",
                attempt,
                delay.as_millis()
            );
            tokio::time::sleep(delay).await;
        }
    }

    async fn send_once(
        &self,
        url: &str,
        request_body: &serde_json::Value,
    ) -> Result<CompletionResponse, AttemptError> {
        let response = self
            .client
            .post(url)
            .bearer_auth(&self.settings.api_key)
            .json(request_body)
            .send()
            .await
            .map_err(|e| AttemptError::Retryable(LlmError::Http(e)))?;

        let status = response.status();

        if status.as_u16() == 429 || status.is_server_error() {
            let body = response.text().await.unwrap_or_default();
            warn!("LLM API returned {}: {}", status, body);
            return Err(AttemptError::Retryable(LlmError::Api {
                status: status.as_u16(),
                message: body,
            }));
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ApiErrorEnvelope>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            return Err(AttemptError::Fatal(LlmError::Api {
                status: status.as_u16(),
                message,
            }));
        }

        let body = response
            .text()
            .await
            .map_err(|e| AttemptError::Fatal(LlmError::Http(e)))?;
        let completion: CompletionResponse = serde_json::from_str(&body)
            .map_err(|e| AttemptError::Fatal(LlmError::Parse(e)))?;

        if let Some(usage) = &completion.usage {
            debug!(
                "LLM call succeeded: prompt_tokens={}, completion_tokens={}",
                usage.prompt_tokens, usage.completion_tokens
            );
        }

        Ok(completion)
    }
}

enum AttemptError {
    Retryable(LlmError),
    Fatal(LlmError),
}

/// `base * 2^(attempt - 1)`, capped at `MAX_BACKOFF`.
fn backoff_delay(base: Duration, attempt: u32) -> Duration {
    let factor = 2u32.saturating_pow(attempt.saturating_sub(1));
    base.checked_mul(factor)
        .unwrap_or(MAX_BACKOFF)
        .min(MAX_BACKOFF)
}

#[async_trait]
impl TextGenerator for LlmClient {
    async fn complete(&self, invocation: &Invocation<'_>) -> Result<String, LlmError> {
        let response = self.call(invocation).await?;
        response
            .text()
            .map(str::to_string)
            .ok_or(LlmError::EmptyContent)
    }
}
