/// LLM Client: the single point of entry for all generative model calls in the screener.
///
/// ARCHITECTURAL RULE: No stage may call the Groq API directly.
/// Stages depend on the `GenerativeModel` trait; `LlmClient` is the production implementation.
///
/// Model: llama-3.3-70b-versatile (hardcoded: do not make configurable to prevent drift)
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

#[cfg(test)]
pub mod mock;
pub mod prompts;

const GROQ_API_URL: &str = "https://api.groq.com/openai/v1/chat/completions";
/// The model used for all LLM calls in the screener.
/// This is intentionally hardcoded to prevent accidental drift.
pub const MODEL: &str = "llama-3.3-70b-versatile";
/// Low temperature keeps scoring reproducible across runs.
const TEMPERATURE: f32 = 0.3;
const MAX_TOKENS: u32 = 2000;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("LLM returned empty content")]
    EmptyContent,

    #[error("model call timed out after {0:?}")]
    Timeout(Duration),
}

/// A generative text service: prompt in, raw reply text out.
///
/// Implementations must be reentrant: one instance is shared by every
/// concurrent workflow run and every fan-out task within a run.
#[async_trait]
pub trait GenerativeModel: Send + Sync {
    async fn complete(&self, prompt: &str, system: Option<&str>) -> Result<String, LlmError>;
}

/// Bounds every call of the wrapped model, whatever its transport.
pub struct Deadline {
    inner: Arc<dyn GenerativeModel>,
    limit: Duration,
}

impl Deadline {
    pub fn new(inner: Arc<dyn GenerativeModel>, limit: Duration) -> Self {
        Self { inner, limit }
    }
}

#[async_trait]
impl GenerativeModel for Deadline {
    async fn complete(&self, prompt: &str, system: Option<&str>) -> Result<String, LlmError> {
        tokio::time::timeout(self.limit, self.inner.complete(prompt, system))
            .await
            .map_err(|_| LlmError::Timeout(self.limit))?
    }
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct ChatResponse {
    pub choices: Vec<Choice>,
    pub usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
pub struct Choice {
    pub message: ReplyMessage,
}

#[derive(Debug, Deserialize)]
pub struct ReplyMessage {
    pub content: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Usage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
}

impl ChatResponse {
    /// Extracts the non-blank text of the first choice.
    pub fn text(&self) -> Option<&str> {
        self.choices
            .first()
            .and_then(|c| c.message.content.as_deref())
            .filter(|t| !t.trim().is_empty())
    }
}

#[derive(Debug, Deserialize)]
struct ApiError {
    error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}

/// The production generative model, backed by the Groq chat completions API.
/// No retries: a failed call is reported to the caller, which owns the item's error state.
#[derive(Clone)]
pub struct LlmClient {
    client: Client,
    api_key: String,
}

impl LlmClient {
    pub fn new(api_key: String, timeout: Duration) -> Result<Self, LlmError> {
        Ok(Self {
            client: Client::builder().timeout(timeout).build()?,
            api_key,
        })
    }

    /// Makes a raw call to the chat completions API, returning the full response object.
    pub async fn call(&self, prompt: &str, system: Option<&str>) -> Result<ChatResponse, LlmError> {
        let request_body = build_request(prompt, system);

        let response = self
            .client
            .post(GROQ_API_URL)
            .bearer_auth(&self.api_key)
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            // Try to parse error message
            let message = serde_json::from_str::<ApiError>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            return Err(LlmError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let chat_response: ChatResponse = response.json().await?;

        if let Some(usage) = &chat_response.usage {
            debug!(
                "LLM call succeeded: prompt_tokens={}, completion_tokens={}",
                usage.prompt_tokens, usage.completion_tokens
            );
        }

        Ok(chat_response)
    }
}

#[async_trait]
impl GenerativeModel for LlmClient {
    async fn complete(&self, prompt: &str, system: Option<&str>) -> Result<String, LlmError> {
        let response = self.call(prompt, system).await?;
        response
            .text()
            .map(str::to_owned)
            .ok_or(LlmError::EmptyContent)
    }
}

fn build_request<'a>(prompt: &'a str, system: Option<&'a str>) -> ChatRequest<'a> {
    let mut messages = Vec::with_capacity(2);
    if let Some(system) = system {
        messages.push(ChatMessage {
            role: "system",
            content: system,
        });
    }
    messages.push(ChatMessage {
        role: "user",
        content: prompt,
    });

    ChatRequest {
        model: MODEL,
        messages,
        temperature: TEMPERATURE,
        max_tokens: MAX_TOKENS,
    }
}
