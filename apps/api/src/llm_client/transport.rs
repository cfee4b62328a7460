//! HTTPS transport for the chat-completions backend.
//!
//! `ChatTransport` is the seam between the completion client and the network.
//! `OpenAiTransport` is the production implementation; tests swap in doubles.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

use super::{CompletionError, ErrorKind};

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

// ────────────────────────────────────────────────────────────────────────────
// Wire format
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ResponseFormat {
    JsonSchema { json_schema: JsonSchemaFormat },
}

#[derive(Debug, Clone, Serialize)]
pub struct JsonSchemaFormat {
    pub name: String,
    pub strict: bool,
    pub schema: Value,
}

/// Body of one chat-completions call.
#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub response_format: ResponseFormat,
}

impl ChatRequest {
    /// Name of the structured-output schema attached to this request.
    pub fn schema_name(&self) -> &str {
        match &self.response_format {
            ResponseFormat::JsonSchema { json_schema } => &json_schema.name,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: Option<String>,
    refusal: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ProviderError {
    error: ProviderErrorBody,
}

#[derive(Debug, Deserialize)]
struct ProviderErrorBody {
    message: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Transport trait
// ────────────────────────────────────────────────────────────────────────────

/// Performs exactly one round trip and returns the raw message content.
#[async_trait]
pub trait ChatTransport: Send + Sync {
    async fn send(&self, api_key: &str, request: &ChatRequest) -> Result<String, CompletionError>;
}

/// Chat-completions over HTTPS with bearer authentication.
#[derive(Clone)]
pub struct OpenAiTransport {
    client: Client,
    endpoint: String,
}

impl OpenAiTransport {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint: format!("{}/chat/completions", base_url.trim_end_matches('/')),
        })
    }
}

#[async_trait]
impl ChatTransport for OpenAiTransport {
    async fn send(&self, api_key: &str, request: &ChatRequest) -> Result<String, CompletionError> {
        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(api_key)
            .json(request)
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        let body = response.text().await.map_err(transport_error)?;

        if !status.is_success() {
            warn!("completion backend returned {status}");
            return Err(status_error(status, &body));
        }

        extract_content(&body)
    }
}

fn transport_error(e: reqwest::Error) -> CompletionError {
    if e.is_timeout() {
        CompletionError::new(ErrorKind::TransportError, format!("request timed out: {e}"))
    } else {
        CompletionError::new(ErrorKind::TransportError, e.to_string())
    }
}

/// Maps a non-2xx reply onto the error taxonomy.
fn status_error(status: StatusCode, body: &str) -> CompletionError {
    let message = serde_json::from_str::<ProviderError>(body)
        .map(|e| e.error.message)
        .unwrap_or_else(|_| body.to_string());

    let kind = match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => ErrorKind::AuthError,
        _ => ErrorKind::UpstreamError,
    };

    CompletionError::new(kind, format!("status {}: {message}", status.as_u16()))
}

/// Pulls the first choice's content out of a successful reply body.
fn extract_content(body: &str) -> Result<String, CompletionError> {
    let parsed: ChatResponse = serde_json::from_str(body).map_err(|e| {
        CompletionError::new(
            ErrorKind::UpstreamError,
            format!("malformed completion envelope: {e}"),
        )
    })?;

    let message = parsed
        .choices
        .into_iter()
        .next()
        .map(|c| c.message)
        .ok_or_else(|| CompletionError::new(ErrorKind::UpstreamError, "no choices returned"))?;

    if let Some(refusal) = message.refusal.filter(|r| !r.trim().is_empty()) {
        return Err(CompletionError::new(
            ErrorKind::UpstreamError,
            format!("model refused: {refusal}"),
        ));
    }

    message
        .content
        .filter(|c| !c.trim().is_empty())
        .ok_or_else(|| CompletionError::new(ErrorKind::UpstreamError, "empty message content"))
}
