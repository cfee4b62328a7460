//! Completion client: the single chokepoint for every language-model call.
//!
//! ARCHITECTURAL RULE: no other module talks to the backend directly. Adapters
//! build a `CompletionRequest` and go through `CompletionClient::complete`.
//!
//! The client is total: every failure comes back as a `CompletionError` with
//! an `ErrorKind`, and a successful payload has already been validated against
//! the request's `SchemaDescriptor`.

use std::fmt;
use std::sync::Arc;

use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::debug;
use uuid::Uuid;

pub mod prompts;
pub mod schema;
pub mod transport;

pub use schema::SchemaDescriptor;
pub use transport::{ChatMessage, ChatRequest, ChatTransport, OpenAiTransport};

use transport::{JsonSchemaFormat, ResponseFormat};

pub const DEFAULT_MODEL: &str = "gpt-4o";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ErrorKind {
    /// Network unreachable, connection reset, timeout.
    TransportError,
    /// No credential configured, or the backend rejected it.
    AuthError,
    /// The reply did not parse into the requested shape.
    SchemaViolation,
    /// The backend reported a failure (rate limit, 5xx, refusal).
    UpstreamError,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorKind::TransportError => "transport error",
            ErrorKind::AuthError => "auth error",
            ErrorKind::SchemaViolation => "schema violation",
            ErrorKind::UpstreamError => "upstream error",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
#[error("{kind}: {message}")]
pub struct CompletionError {
    pub kind: ErrorKind,
    pub message: String,
}

impl CompletionError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// `Ok` carries a schema-valid payload; `Err` carries the failure kind.
pub type CompletionResult<T> = Result<T, CompletionError>;

/// One outbound completion. Built fresh for every call.
#[derive(Debug, Clone)]
pub struct CompletionRequest {
    pub system_instruction: String,
    pub user_prompt: String,
    pub response_schema: &'static SchemaDescriptor,
}

/// Credential and model selection, injected once at startup.
#[derive(Debug, Clone)]
pub struct AiSettings {
    pub api_key: Option<String>,
    pub model: String,
}

impl AiSettings {
    pub fn new(api_key: Option<String>, model: impl Into<String>) -> Self {
        Self {
            api_key: api_key.filter(|k| !k.trim().is_empty()),
            model: model.into(),
        }
    }
}

#[derive(Clone)]
pub struct CompletionClient {
    transport: Arc<dyn ChatTransport>,
    settings: AiSettings,
}

impl CompletionClient {
    pub fn new(transport: Arc<dyn ChatTransport>, settings: AiSettings) -> Self {
        Self {
            transport,
            settings,
        }
    }

    /// Whether AI features can run at all. Consumers use this to decide
    /// whether to offer an AI action.
    pub fn is_available(&self) -> bool {
        self.settings.api_key.is_some()
    }

    pub fn model(&self) -> &str {
        &self.settings.model
    }

    /// Sends one request and decodes the schema-valid reply into `T`.
    ///
    /// No credential means `AuthError` without touching the transport.
    /// No retry is attempted; re-issuing the call is the caller's decision.
    pub async fn complete<T: DeserializeOwned>(
        &self,
        request: &CompletionRequest,
    ) -> CompletionResult<T> {
        let Some(api_key) = self.settings.api_key.as_deref() else {
            return Err(CompletionError::new(
                ErrorKind::AuthError,
                "no API key configured",
            ));
        };

        let call_id = Uuid::new_v4();
        debug!(
            %call_id,
            model = %self.settings.model,
            schema = request.response_schema.name(),
            "sending completion request"
        );

        let body = self.build_chat_request(request);
        let content = self.transport.send(api_key, &body).await?;

        let payload = decode_payload(&content, request.response_schema)?;
        debug!(%call_id, "completion decoded");
        Ok(payload)
    }

    fn build_chat_request(&self, request: &CompletionRequest) -> ChatRequest {
        ChatRequest {
            model: self.settings.model.clone(),
            messages: vec![
                ChatMessage::system(request.system_instruction.as_str()),
                ChatMessage::user(request.user_prompt.as_str()),
            ],
            response_format: ResponseFormat::JsonSchema {
                json_schema: JsonSchemaFormat {
                    name: request.response_schema.name().to_string(),
                    strict: true,
                    schema: request.response_schema.schema().clone(),
                },
            },
        }
    }
}

/// Parses, validates and decodes raw message content.
/// Every failure here is a `SchemaViolation`.
pub fn decode_payload<T: DeserializeOwned>(
    content: &str,
    schema: &SchemaDescriptor,
) -> CompletionResult<T> {
    let text = strip_json_fences(content);

    let value: Value = serde_json::from_str(text).map_err(|e| {
        CompletionError::new(ErrorKind::SchemaViolation, format!("not valid JSON: {e}"))
    })?;

    schema.validate(&value).map_err(|msg| {
        CompletionError::new(
            ErrorKind::SchemaViolation,
            format!("reply does not match '{}': {msg}", schema.name()),
        )
    })?;

    serde_json::from_value(value).map_err(|e| {
        CompletionError::new(
            ErrorKind::SchemaViolation,
            format!("reply could not be decoded as '{}': {e}", schema.name()),
        )
    })
}

/// Strips ```json ... ``` or ``` ... ``` code fences from model output.
fn strip_json_fences(text: &str) -> &str {
    let text = text.trim();
    let inner = text
        .strip_prefix("```json")
        .or_else(|| text.strip_prefix("```"));

    match inner {
        Some(stripped) => {
            let stripped = stripped.trim_start();
            stripped
                .strip_suffix("```")
                .map(|s| s.trim())
                .unwrap_or(stripped)
        }
        None => text,
    }
}
