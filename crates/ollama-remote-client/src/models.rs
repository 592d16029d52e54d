//! Wire types for the Ollama HTTP API

use serde::{Deserialize, Serialize};

/// A single chat turn
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChatMessage {
    /// "user", "assistant" or "system"
    pub role: String,

    pub content: String,
}

impl ChatMessage {
    /// A message authored by the user
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

/// Model entry returned by `/api/tags`
///
/// `size` and `modified_at` are kept exactly as the server sent them.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ModelDescriptor {
    /// Model name/tag (e.g., "mistral:latest")
    pub name: String,

    /// Model size in bytes
    pub size: u64,

    /// Server-formatted modification time
    pub modified_at: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub digest: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<ModelDetails>,
}

/// Format and size details attached to a model
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ModelDetails {
    /// Model format (e.g., "gguf")
    #[serde(default)]
    pub format: String,

    /// Model family (e.g., "llama", "mistral")
    #[serde(default)]
    pub family: String,

    /// Parameter size (e.g., "7B", "13B")
    #[serde(default)]
    pub parameter_size: String,

    /// Quantization level (e.g., "Q4_0", "Q5_K_M")
    #[serde(default)]
    pub quantization_level: String,
}

/// Metadata blob returned by `/api/show`
///
/// The shape varies between server versions, so it is kept as raw JSON.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct ModelInfo(serde_json::Value);

impl ModelInfo {
    pub fn new(value: serde_json::Value) -> Self {
        Self(value)
    }

    pub fn as_value(&self) -> &serde_json::Value {
        &self.0
    }

    /// Structured details, when the server included them
    pub fn details(&self) -> Option<ModelDetails> {
        self.0
            .get("details")
            .and_then(|d| serde_json::from_value(d.clone()).ok())
    }

    /// Indented JSON dump for display
    pub fn to_pretty_string(&self) -> String {
        serde_json::to_string_pretty(&self.0).unwrap_or_else(|_| self.0.to_string())
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct ChatRequest<'a> {
    pub model: &'a str,
    pub messages: &'a [ChatMessage],
    pub stream: bool,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ChatResponse {
    pub message: ChatMessage,
}

#[derive(Debug, Serialize)]
pub(crate) struct GenerateRequest<'a> {
    pub model: &'a str,
    pub prompt: &'a str,
    pub stream: bool,
}

#[derive(Debug, Deserialize)]
pub(crate) struct GenerateResponse {
    pub response: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TagsResponse {
    #[serde(default)]
    pub models: Option<Vec<ModelDescriptor>>,
}

/// Body shared by pull, push, delete and show
#[derive(Debug, Serialize)]
pub(crate) struct ModelRequest<'a> {
    pub model: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stream: Option<bool>,
}

#[derive(Debug, Serialize)]
pub(crate) struct CreateRequest<'a> {
    pub model: &'a str,
    pub modelfile: &'a str,
    pub stream: bool,
}

#[derive(Debug, Deserialize)]
pub(crate) struct StatusResponse {
    #[serde(default)]
    pub status: String,
}
