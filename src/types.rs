//! Wire types for the Foundation Models API.
//!
//! Request/response shapes for text completion and asynchronous image
//! generation, the operation envelope returned by the long-running-operation
//! endpoints, and the [`ImagePrompt`] union that normalizes the accepted
//! prompt shapes into the weighted message list YandexART expects.

use serde::{Deserialize, Serialize};

/// A single chat message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub role: String,
    pub text: String,
}

impl Message {
    pub fn new(role: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            role: role.into(),
            text: text.into(),
        }
    }

    /// A message with the `user` role.
    pub fn user(text: impl Into<String>) -> Self {
        Self::new("user", text)
    }

    /// A message with the `assistant` role.
    pub fn assistant(text: impl Into<String>) -> Self {
        Self::new("assistant", text)
    }

    /// A message with the `system` role.
    pub fn system(text: impl Into<String>) -> Self {
        Self::new("system", text)
    }
}

/// Reasoning mode configuration for models that support it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReasoningOptions {
    /// Reasoning mode, e.g. `ENABLED_HIDDEN`.
    pub mode: String,
    /// Reasoning effort, e.g. `low`, `medium`, `high`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub effort: Option<String>,
}

/// Options controlling a completion request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletionOptions {
    pub stream: bool,
    pub temperature: f64,
    pub max_tokens: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reasoning_options: Option<ReasoningOptions>,
}

impl Default for CompletionOptions {
    fn default() -> Self {
        Self {
            stream: false,
            temperature: 0.6,
            max_tokens: 2000,
            reasoning_options: None,
        }
    }
}

impl CompletionOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the sampling temperature.
    pub fn with_temperature(mut self, temperature: f64) -> Self {
        self.temperature = temperature;
        self
    }

    /// Set the maximum number of output tokens.
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    /// Set reasoning options.
    pub fn with_reasoning_options(mut self, reasoning_options: ReasoningOptions) -> Self {
        self.reasoning_options = Some(reasoning_options);
        self
    }
}

/// A text completion request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletionRequest {
    pub model_uri: String,
    pub completion_options: CompletionOptions,
    pub messages: Vec<Message>,
}

/// One generated alternative.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alternative {
    pub message: Message,
    #[serde(default)]
    pub status: String,
}

/// Token accounting for a completion call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Usage {
    #[serde(default)]
    pub input_text_tokens: u32,
    #[serde(default)]
    pub completion_tokens: u32,
    #[serde(default)]
    pub total_tokens: u32,
    /// Present only when the model spent tokens on reasoning.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reasoning_tokens: Option<u32>,
}

/// Payload of a successful completion response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletionResult {
    pub alternatives: Vec<Alternative>,
    #[serde(default)]
    pub usage: Usage,
    #[serde(default)]
    pub model_version: String,
}

/// A text completion response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletionResponse {
    pub result: CompletionResult,
}

/// Options controlling image generation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aspect_ratio: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
}

impl GenerationOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_seed(mut self, seed: i64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the aspect ratio, e.g. `"1:1"` or `"16:9"`.
    pub fn with_aspect_ratio(mut self, aspect_ratio: impl Into<String>) -> Self {
        self.aspect_ratio = Some(aspect_ratio.into());
        self
    }

    pub fn with_mime_type(mut self, mime_type: impl Into<String>) -> Self {
        self.mime_type = Some(mime_type.into());
        self
    }
}

/// A weighted image-generation prompt message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtMessage {
    pub text: String,
    pub weight: i64,
}

impl ArtMessage {
    pub fn new(text: impl Into<String>, weight: i64) -> Self {
        Self {
            text: text.into(),
            weight,
        }
    }
}

/// An asynchronous image-generation request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageGenerationRequest {
    pub model_uri: String,
    pub generation_options: GenerationOptions,
    pub messages: Vec<ArtMessage>,
}

/// Metadata attached to an operation envelope.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct OperationMetadata {
    pub id: String,
    pub description: String,
    pub created_at: String,
    pub created_by: String,
    pub modified_at: String,
}

/// Server-reported failure of an asynchronous operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperationError {
    pub code: u16,
    pub message: String,
}

/// Result payload of a finished image-generation operation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageResponse {
    /// Base64-encoded image data.
    #[serde(default)]
    pub image: String,
}

/// A long-running operation envelope.
///
/// `done == false` means the job is still running. Once `done` flips, exactly
/// one of `error` and `response` describes the outcome.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Operation {
    pub id: String,
    pub description: String,
    pub created_at: String,
    pub created_by: String,
    pub modified_at: String,
    pub done: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<OperationMetadata>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<OperationError>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response: Option<ImageResponse>,
}

/// Final artifact of a successful image generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageGenerationResult {
    pub operation_id: String,
    /// Base64-encoded image payload.
    pub image_base64: String,
}

/// Accepted shapes for an image-generation prompt.
///
/// Normalized into a uniform weighted message list before submission. The
/// `Json` variant accepts loosely-typed key/value records; any JSON shape it
/// does not recognize degrades to a single message whose text is the value's
/// string representation. That degradation is best-effort by contract, not an
/// error.
#[derive(Debug, Clone, PartialEq)]
pub enum ImagePrompt {
    /// A single prompt string, weight 1.
    Text(String),
    /// One message per string, each weight 1.
    TextList(Vec<String>),
    /// Pre-built weighted messages, passed through unchanged.
    Weighted(Vec<ArtMessage>),
    /// Loosely-typed records: an array of objects with `text` and optional
    /// `weight` fields. Non-numeric or missing weights default to 1.
    Json(serde_json::Value),
}

impl ImagePrompt {
    /// Normalize into the weighted message list the API expects.
    pub fn into_messages(self) -> Vec<ArtMessage> {
        match self {
            Self::Text(text) => vec![ArtMessage::new(text, 1)],
            Self::TextList(texts) => texts.into_iter().map(|t| ArtMessage::new(t, 1)).collect(),
            Self::Weighted(messages) => messages,
            Self::Json(value) => Self::messages_from_json(value),
        }
    }

    fn messages_from_json(value: serde_json::Value) -> Vec<ArtMessage> {
        match value {
            serde_json::Value::Array(items) if items.iter().all(|v| v.is_object()) => items
                .iter()
                .map(|record| {
                    let text = record
                        .get("text")
                        .and_then(|t| t.as_str())
                        .unwrap_or_default();
                    let weight = record
                        .get("weight")
                        .and_then(|w| w.as_i64().or_else(|| w.as_f64().map(|f| f as i64)))
                        .unwrap_or(1);
                    ArtMessage::new(text, weight)
                })
                .collect(),
            serde_json::Value::String(text) => vec![ArtMessage::new(text, 1)],
            other => vec![ArtMessage::new(other.to_string(), 1)],
        }
    }
}

impl From<&str> for ImagePrompt {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<String> for ImagePrompt {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<Vec<String>> for ImagePrompt {
    fn from(texts: Vec<String>) -> Self {
        Self::TextList(texts)
    }
}

impl From<Vec<&str>> for ImagePrompt {
    fn from(texts: Vec<&str>) -> Self {
        Self::TextList(texts.into_iter().map(str::to_string).collect())
    }
}

impl From<Vec<ArtMessage>> for ImagePrompt {
    fn from(messages: Vec<ArtMessage>) -> Self {
        Self::Weighted(messages)
    }
}

impl From<serde_json::Value> for ImagePrompt {
    fn from(value: serde_json::Value) -> Self {
        Self::Json(value)
    }
}
