//! Request and response types for the runtime API.

use serde::{Deserialize, Serialize};

/// A model known to the runtime.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuntimeModel {
    /// Model name, including tag (e.g. `tinyllama:latest`).
    pub name: String,
    /// Size on disk in bytes.
    #[serde(default)]
    pub size: u64,
    /// When the model files last changed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modified_at: Option<String>,
    /// Digest of the model blob.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub digest: Option<String>,
}

/// Response from the tag listing endpoint.
#[derive(Debug, Deserialize)]
pub(crate) struct TagsResponse {
    #[serde(default)]
    pub models: Vec<RuntimeModel>,
}

/// One message in a chat exchange.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    /// `system`, `user`, or `assistant`.
    pub role: String,
    /// Message text.
    pub content: String,
}

impl ChatMessage {
    /// A `user` message.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }

    /// An `assistant` message.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: "assistant".to_string(),
            content: content.into(),
        }
    }
}

/// Final status payload from the pull endpoint.
#[derive(Debug, Deserialize)]
pub struct PullStatus {
    /// Last status line reported by the runtime (e.g. `success`).
    #[serde(default)]
    pub status: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct PullRequest<'a> {
    pub name: &'a str,
    pub stream: bool,
}

#[derive(Debug, Serialize)]
pub(crate) struct NameRequest<'a> {
    pub name: &'a str,
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

#[derive(Debug, Serialize)]
pub(crate) struct CopyRequest<'a> {
    pub source: &'a str,
    pub destination: &'a str,
}
