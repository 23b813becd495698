//! Model catalog record types.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, ValidationError};

/// Lifecycle state of a model in the local catalog.
///
/// Only these three states may ever be persisted; the repository rejects
/// anything else before it reaches the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelStatus {
    /// The model is present and usable.
    Available,
    /// A pull is in flight.
    Downloading,
    /// The last pull failed.
    Error,
}

impl ModelStatus {
    /// The status as its on-disk string.
    pub fn as_str(&self) -> &'static str {
        match self {
            ModelStatus::Available => "available",
            ModelStatus::Downloading => "downloading",
            ModelStatus::Error => "error",
        }
    }
}

impl fmt::Display for ModelStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ModelStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "available" => Ok(ModelStatus::Available),
            "downloading" => Ok(ModelStatus::Downloading),
            "error" => Ok(ModelStatus::Error),
            _ => Err(ValidationError::Status {
                value: s.to_string(),
            }
            .into()),
        }
    }
}

/// Descriptive metadata for a model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelMetadata {
    /// Network architecture (e.g. `llama`, `mistral`).
    pub architecture: String,
    /// Weight file format.
    pub format: String,
    /// Model family, used by the catalog search.
    pub family: String,
    /// Parameter count.
    pub parameters: u64,
    /// Quantization scheme.
    pub quantization: String,
}

impl Default for ModelMetadata {
    fn default() -> Self {
        Self {
            architecture: "unknown".to_string(),
            format: "gguf".to_string(),
            family: "llama".to_string(),
            parameters: 0,
            quantization: "none".to_string(),
        }
    }
}

/// A model record as stored in the catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelRecord {
    /// Store-assigned identifier.
    pub id: String,
    /// Model name, including tag. The de facto unique key.
    pub name: String,
    /// Free-form description.
    pub description: String,
    /// Version label.
    pub version: String,
    /// Size on disk in bytes.
    pub size: u64,
    /// Lifecycle state.
    pub status: ModelStatus,
    /// Descriptive metadata.
    pub metadata: ModelMetadata,
    /// When the record was created.
    pub created_at: String,
    /// When the record was last modified.
    pub updated_at: String,
}

/// Input for creating a model record.
///
/// Omitted metadata fields fall back to the catalog defaults.
#[derive(Debug, Clone, Default)]
pub struct NewModel {
    /// Model name, including tag.
    pub name: String,
    /// Free-form description.
    pub description: Option<String>,
    /// Version label.
    pub version: Option<String>,
    /// Size on disk in bytes.
    pub size: Option<u64>,
    /// Network architecture.
    pub architecture: Option<String>,
    /// Weight file format.
    pub format: Option<String>,
    /// Model family.
    pub family: Option<String>,
    /// Parameter count.
    pub parameters: Option<u64>,
    /// Quantization scheme.
    pub quantization: Option<String>,
}
