//! Error types for the paddock crates.
//!
//! This module provides a unified error type with explicit variants for
//! storage, corruption, validation, transport, and runtime API errors.

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// The unified error type for paddock operations.
///
/// This error type covers all possible failure modes in the library,
/// with explicit variants to allow callers to handle specific cases.
#[derive(Debug, Error)]
pub enum Error {
    /// File system failures while reading or writing a collection.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    /// A collection file that exists but cannot be parsed as a record array.
    #[error("corrupt storage: {0}")]
    Corrupt(#[from] CorruptError),

    /// Domain-level validation failures raised before any store operation.
    #[error("invalid input: {0}")]
    Validation(#[from] ValidationError),

    /// Network transport errors while talking to the model runtime.
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// Error responses from the model runtime's HTTP API.
    #[error("runtime API error: {0}")]
    Api(#[from] ApiError),
}

/// File system failures (permission, disk full, missing directory).
#[derive(Debug, Error)]
pub enum StorageError {
    /// Reading or writing a collection file failed.
    #[error("failed to access {}: {source}", path.display())]
    Io {
        /// Path of the collection file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Serializing in-memory records failed.
    #[error("failed to encode records for {}: {message}", path.display())]
    Encode {
        /// Path of the collection file.
        path: PathBuf,
        /// Serializer diagnostic.
        message: String,
    },
}

/// A collection file that exists but does not hold a valid record array.
///
/// Raised instead of treating unreadable storage as empty, so callers can
/// distinguish "no data" from "lost data".
#[derive(Debug)]
pub struct CorruptError {
    /// Path of the offending collection file.
    pub path: PathBuf,
    /// Parser diagnostic.
    pub message: String,
}

impl CorruptError {
    /// Create a new corruption error.
    pub fn new(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for CorruptError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} is not a valid record array: {}",
            self.path.display(),
            self.message
        )
    }
}

impl std::error::Error for CorruptError {}

/// Input validation errors raised by the repositories.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("missing required field '{field}'")]
    MissingField {
        /// Name of the offending field.
        field: &'static str,
    },

    /// A model status outside the allowed set.
    #[error("invalid model status '{value}'")]
    Status {
        /// The rejected value.
        value: String,
    },

    /// A record that does not carry the store-managed envelope fields.
    #[error("invalid record: {reason}")]
    Record {
        /// What is wrong with the record.
        reason: String,
    },

    /// Generic invalid input.
    #[error("invalid input: {message}")]
    Other {
        /// Description of the failure.
        message: String,
    },
}

/// Transport-level errors.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Network connection failed.
    #[error("connection failed: {message}")]
    Connection {
        /// Description of the failure.
        message: String,
    },

    /// Request timed out.
    #[error("request timed out")]
    Timeout,

    /// Generic HTTP error.
    #[error("HTTP error: {message}")]
    Http {
        /// Description of the failure.
        message: String,
    },
}

/// Error response from the model runtime's HTTP API.
#[derive(Debug)]
pub struct ApiError {
    /// HTTP status code.
    pub status: u16,
    /// Error message from the runtime, if present.
    pub message: Option<String>,
}

impl ApiError {
    /// Create a new API error.
    pub fn new(status: u16, message: Option<String>) -> Self {
        Self { status, message }
    }

    /// Check if this is a missing-resource error.
    pub fn is_not_found(&self) -> bool {
        self.status == 404
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HTTP {}", self.status)?;
        if let Some(ref message) = self.message {
            write!(f, ": {}", message)?;
        }
        Ok(())
    }
}

impl std::error::Error for ApiError {}
