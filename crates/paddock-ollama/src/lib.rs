//! paddock-ollama - HTTP client for the local model runtime.

mod client;
mod types;

pub use client::{DEFAULT_RUNTIME_URL, OllamaClient};
pub use types::{ChatMessage, PullStatus, RuntimeModel};
