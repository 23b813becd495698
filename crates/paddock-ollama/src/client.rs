//! HTTP client for the runtime API.

use reqwest::Response;
use serde::{Serialize, de::DeserializeOwned};
use tracing::{debug, instrument};

use paddock_core::Result;
use paddock_core::error::{ApiError, Error, TransportError};

use crate::types::{
    ChatMessage, ChatRequest, ChatResponse, CopyRequest, GenerateRequest, GenerateResponse,
    NameRequest, PullRequest, PullStatus, RuntimeModel, TagsResponse,
};

/// Default runtime address when none is configured.
pub const DEFAULT_RUNTIME_URL: &str = "http://127.0.0.1:11434";

fn map_transport(err: reqwest::Error) -> Error {
    if err.is_timeout() {
        Error::Transport(TransportError::Timeout)
    } else if err.is_connect() {
        Error::Transport(TransportError::Connection {
            message: err.to_string(),
        })
    } else {
        Error::Transport(TransportError::Http {
            message: err.to_string(),
        })
    }
}

/// Client for the local model runtime's REST API.
///
/// All calls are single request/response; streaming is always disabled on
/// endpoints that support it.
#[derive(Debug, Clone)]
pub struct OllamaClient {
    client: reqwest::Client,
    base_url: String,
}

impl OllamaClient {
    /// Create a client for the runtime at `base_url`.
    pub fn new(base_url: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .user_agent(concat!("paddock/", env!("CARGO_PKG_VERSION")))
            .build()
            .expect("failed to build HTTP client");

        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }

        Self { client, base_url }
    }

    /// Base URL this client is configured for.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn api_url(&self, path: &str) -> String {
        format!("{}/api/{}", self.base_url, path)
    }

    async fn handle_response<R>(&self, response: Response) -> Result<R>
    where
        R: DeserializeOwned,
    {
        if response.status().is_success() {
            response.json().await.map_err(map_transport)
        } else {
            Err(Error::Api(self.parse_error(response).await))
        }
    }

    async fn parse_error(&self, response: Response) -> ApiError {
        let status = response.status().as_u16();
        let message = match response.json::<serde_json::Value>().await {
            Ok(body) => body
                .get("error")
                .or_else(|| body.get("message"))
                .and_then(|v| v.as_str())
                .map(str::to_string),
            Err(_) => None,
        };
        ApiError::new(status, message)
    }

    async fn get<R>(&self, path: &str) -> Result<R>
    where
        R: DeserializeOwned,
    {
        let response = self
            .client
            .get(self.api_url(path))
            .send()
            .await
            .map_err(map_transport)?;
        self.handle_response(response).await
    }

    async fn post<B, R>(&self, path: &str, body: &B) -> Result<R>
    where
        B: Serialize,
        R: DeserializeOwned,
    {
        let response = self
            .client
            .post(self.api_url(path))
            .json(body)
            .send()
            .await
            .map_err(map_transport)?;
        self.handle_response(response).await
    }

    async fn post_no_response<B>(&self, path: &str, body: &B) -> Result<()>
    where
        B: Serialize,
    {
        let response = self
            .client
            .post(self.api_url(path))
            .json(body)
            .send()
            .await
            .map_err(map_transport)?;

        if response.status().is_success() {
            Ok(())
        } else {
            Err(Error::Api(self.parse_error(response).await))
        }
    }

    /// Models currently present on the runtime.
    #[instrument(skip(self), fields(runtime = %self.base_url))]
    pub async fn list_models(&self) -> Result<Vec<RuntimeModel>> {
        debug!("Listing runtime models");
        let response: TagsResponse = self.get("tags").await?;
        Ok(response.models)
    }

    /// Download a model onto the runtime. Blocks until the pull finishes.
    #[instrument(skip(self), fields(runtime = %self.base_url))]
    pub async fn pull(&self, name: &str) -> Result<PullStatus> {
        debug!(name, "Pulling model");
        self.post(
            "pull",
            &PullRequest {
                name,
                stream: false,
            },
        )
        .await
    }

    /// Detailed information for one model, as raw JSON.
    pub async fn show(&self, name: &str) -> Result<serde_json::Value> {
        self.post("show", &NameRequest { name }).await
    }

    /// Remove a model from the runtime.
    #[instrument(skip(self), fields(runtime = %self.base_url))]
    pub async fn delete(&self, name: &str) -> Result<()> {
        debug!(name, "Deleting model");
        let response = self
            .client
            .delete(self.api_url("delete"))
            .json(&NameRequest { name })
            .send()
            .await
            .map_err(map_transport)?;

        if response.status().is_success() {
            Ok(())
        } else {
            Err(Error::Api(self.parse_error(response).await))
        }
    }

    /// Single-shot chat exchange; returns the assistant's reply.
    #[instrument(skip(self, messages), fields(runtime = %self.base_url))]
    pub async fn chat(&self, model: &str, messages: &[ChatMessage]) -> Result<ChatMessage> {
        debug!(model, count = messages.len(), "Chat request");
        let response: ChatResponse = self
            .post(
                "chat",
                &ChatRequest {
                    model,
                    messages,
                    stream: false,
                },
            )
            .await?;
        Ok(ChatMessage::assistant(response.message.content))
    }

    /// Single-shot text generation.
    #[instrument(skip(self, prompt), fields(runtime = %self.base_url))]
    pub async fn generate(&self, model: &str, prompt: &str) -> Result<String> {
        debug!(model, "Generate request");
        let response: GenerateResponse = self
            .post(
                "generate",
                &GenerateRequest {
                    model,
                    prompt,
                    stream: false,
                },
            )
            .await?;
        Ok(response.response)
    }

    /// Duplicate a model under a new name.
    pub async fn copy(&self, source: &str, destination: &str) -> Result<()> {
        self.post_no_response(
            "copy",
            &CopyRequest {
                source,
                destination,
            },
        )
        .await
    }

    /// Runtime health probe, as raw JSON.
    pub async fn status(&self) -> Result<serde_json::Value> {
        self.get("status").await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_list_models() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/tags"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "models": [
                    {"name": "tinyllama:latest", "size": 637_000_000},
                    {"name": "mistral:7b", "size": 4_100_000_000u64}
                ]
            })))
            .mount(&server)
            .await;

        let client = OllamaClient::new(server.uri());
        let models = client.list_models().await.unwrap();

        assert_eq!(models.len(), 2);
        assert_eq!(models[0].name, "tinyllama:latest");
        assert_eq!(models[1].size, 4_100_000_000);
    }

    #[tokio::test]
    async fn test_list_models_tolerates_missing_array() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/tags"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
            .mount(&server)
            .await;

        let client = OllamaClient::new(server.uri());
        assert!(client.list_models().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_pull_disables_streaming() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/pull"))
            .and(body_json(json!({"name": "tinyllama:latest", "stream": false})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "success"})))
            .mount(&server)
            .await;

        let client = OllamaClient::new(server.uri());
        let status = client.pull("tinyllama:latest").await.unwrap();
        assert_eq!(status.status, "success");
    }

    #[tokio::test]
    async fn test_error_body_becomes_api_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/pull"))
            .respond_with(
                ResponseTemplate::new(404).set_body_json(json!({"error": "model not found"})),
            )
            .mount(&server)
            .await;

        let client = OllamaClient::new(server.uri());
        let err = client.pull("nope").await.unwrap_err();

        match err {
            Error::Api(api) => {
                assert!(api.is_not_found());
                assert_eq!(api.message.as_deref(), Some("model not found"));
            }
            other => panic!("expected Api error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_delete_sends_name_body() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/api/delete"))
            .and(body_json(json!({"name": "tinyllama:latest"})))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;

        let client = OllamaClient::new(server.uri());
        client.delete("tinyllama:latest").await.unwrap();
    }

    #[tokio::test]
    async fn test_chat_returns_assistant_reply() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/chat"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "model": "tinyllama:latest",
                "message": {"role": "assistant", "content": "hello there"}
            })))
            .mount(&server)
            .await;

        let client = OllamaClient::new(server.uri());
        let reply = client
            .chat("tinyllama:latest", &[ChatMessage::user("hi")])
            .await
            .unwrap();

        assert_eq!(reply.role, "assistant");
        assert_eq!(reply.content, "hello there");
    }

    #[tokio::test]
    async fn test_generate_returns_response_text() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/generate"))
            .and(body_json(json!({
                "model": "tinyllama:latest",
                "prompt": "say hi",
                "stream": false
            })))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"response": "hi"})),
            )
            .mount(&server)
            .await;

        let client = OllamaClient::new(server.uri());
        let text = client.generate("tinyllama:latest", "say hi").await.unwrap();
        assert_eq!(text, "hi");
    }

    #[tokio::test]
    async fn test_trailing_slash_in_base_url_is_trimmed() {
        let client = OllamaClient::new("http://127.0.0.1:11434/");
        assert_eq!(client.base_url(), "http://127.0.0.1:11434");
    }
}
