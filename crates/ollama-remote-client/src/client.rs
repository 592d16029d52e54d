//! HTTP client for the Ollama API
//!
//! [`ModelApi`] is the seam the CLI dispatches through; [`OllamaClient`] is the
//! production implementation over a single pooled `reqwest::Client`.

use async_trait::async_trait;
use reqwest::{Client, Method};
use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, info};

use crate::{
    config::ClientConfig,
    endpoint::Endpoint,
    error::ApiError,
    models::{
        ChatMessage, ChatRequest, ChatResponse, CreateRequest, GenerateRequest, GenerateResponse,
        ModelDescriptor, ModelInfo, ModelRequest, StatusResponse, TagsResponse,
    },
    Result,
};

/// Remote model operations, one HTTP call each
#[async_trait]
pub trait ModelApi: Send + Sync {
    /// Send a conversation and return the assistant's reply
    async fn chat(&self, model: &str, messages: &[ChatMessage]) -> Result<ChatMessage>;

    /// Complete a single prompt
    async fn generate(&self, model: &str, prompt: &str) -> Result<String>;

    /// Enumerate models known to the server, in server order
    async fn list(&self) -> Result<Vec<ModelDescriptor>>;

    /// Download a model into the server; returns the final status line
    async fn pull(&self, model: &str) -> Result<String>;

    /// Upload a model to its registry; returns the final status line
    async fn push(&self, model: &str) -> Result<String>;

    /// Define a model from modelfile text; returns the final status line
    async fn create(&self, model: &str, modelfile: &str) -> Result<String>;

    /// Remove a model from the server
    async fn delete(&self, model: &str) -> Result<()>;

    /// Fetch a model's metadata
    async fn show(&self, model: &str) -> Result<ModelInfo>;
}

/// Ollama HTTP client
pub struct OllamaClient {
    http: Client,
    config: ClientConfig,
}

impl OllamaClient {
    /// Build a client from configuration
    ///
    /// # Errors
    /// Returns `Config` if the underlying HTTP client cannot be built
    pub fn new(config: ClientConfig) -> Result<Self> {
        let mut builder = Client::builder().user_agent(config.user_agent.as_str());

        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        if let Some(timeout) = config.connect_timeout {
            builder = builder.connect_timeout(timeout);
        }

        let http = builder
            .build()
            .map_err(|e| ApiError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { http, config })
    }

    pub fn endpoint(&self) -> &Endpoint {
        &self.config.endpoint
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Issue one request and return the body of a successful response
    async fn send<B>(&self, method: Method, path: &str, body: Option<&B>) -> Result<String>
    where
        B: Serialize + ?Sized + Sync,
    {
        let url = self.config.endpoint.api_url(path);
        debug!("HTTP {} {}", method, url);

        let mut request = self.http.request(method.clone(), &url);
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            debug!("{} {} failed with HTTP {}: {}", method, path, status.as_u16(), text.trim());
            return Err(ApiError::from_status(
                status.as_u16(),
                status.canonical_reason(),
                &text,
            ));
        }

        Ok(text)
    }
}

#[async_trait]
impl ModelApi for OllamaClient {
    async fn chat(&self, model: &str, messages: &[ChatMessage]) -> Result<ChatMessage> {
        ensure_model_name(model)?;
        let request = ChatRequest {
            model,
            messages,
            stream: false,
        };
        let body = self.send(Method::POST, "/api/chat", Some(&request)).await?;
        let response: ChatResponse = decode(&body)?;
        Ok(response.message)
    }

    async fn generate(&self, model: &str, prompt: &str) -> Result<String> {
        ensure_model_name(model)?;
        let request = GenerateRequest {
            model,
            prompt,
            stream: false,
        };
        let body = self.send(Method::POST, "/api/generate", Some(&request)).await?;
        let response: GenerateResponse = decode(&body)?;
        Ok(response.response)
    }

    async fn list(&self) -> Result<Vec<ModelDescriptor>> {
        let body = self.send::<()>(Method::GET, "/api/tags", None).await?;
        let response: TagsResponse = decode(&body)?;
        let models = response.models.unwrap_or_default();
        debug!("Listed {} models", models.len());
        Ok(models)
    }

    async fn pull(&self, model: &str) -> Result<String> {
        ensure_model_name(model)?;
        let request = ModelRequest {
            model,
            stream: Some(false),
        };
        let body = self.send(Method::POST, "/api/pull", Some(&request)).await?;
        let response: StatusResponse = decode(&body)?;
        info!("Pulled model {}: {}", model, response.status);
        Ok(response.status)
    }

    async fn push(&self, model: &str) -> Result<String> {
        ensure_model_name(model)?;
        let request = ModelRequest {
            model,
            stream: Some(false),
        };
        let body = self.send(Method::POST, "/api/push", Some(&request)).await?;
        let response: StatusResponse = decode(&body)?;
        info!("Pushed model {}: {}", model, response.status);
        Ok(response.status)
    }

    async fn create(&self, model: &str, modelfile: &str) -> Result<String> {
        ensure_model_name(model)?;
        let request = CreateRequest {
            model,
            modelfile,
            stream: false,
        };
        let body = self.send(Method::POST, "/api/create", Some(&request)).await?;
        let response: StatusResponse = decode(&body)?;
        info!("Created model {}: {}", model, response.status);
        Ok(response.status)
    }

    async fn delete(&self, model: &str) -> Result<()> {
        ensure_model_name(model)?;
        let request = ModelRequest { model, stream: None };
        let body = self.send(Method::DELETE, "/api/delete", Some(&request)).await?;
        // Success bodies are empty on current servers
        if !body.trim().is_empty() {
            decode::<serde_json::Value>(&body)?;
        }
        info!("Deleted model {}", model);
        Ok(())
    }

    async fn show(&self, model: &str) -> Result<ModelInfo> {
        ensure_model_name(model)?;
        let request = ModelRequest { model, stream: None };
        let body = self.send(Method::POST, "/api/show", Some(&request)).await?;
        decode(&body)
    }
}

fn ensure_model_name(model: &str) -> Result<()> {
    if model.trim().is_empty() {
        return Err(ApiError::InvalidModelName(
            "Model name cannot be empty".to_string(),
        ));
    }
    Ok(())
}

/// Parse a success body, surfacing an embedded `{"error": ...}` as `Remote`
fn decode<T: DeserializeOwned>(body: &str) -> Result<T> {
    let value: serde_json::Value =
        serde_json::from_str(body).map_err(|e| ApiError::MalformedResponse(e.to_string()))?;

    if let Some(message) = value.get("error").and_then(|e| e.as_str()) {
        return Err(ApiError::Remote(message.to_string()));
    }

    serde_json::from_value(value).map_err(|e| ApiError::MalformedResponse(e.to_string()))
}
