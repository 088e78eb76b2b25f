//! Generation Provider Client
//!
//! Sends a single prompt to an OpenAI-compatible chat-completions endpoint
//! (OpenRouter by default deployment) and returns the raw text of the first
//! choice. The client does transport only: it never judges the content, and it
//! never retries. Retry policy belongs to whoever calls the pipeline.

use crate::error::{ApiError, FailureClass};
use async_trait::async_trait;
use reqwest::{Client, Url};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

pub mod profile;

pub use profile::{ProviderConfig, ResolvedProvider};

/// Longest provider error body carried into an error message.
const ERROR_BODY_LIMIT: usize = 512;

/// Chat message role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    User,
}

/// Chat message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: MessageRole,
    pub content: String,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            content: content.into(),
        }
    }
}

/// Text-generation client trait
#[async_trait]
pub trait GenerationClient: Send + Sync {
    /// Send one prompt and return the raw generated text.
    ///
    /// Fails with `ApiError::GenerationFailed` on a non-success status or a
    /// transport failure. A success response without content yields `""`.
    async fn generate(&self, prompt: &str) -> Result<String, ApiError>;

    /// Get the model name
    fn model_name(&self) -> &str;
}

/// Wire request body for chat completions.
#[derive(Debug, Serialize)]
pub struct ChatCompletionRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub max_tokens: u32,
    pub temperature: f32,
}

// Helper function to map transport errors to ApiError
fn map_http_error(error: reqwest::Error) -> ApiError {
    let class = if error.is_timeout() {
        FailureClass::Timeout
    } else if let Some(status) = error.status() {
        FailureClass::Status(status.as_u16())
    } else {
        FailureClass::Transport
    };
    let detail = if error.is_connect() {
        format!("Connection error: {}", error)
    } else {
        format!("HTTP error: {}", error)
    };
    ApiError::generation_failed(class, detail)
}

fn build_provider_http_client(
    connect_timeout: Duration,
    request_timeout: Duration,
) -> Result<Client, ApiError> {
    Client::builder()
        .no_proxy()
        .connect_timeout(connect_timeout)
        .timeout(request_timeout)
        .build()
        .map_err(|e| ApiError::ConfigError(format!("Failed to create HTTP client: {}", e)))
}

/// Pull `choices[0].message.content` out of a response body.
///
/// The envelope is untrusted: a body that is not JSON, or that lacks any step
/// of the path, or whose content is not a string, yields `None`.
pub fn first_message_content(body: &str) -> Option<String> {
    let envelope: Value = serde_json::from_str(body).ok()?;
    envelope
        .get("choices")?
        .get(0)?
        .get("message")?
        .get("content")?
        .as_str()
        .map(str::to_owned)
}

fn truncate_body(body: &str) -> &str {
    match body.char_indices().nth(ERROR_BODY_LIMIT) {
        Some((idx, _)) => &body[..idx],
        None => body,
    }
}

/// Client for OpenAI-compatible chat-completions endpoints.
pub struct ChatCompletionClient {
    client: Client,
    endpoint: Url,
    api_key: SecretString,
    model: String,
    max_tokens: u32,
    temperature: f32,
}

impl ChatCompletionClient {
    pub fn new(provider: ResolvedProvider) -> Result<Self, ApiError> {
        let client =
            build_provider_http_client(provider.connect_timeout, provider.request_timeout)?;
        Ok(Self {
            client,
            endpoint: provider.endpoint,
            api_key: provider.api_key,
            model: provider.model,
            max_tokens: provider.max_tokens,
            temperature: provider.temperature,
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    fn request_body(&self, prompt: &str) -> ChatCompletionRequest {
        ChatCompletionRequest {
            model: self.model.clone(),
            messages: vec![ChatMessage::user(prompt)],
            max_tokens: self.max_tokens,
            temperature: self.temperature,
        }
    }
}

#[async_trait]
impl GenerationClient for ChatCompletionClient {
    async fn generate(&self, prompt: &str) -> Result<String, ApiError> {
        let request = self.request_body(prompt);
        let started = Instant::now();
        info!(
            endpoint = %self.endpoint,
            model = %self.model,
            prompt_chars = prompt.len(),
            "Sending generation request"
        );

        let response = self
            .client
            .post(self.endpoint.clone())
            .header(
                "Authorization",
                format!("Bearer {}", self.api_key.expose_secret()),
            )
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(map_http_error)?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            warn!(
                status = status.as_u16(),
                elapsed_ms = started.elapsed().as_millis() as u64,
                "Provider returned non-success status"
            );
            return Err(ApiError::generation_failed(
                FailureClass::Status(status.as_u16()),
                format!("Request failed: {}", truncate_body(&error_text)),
            ));
        }

        let body = response.text().await.map_err(map_http_error)?;
        info!(
            status = status.as_u16(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Provider responded"
        );

        match first_message_content(&body) {
            Some(content) => {
                debug!(content_chars = content.len(), "Extracted message content");
                Ok(content)
            }
            None => {
                warn!("Provider response has no choices[0].message.content; treating as empty");
                Ok(String::new())
            }
        }
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}
