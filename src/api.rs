//! Caller-facing API: the one operation the web layer needs.
//!
//! Turns a loosely-typed request body into a task list and maps the outcome
//! to an HTTP status and JSON body. Success bodies are the plain five-item
//! array; failures use the `{ "success": false, "message": ... }` envelope.

use crate::config::TaskdraftConfig;
use crate::error::ApiError;
use crate::generation::{GenerationRequest, TaskListGenerator};
use crate::provider::ChatCompletionClient;
use crate::types::TaskList;
use serde::Serialize;
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::warn;

/// Status and JSON body for a web layer to send back.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApiResponse {
    pub status: u16,
    pub body: Value,
}

impl ApiResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

impl From<&ApiError> for ApiResponse {
    fn from(err: &ApiError) -> Self {
        ApiResponse {
            status: err.http_status(),
            body: json!({ "success": false, "message": err.to_string() }),
        }
    }
}

/// Task-list drafting API
#[derive(Clone)]
pub struct TaskDraftApi {
    generator: TaskListGenerator,
}

impl TaskDraftApi {
    pub fn new(generator: TaskListGenerator) -> Self {
        Self { generator }
    }

    /// Build the live provider client and pipeline from configuration.
    ///
    /// Fails with `ApiError::ConfigError` when the provider endpoint or key
    /// is missing, before any request is attempted.
    pub fn from_config(config: &TaskdraftConfig) -> Result<Self, ApiError> {
        let provider = config.resolve_provider()?;
        let client = ChatCompletionClient::new(provider)?;
        let generator = TaskListGenerator::new(Arc::new(client))
            .with_short_list_policy(config.generation.short_list_policy)
            .with_deadline(config.generation.deadline());
        Ok(Self::new(generator))
    }

    pub fn generator(&self) -> &TaskListGenerator {
        &self.generator
    }

    pub async fn generate_task_list(
        &self,
        request: &GenerationRequest,
    ) -> Result<TaskList, ApiError> {
        self.generator.generate_from_request(request).await
    }

    /// Handle a `POST /tasks/generate` body.
    pub async fn generate(&self, body: &Value) -> ApiResponse {
        let request = GenerationRequest::from_body(body);
        match self.generate_task_list(&request).await {
            Ok(task_list) => match serde_json::to_value(&task_list) {
                Ok(body) => ApiResponse { status: 200, body },
                Err(e) => ApiResponse::from(&ApiError::InvalidGeneration(e.to_string())),
            },
            Err(err) => {
                warn!(
                    status = err.http_status(),
                    retryable = err.is_retryable(),
                    error = %err,
                    "Task-list generation failed"
                );
                ApiResponse::from(&err)
            }
        }
    }
}
