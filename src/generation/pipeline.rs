//! Task-list generation pipeline: prompt, provider call, extraction, normalization.
//!
//! Each stage after the provider call degrades to `None` instead of failing;
//! this orchestrator is the only place that turns "no usable list" into a
//! typed error. Callers get exactly five items or an `ApiError`.

use crate::error::{ApiError, FailureClass};
use crate::generation::extract::extract_array;
use crate::generation::normalize::{normalize_with_policy, ShortListPolicy};
use crate::generation::prompt::{build_prompt, GenerationRequest};
use crate::provider::GenerationClient;
use crate::types::TaskList;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

/// Extract, normalize and length-check raw model output.
///
/// Fails with `ApiError::InvalidGeneration` when no complete list results.
pub fn task_list_from_output(
    raw_text: &str,
    policy: ShortListPolicy,
) -> Result<TaskList, ApiError> {
    let extracted = extract_array(Some(raw_text));
    if extracted.is_none() {
        warn!(
            content_chars = raw_text.len(),
            "No JSON array found in model output"
        );
    }

    normalize_with_policy(extracted, policy)
        .ok_or_else(|| {
            ApiError::InvalidGeneration("model output contained no usable task list".into())
        })
        .and_then(|items| {
            TaskList::try_from(items).map_err(|items| {
                ApiError::InvalidGeneration(format!(
                    "normalized task list has {} items",
                    items.len()
                ))
            })
        })
}

/// Drafts task lists through a generation client.
///
/// Holds no per-call state, so one instance can serve concurrent callers.
#[derive(Clone)]
pub struct TaskListGenerator {
    client: Arc<dyn GenerationClient>,
    short_list_policy: ShortListPolicy,
    deadline: Option<Duration>,
}

impl TaskListGenerator {
    pub fn new(client: Arc<dyn GenerationClient>) -> Self {
        Self {
            client,
            short_list_policy: ShortListPolicy::default(),
            deadline: None,
        }
    }

    pub fn with_short_list_policy(mut self, policy: ShortListPolicy) -> Self {
        self.short_list_policy = policy;
        self
    }

    /// Abandon the provider call after `deadline` and fail with a timeout.
    pub fn with_deadline(mut self, deadline: Option<Duration>) -> Self {
        self.deadline = deadline;
        self
    }

    /// Generate a five-item task list from the three free-text inputs.
    #[instrument(skip_all, fields(model = %self.client.model_name()))]
    pub async fn generate_task_list(
        &self,
        goal: &str,
        end_users: &str,
        constraints: &str,
    ) -> Result<TaskList, ApiError> {
        let prompt = build_prompt(goal, end_users, constraints);
        debug!(prompt_chars = prompt.len(), "Built generation prompt");

        let raw_text = self.call_provider(&prompt).await?;

        let task_list = task_list_from_output(&raw_text, self.short_list_policy)?;

        info!(
            placeholders = task_list.placeholder_count(),
            "Generated task list"
        );
        Ok(task_list)
    }

    /// Same as [`generate_task_list`](Self::generate_task_list), taking a parsed request.
    pub async fn generate_from_request(
        &self,
        request: &GenerationRequest,
    ) -> Result<TaskList, ApiError> {
        self.generate_task_list(&request.goal, &request.end_users, &request.constraints)
            .await
    }

    async fn call_provider(&self, prompt: &str) -> Result<String, ApiError> {
        let call = self.client.generate(prompt);
        match self.deadline {
            None => call.await,
            Some(deadline) => tokio::time::timeout(deadline, call).await.map_err(|_| {
                ApiError::generation_failed(
                    FailureClass::Timeout,
                    format!("no provider response within {}ms", deadline.as_millis()),
                )
            })?,
        }
    }
}
