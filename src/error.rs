//! Error types for the task-list drafting system.

use std::fmt;
use thiserror::Error;

/// How a failed provider call failed.
///
/// Carries the provider's HTTP status when there was one. Transport failures
/// (connection refused, DNS, reset) and timeouts have no status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureClass {
    Status(u16),
    Timeout,
    Transport,
}

impl FailureClass {
    /// Whether a caller may reasonably retry after this failure.
    pub fn is_retryable(&self) -> bool {
        match self {
            FailureClass::Status(status) => *status >= 500 || *status == 408 || *status == 429,
            FailureClass::Timeout | FailureClass::Transport => true,
        }
    }
}

impl fmt::Display for FailureClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureClass::Status(status) => write!(f, "status {}", status),
            FailureClass::Timeout => write!(f, "timeout"),
            FailureClass::Transport => write!(f, "transport"),
        }
    }
}

/// API-level errors surfaced to callers of the generation pipeline.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("AI generation failed ({class}): {message}")]
    GenerationFailed { class: FailureClass, message: String },

    #[error("Invalid or incomplete task list from AI: {0}")]
    InvalidGeneration(String),

    #[error("Invalid task: {0}")]
    InvalidTask(String),

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

impl ApiError {
    pub fn generation_failed(class: FailureClass, message: impl Into<String>) -> Self {
        ApiError::GenerationFailed {
            class,
            message: message.into(),
        }
    }

    /// Failure classification, for `GenerationFailed` only.
    pub fn failure_class(&self) -> Option<FailureClass> {
        match self {
            ApiError::GenerationFailed { class, .. } => Some(*class),
            _ => None,
        }
    }

    /// Only provider failures with a transient classification are retryable.
    /// Bad content is not expected to self-correct without a new prompt.
    pub fn is_retryable(&self) -> bool {
        self.failure_class()
            .map(|class| class.is_retryable())
            .unwrap_or(false)
    }

    /// HTTP status a web layer should answer with for this error.
    pub fn http_status(&self) -> u16 {
        match self {
            ApiError::ConfigError(_) => 500,
            ApiError::GenerationFailed { class, .. } => match class {
                FailureClass::Status(status) if (400..600).contains(status) => *status,
                FailureClass::Status(_) => 502,
                FailureClass::Timeout => 504,
                FailureClass::Transport => 502,
            },
            ApiError::InvalidGeneration(_) => 502,
            ApiError::InvalidTask(_) => 400,
            ApiError::IoError(_) => 500,
        }
    }
}

impl From<config::ConfigError> for ApiError {
    fn from(err: config::ConfigError) -> Self {
        ApiError::ConfigError(err.to_string())
    }
}
