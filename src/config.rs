//! Configuration System
//!
//! Layered configuration for the provider, the generation policy and logging.
//! Layers, lowest precedence first: built-in defaults, global file, workspace
//! files (or one explicit file), `TASKDRAFT_*` environment, legacy
//! `OPENROUTER_*` variables.

use crate::error::ApiError;
use crate::generation::ShortListPolicy;
use crate::logging::LoggingConfig;
use crate::provider::{ProviderConfig, ResolvedProvider};
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;

mod facade;
mod merge;
mod sources;

pub use facade::ConfigLoader;
pub use sources::environment::{ENV_PREFIX, LEGACY_API_KEY_VAR, LEGACY_ENDPOINT_VAR};
pub use sources::global_file::global_config_path;

/// Root configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TaskdraftConfig {
    #[serde(default)]
    pub provider: ProviderConfig,

    #[serde(default)]
    pub generation: GenerationConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Pipeline policy
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GenerationConfig {
    /// pad (default) or reject
    #[serde(default)]
    pub short_list_policy: ShortListPolicy,

    /// Overall time allowed for one provider call, on top of the HTTP timeout
    #[serde(default)]
    pub deadline_secs: Option<u64>,
}

impl GenerationConfig {
    pub fn deadline(&self) -> Option<Duration> {
        self.deadline_secs.map(Duration::from_secs)
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.deadline_secs == Some(0) {
            return Err("deadline_secs must be greater than zero".to_string());
        }
        Ok(())
    }
}

/// Configuration validation errors
#[derive(Debug, Clone)]
pub enum ValidationError {
    Provider(String),
    Generation(String),
    Logging(String),
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::Provider(msg) => write!(f, "Provider: {}", msg),
            ValidationError::Generation(msg) => write!(f, "Generation: {}", msg),
            ValidationError::Logging(msg) => write!(f, "Logging: {}", msg),
        }
    }
}

impl std::error::Error for ValidationError {}

impl TaskdraftConfig {
    /// Validate the entire configuration
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors: Vec<ValidationError> = self
            .provider
            .problems()
            .into_iter()
            .map(ValidationError::Provider)
            .collect();

        if let Err(e) = self.generation.validate() {
            errors.push(ValidationError::Generation(e));
        }
        if let Err(e) = self.logging.validate() {
            errors.push(ValidationError::Logging(e));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Resolve the provider profile, failing with a configuration error.
    pub fn resolve_provider(&self) -> Result<ResolvedProvider, ApiError> {
        self.provider.resolve()
    }

    /// Effective configuration with the API key redacted.
    pub fn redacted_json(&self) -> serde_json::Value {
        json!({
            "provider": {
                "endpoint": self.provider.endpoint,
                "api_key": self.provider.api_key_status(),
                "model": self.provider.model,
                "max_tokens": self.provider.max_tokens,
                "temperature": self.provider.temperature,
                "request_timeout_secs": self.provider.request_timeout_secs,
                "connect_timeout_secs": self.provider.connect_timeout_secs,
            },
            "generation": {
                "short_list_policy": self.generation.short_list_policy,
                "deadline_secs": self.generation.deadline_secs,
            },
            "logging": self.logging,
        })
    }
}

/// Join validation errors into one configuration error.
pub fn validation_failure(errors: &[ValidationError]) -> ApiError {
    let error_msgs: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
    ApiError::ConfigError(format!(
        "Configuration validation failed:\n{}",
        error_msgs.join("\n")
    ))
}
