//! CLI output: error mapping from domain errors to stable CLI surface.

use crate::config::{LEGACY_API_KEY_VAR, LEGACY_ENDPOINT_VAR};
use crate::error::ApiError;

/// Map domain/service errors to a string for CLI output.
pub fn map_error(e: &ApiError) -> String {
    match e {
        ApiError::ConfigError(_) => format!(
            "{}\nSet [provider] endpoint and api_key in config/config.toml, \
             or export {} and {}.",
            e, LEGACY_ENDPOINT_VAR, LEGACY_API_KEY_VAR
        ),
        ApiError::GenerationFailed { .. } if e.is_retryable() => {
            format!("{} (transient; retrying later may succeed)", e)
        }
        _ => e.to_string(),
    }
}
