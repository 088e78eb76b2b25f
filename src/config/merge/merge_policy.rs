//! Merge rules: built-in defaults, applied beneath every other layer.

use crate::provider::profile::{
    DEFAULT_CONNECT_TIMEOUT_SECS, DEFAULT_MAX_TOKENS, DEFAULT_MODEL,
    DEFAULT_REQUEST_TIMEOUT_SECS, DEFAULT_TEMPERATURE,
};
use config::builder::DefaultState;
use config::Config;
use config::ConfigBuilder;
use config::ConfigError;

/// Create a Config builder with merge policy defaults applied.
pub fn builder_with_defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    Config::builder()
        .set_default("provider.model", DEFAULT_MODEL)?
        .set_default("provider.max_tokens", DEFAULT_MAX_TOKENS as i64)?
        .set_default("provider.temperature", DEFAULT_TEMPERATURE as f64)?
        .set_default("provider.request_timeout_secs", DEFAULT_REQUEST_TIMEOUT_SECS as i64)?
        .set_default("provider.connect_timeout_secs", DEFAULT_CONNECT_TIMEOUT_SECS as i64)?
        .set_default("generation.short_list_policy", "pad")
}
