//! Environment source: TASKDRAFT_* variables plus the legacy OPENROUTER_* pair.
//!
//! Reads from an explicit variable map rather than the live process
//! environment, so loaders can be built with a fixed environment in tests.

use config::builder::DefaultState;
use config::ConfigBuilder;
use config::ConfigError;
use config::Environment;
use config::Map;

pub const ENV_PREFIX: &str = "TASKDRAFT";
pub const LEGACY_ENDPOINT_VAR: &str = "OPENROUTER_URL";
pub const LEGACY_API_KEY_VAR: &str = "OPENROUTER_API_KEY";

/// Add environment sources to builder.
///
/// `TASKDRAFT_PROVIDER__API_KEY` maps to `provider.api_key`. The legacy
/// variables are applied as overrides and win over every other layer.
pub fn add_to_builder(
    builder: ConfigBuilder<DefaultState>,
    vars: &Map<String, String>,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    let builder = builder.add_source(
        Environment::with_prefix(ENV_PREFIX)
            .prefix_separator("_")
            .separator("__")
            .source(Some(vars.clone())),
    );

    let legacy = |name: &str| {
        vars.get(name)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    };

    builder
        .set_override_option("provider.endpoint", legacy(LEGACY_ENDPOINT_VAR))?
        .set_override_option("provider.api_key", legacy(LEGACY_API_KEY_VAR))
}
