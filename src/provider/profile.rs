//! Provider profile: configured endpoint, credentials and sampling settings.
//!
//! `ProviderConfig` is what the configuration layers deserialize into; it may
//! be incomplete. `ResolvedProvider` is the validated value a client is built
//! from, so a client never has to look at the process environment.

use crate::error::ApiError;
use reqwest::Url;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use std::time::Duration;

pub const DEFAULT_MODEL: &str = "openai/gpt-3.5-turbo";
pub const DEFAULT_MAX_TOKENS: u32 = 1024;
pub const DEFAULT_TEMPERATURE: f32 = 0.5;
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 120;
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

/// Provider settings as loaded from configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ProviderConfig {
    /// Full chat-completions URL (e.g. `https://openrouter.ai/api/v1/chat/completions`)
    #[serde(default)]
    pub endpoint: Option<String>,

    /// Bearer token sent with every request
    #[serde(default)]
    pub api_key: Option<SecretString>,

    #[serde(default = "default_model")]
    pub model: String,

    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// Sampling temperature, 0.0-2.0. Kept low so output stays parseable.
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

fn default_max_tokens() -> u32 {
    DEFAULT_MAX_TOKENS
}

fn default_temperature() -> f32 {
    DEFAULT_TEMPERATURE
}

fn default_request_timeout_secs() -> u64 {
    DEFAULT_REQUEST_TIMEOUT_SECS
}

fn default_connect_timeout_secs() -> u64 {
    DEFAULT_CONNECT_TIMEOUT_SECS
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            endpoint: None,
            api_key: None,
            model: default_model(),
            max_tokens: default_max_tokens(),
            temperature: default_temperature(),
            request_timeout_secs: default_request_timeout_secs(),
            connect_timeout_secs: default_connect_timeout_secs(),
        }
    }
}

/// A provider profile with every required value present and checked.
#[derive(Debug, Clone)]
pub struct ResolvedProvider {
    pub endpoint: Url,
    pub api_key: SecretString,
    pub model: String,
    pub max_tokens: u32,
    pub temperature: f32,
    pub request_timeout: Duration,
    pub connect_timeout: Duration,
}

impl ResolvedProvider {
    /// Profile with default model and sampling settings.
    pub fn new(endpoint: Url, api_key: SecretString) -> Self {
        Self {
            endpoint,
            api_key,
            model: default_model(),
            max_tokens: default_max_tokens(),
            temperature: default_temperature(),
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            connect_timeout: Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS),
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }
}

impl ProviderConfig {
    /// Every problem with this profile, empty when it can be resolved.
    pub fn problems(&self) -> Vec<String> {
        let mut problems = Vec::new();

        match self.endpoint.as_deref().map(str::trim) {
            None | Some("") => problems.push("Provider endpoint is not configured".to_string()),
            Some(endpoint) => {
                if let Err(e) = parse_endpoint(endpoint) {
                    problems.push(e);
                }
            }
        }

        let key_missing = self
            .api_key
            .as_ref()
            .map(|key| key.expose_secret().trim().is_empty())
            .unwrap_or(true);
        if key_missing {
            problems.push("Provider API key is not configured".to_string());
        }

        if self.model.trim().is_empty() {
            problems.push("Model cannot be empty".to_string());
        }
        if self.max_tokens == 0 {
            problems.push("max_tokens must be greater than zero".to_string());
        }
        if !(0.0..=2.0).contains(&self.temperature) {
            problems.push(format!(
                "temperature must be between 0.0 and 2.0, got {}",
                self.temperature
            ));
        }
        if self.request_timeout_secs == 0 {
            problems.push("request_timeout_secs must be greater than zero".to_string());
        }
        if self.connect_timeout_secs == 0 {
            problems.push("connect_timeout_secs must be greater than zero".to_string());
        }

        problems
    }

    pub fn validate(&self) -> Result<(), String> {
        let problems = self.problems();
        if problems.is_empty() {
            Ok(())
        } else {
            Err(problems.join("; "))
        }
    }

    /// Produce the value a generation client is built from.
    pub fn resolve(&self) -> Result<ResolvedProvider, ApiError> {
        self.validate().map_err(ApiError::ConfigError)?;

        let endpoint = self
            .endpoint
            .as_deref()
            .map(str::trim)
            .ok_or_else(|| ApiError::ConfigError("Provider endpoint is not configured".into()))?;
        let endpoint = parse_endpoint(endpoint).map_err(ApiError::ConfigError)?;
        let api_key = self
            .api_key
            .clone()
            .ok_or_else(|| ApiError::ConfigError("Provider API key is not configured".into()))?;

        Ok(ResolvedProvider {
            endpoint,
            api_key,
            model: self.model.trim().to_string(),
            max_tokens: self.max_tokens,
            temperature: self.temperature,
            request_timeout: Duration::from_secs(self.request_timeout_secs),
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
        })
    }

    /// Whether an API key is present, for display without revealing it.
    pub fn api_key_status(&self) -> &'static str {
        match &self.api_key {
            Some(key) if !key.expose_secret().trim().is_empty() => "set (redacted)",
            _ => "not set",
        }
    }
}

fn parse_endpoint(endpoint: &str) -> Result<Url, String> {
    let url = Url::parse(endpoint)
        .map_err(|e| format!("Invalid provider endpoint '{}': {}", endpoint, e))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(format!(
            "Invalid provider endpoint '{}': unsupported scheme '{}'",
            endpoint, other
        )),
    }
}
