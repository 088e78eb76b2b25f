//! Prompt construction for task-list generation.
//!
//! Inputs arrive loosely typed from the caller (any JSON value, possibly
//! missing) and are coerced to trimmed strings before being rendered into a
//! fixed template. Rendering is total and deterministic.

use crate::types::TASK_LIST_SIZE;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Rendered in place of an input that is missing or blank after trimming.
pub const EMPTY_FIELD: &str = "(none)";

/// The three free-text inputs a task list is drafted from.
///
/// Deserializes from a request body such as
/// `{"goal": "...", "endUsers": "...", "constraints": "..."}`. Every field is
/// optional and may hold any JSON type; `users` is accepted for `endUsers`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationRequest {
    #[serde(default, deserialize_with = "coerce_field")]
    pub goal: String,
    #[serde(default, alias = "users", deserialize_with = "coerce_field")]
    pub end_users: String,
    #[serde(default, deserialize_with = "coerce_field")]
    pub constraints: String,
}

impl GenerationRequest {
    pub fn new(
        goal: impl Into<String>,
        end_users: impl Into<String>,
        constraints: impl Into<String>,
    ) -> Self {
        Self {
            goal: goal.into(),
            end_users: end_users.into(),
            constraints: constraints.into(),
        }
    }

    /// Parse a request body. Anything that is not an object yields all-empty inputs.
    pub fn from_body(body: &Value) -> Self {
        match body {
            Value::Object(map) => Self {
                goal: map.get("goal").map(coerce_value).unwrap_or_default(),
                end_users: map
                    .get("endUsers")
                    .filter(|v| !v.is_null())
                    .or_else(|| map.get("users"))
                    .map(coerce_value)
                    .unwrap_or_default(),
                constraints: map.get("constraints").map(coerce_value).unwrap_or_default(),
            },
            _ => Self::default(),
        }
    }

    pub fn to_prompt(&self) -> String {
        build_prompt(&self.goal, &self.end_users, &self.constraints)
    }
}

/// Convert an arbitrary JSON value to its string form.
///
/// `null` becomes the empty string, strings are taken verbatim and every other
/// value is rendered as compact JSON text.
pub fn coerce_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn coerce_field<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(coerce_value(&value))
}

fn field_or_none(value: &str) -> &str {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        EMPTY_FIELD
    } else {
        trimmed
    }
}

/// Render the generation prompt for the three inputs.
pub fn build_prompt(goal: &str, end_users: &str, constraints: &str) -> String {
    format!(
        "Goal: {}\nEnd users: {}\nConstraints: {}\n\n\
         Return ONLY a JSON array of exactly {} objects. \
         Each object: \"userStory\" (string) and \"engineeringTask\" (string). \
         No other text.",
        field_or_none(goal),
        field_or_none(end_users),
        field_or_none(constraints),
        TASK_LIST_SIZE,
    )
}
