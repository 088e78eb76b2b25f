//! Presentation: text and JSON rendering of task lists and configuration.

use crate::config::TaskdraftConfig;
use crate::error::ApiError;
use crate::types::TaskList;

pub fn format_task_list_json(task_list: &TaskList) -> Result<String, ApiError> {
    serde_json::to_string_pretty(task_list)
        .map_err(|e| ApiError::InvalidGeneration(format!("Failed to render task list: {}", e)))
}

pub fn format_task_list_text(task_list: &TaskList) -> String {
    let mut output = String::new();
    for (index, item) in task_list.iter().enumerate() {
        output.push_str(&format!("{}. User story: {}\n", index + 1, item.user_story));
        output.push_str(&format!("   Engineering task: {}\n", item.engineering_task));
    }
    let placeholders = task_list.placeholder_count();
    if placeholders > 0 {
        output.push_str(&format!(
            "\n{} placeholder item(s) added; the model returned fewer than {}.\n",
            placeholders,
            task_list.len()
        ));
    }
    output
}

pub fn format_config_text(config: &TaskdraftConfig) -> String {
    let provider = &config.provider;
    let mut output = String::from("Provider:\n");
    output.push_str(&format!(
        "  endpoint: {}\n",
        provider.endpoint.as_deref().unwrap_or("(not set)")
    ));
    output.push_str(&format!("  api_key: {}\n", provider.api_key_status()));
    output.push_str(&format!("  model: {}\n", provider.model));
    output.push_str(&format!("  max_tokens: {}\n", provider.max_tokens));
    output.push_str(&format!("  temperature: {}\n", provider.temperature));
    output.push_str(&format!(
        "  timeouts: connect {}s, request {}s\n",
        provider.connect_timeout_secs, provider.request_timeout_secs
    ));

    output.push_str("\nGeneration:\n");
    output.push_str(&format!(
        "  short_list_policy: {:?}\n",
        config.generation.short_list_policy
    ));
    match config.generation.deadline_secs {
        Some(secs) => output.push_str(&format!("  deadline: {}s\n", secs)),
        None => output.push_str("  deadline: (none)\n"),
    }

    output.push_str("\nLogging:\n");
    output.push_str(&format!(
        "  level: {}, format: {}, output: {}\n",
        config.logging.level, config.logging.format, config.logging.output
    ));
    output
}
