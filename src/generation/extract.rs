//! Tolerant extraction of a task-list array from raw model output.
//!
//! Model text is untrusted: it may wrap the JSON in commentary or a code
//! fence, return something that is not an array, or mix well-formed items
//! with junk. Extraction never errors; it salvages what it can and returns
//! `None` when nothing array-shaped is present.

use crate::types::TaskListItem;
use serde_json::Value;
use tracing::{debug, warn};

const FENCE: &str = "```";

/// Interior of the first fenced block in `text`, if a complete one exists.
///
/// The opening fence may carry a `json` tag. The interior is trimmed.
pub fn fenced_block(text: &str) -> Option<&str> {
    let open = text.find(FENCE)?;
    let after_open = &text[open + FENCE.len()..];
    let body = after_open.strip_prefix("json").unwrap_or(after_open).trim_start();
    let close = body.find(FENCE)?;
    Some(body[..close].trim())
}

/// Convert one parsed element into an item if it has both string fields.
/// Extra fields are discarded.
fn item_from_value(value: &Value) -> Option<TaskListItem> {
    let object = value.as_object()?;
    let user_story = object.get("userStory")?.as_str()?;
    let engineering_task = object.get("engineeringTask")?.as_str()?;
    Some(TaskListItem::new(user_story, engineering_task))
}

/// Extract the task-list items from raw model text.
///
/// Returns `None` when there is no text, when the (possibly fenced) text is
/// not valid JSON, or when the JSON is not an array. Otherwise returns the
/// well-shaped elements in their original order, possibly none.
pub fn extract_array(raw_text: Option<&str>) -> Option<Vec<TaskListItem>> {
    let text = raw_text?.trim();
    let candidate = fenced_block(text).unwrap_or(text);

    let parsed: Value = match serde_json::from_str(candidate) {
        Ok(value) => value,
        Err(e) => {
            debug!(error = %e, "Model output is not valid JSON");
            return None;
        }
    };

    let Value::Array(elements) = parsed else {
        debug!("Model output parsed but is not a JSON array");
        return None;
    };

    let items: Vec<TaskListItem> = elements.iter().filter_map(item_from_value).collect();
    let dropped = elements.len() - items.len();
    if dropped > 0 {
        warn!(
            dropped,
            kept = items.len(),
            "Dropped malformed task-list items from model output"
        );
    }
    Some(items)
}
