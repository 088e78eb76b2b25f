//! Coerce a variable-length item list to the fixed task-list size.

use crate::types::{TaskListItem, TASK_LIST_SIZE};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// What to do with a non-empty list shorter than [`TASK_LIST_SIZE`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShortListPolicy {
    /// Fill the tail with `{TBD, TBD}` placeholders.
    #[default]
    Pad,
    /// Treat a short list as unusable.
    Reject,
}

/// Normalize with the default [`ShortListPolicy::Pad`] policy.
///
/// Returns `None` for a missing or empty list, the first five items of a
/// longer list, and a short list padded with placeholders otherwise.
pub fn normalize_to_five(items: Option<Vec<TaskListItem>>) -> Option<Vec<TaskListItem>> {
    normalize_with_policy(items, ShortListPolicy::Pad)
}

pub fn normalize_with_policy(
    items: Option<Vec<TaskListItem>>,
    policy: ShortListPolicy,
) -> Option<Vec<TaskListItem>> {
    let mut items = items.filter(|items| !items.is_empty())?;

    if items.len() >= TASK_LIST_SIZE {
        items.truncate(TASK_LIST_SIZE);
        return Some(items);
    }

    let missing = TASK_LIST_SIZE - items.len();
    match policy {
        ShortListPolicy::Pad => {
            warn!(
                generated = items.len(),
                padded = missing,
                "Model returned a short task list; padding with placeholders"
            );
            items.extend(std::iter::repeat_with(TaskListItem::placeholder).take(missing));
            Some(items)
        }
        ShortListPolicy::Reject => {
            warn!(
                generated = items.len(),
                "Model returned a short task list; rejecting"
            );
            None
        }
    }
}
