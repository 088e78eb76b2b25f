//! Core value types shared by the generation pipeline and the task entity.

use serde::{Deserialize, Serialize};
use std::ops::Deref;

/// Number of items every generated task list carries.
pub const TASK_LIST_SIZE: usize = 5;

/// Text used for both fields of a padding item.
pub const PLACEHOLDER_TEXT: &str = "TBD";

/// One user-story / engineering-task pair.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskListItem {
    pub user_story: String,
    pub engineering_task: String,
}

impl TaskListItem {
    pub fn new(user_story: impl Into<String>, engineering_task: impl Into<String>) -> Self {
        Self {
            user_story: user_story.into(),
            engineering_task: engineering_task.into(),
        }
    }

    /// A fresh `{TBD, TBD}` item used to pad short lists.
    pub fn placeholder() -> Self {
        Self::new(PLACEHOLDER_TEXT, PLACEHOLDER_TEXT)
    }

    pub fn is_placeholder(&self) -> bool {
        self.user_story == PLACEHOLDER_TEXT && self.engineering_task == PLACEHOLDER_TEXT
    }
}

/// A task list of exactly [`TASK_LIST_SIZE`] items.
///
/// Serializes as a plain JSON array. The length is enforced by the type, so a
/// value of this type is always a complete pipeline result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskList([TaskListItem; TASK_LIST_SIZE]);

impl TaskList {
    pub fn into_vec(self) -> Vec<TaskListItem> {
        self.0.into()
    }

    /// Number of padding items at the tail of the list.
    pub fn placeholder_count(&self) -> usize {
        self.0.iter().rev().take_while(|item| item.is_placeholder()).count()
    }
}

impl TryFrom<Vec<TaskListItem>> for TaskList {
    type Error = Vec<TaskListItem>;

    /// Fails with the original vector when its length is not [`TASK_LIST_SIZE`].
    fn try_from(items: Vec<TaskListItem>) -> Result<Self, Self::Error> {
        <[TaskListItem; TASK_LIST_SIZE]>::try_from(items).map(TaskList)
    }
}

impl Deref for TaskList {
    type Target = [TaskListItem];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl IntoIterator for TaskList {
    type Item = TaskListItem;
    type IntoIter = std::array::IntoIter<TaskListItem, TASK_LIST_SIZE>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}
