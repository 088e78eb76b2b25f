//! Task entity shape owned by the CRUD layer.
//!
//! The generation pipeline never persists anything; its output only becomes
//! part of a `Task` here. Validation mirrors the stored schema: every text
//! field is trimmed and required, and the task list cannot be empty.

use crate::error::ApiError;
use crate::types::{TaskList, TaskListItem};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    pub owner: String,
    pub title: String,
    pub description: String,
    pub task_list: Vec<TaskListItem>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Partial update; `None` leaves a field as it is.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub task_list: Option<Vec<TaskListItem>>,
}

fn required_text(field: &str, value: &str) -> Result<String, ApiError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ApiError::InvalidTask(format!("{} is required", field)));
    }
    Ok(trimmed.to_string())
}

fn validate_task_list(items: Vec<TaskListItem>) -> Result<Vec<TaskListItem>, ApiError> {
    if items.is_empty() {
        return Err(ApiError::InvalidTask("taskList cannot be empty".to_string()));
    }
    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| {
            Ok(TaskListItem {
                user_story: required_text(&format!("taskList[{}].userStory", index), &item.user_story)?,
                engineering_task: required_text(
                    &format!("taskList[{}].engineeringTask", index),
                    &item.engineering_task,
                )?,
            })
        })
        .collect()
}

impl Task {
    pub fn new(
        id: impl Into<String>,
        owner: impl Into<String>,
        title: &str,
        description: &str,
        task_list: Vec<TaskListItem>,
    ) -> Result<Self, ApiError> {
        let owner = required_text("owner", &owner.into())?;
        let now = Utc::now();
        Ok(Self {
            id: id.into(),
            owner,
            title: required_text("title", title)?,
            description: required_text("description", description)?,
            task_list: validate_task_list(task_list)?,
            created_at: now,
            updated_at: now,
        })
    }

    /// Build a task whose list comes straight from the generation pipeline.
    pub fn from_generated(
        id: impl Into<String>,
        owner: impl Into<String>,
        title: &str,
        description: &str,
        task_list: TaskList,
    ) -> Result<Self, ApiError> {
        Self::new(id, owner, title, description, task_list.into_vec())
    }

    /// Apply a partial update. Nothing changes if any supplied field is invalid.
    pub fn apply(&mut self, update: TaskUpdate) -> Result<(), ApiError> {
        let title = update
            .title
            .as_deref()
            .map(|t| required_text("title", t))
            .transpose()?;
        let description = update
            .description
            .as_deref()
            .map(|d| required_text("description", d))
            .transpose()?;
        let task_list = update.task_list.map(validate_task_list).transpose()?;

        if title.is_none() && description.is_none() && task_list.is_none() {
            return Ok(());
        }
        if let Some(title) = title {
            self.title = title;
        }
        if let Some(description) = description {
            self.description = description;
        }
        if let Some(task_list) = task_list {
            self.task_list = task_list;
        }
        self.updated_at = Utc::now();
        Ok(())
    }
}
