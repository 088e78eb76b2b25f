//! A generated list becomes the editable task list of a saved task.

use super::test_utils::*;
use std::sync::Arc;
use taskdraft::error::ApiError;
use taskdraft::generation::TaskListGenerator;
use taskdraft::task::{Task, TaskUpdate};
use taskdraft::types::TaskListItem;
use wiremock::MockServer;

#[tokio::test]
async fn test_generated_list_becomes_task() {
    let server = MockServer::start().await;
    mount_content(&server, &items_json(4)).await;
    let list = TaskListGenerator::new(Arc::new(client_for(&server)))
        .generate_task_list("g", "u", "c")
        .await
        .unwrap();

    let mut task = Task::from_generated("t-1", "owner-1", " Rota app ", "Shift planning", list)
        .unwrap();
    assert_eq!(task.title, "Rota app");
    assert_eq!(task.task_list.len(), 5);
    assert!(task.task_list[4].is_placeholder());

    // The user replaces the placeholder before saving.
    let mut edited = task.task_list.clone();
    edited[4] = TaskListItem::new("As a manager I export rotas", "Add CSV export");
    task.apply(TaskUpdate {
        task_list: Some(edited),
        ..Default::default()
    })
    .unwrap();
    assert_eq!(task.task_list[4].engineering_task, "Add CSV export");
    assert!(task.updated_at >= task.created_at);

    let err = task
        .apply(TaskUpdate {
            title: Some("   ".into()),
            ..Default::default()
        })
        .unwrap_err();
    assert!(matches!(err, ApiError::InvalidTask(_)));
    assert_eq!(task.title, "Rota app");
}
