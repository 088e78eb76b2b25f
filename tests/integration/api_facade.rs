//! Caller-facing facade: request bodies in, status and JSON body out.

use super::test_utils::*;
use serde_json::json;
use std::sync::Arc;
use taskdraft::api::TaskDraftApi;
use taskdraft::config::ConfigLoader;
use taskdraft::generation::TaskListGenerator;
use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_generate_returns_plain_array() {
    let server = MockServer::start().await;
    mount_content(&server, &format!("Here you go:\n```\n{}\n```", items_json(5))).await;
    let api = TaskDraftApi::new(TaskListGenerator::new(Arc::new(client_for(&server))));

    let response = api
        .generate(&json!({"goal": "g", "endUsers": "u", "constraints": "c"}))
        .await;

    assert_eq!(response.status, 200);
    assert!(response.is_success());
    let items = response.body.as_array().unwrap();
    assert_eq!(items.len(), 5);
    assert_eq!(items[2], json!({"userStory": "Story 3", "engineeringTask": "Task 3"}));
}

#[tokio::test]
async fn test_users_alias_reaches_prompt() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(COMPLETIONS_PATH))
        .and(body_string_contains("End users: night-shift nurses"))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion_body(&items_json(5))))
        .expect(1)
        .mount(&server)
        .await;
    let api = TaskDraftApi::new(TaskListGenerator::new(Arc::new(client_for(&server))));

    let response = api
        .generate(&json!({"goal": "rota app", "users": "night-shift nurses"}))
        .await;
    assert_eq!(response.status, 200);
}

#[tokio::test]
async fn test_failures_map_to_error_body() {
    let server = MockServer::start().await;
    mount_response(&server, ResponseTemplate::new(503)).await;
    let api = TaskDraftApi::new(TaskListGenerator::new(Arc::new(client_for(&server))));

    let response = api.generate(&json!({"goal": "g"})).await;
    assert_eq!(response.status, 503);
    assert_eq!(response.body["success"], false);
    assert!(response.body["message"]
        .as_str()
        .unwrap()
        .contains("AI generation failed"));
}

#[tokio::test]
async fn test_invalid_output_maps_to_bad_gateway() {
    let server = MockServer::start().await;
    mount_content(&server, "[]").await;
    let api = TaskDraftApi::new(TaskListGenerator::new(Arc::new(client_for(&server))));

    let response = api.generate(&json!("not an object")).await;
    assert_eq!(response.status, 502);
    assert_eq!(response.body["success"], false);
}

#[tokio::test]
async fn test_from_config_uses_legacy_environment() {
    let server = MockServer::start().await;
    mount_content(&server, &items_json(5)).await;
    let temp = tempfile::TempDir::new().unwrap();

    let config = ConfigLoader::with_env([
        ("OPENROUTER_URL", endpoint(&server)),
        ("OPENROUTER_API_KEY", TEST_API_KEY.to_string()),
    ])
    .load(temp.path())
    .unwrap();
    let api = TaskDraftApi::from_config(&config).unwrap();

    let response = api.generate(&json!({"goal": "g"})).await;
    assert_eq!(response.status, 200);
}

#[test]
fn test_from_config_without_provider_fails_early() {
    let temp = tempfile::TempDir::new().unwrap();
    let config = ConfigLoader::with_env(Vec::<(String, String)>::new())
        .load(temp.path())
        .unwrap();
    let err = TaskDraftApi::from_config(&config).err().unwrap();
    assert_eq!(err.http_status(), 500);
}
