//! End-to-end pipeline tests against a mock chat-completions provider.

use super::test_utils::*;
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use taskdraft::error::{ApiError, FailureClass};
use taskdraft::generation::{ShortListPolicy, TaskListGenerator};
use taskdraft::provider::{ChatCompletionClient, GenerationClient, ResolvedProvider};
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn generator(server: &MockServer) -> TaskListGenerator {
    TaskListGenerator::new(Arc::new(client_for(server)))
}

#[tokio::test]
async fn test_fenced_five_items() {
    let server = MockServer::start().await;
    mount_content(&server, &format!("```json\n{}\n```", items_json(5))).await;

    let list = generator(&server)
        .generate_task_list("habit tracker", "students", "mobile only")
        .await
        .unwrap();

    assert_eq!(list.len(), 5);
    assert_eq!(list[0].user_story, "Story 1");
    assert_eq!(list[4].engineering_task, "Task 5");
    assert_eq!(list.placeholder_count(), 0);
}

#[tokio::test]
async fn test_request_carries_auth_and_prompt() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(COMPLETIONS_PATH))
        .and(header("authorization", "Bearer test-key"))
        .and(header("content-type", "application/json"))
        .and(body_partial_json(json!({
            "model": "openai/gpt-3.5-turbo",
            "max_tokens": 1024,
            "messages": [{"role": "user"}]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion_body(&items_json(5))))
        .expect(1)
        .mount(&server)
        .await;

    let list = generator(&server)
        .generate_task_list("goal", "users", "constraints")
        .await
        .unwrap();
    assert_eq!(list.len(), 5);

    let requests = server.received_requests().await.unwrap();
    let body: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
    let prompt = body["messages"][0]["content"].as_str().unwrap();
    assert!(prompt.starts_with("Goal: goal\nEnd users: users\nConstraints: constraints\n"));
}

#[tokio::test]
async fn test_short_list_is_padded() {
    let server = MockServer::start().await;
    mount_content(&server, &items_json(2)).await;

    let list = generator(&server)
        .generate_task_list("g", "u", "c")
        .await
        .unwrap();
    assert_eq!(list[1].user_story, "Story 2");
    assert_eq!(list.placeholder_count(), 3);
    assert!(list[2].is_placeholder());
}

#[tokio::test]
async fn test_short_list_rejected_under_reject_policy() {
    let server = MockServer::start().await;
    mount_content(&server, &items_json(2)).await;

    let err = generator(&server)
        .with_short_list_policy(ShortListPolicy::Reject)
        .generate_task_list("g", "u", "c")
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::InvalidGeneration(_)));
}

#[tokio::test]
async fn test_long_list_is_truncated() {
    let server = MockServer::start().await;
    mount_content(&server, &items_json(8)).await;

    let list = generator(&server)
        .generate_task_list("g", "u", "c")
        .await
        .unwrap();
    assert_eq!(list[4].user_story, "Story 5");
}

#[tokio::test]
async fn test_refusal_text_is_invalid_generation() {
    let server = MockServer::start().await;
    mount_content(&server, "I cannot help with that").await;

    let err = generator(&server)
        .generate_task_list("g", "u", "c")
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::InvalidGeneration(_)));
    assert_eq!(err.http_status(), 502);
    assert!(!err.is_retryable());
}

#[tokio::test]
async fn test_server_error_is_retryable_failure() {
    let server = MockServer::start().await;
    mount_response(&server, ResponseTemplate::new(500).set_body_string("upstream down")).await;

    let err = generator(&server)
        .generate_task_list("g", "u", "c")
        .await
        .unwrap_err();
    assert_eq!(err.failure_class(), Some(FailureClass::Status(500)));
    assert!(err.is_retryable());
    assert_eq!(err.http_status(), 500);
}

#[tokio::test]
async fn test_rate_limit_is_retryable() {
    let server = MockServer::start().await;
    mount_response(&server, ResponseTemplate::new(429)).await;

    let err = generator(&server)
        .generate_task_list("g", "u", "c")
        .await
        .unwrap_err();
    assert_eq!(err.failure_class(), Some(FailureClass::Status(429)));
    assert!(err.is_retryable());
}

#[tokio::test]
async fn test_unauthorized_is_not_retryable() {
    let server = MockServer::start().await;
    mount_response(
        &server,
        ResponseTemplate::new(401).set_body_json(json!({"error": {"message": "No auth credentials found"}})),
    )
    .await;

    let err = generator(&server)
        .generate_task_list("g", "u", "c")
        .await
        .unwrap_err();
    assert_eq!(err.failure_class(), Some(FailureClass::Status(401)));
    assert!(!err.is_retryable());
    assert!(err.to_string().contains("No auth credentials found"));
}

#[tokio::test]
async fn test_missing_content_is_invalid_generation() {
    let server = MockServer::start().await;
    mount_response(
        &server,
        ResponseTemplate::new(200).set_body_json(json!({"choices": []})),
    )
    .await;

    // The client reports empty text; the pipeline rejects it.
    let text = client_for(&server).generate("prompt").await.unwrap();
    assert_eq!(text, "");

    let err = generator(&server)
        .generate_task_list("g", "u", "c")
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::InvalidGeneration(_)));
}

#[tokio::test]
async fn test_slow_provider_times_out() {
    let server = MockServer::start().await;
    mount_response(
        &server,
        ResponseTemplate::new(200)
            .set_body_json(completion_body(&items_json(5)))
            .set_delay(Duration::from_secs(5)),
    )
    .await;

    let provider = ResolvedProvider::new(
        reqwest::Url::parse(&endpoint(&server)).unwrap(),
        secrecy::SecretString::from(TEST_API_KEY.to_string()),
    )
    .with_request_timeout(Duration::from_millis(200));
    let client = ChatCompletionClient::new(provider).unwrap();

    let err = TaskListGenerator::new(Arc::new(client))
        .generate_task_list("g", "u", "c")
        .await
        .unwrap_err();
    assert_eq!(err.failure_class(), Some(FailureClass::Timeout));
    assert!(err.is_retryable());
    assert_eq!(err.http_status(), 504);
}

#[tokio::test]
async fn test_unreachable_provider_is_transport_failure() {
    // Bind then release a port so nothing is listening on it.
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    let url = format!("http://{}{}", addr, COMPLETIONS_PATH);

    let provider = ResolvedProvider::new(
        reqwest::Url::parse(&url).unwrap(),
        secrecy::SecretString::from(TEST_API_KEY.to_string()),
    );
    let client = ChatCompletionClient::new(provider).unwrap();
    let err = client.generate("prompt").await.unwrap_err();
    assert_eq!(err.failure_class(), Some(FailureClass::Transport));
    assert!(err.is_retryable());
}
