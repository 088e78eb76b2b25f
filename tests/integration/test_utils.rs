//! Shared helpers: a mock chat-completions provider and canned model outputs.

use reqwest::Url;
use secrecy::SecretString;
use serde_json::{json, Value};
use taskdraft::provider::{ChatCompletionClient, ResolvedProvider};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const COMPLETIONS_PATH: &str = "/v1/chat/completions";
pub const TEST_API_KEY: &str = "test-key";

/// Chat-completions success body whose first choice carries `content`.
pub fn completion_body(content: &str) -> Value {
    json!({
        "id": "gen-1",
        "object": "chat.completion",
        "choices": [{
            "index": 0,
            "message": {"role": "assistant", "content": content},
            "finish_reason": "stop"
        }]
    })
}

/// JSON array text of `n` numbered items.
pub fn items_json(n: usize) -> String {
    let items: Vec<Value> = (1..=n)
        .map(|i| json!({"userStory": format!("Story {}", i), "engineeringTask": format!("Task {}", i)}))
        .collect();
    Value::Array(items).to_string()
}

pub fn endpoint(server: &MockServer) -> String {
    format!("{}{}", server.uri(), COMPLETIONS_PATH)
}

pub fn client_for(server: &MockServer) -> ChatCompletionClient {
    let provider = ResolvedProvider::new(
        Url::parse(&endpoint(server)).unwrap(),
        SecretString::from(TEST_API_KEY.to_string()),
    );
    ChatCompletionClient::new(provider).unwrap()
}

/// Mount a single POST response on the completions path.
pub async fn mount_response(server: &MockServer, response: ResponseTemplate) {
    Mock::given(method("POST"))
        .and(path(COMPLETIONS_PATH))
        .respond_with(response)
        .mount(server)
        .await;
}

pub async fn mount_content(server: &MockServer, content: &str) {
    mount_response(
        server,
        ResponseTemplate::new(200).set_body_json(completion_body(content)),
    )
    .await;
}
