//! Tests that drive the built `taskdraft` binary.

use super::test_utils::*;
use std::path::Path;
use std::process::{Command, Output};
use wiremock::MockServer;

/// Run the binary with a clean environment plus `vars`.
fn run(workspace: &Path, vars: &[(&str, String)], args: &[&str]) -> Output {
    let mut command = Command::new(env!("CARGO_BIN_EXE_taskdraft"));
    command
        .env_clear()
        .arg("--quiet")
        .arg("--workspace")
        .arg(workspace)
        .args(args);
    for (key, value) in vars {
        command.env(key, value);
    }
    command.output().unwrap()
}

#[tokio::test(flavor = "multi_thread")]
async fn test_generate_prints_json_array() {
    let server = MockServer::start().await;
    mount_content(&server, &format!("```json\n{}\n```", items_json(3))).await;
    let temp = tempfile::TempDir::new().unwrap();
    let workspace = temp.path().to_path_buf();
    let vars = vec![
        ("OPENROUTER_URL", endpoint(&server)),
        ("OPENROUTER_API_KEY", TEST_API_KEY.to_string()),
    ];

    let output = tokio::task::spawn_blocking(move || {
        run(
            &workspace,
            &vars,
            &["generate", "--goal", "g", "--end-users", "u", "--constraints", "c"],
        )
    })
    .await
    .unwrap();

    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let items = value.as_array().unwrap();
    assert_eq!(items.len(), 5);
    assert_eq!(items[0]["userStory"], "Story 1");
    assert_eq!(items[3]["userStory"], "TBD");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_generate_strict_fails_on_short_list() {
    let server = MockServer::start().await;
    mount_content(&server, &items_json(3)).await;
    let temp = tempfile::TempDir::new().unwrap();
    let workspace = temp.path().to_path_buf();
    let vars = vec![
        ("OPENROUTER_URL", endpoint(&server)),
        ("OPENROUTER_API_KEY", TEST_API_KEY.to_string()),
    ];

    let output = tokio::task::spawn_blocking(move || {
        run(&workspace, &vars, &["generate", "--goal", "g", "--strict"])
    })
    .await
    .unwrap();

    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Invalid or incomplete task list"));
}

#[test]
fn test_generate_without_provider_explains_setup() {
    let temp = tempfile::TempDir::new().unwrap();
    let output = run(temp.path(), &[], &["generate", "--goal", "g"]);

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Configuration error"));
    assert!(stderr.contains("OPENROUTER_URL"));
}

#[test]
fn test_extract_text_output() {
    let temp = tempfile::TempDir::new().unwrap();
    let input = temp.path().join("raw.txt");
    std::fs::write(&input, items_json(5)).unwrap();

    let output = run(
        temp.path(),
        &[],
        &["extract", "--input", input.to_str().unwrap(), "--format", "text"],
    );

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.starts_with("1. User story: Story 1\n"));
    assert!(stdout.contains("5. User story: Story 5"));
}

#[test]
fn test_config_show_redacts_key() {
    let temp = tempfile::TempDir::new().unwrap();
    let output = run(
        temp.path(),
        &[("OPENROUTER_API_KEY", "sk-or-secret".to_string())],
        &["config", "show"],
    );

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("api_key: set (redacted)"));
    assert!(!stdout.contains("sk-or-secret"));
}
