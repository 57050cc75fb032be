//! Basic CLI tests.
//!
//! Tests run the compiled `smartday` binary against a throwaway config file
//! and verify outputs.

mod common;

use common::{assert_contains, parse_json, run_cli_failure, run_cli_success};

const REPORT_REQUEST: &str = r#"{
    "available_hours": 4,
    "start_time": "09:00",
    "tasks": [{"name": "write report", "duration": 2, "priority": "high"}]
}"#;

fn config_dir() -> (tempfile::TempDir, std::path::PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    (dir, path)
}

#[test]
fn test_health() {
    let (_dir, config) = config_dir();
    let out = run_cli_success(&config, &["health"], None);
    let json = parse_json(&out);
    assert_eq!(json["status"], "ok");
    assert_eq!(json["version"], "0.1.0");
}

#[test]
fn test_plan_from_stdin() {
    let (_dir, config) = config_dir();
    let out = run_cli_success(&config, &["plan", "--date", "2026-10-19"], Some(REPORT_REQUEST));
    let json = parse_json(&out);
    assert_eq!(json["date"], "2026-10-19");
    assert_eq!(json["total_hours"], 4.0);
    assert_eq!(json["blocks"][0]["task"], "Write Report");
    assert_eq!(json["blocks"][1]["task"], "Wrap-up & Tomorrow Prep");
    assert_eq!(json["checklist"], serde_json::json!(["[ ] Write Report (2.0h)"]));
}

#[test]
fn test_plan_from_file_as_text() {
    let (dir, config) = config_dir();
    let request = dir.path().join("request.json");
    std::fs::write(&request, REPORT_REQUEST).unwrap();

    let out = run_cli_success(
        &config,
        &[
            "plan",
            request.to_str().unwrap(),
            "--date",
            "2026-10-19",
            "--format",
            "text",
        ],
        None,
    );
    assert_contains(&out, "Plan for 2026-10-19 (4.0h available)");
    assert_contains(&out, "09:00-11:00  Write Report");
    assert_contains(&out, "[ ] Write Report (2.0h)");
}

#[test]
fn test_plan_uses_configured_default_start() {
    let (_dir, config) = config_dir();
    run_cli_success(&config, &["config", "set", "planner.default_start_time", "10:00"], None);

    let out = run_cli_success(
        &config,
        &["plan", "--date", "2026-10-19"],
        Some(r#"{"available_hours": 2, "tasks": [{"name": "a", "duration": 1}]}"#),
    );
    assert_eq!(parse_json(&out)["blocks"][0]["start"], "10:00");
}

#[test]
fn test_unreadable_config_warns_and_uses_defaults() {
    let (_dir, config) = config_dir();
    std::fs::write(&config, "[planner]\nbreak_minutes = 9223372036854775807\n").unwrap();

    let (stdout, stderr, code) =
        common::run_cli(&config, &["plan", "--date", "2026-10-19"], Some(REPORT_REQUEST));
    assert_eq!(code, 0, "stderr: {stderr}");
    assert_contains(&stderr, "falling back to default config");
    assert_eq!(parse_json(&stdout)["blocks"][0]["end"], "11:00");
}

#[test]
fn test_plan_rejects_invalid_request() {
    let (_dir, config) = config_dir();
    let (_, stderr, code) = run_cli_failure(
        &config,
        &["plan"],
        Some(r#"{"available_hours": 4, "tasks": [{"name": "a", "duration": 0}]}"#),
    );
    assert_eq!(code, 1);
    assert_contains(&stderr, "tasks[0].duration");
}

#[test]
fn test_plan_rejects_malformed_json() {
    let (_dir, config) = config_dir();
    let (_, stderr, _) = run_cli_failure(&config, &["plan"], Some("{not json"));
    assert_contains(&stderr, "error:");
}

#[test]
fn test_config_set_and_get() {
    let (_dir, config) = config_dir();
    assert_eq!(
        run_cli_success(&config, &["config", "get", "planner.break_minutes"], None).trim(),
        "15"
    );
    run_cli_success(&config, &["config", "set", "planner.break_minutes", "20"], None);
    assert_eq!(
        run_cli_success(&config, &["config", "get", "planner.break_minutes"], None).trim(),
        "20"
    );
}

#[test]
fn test_config_rejects_unknown_key() {
    let (_dir, config) = config_dir();
    run_cli_failure(&config, &["config", "set", "planner.nope", "1"], None);
    run_cli_failure(&config, &["config", "get", "planner.nope"], None);
}

#[test]
fn test_config_path_and_reset() {
    let (_dir, config) = config_dir();
    let out = run_cli_success(&config, &["config", "path"], None);
    assert_eq!(out.trim(), config.to_str().unwrap());

    run_cli_success(&config, &["config", "set", "server.bind", "0.0.0.0:9999"], None);
    run_cli_success(&config, &["config", "reset"], None);
    let out = run_cli_success(&config, &["config", "list"], None);
    assert_eq!(parse_json(&out)["server"]["bind"], "127.0.0.1:8000");
}

#[test]
fn test_completions() {
    let (_dir, config) = config_dir();
    let out = run_cli_success(&config, &["completions", "bash"], None);
    assert_contains(&out, "smartday");
}
