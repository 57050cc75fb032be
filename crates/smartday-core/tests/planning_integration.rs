//! Integration tests for request validation and day planning.
//!
//! Requests go in as JSON, exactly as a caller would submit them, and the
//! serialized response is inspected.

use chrono::{NaiveDate, NaiveTime};
use smartday_core::{Config, DayScheduler, PlanRequest, PlanResponse, ValidationError};

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()
}

fn plan_json(json: &str) -> Result<PlanResponse, ValidationError> {
    let request: PlanRequest = serde_json::from_str(json).unwrap();
    let config = Config::default();
    DayScheduler::with_config(config.planner.scheduler_config()).plan_request(
        &request,
        config.planner.default_start(),
        today(),
    )
}

#[test]
fn test_single_high_priority_task() {
    let plan = plan_json(
        r#"{"available_hours": 4, "start_time": "09:00",
            "tasks": [{"name": "write report", "duration": 2, "priority": "high"}]}"#,
    )
    .unwrap();

    let json = serde_json::to_value(&plan).unwrap();
    assert_eq!(json["date"], "2026-10-19");
    assert_eq!(json["total_hours"], 4.0);
    assert_eq!(
        json["blocks"],
        serde_json::json!([
            {"start": "09:00", "end": "11:00", "task": "Write Report", "notes": null},
            {"start": "11:00", "end": "11:30", "task": "Wrap-up & Tomorrow Prep", "notes": "review & carry-over"}
        ])
    );
    assert_eq!(json["checklist"], serde_json::json!(["[ ] Write Report (2.0h)"]));
}

#[test]
fn test_evening_task_outside_window_is_dropped() {
    let plan = plan_json(
        r#"{"available_hours": 3, "start_time": "09:00",
            "tasks": [{"name": "yoga", "duration": 1, "constraint": "evening"}]}"#,
    )
    .unwrap();

    assert!(plan.checklist.is_empty());
    assert!(plan.blocks.iter().all(|b| b.task != "Yoga"));
}

#[test]
fn test_evening_task_inside_window() {
    let plan = plan_json(
        r#"{"available_hours": 3, "start_time": "15:00",
            "tasks": [{"name": "yoga", "duration": 1, "constraint": "evening"}]}"#,
    )
    .unwrap();

    assert_eq!(plan.blocks[0].start, "16:30");
    assert_eq!(plan.blocks[0].end, "17:30");
    assert_eq!(plan.blocks[0].notes.as_deref(), Some("constraint=evening"));
}

#[test]
fn test_break_after_three_hours() {
    let plan = plan_json(
        r#"{"available_hours": 5, "tasks": [
            {"name": "deep work", "duration": 3},
            {"name": "inbox", "duration": 0.5, "priority": "low"}
        ]}"#,
    )
    .unwrap();

    let labels: Vec<_> = plan.blocks.iter().map(|b| b.task.as_str()).collect();
    assert_eq!(
        labels,
        vec!["Deep Work", "Break", "Inbox", "Wrap-up & Tomorrow Prep"]
    );
    assert_eq!(plan.blocks[1].start, "12:00");
    assert_eq!(plan.blocks[1].end, "12:15");
    assert_eq!(plan.blocks[2].start, "12:15");
    assert_eq!(plan.checklist, vec!["[ ] Deep Work (3.0h)", "[ ] Inbox (0.5h)"]);
}

#[test]
fn test_tied_tasks_keep_input_order() {
    let plan = plan_json(
        r#"{"available_hours": 4, "tasks": [
            {"name": "alpha", "duration": 1.0, "priority": "medium"},
            {"name": "beta", "duration": 1.0, "priority": "medium"}
        ]}"#,
    )
    .unwrap();

    assert_eq!(plan.blocks[0].task, "Alpha");
    assert_eq!(plan.blocks[1].task, "Beta");
}

#[test]
fn test_mixed_day() {
    let plan = plan_json(
        r#"{"available_hours": 9, "start_time": "08:00", "tasks": [
            {"name": "review PRs", "duration": 1, "priority": "low"},
            {"name": "standup prep", "duration": 1, "constraint": "before:09:00"},
            {"name": "gym", "duration": 0.5, "constraint": "afternoon"},
            {"name": "design doc", "duration": 2, "priority": "high"}
        ]}"#,
    )
    .unwrap();

    let spans: Vec<_> = plan
        .blocks
        .iter()
        .map(|b| format!("{}-{} {}", b.start, b.end, b.task))
        .collect();
    assert_eq!(
        spans,
        vec![
            "08:00-09:00 Standup Prep",
            "12:00-12:30 Gym",
            "12:30-14:30 Design Doc",
            "14:30-14:45 Break",
            "14:45-15:45 Review Prs",
            "15:45-16:15 Wrap-up & Tomorrow Prep",
        ]
    );
    assert_eq!(plan.checklist.len(), 4);
}

#[test]
fn test_constrained_task_can_starve_later_ones() {
    // the unplaceable standup task probes all the way to the window end,
    // leaving no room for the rest
    let plan = plan_json(
        r#"{"available_hours": 9, "start_time": "08:00", "tasks": [
            {"name": "gym", "duration": 1, "constraint": "afternoon"},
            {"name": "standup prep", "duration": 0.5, "constraint": "before:09:00"},
            {"name": "design doc", "duration": 2, "priority": "high"}
        ]}"#,
    )
    .unwrap();

    assert_eq!(plan.checklist, vec!["[ ] Gym (1.0h)"]);
    assert_eq!(plan.blocks.len(), 1);
}

#[test]
fn test_default_start_comes_from_config() {
    let request: PlanRequest = serde_json::from_str(
        r#"{"available_hours": 2, "tasks": [{"name": "a", "duration": 1}]}"#,
    )
    .unwrap();
    let mut config = Config::default();
    config.set("planner.default_start_time", "07:30").unwrap();

    let plan = DayScheduler::new()
        .plan_request(&request, config.planner.default_start(), today())
        .unwrap();
    assert_eq!(plan.blocks[0].start, "07:30");
}

#[test]
fn test_validation_errors_name_fields() {
    let cases = [
        (r#"{"available_hours": 0, "tasks": []}"#, "available_hours"),
        (r#"{"available_hours": 4, "start_time": "9am", "tasks": []}"#, "start_time"),
        (
            r#"{"available_hours": 4, "tasks": [{"name": "a", "duration": -2}]}"#,
            "tasks[0].duration",
        ),
        (
            r#"{"available_hours": 4, "tasks": [{"name": "a", "duration": 1}, {"name": "b", "duration": 1, "priority": "asap"}]}"#,
            "tasks[1].priority",
        ),
        (
            r#"{"available_hours": 4, "tasks": [{"name": "a", "duration": 1, "constraint": "before:25:00"}]}"#,
            "tasks[0].constraint",
        ),
        (
            r#"{"available_hours": 4, "tasks": [{"name": "", "duration": 1}]}"#,
            "tasks[0].name",
        ),
    ];

    for (json, field) in cases {
        let err = plan_json(json).unwrap_err();
        assert_eq!(err.field(), field, "request: {json}");
    }
}

#[test]
fn test_date_is_injected() {
    let request = PlanRequest::new(1.0);
    let input = request
        .validate(NaiveTime::from_hms_opt(9, 0, 0).unwrap())
        .unwrap();
    let other_day = NaiveDate::from_ymd_opt(2030, 1, 1).unwrap();
    let plan = DayScheduler::new().plan(&input, other_day);
    assert_eq!(serde_json::to_value(&plan).unwrap()["date"], "2030-01-01");
}

#[test]
fn test_window_longer_than_a_day() {
    let plan = plan_json(
        r#"{"available_hours": 30, "start_time": "09:00", "tasks": [
            {"name": "a", "duration": 1},
            {"name": "night batch", "duration": 1, "constraint": "before:08:00"}]}"#,
    )
    .unwrap();

    let json = serde_json::to_value(&plan).unwrap();
    assert_eq!(json["total_hours"], 30.0);
    assert_eq!(
        json["blocks"],
        serde_json::json!([
            {"start": "00:00", "end": "01:00", "task": "Night Batch", "notes": "constraint=before:08:00"},
            {"start": "01:00", "end": "02:00", "task": "A", "notes": null},
            {"start": "02:00", "end": "02:30", "task": "Wrap-up & Tomorrow Prep", "notes": "review & carry-over"}
        ])
    );
}
