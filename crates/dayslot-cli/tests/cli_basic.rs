//! Basic CLI E2E tests.
//!
//! Tests run the built `dayslot` binary against a plan file in a temporary
//! home directory.

mod common;

use common::Sandbox;

fn spans(intervals: &serde_json::Value) -> Vec<(String, String)> {
    intervals
        .as_array()
        .unwrap()
        .iter()
        .map(|i| {
            (
                i["start"].as_str().unwrap().to_string(),
                i["end"].as_str().unwrap().to_string(),
            )
        })
        .collect()
}

#[test]
fn slots_on_a_weekday() {
    let sb = Sandbox::new();
    let plan = sb.plan();
    let json = sb.run_json(&["slots", "--plan", &plan, "--day", "monday", "--json"]);
    assert_eq!(
        spans(&json),
        vec![
            ("06:00".to_string(), "08:30".to_string()),
            ("17:30".to_string(), "23:00".to_string()),
        ]
    );
    assert_eq!(json[0]["energy_level"], "high");
    assert_eq!(json[0]["buffer_after"], 30);
    assert_eq!(json[1]["buffer_before"], 30);
}

#[test]
fn weekly_obligation_only_applies_on_its_day() {
    let sb = Sandbox::new();
    let plan = sb.plan();
    let json = sb.run_json(&["slots", "--plan", &plan, "--day", "friday", "--json"]);
    assert_eq!(
        spans(&json),
        vec![
            ("06:00".to_string(), "08:30".to_string()),
            ("19:15".to_string(), "23:00".to_string()),
        ]
    );
}

#[test]
fn slots_text_output() {
    let sb = Sandbox::new();
    let plan = sb.plan();
    let out = sb.run_success(&["slots", "--plan", &plan, "--day", "monday"]);
    assert!(out.contains("06:00-08:30"));
    assert!(out.contains("17:30-23:00"));
}

#[test]
fn plan_places_every_subtask() {
    let sb = Sandbox::new();
    let plan = sb.plan();
    let json = sb.run_json(&["plan", "--plan", &plan, "--date", "2024-03-04", "--json"]);

    assert_eq!(json["date"], "2024-03-04");
    assert_eq!(json["day"], "monday");
    assert_eq!(json["unplaced"].as_array().unwrap().len(), 0);

    let slots = json["slots"].as_array().unwrap();
    let order: Vec<_> = slots.iter().map(|s| s["subtask_id"].as_str().unwrap()).collect();
    assert_eq!(order, vec!["sort", "sweep", "c1", "c2"]);
    assert_eq!(slots[0]["start_time"], "06:00");
    assert_eq!(slots[1]["start_time"], "06:55");
    assert_eq!(slots[2]["start_time"], "17:30");
    assert_eq!(slots[3]["start_time"], "18:10");
    assert_eq!(slots[3]["end_time"], "18:40");
}

#[test]
fn plan_text_output_names_tasks() {
    let sb = Sandbox::new();
    let plan = sb.plan();
    let out = sb.run_success(&["plan", "--plan", &plan, "--date", "2024-03-04", "--chronological"]);
    assert!(out.contains("Clean garage / Sort items"));
    assert!(out.contains("4 subtasks scheduled"));
}

#[test]
fn plan_reads_json_files() {
    let sb = Sandbox::new();
    let path = sb.write(
        "plan.json",
        r#"{"obligations":[{"id":"w","title":"Work","start_time":"08:00","end_time":"20:00","category":"work"}],
            "tasks":[{"id":"t","title":"Read","energy_level":"low","location":"any","complexity":"simple",
                      "subtasks":[{"id":"s","title":"Read","estimated_minutes":200,"energy_level":"low"}]}]}"#,
    );
    let json = sb.run_json(&["plan", "--plan", &path, "--day", "monday", "--json"]);
    assert_eq!(json["slots"].as_array().unwrap().len(), 0);
    assert_eq!(json["unplaced"][0]["subtask_id"], "s");
    assert_eq!(json["unplaced"][0]["required_minutes"], 210);
}

#[test]
fn overlapping_obligations_are_rejected() {
    let sb = Sandbox::new();
    let path = sb.write(
        "bad.toml",
        r#"
        [[obligations]]
        id = "a"
        title = "A"
        start_time = "09:00"
        end_time = "12:00"
        category = "work"

        [[obligations]]
        id = "b"
        title = "B"
        start_time = "11:00"
        end_time = "13:00"
        category = "personal"
        "#,
    );
    let stderr = sb.run_failure(&["slots", "--plan", &path, "--day", "monday"]);
    assert!(stderr.contains("error:"));
    assert!(stderr.contains("overlap"));
}

#[test]
fn malformed_time_is_rejected() {
    let sb = Sandbox::new();
    let path = sb.write("bad.toml", &common::PLAN.replace("\"09:00\"", "\"9am\""));
    let stderr = sb.run_failure(&["slots", "--plan", &path]);
    assert!(stderr.starts_with("error:"));
}

#[test]
fn missing_plan_file_is_an_error() {
    let sb = Sandbox::new();
    let missing = sb.path("missing.toml").display().to_string();
    let stderr = sb.run_failure(&["plan", "--plan", &missing]);
    assert!(stderr.contains("missing.toml"));
}

#[test]
fn template_list_and_show() {
    let sb = Sandbox::new();
    let all = sb.run_json(&["template", "list", "--json"]);
    assert_eq!(all.as_array().unwrap().len(), 12);

    let kitchen = sb.run_json(&["template", "list", "--location", "kitchen", "--json"]);
    assert_eq!(kitchen.as_array().unwrap().len(), 2);

    let hard_kitchen = sb.run_json(&[
        "template", "list", "--location", "kitchen", "--energy", "high", "--json",
    ]);
    let ids: Vec<_> = hard_kitchen
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec!["meal-prep"]);

    let shown = sb.run_json(&["template", "show", "clean-kitchen", "--json"]);
    assert_eq!(shown["subtasks"].as_array().unwrap().len(), 6);

    let stderr = sb.run_failure(&["template", "show", "clean-attic"]);
    assert!(stderr.contains("clean-attic"));
}

#[test]
fn breakdown_uses_keyword_rules() {
    let sb = Sandbox::new();
    let task = sb.run_json(&["breakdown", "Clean kitchen tonight", "--json"]);
    assert_eq!(task["title"], "Clean kitchen tonight");
    assert_eq!(task["template_id"], "clean-kitchen");

    let generic = sb.run_json(&["breakdown", "File taxes", "--json"]);
    assert!(generic["template_id"].is_null());
    assert_eq!(generic["subtasks"].as_array().unwrap().len(), 3);
}

#[test]
fn breakdown_appends_to_plan_then_focus_sees_it() {
    let sb = Sandbox::new();
    let path = sb.path("new.toml").display().to_string();
    sb.run_success(&["breakdown", "Morning workout", "--add-to", &path]);

    let queue = sb.run_json(&["focus", "--plan", &path, "--json"]);
    let queue = queue.as_array().unwrap();
    assert_eq!(queue.len(), 3);
    assert_eq!(queue[0]["task_title"], "Morning workout");
}

#[test]
fn done_updates_plan_and_review_counts_it() {
    let sb = Sandbox::new();
    let plan = sb.plan();

    sb.run_success(&["done", "--plan", &plan, "read", "c1", "--minutes", "40"]);

    let queue = sb.run_json(&["focus", "--plan", &plan, "--json"]);
    assert_eq!(queue[0]["subtask_id"], "c2");

    let stats = sb.run_json(&["review", "--plan", &plan, "--json"]);
    assert_eq!(stats["tasks_completed"], 1);
    assert_eq!(stats["subtasks_skipped"], 3);
    assert_eq!(stats["total_time_spent"], 40);
    assert_eq!(stats["total_estimated_time"], 30);

    sb.run_success(&["done", "--plan", &plan, "read", "c1", "--reopen"]);
    let stats = sb.run_json(&["review", "--plan", &plan, "--json"]);
    assert_eq!(stats["tasks_completed"], 0);
}

#[test]
fn done_with_unknown_ids_fails() {
    let sb = Sandbox::new();
    let plan = sb.plan();
    let stderr = sb.run_failure(&["done", "--plan", &plan, "read", "c9"]);
    assert!(stderr.contains("c9"));
}

#[test]
fn config_get_set_reset() {
    let sb = Sandbox::new();
    let value = sb.run_success(&["config", "get", "scheduling.buffer_policy"]);
    assert_eq!(value.trim(), "by_category");

    sb.run_success(&["config", "set", "scheduling.buffer_policy", "flat"]);
    let value = sb.run_success(&["config", "get", "scheduling.buffer_policy"]);
    assert_eq!(value.trim(), "flat");

    // flat buffers are 10 minutes on each side
    let plan = sb.plan();
    let json = sb.run_json(&["slots", "--plan", &plan, "--day", "monday", "--json"]);
    assert_eq!(json[0]["end"], "08:50");

    sb.run_success(&["config", "reset"]);
    let value = sb.run_success(&["config", "get", "scheduling.buffer_policy"]);
    assert_eq!(value.trim(), "by_category");
}

#[test]
fn config_rejects_unknown_keys_and_bad_values() {
    let sb = Sandbox::new();
    sb.run_failure(&["config", "get", "scheduling.nope"]);
    sb.run_failure(&["config", "set", "scheduling.day_start_hour", "30"]);
}

#[test]
fn config_path_is_under_home() {
    let sb = Sandbox::new();
    let path = sb.run_success(&["config", "path"]);
    assert!(path.trim().ends_with(".config/dayslot/config.toml"));
}
