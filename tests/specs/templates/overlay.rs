//! Template listing and the user-overlay-shadows-builtin rule (distilled
//! spec §8 scenario S7).

use crate::prelude::*;

#[test]
fn list_includes_the_three_builtin_templates() {
    let ws = Workspace::new();
    let templates = ws.tmuxd().args(["template", "list"]).passes().json();
    let names: Vec<String> = templates
        .as_array()
        .expect("templates array")
        .iter()
        .map(|t| t["name"].as_str().unwrap_or_default().to_string())
        .collect();
    assert!(names.contains(&"bash".to_string()));
    assert!(names.contains(&"claude".to_string()));
    assert!(names.contains(&"codex".to_string()));
    assert!(names.contains(&"script".to_string()));
}

#[test]
fn show_reports_the_builtin_bash_definition() {
    let ws = Workspace::new();
    let bash = ws
        .tmuxd()
        .args(["template", "show", "bash"])
        .passes()
        .json();
    assert_eq!(bash["name"], "bash");
    assert_eq!(bash["session_type"], "long_running");
}

#[test]
fn user_template_shadows_builtin_of_the_same_name() {
    let ws = Workspace::new();
    ws.file(
        "templates/bash.json",
        r#"{
            "name": "bash",
            "label": "Bash (custom)",
            "command": "",
            "session_type": "long_running",
            "description": "A user override of the builtin bash template."
        }"#,
    );

    let shown = ws
        .tmuxd()
        .args(["template", "show", "bash"])
        .passes()
        .json();
    assert_eq!(shown["label"], "Bash (custom)");

    // The overlay is a user template now, so deleting it must succeed —
    // unlike a true builtin (see `delete_of_a_true_builtin_is_rejected`
    // below).
    ws.tmuxd().args(["template", "delete", "bash"]).passes();
}

#[test]
fn save_then_delete_a_user_template_round_trips() {
    let ws = Workspace::new();
    let payload_path = ws.file(
        "my-template.json",
        r#"{
            "name": "my-template",
            "label": "Mine",
            "command": "htop",
            "session_type": "long_running",
            "description": "A user-authored template."
        }"#,
    );

    ws.tmuxd()
        .args(["template", "save", payload_path.to_str().unwrap()])
        .passes();

    let shown = ws
        .tmuxd()
        .args(["template", "show", "my-template"])
        .passes()
        .json();
    assert_eq!(shown["command"], "htop");

    ws.tmuxd()
        .args(["template", "delete", "my-template"])
        .passes();

    ws.tmuxd()
        .args(["template", "show", "my-template"])
        .fails_with(2)
        .stderr_has("not found");
}

#[test]
fn delete_of_a_true_builtin_is_rejected() {
    let ws = Workspace::new();
    ws.tmuxd()
        .args(["template", "delete", "script"])
        .fails_with(1)
        .stderr_has("built-in");
}
