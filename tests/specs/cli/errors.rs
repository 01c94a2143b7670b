//! CLI error-path specs: unknown resources and bad inputs map to exit code 2
//! (see `crates/cli/src/error.rs`), matching distilled spec §7's "caller
//! fault" classification.

use crate::prelude::*;

#[test]
fn show_unknown_session_exits_two() {
    let ws = Workspace::new();
    ws.tmuxd()
        .args(["show", "does-not-exist"])
        .fails_with(2)
        .stderr_has("not found");
}

#[test]
fn kill_unknown_session_exits_two() {
    let ws = Workspace::new();
    ws.tmuxd()
        .args(["kill", "does-not-exist"])
        .fails_with(2)
        .stderr_has("not found");
}

#[test]
fn logs_unknown_session_exits_two() {
    let ws = Workspace::new();
    ws.tmuxd()
        .args(["logs", "does-not-exist"])
        .fails_with(2)
        .stderr_has("not found");
}

#[test]
fn create_with_invalid_name_character_exits_two() {
    let ws = Workspace::new();
    ws.tmuxd()
        .args(["create", "bad:name"])
        .fails_with(2)
        .stderr_has("disallowed character");
}

#[test]
fn one_off_missing_required_command_is_a_usage_error() {
    let ws = Workspace::new();
    ws.tmuxd().args(["one-off", "job"]).fails();
}

#[test]
fn template_show_unknown_exits_two() {
    let ws = Workspace::new();
    ws.tmuxd()
        .args(["template", "show", "nope"])
        .fails_with(2)
        .stderr_has("not found");
}

#[test]
fn template_delete_builtin_is_rejected() {
    let ws = Workspace::new();
    ws.tmuxd()
        .args(["template", "delete", "bash"])
        .fails_with(1)
        .stderr_has("built-in");
}
