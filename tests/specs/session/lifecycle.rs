//! End-to-end session lifecycle specs against a real tmux server
//! (distilled spec §8 scenarios S1, S4, S5, S6). Skipped when `tmux` isn't
//! on `PATH`.

use crate::prelude::*;

#[test]
fn create_long_running_bash_session_is_running() {
    if !tmux_available() {
        return;
    }
    let ws = Workspace::new();
    let name = ws.unique_name("bash");

    let out = ws
        .tmuxd()
        .args(["create", &name, "--template", "bash"])
        .passes();
    let created = out.json();
    assert_eq!(created["status"], "running");
    assert_eq!(created["session_type"], "long_running");
    assert_eq!(created["command"], "");

    assert!(ws.sessions_root().join(&name).join("metadata.json").is_file());
    assert!(ws.sessions_root().join(&name).join("artifacts").is_dir());
    assert!(ws.sessions_root().join(&name).join("console.log").is_file());

    let jobs = ws.tmuxd().arg("jobs").passes().json();
    assert!(jobs
        .as_array()
        .expect("jobs array")
        .iter()
        .any(|j| j["session"] == name && j["status"] == "running"));

    ws.tmuxd().args(["kill", &name]).passes();
    ws.kill_if_alive(&name);
}

#[test]
fn send_text_is_appended_to_console_log() {
    if !tmux_available() {
        return;
    }
    let ws = Workspace::new();
    let name = ws.unique_name("echo");

    ws.tmuxd()
        .args(["create", &name, "--template", "bash"])
        .passes();

    ws.tmuxd()
        .args(["send", &name, "echo ping-from-spec"])
        .passes();

    std::thread::sleep(std::time::Duration::from_millis(800));

    ws.tmuxd()
        .args(["logs", &name, "--lines", "50"])
        .passes()
        .stdout_has("ping-from-spec");

    ws.tmuxd().args(["kill", &name]).passes();
    ws.kill_if_alive(&name);
}

#[test]
fn kill_is_idempotent() {
    if !tmux_available() {
        return;
    }
    let ws = Workspace::new();
    let name = ws.unique_name("killtwice");

    ws.tmuxd()
        .args(["create", &name, "--template", "bash"])
        .passes();

    ws.tmuxd().args(["kill", &name]).passes();
    ws.tmuxd().args(["kill", &name]).passes();

    let shown = ws.tmuxd().args(["show", &name]).passes().json();
    assert_eq!(shown["status"], "stopped");

    ws.kill_if_alive(&name);
}

#[test]
fn duplicate_create_is_rejected() {
    if !tmux_available() {
        return;
    }
    let ws = Workspace::new();
    let name = ws.unique_name("dup");

    ws.tmuxd()
        .args(["create", &name, "--template", "bash"])
        .passes();

    ws.tmuxd()
        .args(["create", &name, "--template", "bash"])
        .fails_with(2)
        .stderr_has("already exists");

    ws.tmuxd().args(["kill", &name]).passes();
    ws.kill_if_alive(&name);
}

#[test]
fn list_includes_created_session() {
    if !tmux_available() {
        return;
    }
    let ws = Workspace::new();
    let name = ws.unique_name("listed");

    ws.tmuxd()
        .args(["create", &name, "--template", "bash"])
        .passes();

    let sessions = ws.tmuxd().arg("list").passes().json();
    assert!(sessions
        .as_array()
        .expect("sessions array")
        .iter()
        .any(|s| s["name"] == name));

    ws.tmuxd().args(["kill", &name]).passes();
    ws.kill_if_alive(&name);
}
