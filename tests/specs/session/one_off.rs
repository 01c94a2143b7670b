//! One-off command session specs (distilled spec §8 scenario S2).

use crate::prelude::*;

#[test]
fn one_off_echo_completes_with_zero_exit_code() {
    if !tmux_available() {
        return;
    }
    let ws = Workspace::new();
    let name = ws.unique_name("oneoff");

    ws.tmuxd()
        .args(["one-off", &name, "--command", "printf hello\\n"])
        .passes();

    let mut last = serde_json::Value::Null;
    for _ in 0..30 {
        last = ws.tmuxd().args(["show", &name]).passes().json();
        if last["status"] == "completed" || last["status"] == "failed" {
            break;
        }
        std::thread::sleep(std::time::Duration::from_millis(500));
    }

    assert_eq!(last["status"], "completed", "session never completed: {last:?}");
    assert_eq!(last["exit_code"], 0);

    ws.tmuxd()
        .args(["logs", &name, "--lines", "50"])
        .passes()
        .stdout_has("hello");

    let jobs = ws.tmuxd().arg("jobs").passes().json();
    assert!(jobs
        .as_array()
        .expect("jobs array")
        .iter()
        .any(|j| j["session"] == name && j["status"] == "completed"));
}

#[test]
fn one_off_without_command_is_rejected() {
    if !tmux_available() {
        return;
    }
    let ws = Workspace::new();
    let name = ws.unique_name("empty");
    ws.tmuxd()
        .args(["one-off", &name, "--command", ""])
        .fails_with(2)
        .stderr_has("must not be empty");
}
