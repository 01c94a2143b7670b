//! CLI help and completions specs.

use crate::prelude::*;

#[test]
fn top_level_help_lists_subcommands() {
    let ws = Workspace::new();
    ws.tmuxd()
        .arg("--help")
        .passes()
        .stdout_has("list")
        .stdout_has("create")
        .stdout_has("one-off")
        .stdout_has("kill")
        .stdout_has("logs")
        .stdout_has("jobs");
}

#[test]
fn version_flag_reports_a_version() {
    let ws = Workspace::new();
    ws.tmuxd().arg("--version").passes().stdout_has("tmuxd");
}

#[test]
fn completions_bash_emits_a_completion_script() {
    let ws = Workspace::new();
    ws.tmuxd()
        .args(["completions", "bash"])
        .passes()
        .stdout_has("tmuxd");
}

#[test]
fn completions_zsh_emits_a_completion_script() {
    let ws = Workspace::new();
    ws.tmuxd()
        .args(["completions", "zsh"])
        .passes()
        .stdout_has("_tmuxd");
}

#[test]
fn create_help_documents_template_flag() {
    let ws = Workspace::new();
    ws.tmuxd()
        .args(["create", "--help"])
        .passes()
        .stdout_has("--template");
}
