//! Template include-file materialization (distilled spec §8 scenario S3).

use crate::prelude::*;

#[test]
fn codex_template_materializes_agents_and_implicit_tasks() {
    if !tmux_available() {
        return;
    }
    let ws = Workspace::new();
    let name = ws.unique_name("codexws");

    ws.tmuxd()
        .args(["create", &name, "--template", "codex"])
        .passes();

    let artifacts = ws.sessions_root().join(&name).join("artifacts");
    assert!(artifacts.join("AGENTS.md").is_file());
    assert!(artifacts.join("TASKS.md").is_file());

    ws.tmuxd().args(["kill", &name]).passes();
    ws.kill_if_alive(&name);
}
