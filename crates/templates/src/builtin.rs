// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Templates and include-file assets compiled into the binary. These are
//! the default contents of `asset_dir_builtin` when no on-disk override is
//! configured.

use tmuxd_core::TemplateDefinition;

const BASH_JSON: &str = include_str!("../assets/builtin/templates/bash.json");
const CLAUDE_JSON: &str = include_str!("../assets/builtin/templates/claude.json");
const CODEX_JSON: &str = include_str!("../assets/builtin/templates/codex.json");
const SCRIPT_JSON: &str = include_str!("../assets/builtin/templates/script.json");

const AGENTS_MD: &[u8] = include_bytes!("../assets/builtin/files/AGENTS.md");
const CLAUDE_MD: &[u8] = include_bytes!("../assets/builtin/files/CLAUDE.md");
const TASKS_MD: &[u8] = include_bytes!("../assets/builtin/files/TASKS.md");

/// The compiled-in template set, parsed once per call. Parse failures here
/// would be a packaging bug, not a runtime condition to recover from.
pub fn builtin_templates() -> Vec<TemplateDefinition> {
    [BASH_JSON, CLAUDE_JSON, CODEX_JSON, SCRIPT_JSON]
        .iter()
        .map(|raw| {
            let mut def: TemplateDefinition =
                serde_json::from_str(raw).expect("embedded built-in template is valid JSON");
            def.builtin = true;
            def
        })
        .collect()
}

/// Look up an embedded asset by the relative path templates reference in
/// `include_files` (e.g. `"AGENTS.md"`).
pub fn builtin_asset(source: &str) -> Option<&'static [u8]> {
    match source {
        "AGENTS.md" => Some(AGENTS_MD),
        "CLAUDE.md" => Some(CLAUDE_MD),
        "TASKS.md" => Some(TASKS_MD),
        _ => None,
    }
}

#[cfg(test)]
#[path = "builtin_tests.rs"]
mod tests;
