// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Environment-driven configuration, resolved once at process startup into
//! a typed struct threaded through every surface adapter.

use std::env;
use std::path::PathBuf;
use tmuxd_templates::TemplateDirs;

const DEFAULT_PUBLIC_BASE_URL: &str = "http://localhost:7337";

/// Resolved configuration for a `Manager`. Every field has an environment
/// variable override; callers that need a one-off scoped manager (e.g. the
/// REST `?session_root=` query param) clone this and replace `sessions_root`
/// rather than mutate the shared instance.
#[derive(Debug, Clone)]
pub struct Config {
    /// Root directory under which every session's metadata, logs, and
    /// artifacts live, plus the shared `queue.json` and `settings.json`.
    pub sessions_root: PathBuf,

    /// Directories consulted for templates and their include-file assets.
    pub template_dirs: TemplateDirs,

    /// Public origin used to build `session_url` when `settings.json` has
    /// no override. Falls back to the compiled-in default.
    pub public_base_url_default: String,
}

impl Config {
    /// Resolve configuration from the environment, falling back to
    /// sensible defaults rooted at the current working directory — the
    /// same "look near cwd, else use a default" shape the teacher's
    /// `Config::for_project` uses for its own state directories.
    pub fn from_env() -> Self {
        let cwd = env::current_dir().unwrap_or_else(|_| PathBuf::from("."));

        let sessions_root = env::var_os("TMUXD_SESSIONS_ROOT")
            .map(PathBuf::from)
            .unwrap_or_else(|| cwd.join(".tmuxd").join("sessions"));

        let template_dir_builtin = env::var_os("TMUXD_TEMPLATE_DIR_BUILTIN").map(PathBuf::from);
        let template_dir_user = env::var_os("TMUXD_TEMPLATE_DIR_USER")
            .map(PathBuf::from)
            .unwrap_or_else(|| cwd.join(".tmuxd").join("templates"));
        let asset_dir_builtin = env::var_os("TMUXD_ASSET_DIR_BUILTIN").map(PathBuf::from);
        let asset_dir_user = env::var_os("TMUXD_ASSET_DIR_USER")
            .map(PathBuf::from)
            .unwrap_or_else(|| cwd.join(".tmuxd").join("assets"));

        let public_base_url_default = env::var("TMUXD_PUBLIC_BASE_URL")
            .unwrap_or_else(|_| DEFAULT_PUBLIC_BASE_URL.to_string());

        Self {
            sessions_root,
            template_dirs: TemplateDirs {
                template_dir_builtin,
                template_dir_user,
                asset_dir_builtin,
                asset_dir_user,
                repo_root: cwd,
            },
            public_base_url_default,
        }
    }

    /// A scoped copy rooted at a different `sessions_root`, used to honor
    /// the per-call `session_root` override without mutating shared state.
    pub fn with_sessions_root(&self, sessions_root: impl Into<PathBuf>) -> Self {
        Self {
            sessions_root: sessions_root.into(),
            template_dirs: self.template_dirs.clone(),
            public_base_url_default: self.public_base_url_default.clone(),
        }
    }
}
