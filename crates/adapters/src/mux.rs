// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The abstraction over the external terminal multiplexer control tool.

use crate::error::MuxError;
use async_trait::async_trait;
use tmuxd_core::RuntimeState;

/// Thin wrapper over tmux: existence checks, pane lifecycle, and the
/// runtime state used to reconcile persisted session records. Every call
/// is expected to complete in milliseconds; implementations should enforce
/// their own timeout rather than block indefinitely.
#[async_trait]
pub trait MuxAdapter: Send + Sync {
    async fn exists(&self, name: &str) -> Result<bool, MuxError>;

    /// Create a detached session named `name` running `shell` as its
    /// initial command (typically a login shell).
    async fn new_detached(&self, name: &str, shell: &str) -> Result<(), MuxError>;

    /// Set a session-scoped option (e.g. disabling the status line).
    async fn set_option(&self, name: &str, key: &str, value: &str) -> Result<(), MuxError>;

    /// Attach an output-capture pipeline that tees pane output into
    /// `log_path` for the remainder of the pane's lifetime.
    async fn pipe_pane(&self, target: &str, log_path: &std::path::Path) -> Result<(), MuxError>;

    /// Replace the pane at `target` with a fresh process running `command`
    /// via `shell -c command`. Used for one-off scripts so the pane's exit
    /// terminates the session.
    async fn respawn_pane(&self, target: &str, shell: &str, command: &str)
        -> Result<(), MuxError>;

    /// Inject `payload` into the pane at `target`. When `press_enter` is
    /// true a trailing carriage return is sent as part of the same call.
    async fn send_keys(&self, target: &str, payload: &str, press_enter: bool)
        -> Result<(), MuxError>;

    async fn kill(&self, name: &str) -> Result<(), MuxError>;

    /// Snapshot of panes, clients, and attachment state for `name`. Epochs
    /// reported by tmux convert to UTC timestamps; zero/unknown become
    /// `None`.
    async fn capture_runtime(&self, name: &str) -> Result<RuntimeState, MuxError>;
}
