// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The `Session` record: a named, persistent tmux-backed workspace.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Whether a session is a persistent shell or a one-shot command run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionType {
    LongRunning,
    OneOff,
}

impl Default for SessionType {
    fn default() -> Self {
        Self::LongRunning
    }
}

/// Lifecycle status of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    Queued,
    Starting,
    Running,
    Completed,
    Failed,
    Stopped,
}

impl SessionStatus {
    /// Terminal statuses are ones reconciliation never advances past.
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            SessionStatus::Completed | SessionStatus::Failed | SessionStatus::Stopped
        )
    }
}

/// A single tmux pane as reported by the multiplexer adapter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaneInfo {
    pub id: String,
    pub index: u32,
    pub active: bool,
    pub current_command: String,
    pub current_path: String,
}

/// A single attached client as reported by the multiplexer adapter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientInfo {
    pub tty: String,
    pub last_activity: Option<DateTime<Utc>>,
    pub width: u32,
    pub height: u32,
}

/// Runtime fields recomputed from the live multiplexer on every read. Never
/// persisted to `metadata.json`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuntimeState {
    pub panes: Vec<PaneInfo>,
    pub clients: Vec<ClientInfo>,
    pub last_attached: Option<DateTime<Utc>>,
    pub attached: bool,
}

/// A named, persistent execution environment backed by a tmux session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub schema_version: u32,

    pub name: String,
    pub session_type: SessionType,

    pub command: String,
    pub template: String,
    pub description: Option<String>,

    pub status: SessionStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,

    pub workspace_path: PathBuf,
    pub log_path: PathBuf,

    pub job_id: Option<String>,
    pub exit_code: Option<i32>,
    pub last_message: Option<String>,

    /// Recomputed on every read; absent (default) when freshly deserialized
    /// from disk and not yet reconciled against the live multiplexer.
    #[serde(skip)]
    pub runtime: Option<RuntimeState>,
}

impl Session {
    /// Build a new session record in the `queued` state, the shape a
    /// creation request starts from before the multiplexer has been touched.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        name: impl Into<String>,
        session_type: SessionType,
        command: impl Into<String>,
        template: impl Into<String>,
        description: Option<String>,
        workspace_path: PathBuf,
        log_path: PathBuf,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            schema_version: crate::SCHEMA_VERSION,
            name: name.into(),
            session_type,
            command: command.into(),
            template: template.into(),
            description,
            status: SessionStatus::Queued,
            created_at: now,
            updated_at: now,
            workspace_path,
            log_path,
            job_id: None,
            exit_code: None,
            last_message: None,
            runtime: None,
        }
    }

    /// Equality modulo the non-persisted `runtime` field, used by the
    /// storage round-trip test.
    pub fn eq_ignoring_runtime(&self, other: &Session) -> bool {
        self.schema_version == other.schema_version
            && self.name == other.name
            && self.session_type == other.session_type
            && self.command == other.command
            && self.template == other.template
            && self.description == other.description
            && self.status == other.status
            && self.created_at == other.created_at
            && self.updated_at == other.updated_at
            && self.workspace_path == other.workspace_path
            && self.log_path == other.log_path
            && self.job_id == other.job_id
            && self.exit_code == other.exit_code
            && self.last_message == other.last_message
    }
}

#[cfg(test)]
#[path = "session_tests.rs"]
mod tests;
