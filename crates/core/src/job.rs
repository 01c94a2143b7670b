// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The job ledger entry: one record per session inside `queue.json`.

use crate::session::SessionStatus;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Job status mirrors `SessionStatus` — they are updated in lockstep by the
/// session manager, but kept as separate types since the ledger is an
/// independent document with its own lifecycle.
pub type JobStatus = SessionStatus;

/// One entry in the append-only job ledger.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobEntry {
    pub id: String,
    pub session: String,
    pub template: String,
    pub command: String,
    pub status: JobStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub message: Option<String>,
}

impl JobEntry {
    pub fn new(
        id: impl Into<String>,
        session: impl Into<String>,
        template: impl Into<String>,
        command: impl Into<String>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            session: session.into(),
            template: template.into(),
            command: command.into(),
            status: JobStatus::Queued,
            created_at: now,
            updated_at: now,
            message: None,
        }
    }
}

/// The on-disk shape of `queue.json`: `{ "jobs": [...] }`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct JobLedger {
    #[serde(default)]
    pub jobs: Vec<JobEntry>,
}

impl JobLedger {
    pub fn find(&self, id: &str) -> Option<&JobEntry> {
        self.jobs.iter().find(|j| j.id == id)
    }

    pub fn find_mut(&mut self, id: &str) -> Option<&mut JobEntry> {
        self.jobs.iter_mut().find(|j| j.id == id)
    }
}

#[cfg(test)]
#[path = "job_tests.rs"]
mod tests;
