// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The job ledger (`queue.json`): full read-modify-write under an OS
//! advisory lock, since REST, MCP, and CLI processes may be co-resident.

use crate::error::StorageError;
use crate::layout::Layout;
use chrono::{DateTime, Utc};
use fs2::FileExt;
use std::fs::{self, OpenOptions};
use std::io::{Read, Seek, SeekFrom, Write};
use tmuxd_core::{JobEntry, JobLedger, JobStatus};

pub struct QueueStore {
    layout: Layout,
}

impl QueueStore {
    pub fn new(layout: Layout) -> Self {
        Self { layout }
    }

    pub fn load(&self) -> Result<JobLedger, StorageError> {
        let path = self.layout.queue_path();
        if !path.exists() {
            return Ok(JobLedger::default());
        }
        let body = fs::read_to_string(&path).map_err(|e| StorageError::io(&path, e))?;
        if body.trim().is_empty() {
            return Ok(JobLedger::default());
        }
        serde_json::from_str(&body).map_err(|e| StorageError::json(&path, e))
    }

    /// Append `entry` to the ledger under an exclusive lock.
    pub fn add_job(&self, entry: JobEntry) -> Result<(), StorageError> {
        self.with_locked_ledger(|ledger| {
            ledger.jobs.push(entry);
            Ok(())
        })
    }

    /// Locate the entry with `id` and update its status/message/timestamp
    /// in place under an exclusive lock. A no-op if the id is unknown.
    pub fn update_job(
        &self,
        id: &str,
        status: JobStatus,
        message: Option<String>,
        now: DateTime<Utc>,
    ) -> Result<(), StorageError> {
        self.with_locked_ledger(|ledger| {
            if let Some(job) = ledger.find_mut(id) {
                job.status = status;
                job.updated_at = now;
                if message.is_some() {
                    job.message = message;
                }
            }
            Ok(())
        })
    }

    /// Remove the entry with `id`, used only to roll back a failed session
    /// creation. The ledger is otherwise append/update-in-place only.
    pub fn remove_job(&self, id: &str) -> Result<(), StorageError> {
        self.with_locked_ledger(|ledger| {
            ledger.jobs.retain(|j| j.id != id);
            Ok(())
        })
    }

    fn with_locked_ledger(
        &self,
        mutate: impl FnOnce(&mut JobLedger) -> Result<(), StorageError>,
    ) -> Result<(), StorageError> {
        let path = self.layout.queue_path();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| StorageError::io(parent, e))?;
        }

        let mut file = OpenOptions::new()
            .create(true)
            .read(true)
            .write(true)
            .open(&path)
            .map_err(|e| StorageError::io(&path, e))?;

        file.lock_exclusive()
            .map_err(|_| StorageError::Lock(path.clone()))?;

        let result = (|| {
            let mut body = String::new();
            file.read_to_string(&mut body)
                .map_err(|e| StorageError::io(&path, e))?;
            let mut ledger: JobLedger = if body.trim().is_empty() {
                JobLedger::default()
            } else {
                serde_json::from_str(&body).map_err(|e| StorageError::json(&path, e))?
            };

            mutate(&mut ledger)?;

            // Written directly to the already-locked descriptor, not via
            // temp-file rename: renaming would swap the inode out from
            // under the lock, letting a racing opener bypass it entirely.
            let body =
                serde_json::to_string_pretty(&ledger).map_err(|e| StorageError::json(&path, e))?;
            file.set_len(0).map_err(|e| StorageError::io(&path, e))?;
            file.seek(SeekFrom::Start(0))
                .map_err(|e| StorageError::io(&path, e))?;
            file.write_all(body.as_bytes())
                .map_err(|e| StorageError::io(&path, e))?;
            file.write_all(b"\n").map_err(|e| StorageError::io(&path, e))?;
            file.sync_all().map_err(|e| StorageError::io(&path, e))
        })();

        let _ = FileExt::unlock(&file);
        result
    }
}

#[cfg(test)]
#[path = "queue_store_tests.rs"]
mod tests;
