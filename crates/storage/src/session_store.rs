// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Read/write of `metadata.json` session records.

use crate::atomic::write_json;
use crate::error::StorageError;
use crate::layout::Layout;
use std::fs;
use tmuxd_core::Session;
use tracing::warn;

pub struct SessionStore {
    layout: Layout,
}

impl SessionStore {
    pub fn new(layout: Layout) -> Self {
        Self { layout }
    }

    /// Enumerate every `*/metadata.json` under the root. Entries that fail
    /// to parse are skipped and logged rather than failing the whole list.
    pub fn list(&self) -> Result<Vec<Session>, StorageError> {
        let root = self.layout.root();
        if !root.exists() {
            return Ok(Vec::new());
        }

        let mut sessions = Vec::new();
        for entry in fs::read_dir(root).map_err(|e| StorageError::io(root, e))? {
            let entry = entry.map_err(|e| StorageError::io(root, e))?;
            if !entry.path().is_dir() {
                continue;
            }
            let name = entry.file_name();
            let name = name.to_string_lossy();
            match self.load(&name) {
                Ok(session) => sessions.push(session),
                Err(StorageError::Io { .. }) => continue,
                Err(e) => warn!(session = %name, error = %e, "skipping unparseable session metadata"),
            }
        }
        Ok(sessions)
    }

    pub fn load(&self, name: &str) -> Result<Session, StorageError> {
        let path = self.layout.metadata_path(name);
        let body = fs::read_to_string(&path).map_err(|e| StorageError::io(&path, e))?;
        let session: Session =
            serde_json::from_str(&body).map_err(|e| StorageError::json(&path, e))?;

        if session.schema_version > tmuxd_core::SCHEMA_VERSION {
            return Err(StorageError::UnsupportedSchemaVersion {
                path,
                found: session.schema_version,
                supported: tmuxd_core::SCHEMA_VERSION,
            });
        }
        Ok(session)
    }

    pub fn exists(&self, name: &str) -> bool {
        self.layout.metadata_path(name).exists()
    }

    pub fn save(&self, session: &Session) -> Result<(), StorageError> {
        write_json(&self.layout.metadata_path(&session.name), session)
    }

    pub fn delete(&self, name: &str) -> Result<(), StorageError> {
        let dir = self.layout.session_dir(name);
        if dir.exists() {
            fs::remove_dir_all(&dir).map_err(|e| StorageError::io(&dir, e))?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "session_store_tests.rs"]
mod tests;
