// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Crash-safe JSON document writes: write to a temp sibling, fsync, rename
//! over the target. A reader never observes a partial write.

use crate::error::StorageError;
use serde::Serialize;
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

pub fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<(), StorageError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| StorageError::io(parent, e))?;
    }

    let tmp_path = path.with_extension("json.tmp");
    let body = serde_json::to_string_pretty(value).map_err(|e| StorageError::json(path, e))?;

    let mut file = File::create(&tmp_path).map_err(|e| StorageError::io(&tmp_path, e))?;
    file.write_all(body.as_bytes())
        .map_err(|e| StorageError::io(&tmp_path, e))?;
    file.write_all(b"\n")
        .map_err(|e| StorageError::io(&tmp_path, e))?;
    file.sync_all().map_err(|e| StorageError::io(&tmp_path, e))?;

    fs::rename(&tmp_path, path).map_err(|e| StorageError::io(path, e))?;
    Ok(())
}

#[cfg(test)]
#[path = "atomic_tests.rs"]
mod tests;
