// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Tailing console logs, tolerating both partial final lines and invalid
//! UTF-8 bytes left behind by whatever wrote to the pane.

use crate::error::StorageError;
use std::fs;
use std::path::Path;

/// Return the last `n` lines of the file at `path`. Invalid UTF-8 bytes are
/// replaced rather than rejected, since the log is raw pane output. `n == 0`
/// returns an empty string; `n` larger than the file's line count returns
/// the whole file.
pub fn tail(path: &Path, n: usize) -> Result<String, StorageError> {
    let bytes = fs::read(path).map_err(|e| StorageError::io(path, e))?;
    if n == 0 {
        return Ok(String::new());
    }

    let text = String::from_utf8_lossy(&bytes);
    let mut lines: Vec<&str> = text.lines().collect();
    if lines.len() > n {
        lines = lines.split_off(lines.len() - n);
    }
    Ok(lines.join("\n"))
}

#[cfg(test)]
#[path = "log_tests.rs"]
mod tests;
