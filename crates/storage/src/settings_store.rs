// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The single `settings.json` document.

use crate::atomic::write_json;
use crate::error::StorageError;
use crate::layout::Layout;
use std::fs;
use tmuxd_core::Settings;

pub struct SettingsStore {
    layout: Layout,
}

impl SettingsStore {
    pub fn new(layout: Layout) -> Self {
        Self { layout }
    }

    pub fn load(&self) -> Result<Settings, StorageError> {
        let path = self.layout.settings_path();
        if !path.exists() {
            return Ok(Settings::default());
        }
        let body = fs::read_to_string(&path).map_err(|e| StorageError::io(&path, e))?;
        serde_json::from_str(&body).map_err(|e| StorageError::json(&path, e))
    }

    pub fn save(&self, settings: &Settings) -> Result<(), StorageError> {
        write_json(&self.layout.settings_path(), settings)
    }
}

#[cfg(test)]
#[path = "settings_store_tests.rs"]
mod tests;
