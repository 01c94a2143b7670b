// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Template definitions: named recipes for session creation.

use crate::session::SessionType;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// One `include_files` entry. The on-disk JSON is heterogeneous — either a
/// bare string or a `{source, target}` mapping — modeled here as a tagged
/// variant and normalized to `Pair` on ingest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Include {
    Bare(String),
    Pair { source: String, target: String },
}

impl Include {
    /// Normalize to a `(source, target)` pair. A bare string `S` becomes
    /// `{source: S, target: basename(S)}`.
    pub fn normalize(&self) -> (String, String) {
        match self {
            Include::Bare(source) => {
                let target = PathBuf::from(source)
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_else(|| source.clone());
                (source.clone(), target)
            }
            Include::Pair { source, target } => (source.clone(), target.clone()),
        }
    }
}

/// A named JSON recipe defining a default command, workspace files, and
/// shell environment for session creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemplateDefinition {
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    pub name: String,
    pub label: String,

    #[serde(default)]
    pub command: String,

    #[serde(default)]
    pub session_type: SessionType,

    #[serde(default)]
    pub working_dir: Option<String>,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub env: BTreeMap<String, String>,

    #[serde(default)]
    pub include_files: Vec<Include>,

    #[serde(default)]
    pub prompt_delay_ms: Option<u64>,

    /// True for templates shipped with the program; false for
    /// user-authored templates. Not serialized — it's set by the resolver
    /// based on which directory the definition was loaded from.
    #[serde(skip, default)]
    pub builtin: bool,
}

impl TemplateDefinition {
    /// `TASKS.md` (case-insensitive) is implicitly included in every
    /// template unless the template already targets it explicitly.
    pub fn include_files_with_implicit_tasks(&self) -> Vec<Include> {
        let has_tasks = self.include_files.iter().any(|inc| {
            let (_, target) = inc.normalize();
            target.eq_ignore_ascii_case("TASKS.md")
        });

        let mut includes = self.include_files.clone();
        if !has_tasks {
            includes.push(Include::Pair {
                source: "TASKS.md".to_string(),
                target: "TASKS.md".to_string(),
            });
        }
        includes
    }
}

fn default_schema_version() -> u32 {
    crate::SCHEMA_VERSION
}

#[cfg(test)]
#[path = "template_tests.rs"]
mod tests;
