// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Loads, merges, and persists template definitions; materializes
//! `include_files` into a session's workspace.

use crate::builtin::{builtin_asset, builtin_templates};
use crate::dirs::TemplateDirs;
use crate::error::TemplateError;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use std::sync::RwLock;
use tmuxd_core::{Include, TemplateDefinition};

pub struct TemplateResolver {
    dirs: TemplateDirs,
    templates: RwLock<BTreeMap<String, TemplateDefinition>>,
}

impl TemplateResolver {
    pub fn new(dirs: TemplateDirs) -> Result<Self, TemplateError> {
        let resolver = Self {
            dirs,
            templates: RwLock::new(BTreeMap::new()),
        };
        resolver.refresh()?;
        Ok(resolver)
    }

    /// Reload the in-memory map: built-ins, then `template_dir_builtin`,
    /// then the `template_dir_user` overlay. Later layers shadow earlier
    /// ones by `name`.
    pub fn refresh(&self) -> Result<(), TemplateError> {
        let mut merged: BTreeMap<String, TemplateDefinition> = BTreeMap::new();

        for def in builtin_templates() {
            merged.insert(def.name.clone(), def);
        }

        if let Some(dir) = &self.dirs.template_dir_builtin {
            for mut def in load_dir(dir)? {
                def.builtin = true;
                merged.insert(def.name.clone(), def);
            }
        }

        for mut def in load_dir(&self.dirs.template_dir_user)? {
            def.builtin = false;
            merged.insert(def.name.clone(), def);
        }

        *self.templates.write().unwrap_or_else(|e| e.into_inner()) = merged;
        Ok(())
    }

    /// All known templates, sorted by label (case-insensitive).
    pub fn list(&self) -> Vec<TemplateDefinition> {
        let mut templates: Vec<_> = self
            .templates
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .values()
            .cloned()
            .collect();
        templates.sort_by_key(|t| t.label.to_lowercase());
        templates
    }

    pub fn get(&self, name: &str) -> Option<TemplateDefinition> {
        self.templates
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .get(name)
            .cloned()
    }

    /// Persist a user template. `include_sources` are absolute paths of
    /// files to copy under `asset_dir_user/<name>/` and append to
    /// `include_files` as `{source: "<name>/<basename>", target: "<basename>"}`.
    pub fn save(
        &self,
        mut payload: TemplateDefinition,
        include_sources: &[std::path::PathBuf],
    ) -> Result<std::path::PathBuf, TemplateError> {
        for (i, include) in payload.include_files.iter().enumerate() {
            if let Include::Pair { source, target } = include {
                if source.trim().is_empty() || target.trim().is_empty() {
                    return Err(TemplateError::MalformedInclude {
                        name: payload.name.clone(),
                        reason: format!("entry {i} has an empty source or target"),
                    });
                }
            }
        }

        let template_asset_dir = self.dirs.asset_dir_user.join(&payload.name);
        for source_path in include_sources {
            let basename = source_path
                .file_name()
                .ok_or_else(|| TemplateError::MalformedInclude {
                    name: payload.name.clone(),
                    reason: format!("include source {} has no filename", source_path.display()),
                })?;
            fs::create_dir_all(&template_asset_dir)
                .map_err(|e| TemplateError::io(&template_asset_dir, e))?;
            let dest = template_asset_dir.join(basename);
            fs::copy(source_path, &dest).map_err(|e| TemplateError::io(&dest, e))?;

            payload.include_files.push(Include::Pair {
                source: format!("{}/{}", payload.name, basename.to_string_lossy()),
                target: basename.to_string_lossy().into_owned(),
            });
        }

        payload.builtin = false;
        fs::create_dir_all(&self.dirs.template_dir_user)
            .map_err(|e| TemplateError::io(&self.dirs.template_dir_user, e))?;
        let path = self.dirs.template_dir_user.join(format!("{}.json", payload.name));
        let body = serde_json::to_string_pretty(&payload).map_err(|e| TemplateError::json(&path, e))?;
        fs::write(&path, format!("{body}\n")).map_err(|e| TemplateError::io(&path, e))?;

        self.templates
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .insert(payload.name.clone(), payload);

        Ok(path)
    }

    /// Remove a user template. Fails if `name` resolves to a built-in.
    pub fn delete(&self, name: &str) -> Result<(), TemplateError> {
        let current = self
            .get(name)
            .ok_or_else(|| TemplateError::NotFound(name.to_string()))?;
        if current.builtin {
            return Err(TemplateError::BuiltinDelete(name.to_string()));
        }

        let path = self.dirs.template_dir_user.join(format!("{name}.json"));
        if path.exists() {
            fs::remove_file(&path).map_err(|e| TemplateError::io(&path, e))?;
        }

        self.templates
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .remove(name);
        Ok(())
    }

    /// Copy every include-file for `template` into `workspace_dir`,
    /// including the implicit `TASKS.md`. Missing sources are skipped;
    /// existing destination files are never overwritten.
    pub fn materialize_includes(
        &self,
        template: &TemplateDefinition,
        workspace_dir: &Path,
    ) -> Result<(), TemplateError> {
        for include in template.include_files_with_implicit_tasks() {
            let (source, target) = include.normalize();
            let dest = workspace_dir.join(&target);
            if dest.exists() {
                continue;
            }
            let Some(bytes) = self.resolve_source_bytes(&source) else {
                continue;
            };
            if let Some(parent) = dest.parent() {
                fs::create_dir_all(parent).map_err(|e| TemplateError::io(parent, e))?;
            }
            fs::write(&dest, bytes).map_err(|e| TemplateError::io(&dest, e))?;
        }
        Ok(())
    }

    fn resolve_source_bytes(&self, source: &str) -> Option<Vec<u8>> {
        let as_path = Path::new(source);
        if as_path.is_absolute() {
            return fs::read(as_path).ok();
        }

        if let Some(dir) = &self.dirs.asset_dir_builtin {
            let candidate = dir.join(source);
            if candidate.exists() {
                return fs::read(candidate).ok();
            }
        } else if let Some(bytes) = builtin_asset(source) {
            return Some(bytes.to_vec());
        }

        let candidate = self.dirs.asset_dir_user.join(source);
        if candidate.exists() {
            return fs::read(candidate).ok();
        }

        let candidate = self.dirs.repo_root.join(source);
        if candidate.exists() {
            return fs::read(candidate).ok();
        }

        None
    }
}

fn load_dir(dir: &Path) -> Result<Vec<TemplateDefinition>, TemplateError> {
    if !dir.exists() {
        return Ok(Vec::new());
    }

    let mut templates = Vec::new();
    for entry in fs::read_dir(dir).map_err(|e| TemplateError::io(dir, e))? {
        let entry = entry.map_err(|e| TemplateError::io(dir, e))?;
        let path = entry.path();
        if path.extension().and_then(|e| e.to_str()) != Some("json") {
            continue;
        }

        let body = fs::read_to_string(&path).map_err(|e| TemplateError::io(&path, e))?;
        let mut def: TemplateDefinition =
            serde_json::from_str(&body).map_err(|e| TemplateError::json(&path, e))?;
        if def.name.is_empty() {
            def.name = path
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_default();
        }
        templates.push(def);
    }
    Ok(templates)
}

#[cfg(test)]
#[path = "resolver_tests.rs"]
mod tests;
