// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The four directories the resolver consults, per the search order used
//! both for loading template definitions and for resolving include-file
//! sources.

use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct TemplateDirs {
    /// Extra on-disk template JSON files layered over the compiled-in set.
    /// `None` means the compiled-in set is the only built-in source.
    pub template_dir_builtin: Option<PathBuf>,

    /// User-writable directory of template JSON files; shadows built-ins
    /// by name.
    pub template_dir_user: PathBuf,

    /// On-disk override for embedded include-file assets. `None` falls
    /// back to the files compiled into the binary.
    pub asset_dir_builtin: Option<PathBuf>,

    /// Where `save()` copies user-supplied include-file sources.
    pub asset_dir_user: PathBuf,

    /// Last-resort directory for resolving relative include sources.
    pub repo_root: PathBuf,
}
