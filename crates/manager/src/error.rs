// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The manager's error surface: every failure the session lifecycle can
//! produce, aggregated so surface adapters can translate with one `match`.

use thiserror::Error;
use tmuxd_adapters::MuxError;
use tmuxd_core::{AlreadyExistsError, NotFoundError, ValidationError};
use tmuxd_storage::StorageError;
use tmuxd_templates::TemplateError;

#[derive(Debug, Error)]
pub enum ManagerError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    NotFound(#[from] NotFoundError),

    #[error(transparent)]
    AlreadyExists(#[from] AlreadyExistsError),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Mux(#[from] MuxError),

    #[error(transparent)]
    Template(#[from] TemplateError),
}

impl ManagerError {
    /// A short, action-oriented message per distilled spec §7, suitable
    /// for surfacing to any adapter without protocol-specific framing.
    pub fn user_message(&self) -> String {
        self.to_string()
    }
}
