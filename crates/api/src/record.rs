// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The session shape returned across every surface: the persisted +
//! reconciled `Session`, plus the derived `session_url` field (C5).

use serde::Serialize;
use tmuxd_core::Session;

/// A session record enriched with fields computed only at the API layer,
/// never persisted to `metadata.json`.
#[derive(Debug, Clone, Serialize)]
pub struct SessionRecord {
    #[serde(flatten)]
    pub session: Session,
    pub session_url: String,
}
