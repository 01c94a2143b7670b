// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The single persisted settings document.

use serde::{Deserialize, Serialize};

/// `settings.json`: presently just the public base URL override used when
/// constructing UI deep links (distilled spec §3).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub session_base_url: Option<String>,
}
