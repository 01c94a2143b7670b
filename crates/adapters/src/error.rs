// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Errors raised by a multiplexer adapter.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum MuxError {
    #[error("tmux invocation `{0}` timed out")]
    Timeout(String),

    #[error("tmux invocation `{cmd}` failed: {stderr}")]
    CommandFailed { cmd: String, stderr: String },

    #[error("tmux is not installed or not on PATH")]
    NotInstalled,
}
