// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! tmuxd-mcp: the MCP Server (C7) — tool exposure of `tmuxd-api` over the
//! streamable-HTTP MCP transport.

mod server;

pub use server::TmuxdServer;
