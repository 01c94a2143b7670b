// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! tmuxd-core: domain types shared by every tmuxd crate.
//!
//! Nothing in here touches the filesystem or spawns a process; that's
//! `tmuxd-storage` and `tmuxd-adapters`. This crate just describes the
//! shapes that flow between them.

pub mod error;
pub mod id;
pub mod job;
pub mod session;
pub mod settings;
pub mod template;

pub use error::{AlreadyExistsError, NotFoundError, ValidationError};
pub use id::{HexIdGen, IdGen};
pub use job::{JobEntry, JobLedger, JobStatus};
pub use session::{ClientInfo, PaneInfo, RuntimeState, Session, SessionStatus, SessionType};
pub use settings::Settings;
pub use template::{Include, TemplateDefinition};

/// Current on-disk schema version for `Session` and `TemplateDefinition`
/// documents. Bump when a breaking change is made to either shape; readers
/// reject anything newer than this, per the persistence invariant.
pub const SCHEMA_VERSION: u32 = 1;
