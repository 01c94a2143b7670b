//! Behavioral specifications for the tmuxd CLI.
//!
//! These tests are black-box: they invoke the `tmuxd` binary and verify
//! stdout, stderr, and exit codes.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

#[path = "specs/prelude.rs"]
mod prelude;

// cli/
#[path = "specs/cli/errors.rs"]
mod cli_errors;
#[path = "specs/cli/help.rs"]
mod cli_help;

// session/
#[path = "specs/session/lifecycle.rs"]
mod session_lifecycle;
#[path = "specs/session/one_off.rs"]
mod session_one_off;
#[path = "specs/session/include_files.rs"]
mod session_include_files;

// templates/
#[path = "specs/templates/overlay.rs"]
mod templates_overlay;
