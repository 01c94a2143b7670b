// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Output formatting for CLI commands.
//!
//! JSON-pretty is the default per distilled spec §6 ("stdout is JSON-pretty
//! for machine consumption"); `--format text` is an explicit opt-in for
//! interactive use.

use clap::ValueEnum;
use serde::Serialize;

#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Json,
    Text,
}

/// Print a single value in the requested format. `render` produces the
/// human-readable line(s) used for `OutputFormat::Text`.
pub fn print<T: Serialize>(value: &T, format: OutputFormat, render: impl FnOnce(&T) -> String) {
    match format {
        OutputFormat::Text => println!("{}", render(value)),
        OutputFormat::Json => {
            if let Ok(json) = serde_json::to_string_pretty(value) {
                println!("{}", json);
            }
        }
    }
}

/// Print a list of items, one rendered line per item in text mode.
pub fn print_list<T: Serialize>(
    items: &[T],
    format: OutputFormat,
    render: impl Fn(&T) -> String,
) {
    match format {
        OutputFormat::Text => {
            if items.is_empty() {
                println!("(none)");
            }
            for item in items {
                println!("{}", render(item));
            }
        }
        OutputFormat::Json => {
            if let Ok(json) = serde_json::to_string_pretty(items) {
                println!("{}", json);
            }
        }
    }
}
