// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! tmuxd - the session orchestrator CLI.
//!
//! A thin surface over `tmuxd-manager`: every subcommand resolves a
//! `Config` from the environment (optionally overridden by `--session-root`),
//! builds a `Manager<TmuxAdapter>`, and forwards the call. No daemon process
//! is involved — this binary talks to tmux directly, the same way
//! `tmuxd-restd`/`tmuxd-mcpd` do via `tmuxd-api`.

mod completions;
mod error;
mod output;

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use tmuxd_adapters::TmuxAdapter;
use tmuxd_api::ApiHandle;
use tmuxd_core::{SessionType, TemplateDefinition};
use tmuxd_manager::{Config, CreateSessionInput, Manager, ManagerError};

use completions::{generate_completions, CompletionsArgs};
use output::{print, print_list, OutputFormat};

#[derive(Parser)]
#[command(
    name = "tmuxd",
    version,
    about = "tmux-backed session orchestrator"
)]
struct Cli {
    /// Override the sessions root directory for this invocation.
    #[arg(long, global = true)]
    session_root: Option<PathBuf>,

    /// Output format for every subcommand.
    #[arg(long, value_enum, global = true, default_value = "json")]
    format: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List all sessions, with live tmux state reconciled in.
    List,
    /// Show a single session by name.
    Show { name: String },
    /// Attach a terminal to a session's tmux pane (exec's `tmux attach`).
    Attach { name: String },
    /// Create a new session.
    Create(CreateArgs),
    /// Enqueue a one-off command session.
    OneOff(OneOffArgs),
    /// Send text to a session's pane.
    Send(SendArgs),
    /// Kill a session's tmux pane.
    Kill { name: String },
    /// Tail a session's captured console log.
    Logs(LogsArgs),
    /// Show the job ledger.
    Jobs,
    /// Template management.
    #[command(subcommand)]
    Template(TemplateCommand),
    /// Generate shell completions.
    Completions(CompletionsArgs),
}

#[derive(Args)]
struct CreateArgs {
    name: String,
    #[arg(long)]
    template: Option<String>,
    #[arg(long)]
    command: Option<String>,
    #[arg(long = "arg")]
    command_args: Vec<String>,
    #[arg(long, value_enum)]
    session_type: Option<CliSessionType>,
    #[arg(long)]
    working_dir: Option<String>,
    #[arg(long)]
    description: Option<String>,
    /// Environment variable in `KEY=VALUE` form; repeatable.
    #[arg(long = "env", value_parser = parse_env_pair)]
    env: Vec<(String, String)>,
}

#[derive(Args)]
struct OneOffArgs {
    name: String,
    #[arg(long)]
    command: String,
    #[arg(long, default_value = "script")]
    template: String,
    #[arg(long)]
    description: Option<String>,
}

#[derive(Args)]
struct SendArgs {
    name: String,
    text: String,
    /// Do not send a trailing Enter keystroke.
    #[arg(long)]
    no_enter: bool,
}

#[derive(Args)]
struct LogsArgs {
    name: String,
    #[arg(long, default_value_t = 200)]
    lines: usize,
}

#[derive(Subcommand)]
enum TemplateCommand {
    /// List known templates.
    List,
    /// Show a single template.
    Show { name: String },
    /// Save a user template from a JSON payload file.
    Save {
        /// Path to a JSON file holding a `TemplateDefinition`.
        payload: PathBuf,
        /// Absolute paths of additional include-file sources to copy in.
        #[arg(long = "include")]
        include_sources: Vec<PathBuf>,
    },
    /// Delete a user template (built-ins cannot be deleted).
    Delete { name: String },
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum CliSessionType {
    LongRunning,
    OneOff,
}

impl From<CliSessionType> for SessionType {
    fn from(value: CliSessionType) -> Self {
        match value {
            CliSessionType::LongRunning => SessionType::LongRunning,
            CliSessionType::OneOff => SessionType::OneOff,
        }
    }
}

fn parse_env_pair(s: &str) -> Result<(String, String), String> {
    s.split_once('=')
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .ok_or_else(|| format!("expected KEY=VALUE, got `{s}`"))
}

#[derive(Serialize)]
struct MessageOut {
    message: String,
}

#[tokio::main]
async fn main() -> ExitCode {
    setup_logging();
    let cli = Cli::parse();

    if let Commands::Completions(args) = cli.command {
        generate_completions::<Cli>(args.shell);
        return ExitCode::SUCCESS;
    }

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::from(error::exit_code(&err) as u8)
        }
    }
}

fn setup_logging() {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer())
        .try_init();
}

async fn run(cli: Cli) -> Result<(), ManagerError> {
    let format = cli.format;
    let mut config = Config::from_env();
    if let Some(root) = &cli.session_root {
        config = config.with_sessions_root(root.clone());
    }
    let mux = TmuxAdapter::new();
    let manager = Arc::new(Manager::new(config, mux.clone())?);
    let handle = ApiHandle::new(manager.clone(), mux);

    match cli.command {
        Commands::List => {
            let sessions = handle.list_sessions(None).await?;
            print_list(&sessions, format, |s| {
                format!(
                    "{:<20} {:<10} {}",
                    s.session.name,
                    format!("{:?}", s.session.status),
                    s.session.command
                )
            });
        }
        Commands::Show { name } => {
            let session = handle.get_session(&name, None).await?;
            print(&session, format, |s| format!("{s:#?}"));
        }
        Commands::Attach { name } => {
            handle.get_session(&name, None).await?;
            attach(&name)?;
        }
        Commands::Create(args) => {
            let env: BTreeMap<String, String> = args.env.into_iter().collect();
            let input = CreateSessionInput {
                name: args.name,
                template: args.template,
                command_override: args.command,
                command_args: (!args.command_args.is_empty()).then_some(args.command_args),
                session_type: args.session_type.map(Into::into),
                description: args.description,
                working_dir: args.working_dir,
                env,
            };
            let session = handle.create_session(input, None).await?;
            print(&session, format, |s| format!("{s:#?}"));
        }
        Commands::OneOff(args) => {
            let input = CreateSessionInput {
                name: args.name,
                template: Some(args.template),
                command_override: Some(args.command),
                command_args: None,
                session_type: Some(SessionType::OneOff),
                description: args.description,
                working_dir: None,
                env: BTreeMap::new(),
            };
            let session = handle.create_session(input, None).await?;
            print(&session, format, |s| format!("{s:#?}"));
        }
        Commands::Send(args) => {
            let press_enter = !args.no_enter;
            handle.send_text(&args.name, &args.text, press_enter, None).await?;
            let out = MessageOut {
                message: format!("input sent to `{}`", args.name),
            };
            print(&out, format, |o| o.message.clone());
        }
        Commands::Kill { name } => {
            handle.kill_session(&name, None).await?;
            let out = MessageOut {
                message: format!("session `{name}` killed"),
            };
            print(&out, format, |o| o.message.clone());
        }
        Commands::Logs(args) => {
            let lines = args.lines.clamp(0, 2000);
            let log = handle.tail_log(&args.name, lines, None)?;
            match format {
                OutputFormat::Text => println!("{log}"),
                OutputFormat::Json => {
                    if let Ok(json) = serde_json::to_string_pretty(&serde_json::json!({ "log": log }))
                    {
                        println!("{json}");
                    }
                }
            }
        }
        Commands::Jobs => {
            let ledger = handle.list_jobs(None)?;
            print_list(&ledger.jobs, format, |j| {
                format!(
                    "{:<36} {:<20} {:<10} {:?}",
                    j.id, j.session, j.template, j.status
                )
            });
        }
        Commands::Template(cmd) => run_template(&handle, cmd, format)?,
        Commands::Completions(_) => unreachable!("handled before manager construction"),
    }

    Ok(())
}

fn run_template<M: tmuxd_adapters::MuxAdapter + Clone>(
    handle: &ApiHandle<M>,
    cmd: TemplateCommand,
    format: OutputFormat,
) -> Result<(), ManagerError> {
    match cmd {
        TemplateCommand::List => {
            let templates = handle.list_templates();
            print_list(&templates, format, |t| {
                format!("{:<16} {:<24} {}", t.name, t.label, t.command)
            });
        }
        TemplateCommand::Show { name } => match handle.get_template(&name) {
            Some(t) => print(&t, format, |t| format!("{t:#?}")),
            None => {
                return Err(tmuxd_core::NotFoundError::Template(name).into());
            }
        },
        TemplateCommand::Save {
            payload,
            include_sources,
        } => {
            let body = std::fs::read_to_string(&payload)
                .map_err(|e| tmuxd_storage::StorageError::io(payload.as_path(), e))?;
            let definition: TemplateDefinition = serde_json::from_str(&body)
                .map_err(|e| tmuxd_storage::StorageError::json(payload.as_path(), e))?;
            let path = handle.save_template(definition, &include_sources)?;
            let out = MessageOut {
                message: format!("template saved to {}", path.display()),
            };
            print(&out, format, |o| o.message.clone());
        }
        TemplateCommand::Delete { name } => {
            handle.delete_template(&name)?;
            let out = MessageOut {
                message: format!("template `{name}` deleted"),
            };
            print(&out, format, |o| o.message.clone());
        }
    }
    Ok(())
}

/// Exec `tmux attach-session -t <name>`, replacing this process so the
/// caller's terminal is handed directly to the pane. Only reached after
/// confirming the session exists in our own records.
#[cfg(unix)]
fn attach(name: &str) -> Result<(), ManagerError> {
    use std::os::unix::process::CommandExt;
    let err = std::process::Command::new("tmux")
        .args(["attach-session", "-t", name])
        .exec();
    Err(tmuxd_adapters::MuxError::CommandFailed {
        cmd: "tmux attach-session".to_string(),
        stderr: err.to_string(),
    }
    .into())
}

#[cfg(not(unix))]
fn attach(name: &str) -> Result<(), ManagerError> {
    let status = std::process::Command::new("tmux")
        .args(["attach-session", "-t", name])
        .status()
        .map_err(|e| tmuxd_adapters::MuxError::CommandFailed {
            cmd: "tmux attach-session".to_string(),
            stderr: e.to_string(),
        })?;
    if !status.success() {
        return Err(tmuxd_adapters::MuxError::CommandFailed {
            cmd: "tmux attach-session".to_string(),
            stderr: format!("exited with {status}"),
        }
        .into());
    }
    Ok(())
}
