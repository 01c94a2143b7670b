// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The real tmux-backed adapter, driving the `tmux` binary as a subprocess.

use crate::error::MuxError;
use crate::mux::MuxAdapter;
use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use std::path::Path;
use std::time::Duration;
use tmuxd_core::{ClientInfo, PaneInfo, RuntimeState};
use tokio::process::Command;
use tokio::time::timeout;

const CALL_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Clone, Default)]
pub struct TmuxAdapter;

impl TmuxAdapter {
    pub fn new() -> Self {
        Self
    }

    async fn run(&self, args: &[&str]) -> Result<std::process::Output, MuxError> {
        let joined = args.join(" ");
        let fut = Command::new("tmux").args(args).output();

        let output = timeout(CALL_TIMEOUT, fut)
            .await
            .map_err(|_| MuxError::Timeout(joined.clone()))?
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    MuxError::NotInstalled
                } else {
                    MuxError::CommandFailed {
                        cmd: joined.clone(),
                        stderr: e.to_string(),
                    }
                }
            })?;

        Ok(output)
    }

    async fn run_ok(&self, args: &[&str]) -> Result<std::process::Output, MuxError> {
        let joined = args.join(" ");
        let output = self.run(args).await?;
        if !output.status.success() {
            return Err(MuxError::CommandFailed {
                cmd: joined,
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            });
        }
        Ok(output)
    }
}

#[async_trait]
impl MuxAdapter for TmuxAdapter {
    async fn exists(&self, name: &str) -> Result<bool, MuxError> {
        let output = self.run(&["has-session", "-t", name]).await?;
        Ok(output.status.success())
    }

    async fn new_detached(&self, name: &str, shell: &str) -> Result<(), MuxError> {
        self.run_ok(&["new-session", "-d", "-s", name, shell])
            .await?;
        Ok(())
    }

    async fn set_option(&self, name: &str, key: &str, value: &str) -> Result<(), MuxError> {
        self.run_ok(&["set-option", "-t", name, key, value]).await?;
        Ok(())
    }

    async fn pipe_pane(&self, target: &str, log_path: &Path) -> Result<(), MuxError> {
        let shell_fragment = format!("cat >> {}", shell_quote(&log_path.to_string_lossy()));
        self.run_ok(&["pipe-pane", "-o", "-t", target, &shell_fragment])
            .await?;
        Ok(())
    }

    async fn respawn_pane(
        &self,
        target: &str,
        shell: &str,
        command: &str,
    ) -> Result<(), MuxError> {
        self.run_ok(&["respawn-pane", "-k", "-t", target, shell, "-c", command])
            .await?;
        Ok(())
    }

    async fn send_keys(
        &self,
        target: &str,
        payload: &str,
        press_enter: bool,
    ) -> Result<(), MuxError> {
        if press_enter {
            self.run_ok(&["send-keys", "-t", target, payload, "Enter"])
                .await?;
        } else {
            self.run_ok(&["send-keys", "-t", target, payload]).await?;
        }
        Ok(())
    }

    async fn kill(&self, name: &str) -> Result<(), MuxError> {
        let output = self.run(&["kill-session", "-t", name]).await?;
        if !output.status.success() {
            tracing::debug!(session = name, "kill-session on an already-dead session");
        }
        Ok(())
    }

    async fn capture_runtime(&self, name: &str) -> Result<RuntimeState, MuxError> {
        let panes_output = self
            .run_ok(&[
                "list-panes",
                "-t",
                name,
                "-F",
                "#{pane_id}\t#{pane_index}\t#{pane_active}\t#{pane_current_command}\t#{pane_current_path}",
            ])
            .await?;
        let panes = parse_panes(&String::from_utf8_lossy(&panes_output.stdout));

        let clients_output = self
            .run_ok(&[
                "list-clients",
                "-t",
                name,
                "-F",
                "#{client_tty}\t#{client_activity}\t#{client_width}\t#{client_height}",
            ])
            .await?;
        let clients = parse_clients(&String::from_utf8_lossy(&clients_output.stdout));

        let session_output = self
            .run_ok(&[
                "list-sessions",
                "-F",
                "#{session_name}\t#{session_attached}\t#{session_last_attached}",
            ])
            .await?;
        let (attached, last_attached) =
            find_session_attachment(&String::from_utf8_lossy(&session_output.stdout), name);

        Ok(RuntimeState {
            panes,
            clients,
            last_attached,
            attached,
        })
    }
}

fn shell_quote(s: &str) -> String {
    format!("'{}'", s.replace('\'', "'\\''"))
}

fn parse_panes(output: &str) -> Vec<PaneInfo> {
    output
        .lines()
        .filter_map(|line| {
            let mut fields = line.split('\t');
            Some(PaneInfo {
                id: fields.next()?.to_string(),
                index: fields.next()?.parse().ok()?,
                active: fields.next()? == "1",
                current_command: fields.next()?.to_string(),
                current_path: fields.next()?.to_string(),
            })
        })
        .collect()
}

fn parse_clients(output: &str) -> Vec<ClientInfo> {
    output
        .lines()
        .filter_map(|line| {
            let mut fields = line.split('\t');
            Some(ClientInfo {
                tty: fields.next()?.to_string(),
                last_activity: fields.next().and_then(epoch_to_datetime),
                width: fields.next()?.parse().ok()?,
                height: fields.next()?.parse().ok()?,
            })
        })
        .collect()
}

fn find_session_attachment(output: &str, name: &str) -> (bool, Option<DateTime<Utc>>) {
    for line in output.lines() {
        let mut fields = line.split('\t');
        let session_name = fields.next().unwrap_or_default();
        if session_name != name {
            continue;
        }
        let attached = fields.next().map(|v| v != "0").unwrap_or(false);
        let last_attached = fields.next().and_then(epoch_to_datetime);
        return (attached, last_attached);
    }
    (false, None)
}

fn epoch_to_datetime(raw: &str) -> Option<DateTime<Utc>> {
    let epoch: i64 = raw.parse().ok()?;
    if epoch == 0 {
        return None;
    }
    Utc.timestamp_opt(epoch, 0).single()
}

#[cfg(test)]
#[path = "tmux_tests.rs"]
mod tests;
