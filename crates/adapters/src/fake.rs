// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! In-memory multiplexer adapter for tests: no `tmux` binary required.

use crate::error::MuxError;
use crate::mux::MuxAdapter;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tmuxd_core::RuntimeState;

#[derive(Debug, Clone)]
pub enum MuxCall {
    Exists { name: String },
    NewDetached { name: String, shell: String },
    SetOption { name: String, key: String, value: String },
    PipePane { target: String },
    RespawnPane { target: String, command: String },
    SendKeys { target: String, payload: String, press_enter: bool },
    Kill { name: String },
    CaptureRuntime { name: String },
}

#[derive(Debug, Default, Clone)]
struct FakeSession {
    alive: bool,
    runtime: RuntimeState,
}

/// Records every call and tracks which session names are "alive", without
/// touching a real multiplexer. Sessions start alive on `new_detached` and
/// stay alive until `kill`; tests can poke `set_runtime`/`mark_dead` to
/// drive reconciliation scenarios.
#[derive(Clone, Default)]
pub struct FakeMuxAdapter {
    sessions: Arc<Mutex<HashMap<String, FakeSession>>>,
    calls: Arc<Mutex<Vec<MuxCall>>>,
}

impl FakeMuxAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> Vec<MuxCall> {
        self.calls.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    pub fn mark_dead(&self, name: &str) {
        if let Some(session) = self
            .sessions
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .get_mut(name)
        {
            session.alive = false;
        }
    }

    pub fn set_runtime(&self, name: &str, runtime: RuntimeState) {
        let mut sessions = self.sessions.lock().unwrap_or_else(|e| e.into_inner());
        let entry = sessions.entry(name.to_string()).or_default();
        entry.runtime = runtime;
    }

    fn record(&self, call: MuxCall) {
        self.calls.lock().unwrap_or_else(|e| e.into_inner()).push(call);
    }
}

#[async_trait]
impl MuxAdapter for FakeMuxAdapter {
    async fn exists(&self, name: &str) -> Result<bool, MuxError> {
        self.record(MuxCall::Exists {
            name: name.to_string(),
        });
        Ok(self
            .sessions
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .get(name)
            .map(|s| s.alive)
            .unwrap_or(false))
    }

    async fn new_detached(&self, name: &str, shell: &str) -> Result<(), MuxError> {
        self.record(MuxCall::NewDetached {
            name: name.to_string(),
            shell: shell.to_string(),
        });
        self.sessions
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .insert(
                name.to_string(),
                FakeSession {
                    alive: true,
                    runtime: RuntimeState::default(),
                },
            );
        Ok(())
    }

    async fn set_option(&self, name: &str, key: &str, value: &str) -> Result<(), MuxError> {
        self.record(MuxCall::SetOption {
            name: name.to_string(),
            key: key.to_string(),
            value: value.to_string(),
        });
        Ok(())
    }

    async fn pipe_pane(&self, target: &str, _log_path: &std::path::Path) -> Result<(), MuxError> {
        self.record(MuxCall::PipePane {
            target: target.to_string(),
        });
        Ok(())
    }

    async fn respawn_pane(
        &self,
        target: &str,
        _shell: &str,
        command: &str,
    ) -> Result<(), MuxError> {
        self.record(MuxCall::RespawnPane {
            target: target.to_string(),
            command: command.to_string(),
        });
        Ok(())
    }

    async fn send_keys(
        &self,
        target: &str,
        payload: &str,
        press_enter: bool,
    ) -> Result<(), MuxError> {
        self.record(MuxCall::SendKeys {
            target: target.to_string(),
            payload: payload.to_string(),
            press_enter,
        });
        Ok(())
    }

    async fn kill(&self, name: &str) -> Result<(), MuxError> {
        self.record(MuxCall::Kill {
            name: name.to_string(),
        });
        if let Some(session) = self
            .sessions
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .get_mut(name)
        {
            session.alive = false;
        }
        Ok(())
    }

    async fn capture_runtime(&self, name: &str) -> Result<RuntimeState, MuxError> {
        self.record(MuxCall::CaptureRuntime {
            name: name.to_string(),
        });
        Ok(self
            .sessions
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .get(name)
            .map(|s| s.runtime.clone())
            .unwrap_or_default())
    }
}

#[cfg(test)]
#[path = "fake_tests.rs"]
mod tests;
