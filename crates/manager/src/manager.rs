// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The Session Manager (C4): the single writer of session records, the
//! orchestrator of C1 (storage), C2 (templates), and C3 (the mux adapter).

use crate::config::Config;
use crate::error::ManagerError;
use crate::locks::SessionLocks;
use crate::script;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;
use tmuxd_adapters::MuxAdapter;
use tmuxd_core::{
    AlreadyExistsError, HexIdGen, IdGen, JobEntry, JobLedger, NotFoundError, Session,
    SessionStatus, SessionType, Settings, TemplateDefinition, ValidationError,
};
use tmuxd_storage::{Layout, QueueStore, SessionStore, SettingsStore};
use tmuxd_templates::TemplateResolver;
use tokio::sync::Mutex as AsyncMutex;
use tracing::warn;

/// Inputs to `Manager::create`, mirroring distilled §4.4 verbatim.
#[derive(Debug, Clone, Default)]
pub struct CreateSessionInput {
    pub name: String,
    pub template: Option<String>,
    pub command_override: Option<String>,
    pub command_args: Option<Vec<String>>,
    pub session_type: Option<SessionType>,
    pub description: Option<String>,
    pub working_dir: Option<String>,
    pub env: BTreeMap<String, String>,
}

impl CreateSessionInput {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }
}

#[derive(Debug, Deserialize)]
struct ResultDoc {
    exit_code: i32,
    #[allow(dead_code)]
    started_at: DateTime<Utc>,
    finished_at: DateTime<Utc>,
    message: Option<String>,
}

/// The session lifecycle engine. Generic over the multiplexer adapter so
/// production code wires in `TmuxAdapter` and tests wire in
/// `FakeMuxAdapter` without any conditional compilation.
pub struct Manager<M: MuxAdapter> {
    config: Config,
    layout: Layout,
    mux: M,
    sessions: SessionStore,
    jobs: QueueStore,
    settings: SettingsStore,
    templates: TemplateResolver,
    locks: SessionLocks,
    job_lock: AsyncMutex<()>,
    id_gen: HexIdGen,
}

impl<M: MuxAdapter> Manager<M> {
    pub fn new(config: Config, mux: M) -> Result<Self, ManagerError> {
        let layout = Layout::new(config.sessions_root.clone());
        let templates = TemplateResolver::new(config.template_dirs.clone())?;
        Ok(Self {
            sessions: SessionStore::new(layout.clone()),
            jobs: QueueStore::new(layout.clone()),
            settings: SettingsStore::new(layout.clone()),
            layout,
            mux,
            templates,
            locks: SessionLocks::new(),
            job_lock: AsyncMutex::new(()),
            id_gen: HexIdGen,
            config,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    // ---- creation ---------------------------------------------------

    pub async fn create(&self, input: CreateSessionInput) -> Result<Session, ManagerError> {
        validate_name(&input.name)?;
        let _guard = self.locks.lock(&input.name).await;

        if self.mux.exists(&input.name).await? || self.sessions.exists(&input.name) {
            return Err(AlreadyExistsError::Session(input.name.clone()).into());
        }

        let template_name = input.template.clone().unwrap_or_else(|| "bash".to_string());
        let template = self
            .templates
            .get(&template_name)
            .ok_or_else(|| NotFoundError::Template(template_name.clone()))?;

        let session_type = input.session_type.unwrap_or(template.session_type);
        let mut command = input
            .command_override
            .clone()
            .unwrap_or_else(|| template.command.clone());
        if let Some(args) = &input.command_args {
            if !args.is_empty() {
                let quoted: Vec<String> = args.iter().map(|a| shell_quote(a)).collect();
                if command.is_empty() {
                    command = quoted.join(" ");
                } else {
                    command = format!("{command} {}", quoted.join(" "));
                }
            }
        }
        if session_type == SessionType::OneOff && command.trim().is_empty() {
            return Err(ValidationError::EmptyOneOffCommand.into());
        }

        let mut env = template.env.clone();
        for (k, v) in &input.env {
            env.insert(k.clone(), v.clone());
        }

        let working_dir = input.working_dir.clone().or_else(|| template.working_dir.clone());

        let workspace_path = self.layout.artifacts_dir(&input.name);
        let log_path = self.layout.console_log_path(&input.name);

        if let Err(e) = self.provision_workspace(&input.name, &template, &workspace_path, &log_path) {
            self.cleanup_failed_create(&input.name, None).await;
            return Err(e);
        }

        let job_id = self.id_gen.next();
        let now = Utc::now();
        let job = JobEntry::new(&job_id, &input.name, &template_name, &command, now);
        if let Err(e) = self.add_job(job).await {
            self.cleanup_failed_create(&input.name, None).await;
            return Err(e.into());
        }

        let mut session = Session::new(
            &input.name,
            session_type,
            &command,
            &template_name,
            input.description.clone(),
            workspace_path,
            log_path.clone(),
            now,
        );
        session.job_id = Some(job_id.clone());
        if let Err(e) = self.sessions.save(&session) {
            self.cleanup_failed_create(&input.name, Some(&job_id)).await;
            return Err(e.into());
        }

        if let Err(e) = self
            .launch(&mut session, session_type, &command, working_dir.as_deref(), &env)
            .await
        {
            self.cleanup_failed_create(&input.name, Some(&job_id)).await;
            return Err(e);
        }

        session.status = SessionStatus::Running;
        session.updated_at = Utc::now();
        self.sessions.save(&session)?;
        self.update_job_status(&job_id, SessionStatus::Running, None, session.updated_at)
            .await?;

        Ok(session)
    }

    fn provision_workspace(
        &self,
        name: &str,
        template: &TemplateDefinition,
        workspace_path: &Path,
        log_path: &Path,
    ) -> Result<(), ManagerError> {
        std::fs::create_dir_all(workspace_path)
            .map_err(|e| tmuxd_storage::StorageError::io(workspace_path, e))?;
        if let Some(parent) = log_path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| tmuxd_storage::StorageError::io(parent, e))?;
        }
        std::fs::write(log_path, b"").map_err(|e| tmuxd_storage::StorageError::io(log_path, e))?;
        let _ = name;
        self.templates.materialize_includes(template, workspace_path)?;
        Ok(())
    }

    async fn launch(
        &self,
        session: &mut Session,
        session_type: SessionType,
        command: &str,
        working_dir: Option<&str>,
        env: &BTreeMap<String, String>,
    ) -> Result<(), ManagerError> {
        let name = session.name.clone();
        let target = format!("{name}:0.0");

        self.mux.new_detached(&name, "bash -l").await?;
        self.mux.set_option(&name, "status", "off").await?;
        self.mux.pipe_pane(&target, &session.log_path).await?;

        match session_type {
            SessionType::OneOff => {
                let result_path = self.layout.result_path(&name);
                let script_path = self.layout.run_once_script_path(&name);
                let mut body = String::new();
                for (k, v) in env {
                    body.push_str(&format!("export {k}={}\n", shell_quote(v)));
                }
                body.push_str(&script::render(
                    command,
                    working_dir,
                    &session.log_path,
                    &result_path,
                ));
                script::write(&script_path, &body)
                    .map_err(|e| tmuxd_storage::StorageError::io(&script_path, e))?;
                let exec = format!("exec {}", shell_quote(&script_path.to_string_lossy()));
                self.mux.respawn_pane(&target, "bash", &exec).await?;
            }
            SessionType::LongRunning => {
                for (k, v) in env {
                    self.mux
                        .send_keys(&target, &format!("export {k}={}", shell_quote(v)), true)
                        .await?;
                }
                if let Some(dir) = working_dir {
                    self.mux
                        .send_keys(&target, &format!("cd {}", shell_quote(dir)), true)
                        .await?;
                }
                if !command.trim().is_empty() {
                    self.mux.send_keys(&target, command, true).await?;
                }
            }
        }
        Ok(())
    }

    async fn cleanup_failed_create(&self, name: &str, job_id: Option<&str>) {
        if let Some(id) = job_id {
            if let Err(e) = self.jobs.remove_job(id) {
                warn!(session = name, error = %e, "cleanup: failed to remove job ledger entry");
            }
        }
        if let Err(e) = self.sessions.delete(name) {
            warn!(session = name, error = %e, "cleanup: failed to remove session directory");
        }
    }

    // ---- reads & reconciliation --------------------------------------

    pub async fn list(&self) -> Result<Vec<Session>, ManagerError> {
        let mut sessions = self.sessions.list()?;
        for session in &mut sessions {
            self.reconcile(session).await;
        }
        Ok(sessions)
    }

    pub async fn get(&self, name: &str) -> Result<Session, ManagerError> {
        let mut session = self
            .sessions
            .load(name)
            .map_err(|_| NotFoundError::Session(name.to_string()))?;
        self.reconcile(&mut session).await;
        Ok(session)
    }

    async fn reconcile(&self, session: &mut Session) {
        session.runtime = None;
        let now = Utc::now();

        match self.mux.exists(&session.name).await {
            Ok(true) => {
                match self.mux.capture_runtime(&session.name).await {
                    Ok(runtime) => session.runtime = Some(runtime),
                    Err(e) => warn!(session = %session.name, error = %e, "capture_runtime failed"),
                }
                if !matches!(session.status, SessionStatus::Running | SessionStatus::Starting) {
                    session.status = SessionStatus::Running;
                    session.updated_at = now;
                    self.persist_reconciled(session, None).await;
                }
            }
            Ok(false) => self.reconcile_not_alive(session, now).await,
            Err(e) => {
                warn!(session = %session.name, error = %e, "mux.exists failed during reconciliation");
            }
        }
    }

    async fn reconcile_not_alive(&self, session: &mut Session, now: DateTime<Utc>) {
        match session.session_type {
            SessionType::OneOff => {
                if session.status.is_terminal() {
                    return;
                }
                let result_path = self.layout.result_path(&session.name);
                if result_path.exists() {
                    match read_result(&result_path) {
                        Ok(result) => {
                            session.exit_code = Some(result.exit_code);
                            session.status = if result.exit_code == 0 {
                                SessionStatus::Completed
                            } else {
                                SessionStatus::Failed
                            };
                            session.updated_at = result.finished_at;
                            let message = result
                                .message
                                .unwrap_or_else(|| format!("session exited with code {}", result.exit_code));
                            session.last_message = Some(message.clone());
                            self.persist_reconciled(session, Some(message)).await;
                        }
                        Err(e) => {
                            warn!(session = %session.name, error = %e, "failed to parse result.json");
                        }
                    }
                } else {
                    session.status = SessionStatus::Completed;
                    session.updated_at = now;
                    self.persist_reconciled(session, None).await;
                }
            }
            SessionType::LongRunning => {
                if session.status != SessionStatus::Stopped {
                    session.status = SessionStatus::Stopped;
                    session.updated_at = now;
                    self.persist_reconciled(session, None).await;
                }
            }
        }
    }

    async fn persist_reconciled(&self, session: &Session, message: Option<String>) {
        if let Err(e) = self.sessions.save(session) {
            warn!(session = %session.name, error = %e, "failed to persist reconciled session");
            return;
        }
        if let Some(job_id) = &session.job_id {
            if let Err(e) = self
                .update_job_status(job_id, session.status, message, session.updated_at)
                .await
            {
                warn!(session = %session.name, error = %e, "failed to update job ledger during reconciliation");
            }
        }
    }

    // ---- other operations ---------------------------------------------

    pub async fn send_text(&self, name: &str, text: &str, press_enter: bool) -> Result<(), ManagerError> {
        let _guard = self.locks.lock(name).await;
        if !self.sessions.exists(name) {
            return Err(NotFoundError::Session(name.to_string()).into());
        }
        if text.is_empty() && !press_enter {
            return Ok(());
        }
        let target = format!("{name}:0.0");
        self.mux.send_keys(&target, text, press_enter).await?;
        Ok(())
    }

    pub async fn kill(&self, name: &str) -> Result<(), ManagerError> {
        let _guard = self.locks.lock(name).await;
        if !self.sessions.exists(name) {
            return Err(NotFoundError::Session(name.to_string()).into());
        }
        if !self.mux.exists(name).await? {
            return Ok(());
        }
        self.mux.kill(name).await?;

        let mut session = self.sessions.load(name)?;
        session.status = SessionStatus::Stopped;
        session.updated_at = Utc::now();
        self.sessions.save(&session)?;
        if let Some(job_id) = &session.job_id {
            self.update_job_status(job_id, SessionStatus::Stopped, None, session.updated_at)
                .await?;
        }
        Ok(())
    }

    pub fn tail_log(&self, name: &str, lines: usize) -> Result<String, ManagerError> {
        if !self.sessions.exists(name) {
            return Err(NotFoundError::Session(name.to_string()).into());
        }
        let log_path = self.layout.console_log_path(name);
        Ok(tmuxd_storage::tail(&log_path, lines)?)
    }

    pub fn list_jobs(&self) -> Result<JobLedger, ManagerError> {
        Ok(self.jobs.load()?)
    }

    pub fn list_templates(&self) -> Vec<TemplateDefinition> {
        self.templates.list()
    }

    pub fn get_template(&self, name: &str) -> Option<TemplateDefinition> {
        self.templates.get(name)
    }

    pub fn save_template(
        &self,
        payload: TemplateDefinition,
        include_sources: &[std::path::PathBuf],
    ) -> Result<std::path::PathBuf, ManagerError> {
        let path = self.templates.save(payload, include_sources)?;
        self.templates.refresh()?;
        Ok(path)
    }

    pub fn delete_template(&self, name: &str) -> Result<(), ManagerError> {
        self.templates.delete(name)?;
        self.templates.refresh()?;
        Ok(())
    }

    pub fn settings(&self) -> Result<Settings, ManagerError> {
        Ok(self.settings.load()?)
    }

    async fn add_job(&self, job: JobEntry) -> Result<(), ManagerError> {
        let _guard = self.job_lock.lock().await;
        self.jobs.add_job(job)?;
        Ok(())
    }

    async fn update_job_status(
        &self,
        job_id: &str,
        status: SessionStatus,
        message: Option<String>,
        now: DateTime<Utc>,
    ) -> Result<(), ManagerError> {
        let _guard = self.job_lock.lock().await;
        self.jobs.update_job(job_id, status, message, now)?;
        Ok(())
    }
}

fn read_result(path: &Path) -> Result<ResultDoc, String> {
    let body = std::fs::read_to_string(path).map_err(|e| e.to_string())?;
    serde_json::from_str(&body).map_err(|e| e.to_string())
}

/// Session names double as the tmux identifier: an ASCII token of
/// alphanumerics, `-`, and `_` only (no `:`/`.` which tmux's target syntax
/// reserves for window/pane addressing).
pub fn validate_name(name: &str) -> Result<(), ValidationError> {
    if name.is_empty() {
        return Err(ValidationError::EmptyName(name.to_string()));
    }
    for c in name.chars() {
        if !(c.is_ascii_alphanumeric() || c == '-' || c == '_') {
            return Err(ValidationError::InvalidNameCharacter {
                name: name.to_string(),
                invalid: c,
            });
        }
    }
    Ok(())
}

fn shell_quote(s: &str) -> String {
    format!("'{}'", s.replace('\'', "'\\''"))
}

#[cfg(test)]
#[path = "manager_tests.rs"]
mod tests;
