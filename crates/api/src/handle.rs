// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `ApiHandle`: the thin layer every surface adapter (REST, MCP, CLI)
//! builds on. Owns the default `Manager` and knows how to construct a
//! scoped one for a per-call `session_root` override, and how to derive
//! `session_url` (distilled spec §3, §6).

use std::path::PathBuf;
use std::sync::Arc;
use tmuxd_adapters::MuxAdapter;
use tmuxd_core::{JobLedger, Session, TemplateDefinition};
use tmuxd_manager::{CreateSessionInput, Manager, ManagerError};

use crate::record::SessionRecord;

const SESSION_URL_ENV: &str = "TMUXD_PUBLIC_BASE_URL";

/// Wraps a `Manager` and adds the cross-cutting bits every public surface
/// needs: scoped managers for `session_root` overrides, and `session_url`
/// derivation. Generic over the adapter so a scoped manager can be built
/// without boxing the trait.
pub struct ApiHandle<M: MuxAdapter + Clone> {
    manager: Arc<Manager<M>>,
    mux: M,
}

impl<M: MuxAdapter + Clone> ApiHandle<M> {
    pub fn new(manager: Arc<Manager<M>>, mux: M) -> Self {
        Self { manager, mux }
    }

    /// The default manager, or a fresh one rooted at `session_root` when
    /// the caller supplied an override. A scoped manager shares nothing
    /// with the default one beyond the mux adapter, per the redesign note
    /// against hidden global state.
    fn scoped(&self, session_root: Option<PathBuf>) -> Result<Arc<Manager<M>>, ManagerError> {
        match session_root {
            None => Ok(self.manager.clone()),
            Some(root) => {
                let config = self.manager.config().with_sessions_root(root);
                Ok(Arc::new(Manager::new(config, self.mux.clone())?))
            }
        }
    }

    pub async fn list_sessions(
        &self,
        session_root: Option<PathBuf>,
    ) -> Result<Vec<SessionRecord>, ManagerError> {
        let manager = self.scoped(session_root)?;
        let sessions = manager.list().await?;
        Ok(sessions
            .into_iter()
            .map(|s| self.enrich(&manager, s))
            .collect())
    }

    pub async fn get_session(
        &self,
        name: &str,
        session_root: Option<PathBuf>,
    ) -> Result<SessionRecord, ManagerError> {
        let manager = self.scoped(session_root)?;
        let session = manager.get(name).await?;
        Ok(self.enrich(&manager, session))
    }

    pub async fn create_session(
        &self,
        input: CreateSessionInput,
        session_root: Option<PathBuf>,
    ) -> Result<SessionRecord, ManagerError> {
        let manager = self.scoped(session_root)?;
        let session = manager.create(input).await?;
        Ok(self.enrich(&manager, session))
    }

    /// Resolve `session_url` for a session without returning its full
    /// record, honoring a per-call `base_url` override ahead of the usual
    /// env/settings/compiled-default chain.
    pub async fn get_session_url(
        &self,
        name: &str,
        session_root: Option<PathBuf>,
        base_url: Option<&str>,
    ) -> Result<String, ManagerError> {
        let manager = self.scoped(session_root)?;
        let session = manager.get(name).await?;
        Ok(self.session_url(&manager, &session, base_url))
    }

    pub async fn kill_session(
        &self,
        name: &str,
        session_root: Option<PathBuf>,
    ) -> Result<(), ManagerError> {
        self.scoped(session_root)?.kill(name).await
    }

    pub async fn send_text(
        &self,
        name: &str,
        text: &str,
        press_enter: bool,
        session_root: Option<PathBuf>,
    ) -> Result<(), ManagerError> {
        self.scoped(session_root)?
            .send_text(name, text, press_enter)
            .await
    }

    pub fn tail_log(
        &self,
        name: &str,
        lines: usize,
        session_root: Option<PathBuf>,
    ) -> Result<String, ManagerError> {
        self.scoped(session_root)?.tail_log(name, lines)
    }

    pub fn list_jobs(&self, session_root: Option<PathBuf>) -> Result<JobLedger, ManagerError> {
        self.scoped(session_root)?.list_jobs()
    }

    pub fn list_templates(&self) -> Vec<TemplateDefinition> {
        self.manager.list_templates()
    }

    pub fn get_template(&self, name: &str) -> Option<TemplateDefinition> {
        self.manager.get_template(name)
    }

    pub fn save_template(
        &self,
        payload: TemplateDefinition,
        include_sources: &[PathBuf],
    ) -> Result<PathBuf, ManagerError> {
        self.manager.save_template(payload, include_sources)
    }

    pub fn delete_template(&self, name: &str) -> Result<(), ManagerError> {
        self.manager.delete_template(name)
    }

    fn enrich(&self, manager: &Manager<M>, session: Session) -> SessionRecord {
        let session_url = self.session_url(manager, &session, None);
        SessionRecord {
            session,
            session_url,
        }
    }

    /// Resolve the base URL used to build a session's deep link, in
    /// priority order: an explicit per-call override, the environment
    /// variable read at call time, `settings.json`, then the
    /// compiled-in default captured at startup.
    pub fn session_url(
        &self,
        manager: &Manager<M>,
        session: &Session,
        base_override: Option<&str>,
    ) -> String {
        let base = base_override
            .map(|s| s.to_string())
            .or_else(|| std::env::var(SESSION_URL_ENV).ok())
            .or_else(|| {
                manager
                    .settings()
                    .ok()
                    .and_then(|s| s.session_base_url)
            })
            .unwrap_or_else(|| manager.config().public_base_url_default.clone());

        format!(
            "{}/ui/Sessions?session={}&template={}",
            base.trim_end_matches('/'),
            session.name,
            session.template
        )
    }
}

impl<M: MuxAdapter + Clone> Clone for ApiHandle<M> {
    fn clone(&self) -> Self {
        Self {
            manager: self.manager.clone(),
            mux: self.mux.clone(),
        }
    }
}

#[cfg(test)]
#[path = "handle_tests.rs"]
mod tests;
