// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! MCP tool definitions, mirroring distilled spec §6's tool list one for
//! one. Each tool is a thin wrapper over `ApiHandle`; JSON-schema argument
//! structs are derived via `schemars`, the same macro idiom the wider
//! `rmcp`-based example pack uses.

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Arc;

use rmcp::handler::server::router::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::*;
use rmcp::{schemars, tool, tool_handler, tool_router, ErrorData as McpError, ServerHandler};
use serde::{Deserialize, Serialize};
use tmuxd_adapters::MuxAdapter;
use tmuxd_api::ApiHandle;
use tmuxd_core::TemplateDefinition;
use tmuxd_manager::CreateSessionInput;

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ListSessionsParams {
    /// Override the directory session records are loaded from.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_root: Option<PathBuf>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct GetSessionParams {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_root: Option<PathBuf>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct GetSessionUrlParams {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_root: Option<PathBuf>,
    /// Overrides the configured public base URL for this call only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct CreateSessionParams {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub command: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub command_args: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub working_dir: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub env: BTreeMap<String, String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_root: Option<PathBuf>,
    /// Sent via `send_text` after the template's `prompt_delay_ms` once the
    /// session is created. The session is already persisted at that point,
    /// so a cancelled wait never loses the session itself.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prompt: Option<String>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct SendInputParams {
    pub name: String,
    pub text: String,
    #[serde(default = "default_enter")]
    pub enter: bool,
}

fn default_enter() -> bool {
    true
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct TailLogParams {
    pub name: String,
    #[serde(default = "default_lines")]
    pub lines: usize,
}

fn default_lines() -> usize {
    200
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct KillSessionParams {
    pub name: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct EnqueueOneOffParams {
    pub name: String,
    pub command: String,
    #[serde(default = "default_one_off_template")]
    pub template: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

fn default_one_off_template() -> String {
    "script".to_string()
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct SaveTemplateParams {
    /// A `TemplateDefinition` document (see the `list_templates` result
    /// shape). Accepted as raw JSON so the tool schema doesn't need to
    /// mirror every template field.
    pub payload: serde_json::Value,
    #[serde(default)]
    pub include_sources: Vec<PathBuf>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct DeleteTemplateParams {
    pub name: String,
}

#[derive(Debug, Serialize)]
struct SessionUrlResult {
    session_url: String,
}

fn json_content<T: Serialize>(value: &T) -> Result<CallToolResult, McpError> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| McpError::internal_error(format!("serialization error: {e}"), None))?;
    Ok(CallToolResult::success(vec![Content::text(json)]))
}

fn err_result(msg: impl Into<String>) -> Result<CallToolResult, McpError> {
    Ok(CallToolResult::error(vec![Content::text(msg.into())]))
}

/// The tmuxd MCP server. Generic over the mux adapter so tests can wire in
/// `FakeMuxAdapter` while the binary wires in the real `TmuxAdapter`.
#[derive(Clone)]
pub struct TmuxdServer<M: MuxAdapter + Clone + Send + Sync + 'static> {
    handle: Arc<ApiHandle<M>>,
    tool_router: ToolRouter<Self>,
}

impl<M: MuxAdapter + Clone + Send + Sync + 'static> TmuxdServer<M> {
    pub fn new(handle: Arc<ApiHandle<M>>) -> Self {
        Self {
            handle,
            tool_router: Self::tool_router(),
        }
    }
}

#[tool_router]
impl<M: MuxAdapter + Clone + Send + Sync + 'static> TmuxdServer<M> {
    #[tool(description = "List every session, reconciled against live tmux state.")]
    async fn list_sessions(
        &self,
        Parameters(params): Parameters<ListSessionsParams>,
    ) -> Result<CallToolResult, McpError> {
        match self.handle.list_sessions(params.session_root).await {
            Ok(sessions) => json_content(&sessions),
            Err(e) => err_result(e.user_message()),
        }
    }

    #[tool(description = "Fetch one session by name, reconciled against live tmux state.")]
    async fn get_session(
        &self,
        Parameters(params): Parameters<GetSessionParams>,
    ) -> Result<CallToolResult, McpError> {
        match self.handle.get_session(&params.name, params.session_root).await {
            Ok(session) => json_content(&session),
            Err(e) => err_result(e.user_message()),
        }
    }

    #[tool(description = "Compute the UI deep link for a session without refetching its full record.")]
    async fn get_session_url(
        &self,
        Parameters(params): Parameters<GetSessionUrlParams>,
    ) -> Result<CallToolResult, McpError> {
        match self
            .handle
            .get_session_url(&params.name, params.session_root, params.base_url.as_deref())
            .await
        {
            Ok(session_url) => json_content(&SessionUrlResult { session_url }),
            Err(e) => err_result(e.user_message()),
        }
    }

    #[tool(
        description = "Create a new session from a template. If `prompt` is set, it is sent as input after the template's configured delay once the session is running."
    )]
    async fn create_session(
        &self,
        Parameters(params): Parameters<CreateSessionParams>,
    ) -> Result<CallToolResult, McpError> {
        let prompt = params.prompt.clone();
        let input = CreateSessionInput {
            name: params.name,
            template: params.template,
            command_override: params.command,
            command_args: params.command_args,
            session_type: None,
            description: params.description,
            working_dir: params.working_dir,
            env: params.env,
        };

        let record = match self.handle.create_session(input, params.session_root).await {
            Ok(record) => record,
            Err(e) => return err_result(e.user_message()),
        };

        if let Some(text) = prompt {
            let delay_ms = self
                .handle
                .get_template(&record.session.template)
                .and_then(|t| t.prompt_delay_ms)
                .unwrap_or(0);
            tokio::time::sleep(std::time::Duration::from_millis(delay_ms)).await;
            if let Err(e) = self.handle.send_text(&record.session.name, &text, true, None).await {
                tracing::warn!(session = %record.session.name, error = %e, "post-create prompt delivery failed");
            }
        }

        json_content(&record)
    }

    #[tool(description = "Send text (optionally followed by Enter) to a session's pane.")]
    async fn send_input(
        &self,
        Parameters(params): Parameters<SendInputParams>,
    ) -> Result<CallToolResult, McpError> {
        match self
            .handle
            .send_text(&params.name, &params.text, params.enter, None)
            .await
        {
            Ok(()) => json_content(&serde_json::json!({"sent": true})),
            Err(e) => err_result(e.user_message()),
        }
    }

    #[tool(description = "Return the last N lines of a session's console log.")]
    async fn tail_log(
        &self,
        Parameters(params): Parameters<TailLogParams>,
    ) -> Result<CallToolResult, McpError> {
        let lines = params.lines.clamp(1, 2000);
        match self.handle.tail_log(&params.name, lines, None) {
            Ok(log) => json_content(&serde_json::json!({"log": log})),
            Err(e) => err_result(e.user_message()),
        }
    }

    #[tool(description = "Kill a session's tmux pane. Idempotent; artifacts are preserved.")]
    async fn kill_session(
        &self,
        Parameters(params): Parameters<KillSessionParams>,
    ) -> Result<CallToolResult, McpError> {
        match self.handle.kill_session(&params.name, None).await {
            Ok(()) => json_content(&serde_json::json!({"killed": true})),
            Err(e) => err_result(e.user_message()),
        }
    }

    #[tool(description = "List the job ledger (one entry per session ever created).")]
    async fn list_jobs(&self) -> Result<CallToolResult, McpError> {
        match self.handle.list_jobs(None) {
            Ok(jobs) => json_content(&jobs),
            Err(e) => err_result(e.user_message()),
        }
    }

    #[tool(description = "Create a one-off session that runs a command to completion and exits.")]
    async fn enqueue_one_off(
        &self,
        Parameters(params): Parameters<EnqueueOneOffParams>,
    ) -> Result<CallToolResult, McpError> {
        let input = CreateSessionInput {
            name: params.name,
            template: Some(params.template),
            command_override: Some(params.command),
            command_args: None,
            session_type: Some(tmuxd_core::SessionType::OneOff),
            description: params.description,
            working_dir: None,
            env: BTreeMap::new(),
        };
        match self.handle.create_session(input, None).await {
            Ok(record) => json_content(&record),
            Err(e) => err_result(e.user_message()),
        }
    }

    #[tool(description = "List every available template, built-in and user-defined.")]
    async fn list_templates(&self) -> Result<CallToolResult, McpError> {
        json_content(&self.handle.list_templates())
    }

    #[tool(description = "Save a user-defined template, optionally materializing include-file sources alongside it.")]
    async fn save_template(
        &self,
        Parameters(params): Parameters<SaveTemplateParams>,
    ) -> Result<CallToolResult, McpError> {
        let payload: TemplateDefinition = match serde_json::from_value(params.payload) {
            Ok(payload) => payload,
            Err(e) => return err_result(format!("invalid template payload: {e}")),
        };
        match self.handle.save_template(payload, &params.include_sources) {
            Ok(path) => json_content(&serde_json::json!({"path": path})),
            Err(e) => err_result(e.user_message()),
        }
    }

    #[tool(description = "Delete a user-defined template. Built-in templates cannot be deleted.")]
    async fn delete_template(
        &self,
        Parameters(params): Parameters<DeleteTemplateParams>,
    ) -> Result<CallToolResult, McpError> {
        match self.handle.delete_template(&params.name) {
            Ok(()) => json_content(&serde_json::json!({"deleted": params.name})),
            Err(e) => err_result(e.user_message()),
        }
    }
}

#[tool_handler]
impl<M: MuxAdapter + Clone + Send + Sync + 'static> ServerHandler for TmuxdServer<M> {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "tmuxd".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                ..Default::default()
            },
            instructions: Some(
                "tmuxd exposes tmux-backed terminal sessions as MCP tools. Use create_session \
                 to start a long-running or one-off session, send_input/tail_log to interact \
                 with it, and get_session_url for a UI deep link. Session names double as tmux \
                 identifiers: alphanumerics, `-`, and `_` only."
                    .to_string(),
            ),
        }
    }
}

#[cfg(test)]
#[path = "server_tests.rs"]
mod tests;
