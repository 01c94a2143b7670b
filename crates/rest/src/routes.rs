// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Handler functions for every route in distilled spec §6's REST table.
//! Each one is a thin translation between an HTTP request/response and a
//! call into `ApiHandle`.

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tmuxd_adapters::MuxAdapter;
use tmuxd_api::{ApiHandle, SessionRecord};
use tmuxd_core::{SessionType, TemplateDefinition};
use tmuxd_manager::CreateSessionInput;

use crate::error::ApiError;

pub fn router<M>(handle: Arc<ApiHandle<M>>) -> Router
where
    M: MuxAdapter + Clone + Send + Sync + 'static,
{
    Router::new()
        .nest("/api", api_router())
        .with_state(handle)
}

fn api_router<M>() -> Router<Arc<ApiHandle<M>>>
where
    M: MuxAdapter + Clone + Send + Sync + 'static,
{
    use axum::routing::{delete, get, post};

    Router::new()
        .route("/sessions", get(list_sessions::<M>).post(create_session::<M>))
        .route(
            "/sessions/{name}",
            get(get_session::<M>).delete(kill_session::<M>),
        )
        .route("/sessions/{name}/input", post(send_input::<M>))
        .route("/sessions/{name}/log", get(tail_log::<M>))
        .route("/jobs", get(list_jobs::<M>).post(enqueue_one_off::<M>))
        .route(
            "/templates",
            get(list_templates::<M>).post(save_template::<M>),
        )
        .route("/templates/{name}", delete(delete_template::<M>))
}

#[derive(Debug, Deserialize)]
struct SessionRootQuery {
    session_root: Option<PathBuf>,
}

async fn list_sessions<M: MuxAdapter + Clone>(
    State(handle): State<Arc<ApiHandle<M>>>,
    Query(query): Query<SessionRootQuery>,
) -> Result<Json<Vec<SessionRecord>>, ApiError> {
    let sessions = handle.list_sessions(query.session_root).await?;
    Ok(Json(sessions))
}

async fn get_session<M: MuxAdapter + Clone>(
    State(handle): State<Arc<ApiHandle<M>>>,
    Path(name): Path<String>,
    Query(query): Query<SessionRootQuery>,
) -> Result<Json<SessionRecord>, ApiError> {
    let session = handle.get_session(&name, query.session_root).await?;
    Ok(Json(session))
}

#[derive(Debug, Deserialize)]
struct CreateSessionBody {
    name: String,
    template: Option<String>,
    command: Option<String>,
    command_args: Option<Vec<String>>,
    working_dir: Option<String>,
    description: Option<String>,
    #[serde(default)]
    env: BTreeMap<String, String>,
    session_root: Option<PathBuf>,
}

async fn create_session<M: MuxAdapter + Clone>(
    State(handle): State<Arc<ApiHandle<M>>>,
    Json(body): Json<CreateSessionBody>,
) -> Result<(StatusCode, Json<SessionRecord>), ApiError> {
    let input = CreateSessionInput {
        name: body.name,
        template: body.template,
        command_override: body.command,
        command_args: body.command_args,
        session_type: None,
        description: body.description,
        working_dir: body.working_dir,
        env: body.env,
    };
    let session = handle.create_session(input, body.session_root).await?;
    Ok((StatusCode::CREATED, Json(session)))
}

async fn kill_session<M: MuxAdapter + Clone>(
    State(handle): State<Arc<ApiHandle<M>>>,
    Path(name): Path<String>,
    Query(query): Query<SessionRootQuery>,
) -> Result<StatusCode, ApiError> {
    handle.kill_session(&name, query.session_root).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[derive(Debug, Deserialize)]
struct SendInputBody {
    text: String,
    #[serde(default = "default_enter")]
    enter: bool,
}

fn default_enter() -> bool {
    true
}

#[derive(Debug, Serialize)]
struct MessageResponse {
    message: String,
}

async fn send_input<M: MuxAdapter + Clone>(
    State(handle): State<Arc<ApiHandle<M>>>,
    Path(name): Path<String>,
    Json(body): Json<SendInputBody>,
) -> Result<Json<MessageResponse>, ApiError> {
    handle
        .send_text(&name, &body.text, body.enter, None)
        .await?;
    Ok(Json(MessageResponse {
        message: format!("input sent to `{name}`"),
    }))
}

#[derive(Debug, Deserialize)]
struct TailLogQuery {
    #[serde(default = "default_lines")]
    lines: usize,
}

fn default_lines() -> usize {
    200
}

#[derive(Debug, Serialize)]
struct LogResponse {
    log: String,
}

async fn tail_log<M: MuxAdapter + Clone>(
    State(handle): State<Arc<ApiHandle<M>>>,
    Path(name): Path<String>,
    Query(query): Query<TailLogQuery>,
) -> Result<Json<LogResponse>, ApiError> {
    let lines = query.lines.clamp(1, 2000);
    let log = handle.tail_log(&name, lines, None)?;
    Ok(Json(LogResponse { log }))
}

async fn list_jobs<M: MuxAdapter + Clone>(
    State(handle): State<Arc<ApiHandle<M>>>,
) -> Result<Json<tmuxd_core::JobLedger>, ApiError> {
    Ok(Json(handle.list_jobs(None)?))
}

#[derive(Debug, Deserialize)]
struct EnqueueOneOffBody {
    name: String,
    command: String,
    #[serde(default = "default_one_off_template")]
    template: String,
    description: Option<String>,
}

fn default_one_off_template() -> String {
    "script".to_string()
}

async fn enqueue_one_off<M: MuxAdapter + Clone>(
    State(handle): State<Arc<ApiHandle<M>>>,
    Json(body): Json<EnqueueOneOffBody>,
) -> Result<(StatusCode, Json<SessionRecord>), ApiError> {
    let input = CreateSessionInput {
        name: body.name,
        template: Some(body.template),
        command_override: Some(body.command),
        command_args: None,
        session_type: Some(SessionType::OneOff),
        description: body.description,
        working_dir: None,
        env: BTreeMap::new(),
    };
    let session = handle.create_session(input, None).await?;
    Ok((StatusCode::CREATED, Json(session)))
}

async fn list_templates<M: MuxAdapter + Clone>(
    State(handle): State<Arc<ApiHandle<M>>>,
) -> Json<Vec<TemplateDefinition>> {
    Json(handle.list_templates())
}

#[derive(Debug, Deserialize)]
struct SaveTemplateBody {
    payload: TemplateDefinition,
    #[serde(default)]
    include_sources: Vec<PathBuf>,
}

#[derive(Debug, Serialize)]
struct SaveTemplateResponse {
    path: PathBuf,
}

async fn save_template<M: MuxAdapter + Clone>(
    State(handle): State<Arc<ApiHandle<M>>>,
    Json(body): Json<SaveTemplateBody>,
) -> Result<(StatusCode, Json<SaveTemplateResponse>), ApiError> {
    let path = handle.save_template(body.payload, &body.include_sources)?;
    Ok((StatusCode::CREATED, Json(SaveTemplateResponse { path })))
}

async fn delete_template<M: MuxAdapter + Clone>(
    State(handle): State<Arc<ApiHandle<M>>>,
    Path(name): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    handle.delete_template(&name)?;
    Ok(Json(MessageResponse {
        message: format!("template `{name}` deleted"),
    }))
}

#[cfg(test)]
#[path = "routes_tests.rs"]
mod tests;
