// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Maps `ManagerError` onto the REST error convention: `{"detail": "..."}`
//! plus the HTTP status per distilled spec §7.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use tmuxd_manager::ManagerError;
use tmuxd_templates::TemplateError;

#[derive(Debug, Serialize)]
struct ErrorBody {
    detail: String,
}

pub struct ApiError(pub ManagerError);

impl From<ManagerError> for ApiError {
    fn from(err: ManagerError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            ManagerError::Validation(_) | ManagerError::AlreadyExists(_) => StatusCode::BAD_REQUEST,
            ManagerError::NotFound(_) => StatusCode::NOT_FOUND,
            ManagerError::Storage(_) | ManagerError::Mux(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ManagerError::Template(e) => match e {
                TemplateError::BuiltinDelete(_)
                | TemplateError::NotFound(_)
                | TemplateError::MalformedInclude { .. } => StatusCode::BAD_REQUEST,
                TemplateError::Io { .. } | TemplateError::Json { .. } => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            },
        };
        let body = ErrorBody {
            detail: self.0.user_message(),
        };
        (status, Json(body)).into_response()
    }
}
