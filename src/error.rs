// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application error types with consistent API responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Error reported by the managed backend (REST, RPC or storage).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendError {
    /// HTTP status the backend answered with
    pub status: u16,
    /// PostgREST / SQLSTATE code when present (e.g. `PGRST116`, `42501`)
    pub code: Option<String>,
    /// Backend message, surfaced verbatim to the operator
    pub message: String,
}

impl std::fmt::Display for BackendError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.code {
            Some(code) => write!(f, "{} ({}, HTTP {})", self.message, code, self.status),
            None => write!(f, "{} (HTTP {})", self.message, self.status),
        }
    }
}

impl BackendError {
    /// PostgREST code for a single-row read that matched nothing.
    pub const NO_ROWS: &'static str = "PGRST116";
    /// PostgREST code for an expired session token.
    pub const JWT_EXPIRED: &'static str = "PGRST301";
    /// SQLSTATE for insufficient privilege (row-level security, grants).
    pub const INSUFFICIENT_PRIVILEGE: &'static str = "42501";

    /// HTTP status this backend error maps to.
    pub fn status_code(&self) -> StatusCode {
        let code = self.code.as_deref();
        let message = self.message.to_lowercase();

        if code == Some(Self::NO_ROWS) || message.contains("not found") {
            StatusCode::NOT_FOUND
        } else if self.status == 401 || code == Some(Self::JWT_EXPIRED) {
            StatusCode::UNAUTHORIZED
        } else if self.status == 403
            || code == Some(Self::INSUFFICIENT_PRIVILEGE)
            || message.contains("only agents")
        {
            StatusCode::FORBIDDEN
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

/// Application error type that converts to HTTP responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Authentication required")]
    Unauthorized,

    #[error("Invalid or expired token")]
    InvalidToken,

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Invalid request: {0}")]
    BadRequest(String),

    #[error("Payload too large: {0}")]
    PayloadTooLarge(String),

    #[error("Backend error: {0}")]
    Backend(BackendError),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// True if the backend reported that the requested row does not exist.
    pub fn is_not_found(&self) -> bool {
        match self {
            AppError::NotFound(_) => true,
            AppError::Backend(err) => err.status_code() == StatusCode::NOT_FOUND,
            _ => false,
        }
    }

    /// HTTP status for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Unauthorized | AppError::InvalidToken => StatusCode::UNAUTHORIZED,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            AppError::Backend(err) => err.status_code(),
            AppError::Database(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut messages: Vec<String> = errors
            .field_errors()
            .iter()
            .flat_map(|(field, errs)| {
                errs.iter().map(move |e| match &e.message {
                    Some(msg) => msg.to_string(),
                    None => format!("{} is invalid", field),
                })
            })
            .collect();
        messages.sort();
        AppError::BadRequest(messages.join("; "))
    }
}

/// JSON error response body
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let (error, details) = match &self {
            AppError::Unauthorized => ("unauthorized", None),
            AppError::InvalidToken => ("invalid_token", None),
            AppError::Forbidden(msg) => ("forbidden", Some(msg.clone())),
            AppError::NotFound(msg) => ("not_found", Some(msg.clone())),
            AppError::BadRequest(msg) => ("bad_request", Some(msg.clone())),
            AppError::PayloadTooLarge(msg) => ("payload_too_large", Some(msg.clone())),
            AppError::Backend(err) => {
                if status.is_server_error() {
                    tracing::error!(
                        status = err.status,
                        code = ?err.code,
                        error = %err.message,
                        "Backend error"
                    );
                }
                ("backend_error", Some(err.message.clone()))
            }
            AppError::Database(msg) => {
                tracing::error!(error = %msg, "Database error");
                ("database_error", None)
            }
            AppError::Internal(err) => {
                tracing::error!(error = %err, "Internal server error");
                ("internal_error", None)
            }
        };

        let body = ErrorResponse {
            error: error.to_string(),
            details,
        };

        (status, Json(body)).into_response()
    }
}

/// Result type alias for handlers
pub type Result<T> = std::result::Result<T, AppError>;
