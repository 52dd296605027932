// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Image upload for blog posts.

use crate::error::{AppError, Result};
use crate::middleware::auth::AuthUser;
use crate::services::media::{is_image, object_name};
use crate::AppState;
use axum::{
    extract::{multipart::MultipartError, DefaultBodyLimit, Multipart, State},
    http::StatusCode,
    routing::post,
    Extension, Json, Router,
};
use serde::Serialize;
use std::sync::Arc;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Largest accepted image.
pub const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Room for multipart boundaries and part headers on top of the image.
const FORM_OVERHEAD_BYTES: usize = 64 * 1024;

/// Multipart field carrying the image.
const FILE_FIELD: &str = "file";

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route(
        "/api/agent/upload-image",
        post(upload_image).layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES + FORM_OVERHEAD_BYTES)),
    )
}

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct UploadResponse {
    /// Public URL of the stored image
    pub url: String,
}

struct UploadedFile {
    filename: String,
    content_type: String,
    bytes: Vec<u8>,
}

fn form_error(e: MultipartError) -> AppError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        too_large()
    } else {
        AppError::BadRequest(format!("Invalid multipart form: {}", e.body_text()))
    }
}

fn too_large() -> AppError {
    AppError::PayloadTooLarge(format!(
        "Images may be at most {} MB",
        MAX_UPLOAD_BYTES / (1024 * 1024)
    ))
}

async fn read_file_field(multipart: &mut Multipart) -> Result<Option<UploadedFile>> {
    while let Some(mut field) = multipart.next_field().await.map_err(form_error)? {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }

        let filename = field.file_name().unwrap_or_default().to_string();
        let content_type = field.content_type().unwrap_or_default().to_string();

        let mut bytes = Vec::new();
        while let Some(chunk) = field.chunk().await.map_err(form_error)? {
            if bytes.len() + chunk.len() > MAX_UPLOAD_BYTES {
                return Err(too_large());
            }
            bytes.extend_from_slice(&chunk);
        }

        return Ok(Some(UploadedFile {
            filename,
            content_type,
            bytes,
        }));
    }

    Ok(None)
}

async fn upload_image(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>> {
    let file = read_file_field(&mut multipart)
        .await?
        .ok_or_else(|| AppError::BadRequest("No file uploaded".to_string()))?;

    if file.bytes.is_empty() {
        return Err(AppError::BadRequest("Uploaded file is empty".to_string()));
    }
    if !is_image(&file.content_type) {
        return Err(AppError::BadRequest(format!(
            "Unsupported content type '{}': only images can be uploaded",
            file.content_type
        )));
    }

    let path = object_name(&file.filename);
    tracing::info!(
        agent = %user.id,
        original = %file.filename,
        path = %path,
        size = file.bytes.len(),
        "Uploading blog image"
    );

    let url = state
        .backend
        .session(&user.access_token)
        .upload(&state.config.media_bucket, &path, &file.content_type, file.bytes)
        .await?;

    Ok(Json(UploadResponse { url }))
}
