// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Blog management for agents.
//!
//! Posts are owned by the backend; every operation is one stored procedure
//! and its result is returned as the backend shaped it.

use super::not_blank;
use crate::db::procedures;
use crate::error::{AppError, Result};
use crate::middleware::auth::AuthUser;
use crate::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Extension, Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use validator::Validate;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/agent/blog", get(list_posts))
        .route("/api/agent/blog/create", post(create_post))
        .route(
            "/api/agent/blog/{id}",
            get(get_post).put(update_post).delete(delete_post),
        )
        .route("/api/agent/blog/{id}/publish", post(publish_post))
        .route("/api/agent/blog/{id}/unpublish", post(unpublish_post))
}

/// Create or update form.
#[derive(Debug, Deserialize, Validate)]
pub struct BlogPostRequest {
    #[serde(default)]
    #[validate(custom(function = "not_blank", message = "title is required"))]
    pub title: String,
    #[serde(default)]
    #[validate(custom(function = "not_blank", message = "content is required"))]
    pub content: String,
    #[serde(default)]
    pub cover_image_url: Option<String>,
}

#[derive(Serialize)]
struct PostIdArgs<'a> {
    p_post_id: &'a str,
}

#[derive(Serialize)]
struct CreateArgs<'a> {
    p_title: &'a str,
    p_content: &'a str,
    p_cover_image_url: Option<&'a str>,
}

#[derive(Serialize)]
struct UpdateArgs<'a> {
    p_post_id: &'a str,
    p_title: &'a str,
    p_content: &'a str,
    p_cover_image_url: Option<&'a str>,
}

impl BlogPostRequest {
    fn cover_image_url(&self) -> Option<&str> {
        self.cover_image_url
            .as_deref()
            .map(str::trim)
            .filter(|u| !u.is_empty())
    }
}

async fn list_posts(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<Value>> {
    let posts: Value = state
        .backend
        .session(&user.access_token)
        .rpc(procedures::GET_ALL_BLOG_POSTS, &serde_json::json!({}))
        .await?;
    Ok(Json(posts))
}

async fn create_post(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Json(body): Json<BlogPostRequest>,
) -> Result<(StatusCode, Json<Value>)> {
    body.validate()?;
    tracing::info!(agent = %user.id, title = %body.title, "Creating blog post");

    let args = CreateArgs {
        p_title: body.title.trim(),
        p_content: &body.content,
        p_cover_image_url: body.cover_image_url(),
    };
    let post: Value = state
        .backend
        .session(&user.access_token)
        .rpc(procedures::CREATE_BLOG_POST, &args)
        .await?;

    Ok((StatusCode::CREATED, Json(post)))
}

async fn get_post(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
) -> Result<Json<Value>> {
    let post: Value = state
        .backend
        .session(&user.access_token)
        .rpc(procedures::GET_BLOG_POST_FOR_AGENT, &PostIdArgs { p_post_id: &id })
        .await?;

    // A set-returning procedure answers with an array.
    let post = match post {
        Value::Array(rows) => rows.into_iter().next().unwrap_or(Value::Null),
        other => other,
    };
    if post.is_null() {
        return Err(AppError::NotFound("Blog post not found".to_string()));
    }

    Ok(Json(post))
}

async fn update_post(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
    Json(body): Json<BlogPostRequest>,
) -> Result<Json<Value>> {
    body.validate()?;
    tracing::info!(post_id = %id, agent = %user.id, "Updating blog post");

    let args = UpdateArgs {
        p_post_id: &id,
        p_title: body.title.trim(),
        p_content: &body.content,
        p_cover_image_url: body.cover_image_url(),
    };
    let post: Value = state
        .backend
        .session(&user.access_token)
        .rpc(procedures::UPDATE_BLOG_POST, &args)
        .await?;

    Ok(Json(post))
}

async fn delete_post(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
) -> Result<StatusCode> {
    tracing::info!(post_id = %id, agent = %user.id, "Deleting blog post");

    state
        .backend
        .session(&user.access_token)
        .rpc_unit(procedures::DELETE_BLOG_POST, &PostIdArgs { p_post_id: &id })
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

async fn publish_post(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
) -> Result<Json<Value>> {
    set_published(&state, &user, &id, procedures::PUBLISH_BLOG_POST).await
}

async fn unpublish_post(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
) -> Result<Json<Value>> {
    set_published(&state, &user, &id, procedures::UNPUBLISH_BLOG_POST).await
}

async fn set_published(
    state: &AppState,
    user: &AuthUser,
    id: &str,
    procedure: &str,
) -> Result<Json<Value>> {
    tracing::info!(post_id = %id, agent = %user.id, procedure, "Changing blog post visibility");

    let post: Value = state
        .backend
        .session(&user.access_token)
        .rpc(procedure, &PostIdArgs { p_post_id: id })
        .await?;

    Ok(Json(post))
}
