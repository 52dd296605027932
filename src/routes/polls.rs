// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Poll management and results for agents.

use super::not_blank;
use crate::db::{procedures, tables};
use crate::error::{AppError, Result};
use crate::middleware::auth::AuthUser;
use crate::models::{Poll, PollOption, PollResults, PollVote};
use crate::services::polls::{build_results, normalize_options, MIN_POLL_OPTIONS};
use crate::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get, post},
    Extension, Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use validator::Validate;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/agent/polls", get(list_polls))
        .route("/api/agent/polls/create", post(create_poll))
        .route("/api/agent/polls/{id}", delete(delete_poll))
        .route("/api/agent/polls/{id}/close", post(close_poll))
        .route("/api/agent/polls/{id}/results", get(poll_results))
}

/// New poll form.
#[derive(Debug, Deserialize, Validate)]
pub struct CreatePollRequest {
    #[serde(default)]
    #[validate(custom(function = "not_blank", message = "question is required"))]
    pub question: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Closing time (ISO 8601)
    #[serde(default)]
    #[validate(custom(function = "not_blank", message = "closes_at is required"))]
    pub closes_at: String,
    #[serde(default)]
    pub options: Vec<String>,
}

#[derive(Serialize)]
struct CreateArgs<'a> {
    p_question: &'a str,
    p_description: Option<&'a str>,
    p_closes_at: &'a str,
    p_options: Vec<String>,
}

#[derive(Serialize)]
struct PollIdArgs<'a> {
    p_poll_id: &'a str,
}

async fn list_polls(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<Value>> {
    let polls: Value = state
        .backend
        .session(&user.access_token)
        .rpc(procedures::GET_ALL_POLLS, &serde_json::json!({}))
        .await?;
    Ok(Json(polls))
}

async fn create_poll(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Json(body): Json<CreatePollRequest>,
) -> Result<(StatusCode, Json<Value>)> {
    body.validate()?;

    let options = normalize_options(&body.options);
    if options.len() < MIN_POLL_OPTIONS {
        return Err(AppError::BadRequest(format!(
            "at least {} non-blank options are required",
            MIN_POLL_OPTIONS
        )));
    }

    tracing::info!(agent = %user.id, options = options.len(), "Creating poll");

    let args = CreateArgs {
        p_question: body.question.trim(),
        p_description: body
            .description
            .as_deref()
            .map(str::trim)
            .filter(|d| !d.is_empty()),
        p_closes_at: body.closes_at.trim(),
        p_options: options,
    };
    let poll: Value = state
        .backend
        .session(&user.access_token)
        .rpc(procedures::CREATE_POLL, &args)
        .await?;

    Ok((StatusCode::CREATED, Json(poll)))
}

async fn delete_poll(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
) -> Result<StatusCode> {
    tracing::info!(poll_id = %id, agent = %user.id, "Deleting poll");

    state
        .backend
        .session(&user.access_token)
        .rpc_unit(procedures::DELETE_POLL, &PollIdArgs { p_poll_id: &id })
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

async fn close_poll(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
) -> Result<Json<Value>> {
    tracing::info!(poll_id = %id, agent = %user.id, "Closing poll");

    let poll: Value = state
        .backend
        .session(&user.access_token)
        .rpc(procedures::CLOSE_POLL, &PollIdArgs { p_poll_id: &id })
        .await?;

    Ok(Json(poll))
}

async fn poll_results(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
) -> Result<Json<PollResults>> {
    let session = state.backend.session(&user.access_token);

    let poll: Poll = session
        .from(tables::POLLS)
        .select("id, question, description, created_at, closes_at, status, author_id")
        .eq("id", &id)
        .fetch_one()
        .await
        .map_err(|e| {
            tracing::warn!(poll_id = %id, error = %e, "Poll unavailable");
            AppError::NotFound("Poll not found".to_string())
        })?;

    let options: Vec<PollOption> = session
        .from(tables::POLL_OPTIONS)
        .select("id, option_text, created_at")
        .eq("poll_id", &id)
        .order("created_at", true)
        .fetch()
        .await?;

    // Results stay viewable without votes.
    let votes: Vec<PollVote> = match session
        .from(tables::POLL_VOTES)
        .select("poll_option_id")
        .eq("poll_id", &id)
        .fetch()
        .await
    {
        Ok(votes) => votes,
        Err(e) => {
            tracing::warn!(poll_id = %id, error = %e, "Failed to fetch poll votes; showing none");
            Vec::new()
        }
    };

    let results = build_results(poll, &options, &votes);
    tracing::debug!(poll_id = %id, total_votes = results.total_votes, "Tallied poll");
    Ok(Json(results))
}
