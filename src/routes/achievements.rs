//! Achievement definitions.

use super::first_row;
use crate::db::tables;
use crate::error::{AppError, Result};
use crate::middleware::auth::AuthUser;
use crate::AppState;
use axum::{
    extract::{Path, State},
    routing::{get, put},
    Extension, Json, Router,
};
use serde_json::{Map, Value};
use std::sync::Arc;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/achievements", get(list_achievements))
        .route("/api/achievements/{id}", put(update_achievement))
}

async fn list_achievements(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<Vec<Value>>> {
    let achievements: Vec<Value> = state
        .backend
        .session(&user.access_token)
        .from(tables::ACHIEVEMENT_DEFINITIONS)
        .select("*")
        .order("action_type", true)
        .order("threshold", true)
        .fetch()
        .await?;
    Ok(Json(achievements))
}

async fn update_achievement(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
    Json(mut fields): Json<Map<String, Value>>,
) -> Result<Json<Value>> {
    // The row id comes from the path only.
    fields.remove("id");
    if fields.is_empty() {
        return Err(AppError::BadRequest("no fields to update".to_string()));
    }
    tracing::info!(achievement_id = %id, agent = %user.id, fields = fields.len(), "Updating achievement");

    let rows: Vec<Value> = state
        .backend
        .session(&user.access_token)
        .from(tables::ACHIEVEMENT_DEFINITIONS)
        .eq("id", &id)
        .update(&fields)
        .await?;

    Ok(Json(first_row(rows, "Achievement")?))
}
