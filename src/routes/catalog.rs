//! Interests and industries (agent only).

use super::{first_row, not_blank};
use crate::db::tables;
use crate::error::{AppError, Result};
use crate::middleware::auth::AuthUser;
use crate::models::{Industry, Interest};
use crate::services::catalog::split_names;
use crate::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, put},
    Extension, Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use validator::Validate;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/interests", get(list_interests).post(create_interests))
        .route(
            "/api/interests/{id}",
            put(update_interest).delete(delete_interest),
        )
        .route("/api/industries", get(list_industries).post(create_industry))
        .route(
            "/api/industries/{id}",
            put(update_industry).delete(delete_industry),
        )
}

// ─── Interests ───────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct CreateInterestsRequest {
    /// Comma-separated interest names
    #[serde(default)]
    pub names: String,
}

#[derive(Serialize)]
struct NewInterest {
    interest_name: String,
    is_active: bool,
}

#[derive(Debug, Deserialize, Serialize, Validate)]
pub struct InterestUpdate {
    #[serde(default)]
    #[validate(custom(function = "not_blank", message = "interest_name is required"))]
    pub interest_name: String,
    pub is_active: bool,
}

async fn list_interests(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<Vec<Interest>>> {
    let interests: Vec<Interest> = state
        .backend
        .session(&user.access_token)
        .from(tables::INTERESTS)
        .select("*")
        .order("interest_name", true)
        .fetch()
        .await?;
    Ok(Json(interests))
}

async fn create_interests(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Json(body): Json<CreateInterestsRequest>,
) -> Result<(StatusCode, Json<Vec<Interest>>)> {
    let names = split_names(&body.names);
    if names.is_empty() {
        return Err(AppError::BadRequest(
            "at least one interest name is required".to_string(),
        ));
    }
    tracing::info!(agent = %user.id, count = names.len(), "Adding interests");

    let rows: Vec<NewInterest> = names
        .into_iter()
        .map(|interest_name| NewInterest {
            interest_name,
            is_active: true,
        })
        .collect();

    let created: Vec<Interest> = state
        .backend
        .session(&user.access_token)
        .from(tables::INTERESTS)
        .insert(&rows)
        .await?;

    Ok((StatusCode::CREATED, Json(created)))
}

async fn update_interest(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
    Json(mut body): Json<InterestUpdate>,
) -> Result<Json<Interest>> {
    body.validate()?;
    body.interest_name = body.interest_name.trim().to_string();

    let rows: Vec<Interest> = state
        .backend
        .session(&user.access_token)
        .from(tables::INTERESTS)
        .eq("id", &id)
        .update(&body)
        .await?;

    Ok(Json(first_row(rows, "Interest")?))
}

async fn delete_interest(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
) -> Result<StatusCode> {
    tracing::info!(interest_id = %id, agent = %user.id, "Deleting interest");

    state
        .backend
        .session(&user.access_token)
        .from(tables::INTERESTS)
        .eq("id", &id)
        .delete()
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

// ─── Industries ──────────────────────────────────────────────

#[derive(Debug, Deserialize, Serialize, Validate)]
pub struct CreateIndustryRequest {
    #[serde(default)]
    #[validate(custom(function = "not_blank", message = "name is required"))]
    pub name: String,
}

#[derive(Debug, Deserialize, Serialize, Validate)]
pub struct IndustryUpdate {
    #[serde(default)]
    #[validate(custom(function = "not_blank", message = "name is required"))]
    pub name: String,
    pub is_active: bool,
}

async fn list_industries(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<Vec<Industry>>> {
    let industries: Vec<Industry> = state
        .backend
        .session(&user.access_token)
        .from(tables::INDUSTRIES)
        .select("*")
        .order("name", true)
        .fetch()
        .await?;
    Ok(Json(industries))
}

async fn create_industry(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Json(mut body): Json<CreateIndustryRequest>,
) -> Result<(StatusCode, Json<Industry>)> {
    body.validate()?;
    body.name = body.name.trim().to_string();
    tracing::info!(agent = %user.id, name = %body.name, "Adding industry");

    let rows: Vec<Industry> = state
        .backend
        .session(&user.access_token)
        .from(tables::INDUSTRIES)
        .insert(&body)
        .await?;

    Ok((StatusCode::CREATED, Json(first_row(rows, "Industry")?)))
}

async fn update_industry(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
    Json(mut body): Json<IndustryUpdate>,
) -> Result<Json<Industry>> {
    body.validate()?;
    body.name = body.name.trim().to_string();

    let rows: Vec<Industry> = state
        .backend
        .session(&user.access_token)
        .from(tables::INDUSTRIES)
        .eq("id", &id)
        .update(&body)
        .await?;

    Ok(Json(first_row(rows, "Industry")?))
}

async fn delete_industry(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
) -> Result<StatusCode> {
    tracing::info!(industry_id = %id, agent = %user.id, "Deleting industry");

    state
        .backend
        .session(&user.access_token)
        .from(tables::INDUSTRIES)
        .eq("id", &id)
        .delete()
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
