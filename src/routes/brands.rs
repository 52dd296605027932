// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Brand listing and verification.

use crate::db::tables;
use crate::error::{AppError, Result};
use crate::middleware::auth::AuthUser;
use crate::models::{ActionResponse, BrandInfo, BrandProfileRow, BrandSummary};
use crate::AppState;
use axum::{
    extract::{Path, State},
    routing::{get, post},
    Extension, Json, Router,
};
use serde_json::json;
use std::sync::Arc;

const VERIFIED: &str = "verified";
const PENDING: &str = "pending";

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/brands", get(list_brands))
        .route("/api/brands/{profile_id}/verify", post(verify_brand))
        .route("/api/brands/{profile_id}/unverify", post(unverify_brand))
}

async fn list_brands(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<Vec<BrandSummary>>> {
    let rows: Vec<BrandProfileRow> = state
        .backend
        .session(&user.access_token)
        .from(tables::PROFILES)
        .select(
            "id, full_name, email, created_at, \
             brands(profile_id, company_name, verification_status, isAgency, \
             agency_status, sales_handler, business_phone_number)",
        )
        .eq("user_type", "brand")
        .order("created_at", false)
        .fetch()
        .await?;

    Ok(Json(rows.into_iter().map(BrandSummary::from).collect()))
}

async fn verify_brand(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(profile_id): Path<String>,
) -> Result<Json<ActionResponse>> {
    set_verification(&state, &user, &profile_id, VERIFIED).await?;
    Ok(Json(ActionResponse::ok("Brand verified successfully!")))
}

async fn unverify_brand(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(profile_id): Path<String>,
) -> Result<Json<ActionResponse>> {
    set_verification(&state, &user, &profile_id, PENDING).await?;
    Ok(Json(ActionResponse::ok("Brand verification revoked.")))
}

async fn set_verification(
    state: &AppState,
    user: &AuthUser,
    profile_id: &str,
    status: &str,
) -> Result<()> {
    tracing::info!(profile_id, status, agent = %user.id, "Setting brand verification");

    let updated: Vec<BrandInfo> = state
        .backend
        .session(&user.access_token)
        .from(tables::BRANDS)
        .eq("profile_id", profile_id)
        .update(&json!({ "verification_status": status }))
        .await?;

    if updated.is_empty() {
        tracing::warn!(profile_id, "No brand row matched verification update");
        return Err(AppError::NotFound("No brand found with that ID".to_string()));
    }

    Ok(())
}
