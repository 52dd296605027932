// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Investors, their investments and investor levels.

use super::not_blank;
use crate::db::{procedures, tables};
use crate::error::{AppError, Result};
use crate::middleware::auth::AuthUser;
use crate::models::investor::{InvestorContact, InvestorProfile, InvestorRecord};
use crate::models::{ActionResponse, Investment, InvestorDetail, InvestorLevel, InvestorSummary};
use crate::services::investors::{merge_investors, total_investment};
use crate::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post, put},
    Extension, Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::sync::Arc;
use validator::Validate;

const INVESTOR_TYPE: &str = "investor";

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/investors", get(list_investors))
        .route("/api/investors/{id}", get(get_investor))
        .route("/api/investors/{id}/investments", post(create_investment))
        .route("/api/investors/{id}/profit-share", put(set_profit_share))
        .route(
            "/api/investor-levels",
            get(list_levels).post(create_level),
        )
        .route(
            "/api/investor-levels/{id}",
            put(update_level).delete(delete_level),
        )
}

// ─── Investors ───────────────────────────────────────────────

async fn list_investors(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<Vec<InvestorSummary>>> {
    let session = state.backend.session(&user.access_token);

    let records: Vec<InvestorRecord> = session
        .from(tables::INVESTORS)
        .select("id, profiles!inner(id, full_name, email)")
        .fetch()
        .await?;

    let profiles: Vec<InvestorProfile> = session
        .from(tables::PROFILES)
        .select("id, full_name, email")
        .eq("user_type", INVESTOR_TYPE)
        .fetch()
        .await?;

    let merged = merge_investors(records, profiles);
    tracing::debug!(count = merged.len(), "Listed investors");
    Ok(Json(merged))
}

async fn get_investor(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
) -> Result<Json<InvestorDetail>> {
    let session = state.backend.session(&user.access_token);

    let records: Vec<InvestorRecord> = session
        .from(tables::INVESTORS)
        .select("id, profiles!inner(id, full_name, email)")
        .eq("id", &id)
        .limit(1)
        .fetch()
        .await?;

    if let Some(record) = records.into_iter().next() {
        let investments: Vec<Investment> = session
            .from(tables::INVESTMENTS)
            .select("id, investor_id, amount, investment_date, notes")
            .eq("investor_id", &record.id)
            .order("investment_date", false)
            .fetch()
            .await?;

        return Ok(Json(InvestorDetail {
            id: Some(record.id),
            profile_id: record.profiles.id,
            profiles: InvestorContact {
                full_name: record.profiles.full_name,
                email: record.profiles.email,
            },
            is_properly_onboarded: true,
            total_investment: total_investment(&investments),
            investment_count: investments.len(),
            investments,
        }));
    }

    // Not onboarded yet: the id is a profile id.
    let profiles: Vec<InvestorProfile> = session
        .from(tables::PROFILES)
        .select("id, full_name, email")
        .eq("id", &id)
        .eq("user_type", INVESTOR_TYPE)
        .limit(1)
        .fetch()
        .await?;

    let profile = profiles
        .into_iter()
        .next()
        .ok_or_else(|| AppError::NotFound(format!("Investor {} not found", id)))?;

    Ok(Json(InvestorDetail {
        id: None,
        profile_id: profile.id,
        profiles: InvestorContact {
            full_name: profile.full_name,
            email: profile.email,
        },
        is_properly_onboarded: false,
        investments: Vec::new(),
        total_investment: 0.0,
        investment_count: 0,
    }))
}

#[derive(Debug, Deserialize, Validate)]
pub struct InvestmentRequest {
    #[validate(range(exclusive_min = 0.0, message = "amount must be greater than 0"))]
    pub amount: f64,
    #[serde(default)]
    pub investor_level_id: Option<String>,
}

#[derive(Serialize)]
struct InvestmentArgs<'a> {
    p_investor_id: &'a str,
    p_amount: f64,
}

async fn create_investment(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
    Json(body): Json<InvestmentRequest>,
) -> Result<(StatusCode, Json<Value>)> {
    body.validate()?;
    tracing::info!(investor_id = %id, amount = body.amount, agent = %user.id, "Recording investment");

    let session = state.backend.session(&user.access_token);
    let created: Value = session
        .rpc(
            procedures::CREATE_INVESTMENT,
            &InvestmentArgs {
                p_investor_id: &id,
                p_amount: body.amount,
            },
        )
        .await?;

    if let Some(level_id) = body.investor_level_id.as_deref().filter(|l| !l.is_empty()) {
        // The investment stands even if the level change fails.
        let result: Result<Vec<Value>> = session
            .from(tables::INVESTORS)
            .eq("id", &id)
            .update(&json!({ "level_id": level_id }))
            .await;
        if let Err(e) = result {
            tracing::warn!(investor_id = %id, level_id, error = %e, "Failed to update investor level");
        }
    }

    Ok((StatusCode::CREATED, Json(created)))
}

#[derive(Debug, Deserialize, Validate)]
pub struct ProfitShareRequest {
    #[validate(range(min = 0.0, max = 100.0, message = "percentage must be between 0 and 100"))]
    pub percentage: f64,
}

#[derive(Serialize)]
struct ProfitShareArgs<'a> {
    p_investor_id: &'a str,
    p_percentage: f64,
}

async fn set_profit_share(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
    Json(body): Json<ProfitShareRequest>,
) -> Result<Json<ActionResponse>> {
    body.validate()?;
    tracing::info!(investor_id = %id, percentage = body.percentage, agent = %user.id, "Setting profit share");

    state
        .backend
        .session(&user.access_token)
        .rpc_unit(
            procedures::SET_INVESTOR_PROFIT_SHARE,
            &ProfitShareArgs {
                p_investor_id: &id,
                p_percentage: body.percentage,
            },
        )
        .await?;

    Ok(Json(ActionResponse::ok("Profit share updated successfully!")))
}

// ─── Investor Levels ─────────────────────────────────────────

#[derive(Debug, Deserialize, Validate)]
pub struct InvestorLevelRequest {
    #[serde(default)]
    #[validate(custom(function = "not_blank", message = "role_name is required"))]
    pub role_name: String,
    #[validate(range(min = 0.0, message = "interest_factor must not be negative"))]
    pub interest_factor: f64,
}

#[derive(Serialize)]
struct CreateLevelArgs<'a> {
    p_role_name: &'a str,
    p_interest_factor: f64,
}

#[derive(Serialize)]
struct UpdateLevelArgs<'a> {
    p_id: &'a str,
    p_role_name: &'a str,
    p_interest_factor: f64,
}

#[derive(Serialize)]
struct LevelIdArgs<'a> {
    p_id: &'a str,
}

async fn list_levels(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<Vec<InvestorLevel>>> {
    let levels: Vec<InvestorLevel> = state
        .backend
        .session(&user.access_token)
        .from(tables::INVESTOR_LEVELS)
        .select("id, role_name, interest_factor, created_at")
        .order("created_at", false)
        .fetch()
        .await?;
    Ok(Json(levels))
}

async fn create_level(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Json(body): Json<InvestorLevelRequest>,
) -> Result<(StatusCode, Json<ActionResponse>)> {
    body.validate()?;
    tracing::info!(agent = %user.id, role_name = %body.role_name, "Creating investor level");

    state
        .backend
        .session(&user.access_token)
        .rpc_unit(
            procedures::CREATE_INVESTOR_LEVEL,
            &CreateLevelArgs {
                p_role_name: body.role_name.trim(),
                p_interest_factor: body.interest_factor,
            },
        )
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ActionResponse::ok("Investor level created successfully!")),
    ))
}

async fn update_level(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
    Json(body): Json<InvestorLevelRequest>,
) -> Result<Json<ActionResponse>> {
    body.validate()?;
    tracing::info!(level_id = %id, agent = %user.id, "Updating investor level");

    state
        .backend
        .session(&user.access_token)
        .rpc_unit(
            procedures::UPDATE_INVESTOR_LEVEL,
            &UpdateLevelArgs {
                p_id: &id,
                p_role_name: body.role_name.trim(),
                p_interest_factor: body.interest_factor,
            },
        )
        .await?;

    Ok(Json(ActionResponse::ok("Investor level updated successfully!")))
}

async fn delete_level(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
) -> Result<StatusCode> {
    tracing::info!(level_id = %id, agent = %user.id, "Deleting investor level");

    state
        .backend
        .session(&user.access_token)
        .rpc_unit(procedures::DELETE_INVESTOR_LEVEL, &LevelIdArgs { p_id: &id })
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
