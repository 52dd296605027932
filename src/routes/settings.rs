// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Marketplace settings (agent only).

use crate::db::tables;
use crate::error::Result;
use crate::middleware::auth::AuthUser;
use crate::models::settings::{CASHOUT_LIMIT_KEY, REFERRAL_REWARDS_KEY};
use crate::models::{ActionResponse, CashoutLimit, ConsoleSettings, ReferralRewards, SettingRow};
use crate::services::settings::from_rows;
use crate::AppState;
use axum::{
    extract::State,
    routing::{get, put},
    Extension, Json, Router,
};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use validator::Validate;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/settings", get(get_settings))
        .route("/api/settings/referral-rewards", put(update_referral_rewards))
        .route("/api/settings/cashout-limit", put(update_cashout_limit))
}

#[derive(Debug, Deserialize, Validate)]
pub struct ReferralRewardsRequest {
    #[validate(range(exclusive_min = 0.0, message = "inviter_reward must be greater than 0"))]
    pub inviter_reward: f64,
    #[validate(range(exclusive_min = 0.0, message = "invitee_bonus must be greater than 0"))]
    pub invitee_bonus: f64,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CashoutLimitRequest {
    #[validate(range(min = 0.0, message = "limit must not be negative"))]
    pub limit: f64,
}

async fn get_settings(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<ConsoleSettings>> {
    let rows: Vec<SettingRow> = state
        .backend
        .session(&user.access_token)
        .from(tables::APP_SETTINGS)
        .select("key, value")
        .is_in("key", [REFERRAL_REWARDS_KEY, CASHOUT_LIMIT_KEY])
        .fetch()
        .await?;

    Ok(Json(from_rows(rows)))
}

async fn update_referral_rewards(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Json(body): Json<ReferralRewardsRequest>,
) -> Result<Json<ActionResponse>> {
    body.validate()?;
    let rewards = ReferralRewards {
        inviter_reward: body.inviter_reward,
        invitee_bonus: body.invitee_bonus,
    };
    tracing::info!(
        agent = %user.id,
        inviter_reward = rewards.inviter_reward,
        invitee_bonus = rewards.invitee_bonus,
        "Updating referral rewards"
    );

    let _: Vec<SettingRow> = state
        .backend
        .session(&user.access_token)
        .from(tables::APP_SETTINGS)
        .eq("key", REFERRAL_REWARDS_KEY)
        .update(&json!({ "value": rewards }))
        .await?;

    Ok(Json(ActionResponse::ok("Referral rewards updated successfully!")))
}

async fn update_cashout_limit(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Json(body): Json<CashoutLimitRequest>,
) -> Result<Json<ActionResponse>> {
    body.validate()?;
    let value = CashoutLimit { limit: body.limit };
    tracing::info!(agent = %user.id, limit = value.limit, "Updating cashout limit");

    let session = state.backend.session(&user.access_token);
    let updated: Vec<SettingRow> = session
        .from(tables::APP_SETTINGS)
        .eq("key", CASHOUT_LIMIT_KEY)
        .update(&json!({ "value": value }))
        .await?;

    if !updated.is_empty() {
        return Ok(Json(ActionResponse::ok("Cashout limit updated successfully!")));
    }

    tracing::info!("No cashout limit row yet; creating it");
    let _: Vec<SettingRow> = session
        .from(tables::APP_SETTINGS)
        .insert(&json!({ "key": CASHOUT_LIMIT_KEY, "value": value }))
        .await?;

    Ok(Json(ActionResponse::ok("Cashout limit created successfully!")))
}
