// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Gamification profitability analysis.

use crate::db::procedures;
use crate::error::Result;
use crate::middleware::auth::AuthUser;
use crate::services::ProfitabilityRequest;
use crate::time_utils::format_utc_rfc3339;
use crate::AppState;
use axum::{
    extract::State,
    routing::{get, post},
    Extension, Json, Router,
};
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;

const PROFITABILITY_PATH: &str = "/api/analytics/profitability";

/// Unauthenticated liveness probe for the analysis endpoint.
pub fn public_routes() -> Router<Arc<AppState>> {
    Router::new().route(PROFITABILITY_PATH, get(profitability_status))
}

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route(PROFITABILITY_PATH, post(analyze_profitability))
}

#[derive(Serialize)]
pub struct AnalyticsStatus {
    pub message: String,
    pub timestamp: String,
}

async fn profitability_status() -> Json<AnalyticsStatus> {
    Json(AnalyticsStatus {
        message: "Profitability analytics API is running".to_string(),
        timestamp: format_utc_rfc3339(chrono::Utc::now()),
    })
}

async fn analyze_profitability(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Json(body): Json<ProfitabilityRequest>,
) -> Result<Json<Value>> {
    let params = body.into_params()?;
    tracing::info!(
        agent = %user.id,
        start = %params.start_date,
        end = %params.end_date,
        "Running profitability analysis"
    );

    let analysis: Value = state
        .backend
        .session(&user.access_token)
        .rpc(procedures::ANALYZE_PROFITABILITY, &params)
        .await?;

    Ok(Json(analysis))
}
