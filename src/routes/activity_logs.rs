// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Activity log browser.

use crate::db::tables;
use crate::error::Result;
use crate::middleware::auth::AuthUser;
use crate::models::{ActivityLog, LogProfile};
use crate::services::activity_logs::{
    attach_profiles, distinct_user_ids, distinct_values, filter_logs,
};
use crate::AppState;
use axum::{
    extract::{Query, State},
    routing::get,
    Extension, Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Newest entries shown per page.
const LOG_PAGE_SIZE: u32 = 100;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/api/activity-logs", get(list_activity_logs))
}

#[derive(Debug, Deserialize)]
struct ActivityLogQuery {
    action_type: Option<String>,
    user_type: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ActivityLogsResponse {
    pub logs: Vec<ActivityLog>,
    /// Filter menu values, from the unfiltered page
    pub action_types: Vec<String>,
    pub user_types: Vec<String>,
}

async fn list_activity_logs(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Query(params): Query<ActivityLogQuery>,
) -> Result<Json<ActivityLogsResponse>> {
    let session = state.backend.session(&user.access_token);

    let logs: Vec<ActivityLog> = session
        .from(tables::ACTIVITY_LOGS)
        .select(
            "id, timestamp, user_id, user_type, action_type, entity_id, entity_type, \
             details, ip_address, user_agent",
        )
        .order("timestamp", false)
        .limit(LOG_PAGE_SIZE)
        .fetch()
        .await?;

    let user_ids = distinct_user_ids(&logs);
    let profiles: Vec<LogProfile> = if user_ids.is_empty() {
        Vec::new()
    } else {
        session
            .from(tables::PROFILES)
            .select("id, full_name, username, avatar_url, email, location")
            .is_in("id", &user_ids)
            .fetch()
            .await
            .unwrap_or_else(|e| {
                tracing::warn!(error = %e, "Failed to fetch profiles for activity logs");
                Vec::new()
            })
    };

    let logs = attach_profiles(logs, profiles);
    let action_types = distinct_values(logs.iter().map(|l| l.action_type.as_str()));
    let user_types = distinct_values(logs.iter().map(|l| l.user_type.as_str()));

    let logs = filter_logs(
        logs,
        params.action_type.as_deref(),
        params.user_type.as_deref(),
    );
    tracing::debug!(count = logs.len(), "Fetched activity logs");

    Ok(Json(ActivityLogsResponse {
        logs,
        action_types,
        user_types,
    }))
}
