// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Current operator session.

use crate::error::Result;
use crate::middleware::auth::AuthUser;
use crate::services::roles::AGENT_ROLE;
use crate::AppState;
use axum::{extract::State, routing::get, Extension, Json, Router};
use serde::Serialize;
use std::sync::Arc;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/api/me", get(get_me))
}

/// Current operator response.
#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct MeResponse {
    pub id: String,
    pub email: Option<String>,
    pub user_type: Option<String>,
    pub is_agent: bool,
}

async fn get_me(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<MeResponse>> {
    let user_type = state.roles.resolve(&state.backend, &user).await?;

    Ok(Json(MeResponse {
        is_agent: user_type.as_deref() == Some(AGENT_ROLE),
        id: user.id,
        email: user.email,
        user_type,
    }))
}
