// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Payouts: pending cashout transactions.

use crate::db::{procedures, tables};
use crate::error::Result;
use crate::middleware::auth::AuthUser;
use crate::models::{ActionResponse, PendingPayout};
use crate::AppState;
use axum::{
    extract::{Path, State},
    routing::{get, post},
    Extension, Json, Router,
};
use serde::Serialize;
use std::sync::Arc;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/payouts/pending", get(list_pending_payouts))
        .route("/api/payouts/{id}/approve", post(approve_payout))
        .route("/api/payouts/{id}/reject", post(reject_payout))
}

async fn list_pending_payouts(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<Vec<PendingPayout>>> {
    let payouts: Vec<PendingPayout> = state
        .backend
        .session(&user.access_token)
        .from(tables::TRANSACTIONS)
        .select("id, created_at, amount, description, status, profiles(full_name)")
        .eq("status", "pending")
        .eq("reference_type", "cashout")
        .order("created_at", true)
        .fetch()
        .await?;

    tracing::debug!(count = payouts.len(), "Fetched pending payouts");
    Ok(Json(payouts))
}

#[derive(Serialize)]
struct ApproveArgs<'a> {
    transaction_id_to_approve: &'a str,
}

#[derive(Serialize)]
struct RejectArgs<'a> {
    transaction_id_to_reject: &'a str,
}

async fn approve_payout(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
) -> Result<Json<ActionResponse>> {
    tracing::info!(transaction_id = %id, agent = %user.id, "Approving payout");

    state
        .backend
        .session(&user.access_token)
        .rpc_unit(
            procedures::APPROVE_CASHOUT,
            &ApproveArgs {
                transaction_id_to_approve: &id,
            },
        )
        .await?;

    Ok(Json(ActionResponse::ok("Payout approved")))
}

async fn reject_payout(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
) -> Result<Json<ActionResponse>> {
    tracing::info!(transaction_id = %id, agent = %user.id, "Rejecting payout");

    state
        .backend
        .session(&user.access_token)
        .rpc_unit(
            procedures::REJECT_CASHOUT,
            &RejectArgs {
                transaction_id_to_reject: &id,
            },
        )
        .await?;

    Ok(Json(ActionResponse::ok("Payout rejected")))
}
