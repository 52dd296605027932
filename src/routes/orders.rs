// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Orders: influencer purchases awaiting finalization.

use super::not_blank;
use crate::db::{procedures, tables};
use crate::error::{AppError, Result};
use crate::middleware::auth::AuthUser;
use crate::models::{ActionResponse, PendingPurchase, ProcedureOutcome};
use crate::AppState;
use axum::{
    extract::{Path, State},
    routing::{get, post},
    Extension, Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use validator::Validate;

/// Status of purchases that shipped and wait for an agent.
const AWAITING_STATUS: &str = "shipped";

/// Purchases reference `profiles` more than once; the buyer embed names its
/// foreign key.
const PENDING_ORDER_COLUMNS: &str = "id, purchased_at, quantity, total_coins, status, \
     products(name), profiles!left!purchases_buyer_id_fkey(full_name)";

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/orders/pending", get(list_pending_orders))
        .route("/api/orders/{id}/approve", post(approve_order))
        .route("/api/orders/{id}/reject", post(reject_order))
}

async fn list_pending_orders(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<Vec<PendingPurchase>>> {
    let orders: Vec<PendingPurchase> = state
        .backend
        .session(&user.access_token)
        .from(tables::PURCHASES)
        .select(PENDING_ORDER_COLUMNS)
        .eq("status", AWAITING_STATUS)
        .order("purchased_at", true)
        .fetch()
        .await?;

    tracing::debug!(count = orders.len(), "Fetched pending orders");
    Ok(Json(orders))
}

#[derive(Serialize)]
struct FinalizeArgs<'a> {
    p_purchase_id: &'a str,
}

#[derive(Serialize)]
struct RejectArgs<'a> {
    p_purchase_id: &'a str,
    p_rejection_reason: &'a str,
}

#[derive(Deserialize, Validate)]
struct RejectOrderRequest {
    #[serde(default)]
    #[validate(custom(function = "not_blank", message = "reason is required"))]
    reason: String,
}

/// Turn a procedure's `{ success, message }` answer into a response.
fn settle(outcome: ProcedureOutcome, fallback: &str) -> Result<Json<ActionResponse>> {
    let message = outcome
        .message
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| fallback.to_string());

    if outcome.success {
        Ok(Json(ActionResponse::ok(message)))
    } else {
        Err(AppError::BadRequest(message))
    }
}

async fn approve_order(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
) -> Result<Json<ActionResponse>> {
    tracing::info!(order_id = %id, agent = %user.id, "Finalizing order");

    let outcome: ProcedureOutcome = state
        .backend
        .session(&user.access_token)
        .rpc(procedures::FINALIZE_PURCHASE, &FinalizeArgs { p_purchase_id: &id })
        .await?;

    settle(outcome, "Order approved")
}

async fn reject_order(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
    Json(body): Json<RejectOrderRequest>,
) -> Result<Json<ActionResponse>> {
    body.validate()?;
    tracing::info!(order_id = %id, agent = %user.id, "Rejecting order");

    let args = RejectArgs {
        p_purchase_id: &id,
        p_rejection_reason: body.reason.trim(),
    };
    let outcome: ProcedureOutcome = state
        .backend
        .session(&user.access_token)
        .rpc(procedures::REJECT_PURCHASE, &args)
        .await?;

    settle(outcome, "Order rejected")
}
