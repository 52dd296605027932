//! Reports: flagged content awaiting review.

use crate::db::{procedures, tables};
use crate::error::Result;
use crate::middleware::auth::AuthUser;
use crate::models::{ActionResponse, PendingReport};
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
        .route("/api/reports/pending", get(list_pending_reports))
        .route("/api/reports/{id}/resolve", post(resolve_report))
}

async fn list_pending_reports(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<Vec<PendingReport>>> {
    let reports: Vec<PendingReport> = state
        .backend
        .session(&user.access_token)
        .from(tables::REPORTS)
        .select("id, created_at, content_id, content_type, reason, reporter:reporter_id(full_name)")
        .eq("status", "pending")
        .order("created_at", true)
        .fetch()
        .await?;

    Ok(Json(reports))
}

#[derive(Serialize)]
struct ResolveArgs<'a> {
    report_id_to_resolve: &'a str,
}

async fn resolve_report(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
) -> Result<Json<ActionResponse>> {
    tracing::info!(report_id = %id, agent = %user.id, "Resolving report");

    state
        .backend
        .session(&user.access_token)
        .rpc_unit(
            procedures::RESOLVE_REPORT,
            &ResolveArgs {
                report_id_to_resolve: &id,
            },
        )
        .await?;

    Ok(Json(ActionResponse::ok("Report resolved")))
}
