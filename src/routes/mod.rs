// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! HTTP route handlers.

pub mod achievements;
pub mod activity_logs;
pub mod analytics;
pub mod blog;
pub mod brands;
pub mod catalog;
pub mod coin_packages;
pub mod investors;
pub mod media;
pub mod orders;
pub mod payouts;
pub mod polls;
pub mod reports;
pub mod session;
pub mod settings;

use crate::error::{AppError, Result};
use crate::middleware::auth::{require_agent, require_auth};
use crate::AppState;
use axum::http::{header, Method};
use axum::{middleware, routing::get, Json, Router};
use serde::Serialize;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;
use validator::ValidationError;

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct HealthResponse {
    pub status: String,
    pub build_id: String,
}

/// Health check response
async fn health_check() -> Json<HealthResponse> {
    let build_id = option_env!("BUILD_ID").unwrap_or("unknown").to_string();
    Json(HealthResponse {
        status: "ok".to_string(),
        build_id,
    })
}

/// Reject empty or whitespace-only text fields.
pub(crate) fn not_blank(value: &str) -> std::result::Result<(), ValidationError> {
    if value.trim().is_empty() {
        Err(ValidationError::new("blank"))
    } else {
        Ok(())
    }
}

/// First row of a mutation result; none means nothing matched.
pub(crate) fn first_row<T>(rows: Vec<T>, what: &str) -> Result<T> {
    rows.into_iter()
        .next()
        .ok_or_else(|| AppError::NotFound(format!("{} not found", what)))
}

/// Build the complete router with all routes.
pub fn create_router(state: Arc<AppState>) -> Router {
    // CORS layer - allow requests from frontend URL and localhost (for dev)
    let frontend_url = state.config.frontend_url.clone();
    let cors = CorsLayer::new()
        .allow_origin(tower_http::cors::AllowOrigin::predicate(
            move |origin: &axum::http::HeaderValue, _request_parts: &axum::http::request::Parts| {
                let origin_str = origin.to_str().unwrap_or("");
                origin_str == frontend_url
                    || origin_str.starts_with("http://localhost")
                    || origin_str.starts_with("http://127.0.0.1")
            },
        ))
        .allow_credentials(true)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION, header::ACCEPT]);

    // Public routes (no auth required)
    let public_routes = Router::new()
        .route("/health", get(health_check))
        .merge(analytics::public_routes());

    // Agent-only areas; require_agent reads the AuthUser set by require_auth
    let agent_routes = Router::new()
        .merge(coin_packages::routes())
        .merge(settings::routes())
        .merge(catalog::routes())
        .route_layer(middleware::from_fn_with_state(state.clone(), require_agent));

    // Protected routes (auth required)
    let protected_routes = Router::new()
        .merge(session::routes())
        .merge(orders::routes())
        .merge(payouts::routes())
        .merge(reports::routes())
        .merge(blog::routes())
        .merge(polls::routes())
        .merge(media::routes())
        .merge(analytics::routes())
        .merge(brands::routes())
        .merge(investors::routes())
        .merge(activity_logs::routes())
        .merge(achievements::routes())
        .merge(agent_routes)
        .route_layer(middleware::from_fn_with_state(state.clone(), require_auth));

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(middleware::from_fn(
            crate::middleware::security::add_security_headers,
        ))
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .with_state(state)
}
