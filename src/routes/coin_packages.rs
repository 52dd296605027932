// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Coin package catalog (agent only).

use super::{first_row, not_blank};
use crate::db::tables;
use crate::error::Result;
use crate::middleware::auth::AuthUser;
use crate::models::CoinPackage;
use crate::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post, put},
    Extension, Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use validator::Validate;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/coin-packages", get(list_packages).post(create_package))
        .route("/api/coin-packages/{id}", put(update_package))
        .route("/api/coin-packages/{id}/status", post(set_package_status))
}

/// Package form.
#[derive(Debug, Deserialize, Serialize, Validate)]
pub struct CoinPackageRequest {
    #[serde(default)]
    #[validate(custom(function = "not_blank", message = "name is required"))]
    pub name: String,
    #[validate(range(min = 1, message = "coin_amount must be positive"))]
    pub coin_amount: i64,
    #[validate(range(min = 0.0, message = "price_usd must not be negative"))]
    pub price_usd: f64,
    #[validate(range(min = 0.0, message = "price_ngn must not be negative"))]
    pub price_ngn: f64,
    #[serde(default)]
    #[validate(range(min = 0, message = "bonus_coins must not be negative"))]
    pub bonus_coins: i64,
}

#[derive(Serialize)]
struct NewPackage<'a> {
    #[serde(flatten)]
    package: &'a CoinPackageRequest,
    is_active: bool,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct PackageStatusRequest {
    pub is_active: bool,
}

async fn list_packages(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<Vec<CoinPackage>>> {
    let packages: Vec<CoinPackage> = state
        .backend
        .session(&user.access_token)
        .from(tables::COIN_PACKAGES)
        .select("*")
        .order("price_usd", true)
        .fetch()
        .await?;
    Ok(Json(packages))
}

async fn create_package(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Json(mut body): Json<CoinPackageRequest>,
) -> Result<(StatusCode, Json<CoinPackage>)> {
    body.validate()?;
    body.name = body.name.trim().to_string();
    tracing::info!(agent = %user.id, name = %body.name, "Creating coin package");

    let rows: Vec<CoinPackage> = state
        .backend
        .session(&user.access_token)
        .from(tables::COIN_PACKAGES)
        .insert(&NewPackage {
            package: &body,
            is_active: true,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(first_row(rows, "Coin package")?)))
}

async fn update_package(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
    Json(mut body): Json<CoinPackageRequest>,
) -> Result<Json<CoinPackage>> {
    body.validate()?;
    body.name = body.name.trim().to_string();
    tracing::info!(package_id = %id, agent = %user.id, "Updating coin package");

    let rows: Vec<CoinPackage> = state
        .backend
        .session(&user.access_token)
        .from(tables::COIN_PACKAGES)
        .eq("id", &id)
        .update(&body)
        .await?;

    Ok(Json(first_row(rows, "Coin package")?))
}

async fn set_package_status(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
    Json(body): Json<PackageStatusRequest>,
) -> Result<Json<CoinPackage>> {
    tracing::info!(package_id = %id, is_active = body.is_active, agent = %user.id, "Toggling coin package");

    let rows: Vec<CoinPackage> = state
        .backend
        .session(&user.access_token)
        .from(tables::COIN_PACKAGES)
        .eq("id", &id)
        .update(&body)
        .await?;

    Ok(Json(first_row(rows, "Coin package")?))
}
