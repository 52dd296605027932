// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Agent Console API Server
//!
//! Serves the agent dashboard: pending orders, payouts, reports, polls,
//! blog posts and marketplace settings, backed by the managed database.

use agent_console::{config::Config, db::SupabaseClient, AppState};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize structured JSON logging
    init_logging();

    // Load configuration from environment
    let config = Config::from_env()?;
    tracing::info!(port = config.port, "Starting Agent Console API");

    let backend = SupabaseClient::new(&config.supabase_url, &config.supabase_anon_key)?;
    tracing::info!(
        backend = %config.supabase_url,
        media_bucket = %config.media_bucket,
        "Backend client initialized"
    );

    // Build shared state
    let state = Arc::new(AppState::new(config.clone(), backend));

    // Build router
    let app = agent_console::routes::create_router(state);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "Server listening");

    axum::serve(listener, app).await?;
    Ok(())
}

/// Initialize structured JSON logging.
fn init_logging() {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("agent_console=debug,info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(format)
        .init();
}
