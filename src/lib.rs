// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Agent Console: administrative API for the rewards marketplace
//!
//! This crate provides the backend API used by agents to moderate orders,
//! payouts, polls, blog posts and catalog data stored in the managed backend.

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod time_utils;

use config::Config;
use db::SupabaseClient;
use services::RoleResolver;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub backend: SupabaseClient,
    pub roles: RoleResolver,
}

impl AppState {
    /// Build state with a role cache sized from the configuration.
    pub fn new(config: Config, backend: SupabaseClient) -> Self {
        let roles = RoleResolver::new(std::time::Duration::from_secs(
            config.role_cache_ttl_secs,
        ));
        Self {
            config,
            backend,
            roles,
        }
    }
}
