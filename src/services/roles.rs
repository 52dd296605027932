// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Operator role resolution with a short-lived cache.
//!
//! Most sessions carry `user_type` in their token metadata. Older accounts
//! only have it on their profile row, so those are looked up once and cached
//! per user for the configured TTL.

use crate::db::{tables, SupabaseClient};
use crate::error::AppError;
use crate::middleware::auth::AuthUser;
use dashmap::DashMap;
use serde::Deserialize;
use std::time::{Duration, Instant};

/// Role that may use the agent-only console areas.
pub const AGENT_ROLE: &str = "agent";

#[derive(Debug, Clone)]
struct CachedRole {
    user_type: Option<String>,
    fetched_at: Instant,
}

#[derive(Deserialize)]
struct ProfileRole {
    user_type: Option<String>,
}

/// Resolves and caches `user_type` for authenticated operators.
pub struct RoleResolver {
    cache: DashMap<String, CachedRole>,
    ttl: Duration,
}

impl RoleResolver {
    pub fn new(ttl: Duration) -> Self {
        Self {
            cache: DashMap::new(),
            ttl,
        }
    }

    /// Role of `user`: the token claim if present, otherwise the profile row.
    pub async fn resolve(
        &self,
        backend: &SupabaseClient,
        user: &AuthUser,
    ) -> Result<Option<String>, AppError> {
        if let Some(user_type) = &user.user_type {
            return Ok(Some(user_type.clone()));
        }

        if let Some(cached) = self.cached(&user.id) {
            return Ok(cached);
        }

        let rows: Vec<ProfileRole> = backend
            .session(&user.access_token)
            .from(tables::PROFILES)
            .select("user_type")
            .eq("id", &user.id)
            .limit(1)
            .fetch()
            .await?;
        let user_type = rows.into_iter().next().and_then(|r| r.user_type);

        tracing::debug!(user_id = %user.id, user_type = ?user_type, "Resolved role from profile");
        self.cache.insert(
            user.id.clone(),
            CachedRole {
                user_type: user_type.clone(),
                fetched_at: Instant::now(),
            },
        );

        Ok(user_type)
    }

    /// Cached role if still fresh. Stale entries are evicted.
    fn cached(&self, user_id: &str) -> Option<Option<String>> {
        let fresh = self
            .cache
            .get(user_id)
            .filter(|entry| entry.fetched_at.elapsed() < self.ttl)
            .map(|entry| entry.user_type.clone());

        if fresh.is_none() {
            self.cache.remove(user_id);
        }
        fresh
    }

    /// True if `user` resolves to the agent role.
    pub async fn is_agent(
        &self,
        backend: &SupabaseClient,
        user: &AuthUser,
    ) -> Result<bool, AppError> {
        Ok(self.resolve(backend, user).await?.as_deref() == Some(AGENT_ROLE))
    }
}
