// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Moderation queues: orders awaiting finalization, cashouts, content reports.

use super::{number_or_string, ProductName, ProfileName};
use serde::{Deserialize, Serialize};

/// Shipped purchase waiting for an agent to finalize or reject it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PendingPurchase {
    pub id: String,
    /// When the influencer placed the order (ISO 8601)
    pub purchased_at: String,
    pub quantity: i64,
    pub total_coins: i64,
    pub status: String,
    pub products: Option<ProductName>,
    /// Buyer profile
    pub profiles: Option<ProfileName>,
}

/// Cashout transaction waiting for approval.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PendingPayout {
    pub id: String,
    pub created_at: String,
    #[serde(deserialize_with = "number_or_string")]
    pub amount: f64,
    pub description: Option<String>,
    pub status: String,
    pub profiles: Option<ProfileName>,
}

/// Content report waiting to be resolved.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PendingReport {
    pub id: String,
    pub created_at: String,
    pub content_id: String,
    pub content_type: String,
    pub reason: Option<String>,
    pub reporter: Option<ProfileName>,
}

/// `{ success, message }` envelope returned by the purchase procedures.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcedureOutcome {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
}
