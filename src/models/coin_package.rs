// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Coin packages brands can purchase in the mobile app.

use super::number_or_string;
use serde::{Deserialize, Serialize};

/// Coin package row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoinPackage {
    pub id: String,
    pub name: String,
    pub coin_amount: i64,
    #[serde(deserialize_with = "number_or_string")]
    pub price_usd: f64,
    #[serde(deserialize_with = "number_or_string")]
    pub price_ngn: f64,
    #[serde(default)]
    pub bonus_coins: i64,
    pub is_active: bool,
    pub created_at: Option<String>,
}
