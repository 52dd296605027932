// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Marketplace settings stored as key/value rows in `app_settings`.

use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Setting key for referral rewards.
pub const REFERRAL_REWARDS_KEY: &str = "referral_rewards";
/// Setting key for the cashout limit.
pub const CASHOUT_LIMIT_KEY: &str = "cashout_limit";

/// Raw `app_settings` row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SettingRow {
    pub key: String,
    pub value: serde_json::Value,
}

/// Coins granted when a referral signs up.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct ReferralRewards {
    /// Paid to the user who sent the invite
    pub inviter_reward: f64,
    /// Paid to the newly joined user
    pub invitee_bonus: f64,
}

impl Default for ReferralRewards {
    fn default() -> Self {
        Self {
            inviter_reward: 500.0,
            invitee_bonus: 250.0,
        }
    }
}

/// Maximum amount a single cashout may request.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct CashoutLimit {
    pub limit: f64,
}

impl Default for CashoutLimit {
    fn default() -> Self {
        Self { limit: 10_000.0 }
    }
}

/// Settings page view.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct ConsoleSettings {
    pub referral_rewards: ReferralRewards,
    pub cashout_limit: CashoutLimit,
}
