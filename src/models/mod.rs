// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Data models for the application.
//!
//! These mirror backend rows as fetched; the backend owns the schema.

pub mod activity_log;
pub mod brand;
pub mod catalog;
pub mod coin_package;
pub mod investor;
pub mod moderation;
pub mod poll;
pub mod settings;

pub use activity_log::{ActivityLog, LogProfile};
pub use brand::{BrandInfo, BrandProfileRow, BrandSummary};
pub use catalog::{Industry, Interest};
pub use coin_package::CoinPackage;
pub use investor::{Investment, InvestorDetail, InvestorLevel, InvestorSummary};
pub use moderation::{PendingPayout, PendingPurchase, PendingReport, ProcedureOutcome};
pub use poll::{OptionTally, Poll, PollOption, PollResults, PollVote};
pub use settings::{CashoutLimit, ConsoleSettings, ReferralRewards, SettingRow};

use serde::{Deserialize, Deserializer, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Embedded `profiles (full_name)` resource.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProfileName {
    pub full_name: Option<String>,
}

/// Embedded `products (name)` resource.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProductName {
    pub name: Option<String>,
}

/// Result of a console action (approve, reject, verify, ...).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct ActionResponse {
    pub success: bool,
    pub message: String,
}

impl ActionResponse {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }
}

/// Deserialize a Postgres `numeric` that may arrive as a JSON number or string.
pub(crate) fn number_or_string<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Numeric {
        Number(f64),
        Text(String),
    }

    match Numeric::deserialize(deserializer)? {
        Numeric::Number(n) => Ok(n),
        Numeric::Text(s) => s.trim().parse().map_err(serde::de::Error::custom),
    }
}
