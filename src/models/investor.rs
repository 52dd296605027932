// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Investors, their levels and investments.

use super::number_or_string;
use serde::{Deserialize, Serialize};

/// Investor tier with its interest factor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvestorLevel {
    pub id: String,
    pub role_name: String,
    #[serde(deserialize_with = "number_or_string")]
    pub interest_factor: f64,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// Investment row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Investment {
    pub id: String,
    pub investor_id: String,
    #[serde(deserialize_with = "number_or_string")]
    pub amount: f64,
    pub investment_date: String,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Name and email of an investor's profile.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InvestorContact {
    pub full_name: Option<String>,
    pub email: Option<String>,
}

/// `profiles` row of a user whose type is investor.
#[derive(Debug, Clone, Deserialize)]
pub struct InvestorProfile {
    pub id: String,
    pub full_name: Option<String>,
    pub email: Option<String>,
}

/// `investors` row joined to its profile.
#[derive(Debug, Clone, Deserialize)]
pub struct InvestorRecord {
    pub id: String,
    pub profiles: InvestorProfile,
}

/// Investor listing entry.
///
/// For investors without an `investors` record the profile id doubles as id.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct InvestorSummary {
    pub id: String,
    pub profile_id: String,
    pub profiles: InvestorContact,
    pub is_properly_onboarded: bool,
}

/// Investor detail page view.
#[derive(Debug, Clone, Serialize)]
pub struct InvestorDetail {
    /// `investors.id`; None until the investor is onboarded
    pub id: Option<String>,
    pub profile_id: String,
    pub profiles: InvestorContact,
    pub is_properly_onboarded: bool,
    pub investments: Vec<Investment>,
    pub total_investment: f64,
    pub investment_count: usize,
}
