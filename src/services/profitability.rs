// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Profitability analysis request handling.
//!
//! The analysis itself (revenue minus reward costs over the range) runs in
//! the backend; this module validates the range and reward assumptions and
//! shapes the procedure arguments.

use crate::error::AppError;
use crate::time_utils::{format_utc_rfc3339, parse_bound, DayBound};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

fn default_fee_rate() -> f64 {
    0.1
}
fn default_status_reward() -> f64 {
    0.5
}
fn default_survey_reward() -> f64 {
    2.0
}
fn default_challenge_reward() -> f64 {
    5.0
}

/// Analysis form as submitted by the console.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfitabilityRequest {
    #[serde(default)]
    pub start_date: String,
    #[serde(default)]
    pub end_date: String,
    /// Fraction of each coin purchase kept as fee (0-1)
    #[serde(default = "default_fee_rate")]
    pub transaction_fee_rate: f64,
    #[serde(default = "default_status_reward")]
    pub reward_for_status: f64,
    #[serde(default = "default_survey_reward")]
    pub reward_for_survey: f64,
    #[serde(default = "default_challenge_reward")]
    pub reward_for_challenge: f64,
}

/// Arguments of `analyze_gamification_profitability`.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ProfitabilityParams {
    pub start_date: String,
    pub end_date: String,
    pub transaction_fee_rate: f64,
    pub reward_for_status: f64,
    pub reward_for_survey: f64,
    pub reward_for_challenge: f64,
}

/// Timestamps are forwarded as written; date-only input becomes its pinned
/// day bound.
fn bound_arg(raw: &str, parsed: DateTime<Utc>) -> String {
    let raw = raw.trim();
    if raw.contains('T') {
        raw.to_string()
    } else {
        format_utc_rfc3339(parsed)
    }
}

impl ProfitabilityRequest {
    /// Validate the form and pin date-only bounds to whole days.
    pub fn into_params(self) -> Result<ProfitabilityParams, AppError> {
        let start = parse_bound(&self.start_date, DayBound::Start).ok_or_else(|| {
            AppError::BadRequest(
                "Invalid 'startDate': expected YYYY-MM-DD or RFC3339 datetime".to_string(),
            )
        })?;
        let end = parse_bound(&self.end_date, DayBound::End).ok_or_else(|| {
            AppError::BadRequest(
                "Invalid 'endDate': expected YYYY-MM-DD or RFC3339 datetime".to_string(),
            )
        })?;

        if start > end {
            return Err(AppError::BadRequest(
                "'startDate' must not be after 'endDate'".to_string(),
            ));
        }

        if !(0.0..=1.0).contains(&self.transaction_fee_rate) {
            return Err(AppError::BadRequest(
                "'transactionFeeRate' must be between 0 and 1".to_string(),
            ));
        }

        let rewards = [
            ("rewardForStatus", self.reward_for_status),
            ("rewardForSurvey", self.reward_for_survey),
            ("rewardForChallenge", self.reward_for_challenge),
        ];
        if let Some((name, _)) = rewards.iter().find(|(_, v)| !v.is_finite() || *v < 0.0) {
            return Err(AppError::BadRequest(format!(
                "'{}' must be a non-negative number",
                name
            )));
        }

        Ok(ProfitabilityParams {
            start_date: bound_arg(&self.start_date, start),
            end_date: bound_arg(&self.end_date, end),
            transaction_fee_rate: self.transaction_fee_rate,
            reward_for_status: self.reward_for_status,
            reward_for_survey: self.reward_for_survey,
            reward_for_challenge: self.reward_for_challenge,
        })
    }
}
