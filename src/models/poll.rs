// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Poll rows and the tallied results view.

use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Poll row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Poll {
    pub id: String,
    pub question: String,
    pub description: Option<String>,
    pub created_at: String,
    pub closes_at: Option<String>,
    /// "open" or "closed"
    pub status: String,
    pub author_id: Option<String>,
}

/// Poll option row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PollOption {
    pub id: String,
    pub option_text: String,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// Poll vote row (only the option reference is fetched).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PollVote {
    pub poll_option_id: String,
}

/// Vote count and share for one option.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct OptionTally {
    pub id: String,
    pub option_text: String,
    pub vote_count: u32,
    /// Share of all votes, one decimal place (0-100)
    pub percentage: f64,
}

/// Flat poll results shape consumed by the results page.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct PollResults {
    pub id: String,
    pub question: String,
    pub description: Option<String>,
    pub created_at: String,
    pub closes_at: Option<String>,
    pub status: String,
    pub author_id: Option<String>,
    pub options: Vec<OptionTally>,
    pub total_votes: u32,
}
