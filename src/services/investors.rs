// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Investor listing assembly.

use crate::models::investor::{InvestorContact, InvestorProfile, InvestorRecord};
use crate::models::{Investment, InvestorSummary};
use std::collections::HashSet;

/// Merge onboarded investors with investor profiles that still need setup.
///
/// Onboarded investors come first. A profile that already has an investor
/// record is not listed twice.
pub fn merge_investors(
    records: Vec<InvestorRecord>,
    profiles: Vec<InvestorProfile>,
) -> Vec<InvestorSummary> {
    let onboarded: HashSet<String> = records.iter().map(|r| r.profiles.id.clone()).collect();

    let mut merged: Vec<InvestorSummary> = records
        .into_iter()
        .map(|record| InvestorSummary {
            id: record.id,
            profile_id: record.profiles.id,
            profiles: InvestorContact {
                full_name: record.profiles.full_name,
                email: record.profiles.email,
            },
            is_properly_onboarded: true,
        })
        .collect();

    merged.extend(
        profiles
            .into_iter()
            .filter(|p| !onboarded.contains(&p.id))
            .map(|profile| InvestorSummary {
                id: profile.id.clone(),
                profile_id: profile.id,
                profiles: InvestorContact {
                    full_name: profile.full_name,
                    email: profile.email,
                },
                is_properly_onboarded: false,
            }),
    );

    merged
}

/// Sum of all investment amounts.
pub fn total_investment(investments: &[Investment]) -> f64 {
    investments.iter().map(|i| i.amount).sum()
}
