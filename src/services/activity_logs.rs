// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Activity log presentation: profile join, display names and filters.

use crate::models::{ActivityLog, LogProfile};
use std::collections::{HashMap, HashSet};

/// Filter value meaning "no filter".
pub const ALL: &str = "all";

/// Distinct non-empty user ids, in first-seen order.
pub fn distinct_user_ids(logs: &[ActivityLog]) -> Vec<String> {
    distinct_values(logs.iter().map(|l| l.user_id.as_str()))
}

/// Distinct non-empty values, in first-seen order.
pub fn distinct_values<'a, I>(values: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut seen = HashSet::new();
    values
        .into_iter()
        .filter(|v| !v.is_empty() && seen.insert(*v))
        .map(str::to_string)
        .collect()
}

/// Attach each log's profile (when known) and compute its display name.
pub fn attach_profiles(logs: Vec<ActivityLog>, profiles: Vec<LogProfile>) -> Vec<ActivityLog> {
    let by_id: HashMap<String, LogProfile> =
        profiles.into_iter().map(|p| (p.id.clone(), p)).collect();

    logs.into_iter()
        .map(|mut log| {
            log.profile = by_id.get(&log.user_id).cloned();
            log.display_name = display_name(&log);
            log
        })
        .collect()
}

/// Name shown for the acting user.
///
/// Full name, then username, then the local part of the email, then a short
/// form of the user id.
pub fn display_name(log: &ActivityLog) -> String {
    fn non_empty(v: &Option<String>) -> Option<&str> {
        v.as_deref().filter(|s| !s.trim().is_empty())
    }

    if let Some(profile) = &log.profile {
        if let Some(name) = non_empty(&profile.full_name).or(non_empty(&profile.username)) {
            return name.to_string();
        }
        if let Some(local) = non_empty(&profile.email).and_then(|e| e.split('@').next()) {
            if !local.is_empty() {
                return local.to_string();
            }
        }
    }

    let short: String = log.user_id.chars().take(8).collect();
    format!("User {}", short)
}

/// Keep logs matching both filters. `None` or `"all"` matches everything.
pub fn filter_logs(
    logs: Vec<ActivityLog>,
    action_type: Option<&str>,
    user_type: Option<&str>,
) -> Vec<ActivityLog> {
    let matches = |filter: Option<&str>, value: &str| match filter {
        None | Some(ALL) | Some("") => true,
        Some(f) => f == value,
    };

    logs.into_iter()
        .filter(|log| matches(action_type, &log.action_type) && matches(user_type, &log.user_type))
        .collect()
}
