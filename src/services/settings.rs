//! Settings view assembled from `app_settings` rows.

use crate::models::settings::{CASHOUT_LIMIT_KEY, REFERRAL_REWARDS_KEY};
use crate::models::{ConsoleSettings, SettingRow};

/// Build the settings view; missing or malformed keys fall back to defaults.
pub fn from_rows(rows: Vec<SettingRow>) -> ConsoleSettings {
    let mut settings = ConsoleSettings::default();

    for row in rows {
        match row.key.as_str() {
            REFERRAL_REWARDS_KEY => match serde_json::from_value(row.value) {
                Ok(rewards) => settings.referral_rewards = rewards,
                Err(e) => tracing::warn!(key = %row.key, error = %e, "Ignoring malformed setting"),
            },
            CASHOUT_LIMIT_KEY => match serde_json::from_value(row.value) {
                Ok(limit) => settings.cashout_limit = limit,
                Err(e) => tracing::warn!(key = %row.key, error = %e, "Ignoring malformed setting"),
            },
            _ => {}
        }
    }

    settings
}
