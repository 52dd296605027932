//! Audit trail of user actions.

use serde::{Deserialize, Serialize};

/// Profile columns shown next to a log entry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LogProfile {
    pub id: String,
    pub full_name: Option<String>,
    pub username: Option<String>,
    pub avatar_url: Option<String>,
    pub email: Option<String>,
    pub location: Option<String>,
}

/// `activity_logs` row, optionally joined with the acting user's profile.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivityLog {
    pub id: String,
    pub timestamp: String,
    pub user_id: String,
    pub user_type: String,
    pub action_type: String,
    pub entity_id: Option<String>,
    pub entity_type: Option<String>,
    pub details: Option<serde_json::Value>,
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
    #[serde(default)]
    pub profile: Option<LogProfile>,
    /// Computed for display; never read from the backend
    #[serde(default, skip_deserializing)]
    pub display_name: String,
}
