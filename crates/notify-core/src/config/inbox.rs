//! Inbox behavior configuration.

use serde::{Deserialize, Serialize};

/// Inbox (notification feed) behavior settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InboxConfig {
    /// Trailing window, in days, used by space-constrained presentations.
    #[serde(default = "default_recent_window")]
    pub recent_window_days: i64,
    /// How long a toast stays visible, in milliseconds.
    #[serde(default = "default_toast_duration")]
    pub toast_duration_ms: u64,
    /// Maximum remembered identities per channel for duplicate suppression.
    /// Oldest identities are evicted first once the bound is reached.
    #[serde(default = "default_seen_capacity")]
    pub seen_capacity_per_channel: usize,
    /// Interval in seconds between reconciliation re-fetches of the bulk
    /// endpoint. Zero disables the refresh task.
    #[serde(default)]
    pub refresh_interval_seconds: u64,
}

impl Default for InboxConfig {
    fn default() -> Self {
        Self {
            recent_window_days: default_recent_window(),
            toast_duration_ms: default_toast_duration(),
            seen_capacity_per_channel: default_seen_capacity(),
            refresh_interval_seconds: 0,
        }
    }
}

fn default_recent_window() -> i64 {
    7
}

fn default_toast_duration() -> u64 {
    5000
}

fn default_seen_capacity() -> usize {
    1024
}
