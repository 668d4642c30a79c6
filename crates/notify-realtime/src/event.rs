//! Push delivery envelope.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use notify_core::types::UserId;

/// An event delivered over a push channel.
///
/// Category broadcasts carry a `user_ids` addressing list; direct user
/// delivery omits it. Persisted events carry a backend `id`; events without
/// one get an ephemeral identity synthesized at ingestion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PushEvent {
    /// Backend identifier, when the event has a persisted row.
    #[serde(default)]
    pub id: Option<String>,
    /// Category tag in wire form.
    pub category: String,
    /// Human-readable title.
    #[serde(default)]
    pub title: Option<String>,
    /// Human-readable message, also used for the toast.
    pub message: String,
    /// Additional category-dependent data.
    #[serde(default)]
    pub payload: Option<serde_json::Value>,
    /// Recipient addressing for category broadcasts.
    #[serde(default)]
    pub user_ids: Option<Vec<UserId>>,
    /// Event creation time, when the producer supplies one.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl PushEvent {
    /// Whether this event is addressed to the given user.
    ///
    /// Events without an addressing list are direct delivery and always
    /// accepted; events with one are accepted only on membership.
    pub fn addressed_to(&self, user_id: UserId) -> bool {
        match &self.user_ids {
            Some(ids) => ids.contains(&user_id),
            None => true,
        }
    }
}
