//! Notification entity model.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use notify_core::types::NotificationId;

use super::category::NotificationCategory;

/// A notification in the user's feed.
///
/// This is the canonical record: wire shapes from the bulk-fetch endpoint
/// and from push delivery are both normalized into it before insertion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notification {
    /// Identity, unique within the feed at any instant.
    pub id: NotificationId,
    /// Notification category.
    pub category: NotificationCategory,
    /// Notification title.
    pub title: String,
    /// Notification body text.
    pub message: String,
    /// Additional category-dependent data (JSON), never interpreted here.
    pub payload: Option<serde_json::Value>,
    /// When the notification was created.
    pub created_at: DateTime<Utc>,
    /// When the user read this notification. `None` means unread.
    pub read_at: Option<DateTime<Utc>>,
}

impl Notification {
    /// Check if the notification has not been read yet.
    pub fn is_unread(&self) -> bool {
        self.read_at.is_none()
    }

    /// Check if the notification falls within the trailing `days`-day
    /// window from `now`. The interval is closed: an entry created exactly
    /// `days` days before `now` is included.
    pub fn is_within(&self, days: i64, now: DateTime<Utc>) -> bool {
        self.created_at >= now - Duration::days(days)
    }

    /// Record the read timestamp. `read_at` only ever moves from `None` to
    /// a timestamp; a later call leaves the original timestamp in place.
    pub fn mark_read(&mut self, at: DateTime<Utc>) {
        if self.read_at.is_none() {
            self.read_at = Some(at);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(created_at: DateTime<Utc>) -> Notification {
        Notification {
            id: NotificationId::parse("a1-b2"),
            category: NotificationCategory::WorkOrder,
            title: "Work order assigned".to_string(),
            message: "WO-0017 has been assigned to you".to_string(),
            payload: None,
            created_at,
            read_at: None,
        }
    }

    #[test]
    fn test_unread_by_default() {
        assert!(sample(Utc::now()).is_unread());
    }

    #[test]
    fn test_mark_read_is_monotonic() {
        let mut n = sample(Utc::now());
        let first = Utc::now();
        n.mark_read(first);
        n.mark_read(first + Duration::hours(1));
        assert_eq!(n.read_at, Some(first));
    }

    #[test]
    fn test_window_boundary_is_inclusive() {
        let now = Utc::now();
        let n = sample(now - Duration::days(7));
        assert!(n.is_within(7, now));
        let older = sample(now - Duration::days(7) - Duration::seconds(1));
        assert!(!older.is_within(7, now));
    }
}
