//! Wire-shape notification records and their normalization.
//!
//! The bulk-fetch endpoint returns two row shapes: persisted rows nest the
//! category and text under a `data` object, while synthesized rows carry
//! them at the top level. Both are mapped into the canonical
//! [`Notification`] here, before anything reaches the feed.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use notify_core::types::NotificationId;
use notify_entity::{Notification, NotificationCategory};

/// A notification row as returned by the bulk-fetch endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct NotificationRecord {
    /// Durable identifier. Rows without one are malformed and dropped.
    #[serde(default)]
    pub id: Option<String>,
    /// Top-level category tag (synthesized rows).
    #[serde(default)]
    pub category: Option<String>,
    /// Nested payload object (persisted rows carry category and text here).
    #[serde(default)]
    pub data: Option<serde_json::Value>,
    /// Top-level title (synthesized rows).
    #[serde(default)]
    pub title: Option<String>,
    /// Top-level body text (synthesized rows).
    #[serde(default)]
    pub message: Option<String>,
    /// Creation timestamp.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    /// Read timestamp, if the user already read this row.
    #[serde(default)]
    pub read_at: Option<DateTime<Utc>>,
}

impl NotificationRecord {
    /// Normalize this row into the canonical record.
    ///
    /// Returns `None` for rows without an identity; malformed input is
    /// discarded, not surfaced as an error.
    pub fn normalize(self) -> Option<Notification> {
        let raw_id = self.id?;

        let tag = self
            .category
            .or_else(|| nested_str(self.data.as_ref(), "category"))
            .unwrap_or_else(|| "general".to_string());
        let title = self
            .title
            .or_else(|| nested_str(self.data.as_ref(), "title"))
            .unwrap_or_default();
        let message = self
            .message
            .or_else(|| nested_str(self.data.as_ref(), "message"))
            .unwrap_or_default();

        Some(Notification {
            id: NotificationId::parse(&raw_id),
            category: NotificationCategory::from_tag(&tag),
            title,
            message,
            payload: self.data,
            created_at: self.created_at.unwrap_or_else(Utc::now),
            read_at: self.read_at,
        })
    }
}

/// Look up a string field on the nested `data` object.
fn nested_str(data: Option<&serde_json::Value>, key: &str) -> Option<String> {
    data?.get(key)?.as_str().map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_persisted_shape() {
        let record: NotificationRecord = serde_json::from_value(serde_json::json!({
            "id": "9b2e4c1a-77f0-4e6b-8d21-0a3f5e9c6b42",
            "data": {
                "category": "phc",
                "title": "Checklist submitted",
                "message": "PHC-031 awaits your approval",
                "phc_id": 31
            },
            "created_at": "2024-11-02T08:30:00Z",
            "read_at": null
        }))
        .unwrap();

        let n = record.normalize().expect("row has an id");
        assert_eq!(n.category, NotificationCategory::HandoverChecklist);
        assert_eq!(n.title, "Checklist submitted");
        assert!(n.is_unread());
        assert_eq!(
            n.payload.as_ref().and_then(|d| d.get("phc_id")).cloned(),
            Some(serde_json::json!(31))
        );
    }

    #[test]
    fn test_normalize_synthesized_shape() {
        let record: NotificationRecord = serde_json::from_value(serde_json::json!({
            "id": "inv-2024-0005",
            "category": "invoice",
            "title": "Invoice issued",
            "message": "INV/2024/0005 has been issued",
            "created_at": "2024-11-01T10:00:00Z"
        }))
        .unwrap();

        let n = record.normalize().expect("row has an id");
        assert_eq!(n.category, NotificationCategory::Invoice);
        assert_eq!(n.message, "INV/2024/0005 has been issued");
        assert!(n.payload.is_none());
    }

    #[test]
    fn test_row_without_id_is_dropped() {
        let record: NotificationRecord = serde_json::from_value(serde_json::json!({
            "category": "log",
            "message": "orphan row"
        }))
        .unwrap();

        assert!(record.normalize().is_none());
    }

    #[test]
    fn test_top_level_fields_win_over_nested() {
        let record: NotificationRecord = serde_json::from_value(serde_json::json!({
            "id": "a1-b2",
            "category": "work order",
            "data": { "category": "log", "title": "nested title" },
            "title": "top title"
        }))
        .unwrap();

        let n = record.normalize().expect("row has an id");
        assert_eq!(n.category, NotificationCategory::WorkOrder);
        assert_eq!(n.title, "top title");
    }
}
