//! Notification category enumeration.

use std::fmt;

use serde::de::Deserializer;
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};

/// Category of a notification.
///
/// The category decides which detail view a presentation layer opens on
/// click; the feed itself never interprets it further. The tag set is open:
/// tags this client does not recognize are carried through as [`Other`].
///
/// [`Other`]: NotificationCategory::Other
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum NotificationCategory {
    /// Project handover checklist ("phc").
    HandoverChecklist,
    /// Work order.
    WorkOrder,
    /// Delivery order.
    DeliveryOrder,
    /// Invoice.
    Invoice,
    /// Approval request or decision.
    Approval,
    /// Daily log entry.
    Log,
    /// A tag this client does not recognize, carried through verbatim.
    Other(String),
}

impl NotificationCategory {
    /// Return the wire tag for this category.
    pub fn as_str(&self) -> &str {
        match self {
            Self::HandoverChecklist => "phc",
            Self::WorkOrder => "work order",
            Self::DeliveryOrder => "delivery order",
            Self::Invoice => "invoice",
            Self::Approval => "approval",
            Self::Log => "log",
            Self::Other(tag) => tag,
        }
    }

    /// Map a wire tag to a category. Unrecognized tags become [`Other`].
    ///
    /// [`Other`]: NotificationCategory::Other
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "phc" => Self::HandoverChecklist,
            "work order" => Self::WorkOrder,
            "delivery order" => Self::DeliveryOrder,
            "invoice" => Self::Invoice,
            "approval" => Self::Approval,
            "log" => Self::Log,
            other => Self::Other(other.to_string()),
        }
    }
}

impl fmt::Display for NotificationCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl From<&str> for NotificationCategory {
    fn from(tag: &str) -> Self {
        Self::from_tag(tag)
    }
}

impl Serialize for NotificationCategory {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for NotificationCategory {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let tag = String::deserialize(deserializer)?;
        Ok(Self::from_tag(&tag))
    }
}
