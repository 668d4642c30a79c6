//! Notification identity — durable (backend-assigned) or ephemeral
//! (client-synthesized).
//!
//! Durable identifiers are opaque strings persisted by the backend and
//! stable across reloads; they always contain at least one `-` separator.
//! Ephemeral identifiers are synthesized from the current Unix-epoch
//! millisecond clock for events that have no backend row, so they render
//! as plain digit strings. The two forms are distinguished structurally,
//! never by a registry.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::de::{self, Deserializer, Visitor};
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};

/// Identity of a notification within the feed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum NotificationId {
    /// Backend-assigned identifier, eligible for read-state reconciliation.
    Durable(String),
    /// Client-synthesized identifier (epoch milliseconds). Never sent to
    /// the backend, which has no row to update for it.
    Ephemeral(i64),
}

impl NotificationId {
    /// Classify a raw identifier string by structure.
    ///
    /// A non-empty all-digit string is the synthesized ephemeral form;
    /// everything else is a durable backend identifier.
    pub fn parse(raw: &str) -> Self {
        if !raw.is_empty() && raw.bytes().all(|b| b.is_ascii_digit()) {
            if let Ok(millis) = raw.parse::<i64>() {
                return Self::Ephemeral(millis);
            }
        }
        Self::Durable(raw.to_string())
    }

    /// Synthesize an ephemeral identity from a wall-clock instant.
    pub fn synthesize(now: DateTime<Utc>) -> Self {
        Self::Ephemeral(now.timestamp_millis())
    }

    /// Whether this identity is persisted by the backend.
    pub fn is_durable(&self) -> bool {
        matches!(self, Self::Durable(_))
    }

    /// The durable identifier string, if this identity has one.
    pub fn as_durable(&self) -> Option<&str> {
        match self {
            Self::Durable(id) => Some(id),
            Self::Ephemeral(_) => None,
        }
    }
}

impl fmt::Display for NotificationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Durable(id) => write!(f, "{id}"),
            Self::Ephemeral(millis) => write!(f, "{millis}"),
        }
    }
}

impl From<&str> for NotificationId {
    fn from(raw: &str) -> Self {
        Self::parse(raw)
    }
}

impl Serialize for NotificationId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for NotificationId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct IdVisitor;

        impl Visitor<'_> for IdVisitor {
            type Value = NotificationId;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a notification identifier string or integer")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
                Ok(NotificationId::parse(v))
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
                Ok(NotificationId::Ephemeral(v))
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
                Ok(NotificationId::Ephemeral(v as i64))
            }
        }

        deserializer.deserialize_any(IdVisitor)
    }
}
