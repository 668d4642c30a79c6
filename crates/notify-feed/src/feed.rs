//! The in-memory notification feed.

use chrono::{DateTime, Utc};
use tracing::trace;

use notify_core::types::NotificationId;
use notify_entity::Notification;

/// Result of a local mark-read attempt, used by the aggregator to decide
/// whether a backend call is due.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadOutcome {
    /// The entry was unread and is now marked read locally.
    Marked,
    /// The entry was already read; no further work is needed.
    AlreadyRead,
    /// No entry with this identity exists in the feed.
    NotFound,
}

/// Ordered collection of notifications, owned exclusively by the aggregator.
///
/// Ordering contract: new arrivals are prepended, so the feed is ordered by
/// arrival, not by `created_at`. Delayed delivery can therefore place an
/// older entry ahead of newer ones.
#[derive(Debug, Default)]
pub struct Feed {
    entries: Vec<Notification>,
}

impl Feed {
    /// Create an empty feed.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the entire feed with a bulk-fetched set, in server order.
    pub fn replace(&mut self, entries: Vec<Notification>) {
        self.entries = entries;
    }

    /// Insert a new arrival at the front of the feed.
    ///
    /// Identity uniqueness is enforced here: if an entry with the same
    /// identity already exists, the feed is unchanged and `false` is
    /// returned.
    pub fn prepend(&mut self, notification: Notification) -> bool {
        if self.contains(&notification.id) {
            trace!(id = %notification.id, "Identity already in feed, insert skipped");
            return false;
        }
        self.entries.insert(0, notification);
        true
    }

    /// Whether an entry with this identity exists.
    pub fn contains(&self, id: &NotificationId) -> bool {
        self.entries.iter().any(|n| n.id == *id)
    }

    /// All entries, newest arrival first.
    pub fn entries(&self) -> &[Notification] {
        &self.entries
    }

    /// Number of entries without a read timestamp.
    pub fn unread_count(&self) -> usize {
        self.entries.iter().filter(|n| n.is_unread()).count()
    }

    /// Entries created within the trailing `days`-day window from `now`.
    /// The boundary is inclusive.
    pub fn recent_window(&self, days: i64, now: DateTime<Utc>) -> Vec<Notification> {
        self.entries
            .iter()
            .filter(|n| n.is_within(days, now))
            .cloned()
            .collect()
    }

    /// Identities of all unread entries, in feed order.
    pub fn unread_ids(&self) -> Vec<NotificationId> {
        self.entries
            .iter()
            .filter(|n| n.is_unread())
            .map(|n| n.id.clone())
            .collect()
    }

    /// Mark one entry read locally, if it exists and is unread.
    pub fn mark_read(&mut self, id: &NotificationId, at: DateTime<Utc>) -> ReadOutcome {
        match self.entries.iter_mut().find(|n| n.id == *id) {
            Some(entry) if entry.is_unread() => {
                entry.mark_read(at);
                ReadOutcome::Marked
            }
            Some(_) => ReadOutcome::AlreadyRead,
            None => ReadOutcome::NotFound,
        }
    }

    /// Merge a reconciliation re-fetch into the feed.
    ///
    /// For identities already present, only the read state moves, and only
    /// forward: a server `read_at` fills in a local `None`, while a local
    /// `Some` is never reset. Unknown identities are appended in server
    /// order. Ephemeral entries have no server counterpart and are left
    /// untouched.
    pub fn merge(&mut self, server: Vec<Notification>) {
        for incoming in server {
            match self.entries.iter_mut().find(|n| n.id == incoming.id) {
                Some(existing) => {
                    if let Some(at) = incoming.read_at {
                        existing.mark_read(at);
                    }
                }
                None => self.entries.push(incoming),
            }
        }
    }
}
