//! # notify-entity
//!
//! Domain entity models for SiteDesk Notify: the canonical notification
//! record and its category enumeration. Every origin shape (bulk-fetch row,
//! category broadcast, direct push) is normalized into these types exactly
//! once, at ingestion, before reaching the feed.

pub mod notification;

pub use notification::{Notification, NotificationCategory};
