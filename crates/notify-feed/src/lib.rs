//! # notify-feed
//!
//! The notification aggregator for SiteDesk Notify. Merges an initial bulk
//! fetch with an open set of push subscriptions into one in-memory feed,
//! suppresses duplicate delivery per channel, and mediates read-state
//! changes with optimistic local updates reconciled to the backend.

pub mod aggregator;
pub mod feed;
pub mod seen;
pub mod toast;

pub use aggregator::NotificationAggregator;
pub use feed::{Feed, ReadOutcome};
pub use toast::{Toast, ToastBus};
