//! # notify-client
//!
//! REST backend client for SiteDesk Notify. Provides:
//!
//! - The [`NotificationApi`] seam consumed by the feed crate
//! - [`BackendClient`], the bearer-token-authenticated reqwest implementation
//! - Wire-record normalization into the canonical notification entity

pub mod api;
pub mod client;
pub mod record;

pub use api::NotificationApi;
pub use client::BackendClient;
pub use record::NotificationRecord;
