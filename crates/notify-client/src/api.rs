//! Backend API seam for notification operations.

use async_trait::async_trait;

use notify_core::result::AppResult;
use notify_entity::Notification;

/// Operations the feed needs from the REST backend.
///
/// Implemented by [`BackendClient`](crate::client::BackendClient) and by
/// test doubles in the feed crate.
#[async_trait]
pub trait NotificationApi: Send + Sync {
    /// Fetch all existing notifications for the authenticated user, in
    /// server order.
    async fn fetch_notifications(&self) -> AppResult<Vec<Notification>>;

    /// Mark one notification as read, keyed by its durable identifier.
    ///
    /// Callers guarantee the identifier is of durable form; ephemeral
    /// identities have no backend row and must never reach this call.
    async fn mark_read(&self, id: &str) -> AppResult<()>;
}
