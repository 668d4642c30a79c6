//! Push transport abstraction.

use async_trait::async_trait;
use tokio::sync::broadcast;

use crate::event::PushEvent;

/// A source of push-delivered events, keyed by channel name.
///
/// The transport owns per-channel fan-out; each `subscribe` call returns an
/// independent receiver. Delivery order is whatever the transport provides
/// per channel; nothing is coordinated across channels. The transport may
/// redeliver events; duplicate suppression is the consumer's concern.
#[async_trait]
pub trait PushTransport: Send + Sync {
    /// Open (or attach to) a channel and return a receiver for its events.
    async fn subscribe(&self, channel: &str) -> broadcast::Receiver<PushEvent>;

    /// Publish an event to a channel.
    async fn publish(&self, channel: &str, event: PushEvent);
}
