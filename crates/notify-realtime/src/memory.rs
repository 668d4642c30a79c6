//! In-memory pub/sub transport for tests and single-process use.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tokio::sync::broadcast;

use crate::event::PushEvent;
use crate::transport::PushTransport;

/// In-memory push transport.
#[derive(Debug)]
pub struct MemoryTransport {
    /// Channel name → broadcast sender
    channels: RwLock<HashMap<String, broadcast::Sender<PushEvent>>>,
    /// Buffer size for channels
    buffer_size: usize,
}

impl MemoryTransport {
    /// Create a new in-memory transport
    pub fn new(buffer_size: usize) -> Self {
        Self {
            channels: RwLock::new(HashMap::new()),
            buffer_size,
        }
    }
}

#[async_trait]
impl PushTransport for MemoryTransport {
    async fn subscribe(&self, channel: &str) -> broadcast::Receiver<PushEvent> {
        let mut channels = self.channels.write().await;
        let tx = channels
            .entry(channel.to_string())
            .or_insert_with(|| broadcast::channel(self.buffer_size).0);
        tx.subscribe()
    }

    async fn publish(&self, channel: &str, event: PushEvent) {
        let channels = self.channels.read().await;
        if let Some(tx) = channels.get(channel) {
            let _ = tx.send(event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(message: &str) -> PushEvent {
        PushEvent {
            id: None,
            category: "log".to_string(),
            title: None,
            message: message.to_string(),
            payload: None,
            user_ids: None,
            created_at: None,
        }
    }

    #[tokio::test]
    async fn test_publish_reaches_subscriber() {
        let transport = MemoryTransport::new(16);
        let mut rx = transport.subscribe("category:log").await;
        transport.publish("category:log", sample("hello")).await;
        let ev = rx.recv().await.expect("delivery");
        assert_eq!(ev.message, "hello");
    }

    #[tokio::test]
    async fn test_channels_are_independent() {
        let transport = MemoryTransport::new(16);
        let mut log_rx = transport.subscribe("category:log").await;
        let _invoice_rx = transport.subscribe("category:invoice").await;
        transport.publish("category:invoice", sample("nope")).await;
        transport.publish("category:log", sample("yep")).await;
        assert_eq!(log_rx.recv().await.unwrap().message, "yep");
    }

    #[tokio::test]
    async fn test_publish_without_subscriber_is_dropped() {
        let transport = MemoryTransport::new(16);
        transport.publish("category:phc", sample("lost")).await;
        let mut rx = transport.subscribe("category:phc").await;
        transport.publish("category:phc", sample("kept")).await;
        assert_eq!(rx.recv().await.unwrap().message, "kept");
    }
}
