//! WebSocket push transport.
//!
//! Maintains one long-lived socket to the push gateway. Subscribe frames go
//! out as channels are opened; event frames coming in are fanned out to the
//! per-channel broadcast senders. A dropped socket is reconnected after a
//! fixed delay and all known channels are re-subscribed.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use futures::{SinkExt, StreamExt};
use serde::{Deserialize, Serialize};
use tokio::sync::{RwLock, broadcast, mpsc, watch};
use tokio::time::{Duration, sleep};
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::Message;
use tracing::{debug, info, warn};

use notify_core::config::realtime::RealtimeConfig;

use crate::event::PushEvent;
use crate::transport::PushTransport;

/// Frames sent by the client to the push gateway.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ClientFrame {
    /// Open a channel subscription.
    Subscribe {
        /// Channel name.
        channel: String,
    },
    /// Publish an event to a channel.
    Publish {
        /// Channel name.
        channel: String,
        /// The event.
        event: PushEvent,
    },
}

/// Frames sent by the push gateway to the client.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ServerFrame {
    /// Subscription confirmed.
    Subscribed {
        /// Channel name.
        channel: String,
    },
    /// Event delivery.
    Event {
        /// Channel the event was published on.
        channel: String,
        /// The event.
        event: PushEvent,
    },
}

/// Shared channel fan-out map.
type ChannelMap = Arc<RwLock<HashMap<String, broadcast::Sender<PushEvent>>>>;

/// WebSocket push transport.
#[derive(Debug)]
pub struct WsTransport {
    /// Channel name → broadcast sender.
    channels: ChannelMap,
    /// Buffer size for channels.
    buffer_size: usize,
    /// Outbound frames for the connection task.
    frame_tx: mpsc::UnboundedSender<ClientFrame>,
    /// Stop signal for the connection task.
    stop_tx: watch::Sender<bool>,
}

impl WsTransport {
    /// Spawn the connection task and return the transport.
    pub fn connect(config: &RealtimeConfig) -> Self {
        let channels: ChannelMap = Arc::new(RwLock::new(HashMap::new()));
        let (frame_tx, frame_rx) = mpsc::unbounded_channel();
        let (stop_tx, stop_rx) = watch::channel(false);

        tokio::spawn(run_connection(
            config.url.clone(),
            Duration::from_secs(config.reconnect_delay_seconds),
            Arc::clone(&channels),
            frame_rx,
            stop_rx,
        ));

        Self {
            channels,
            buffer_size: config.channel_buffer_size,
            frame_tx,
            stop_tx,
        }
    }

    /// Stop the connection task. Already-delivered events are unaffected.
    pub fn shutdown(&self) {
        let _ = self.stop_tx.send(true);
    }
}

#[async_trait::async_trait]
impl PushTransport for WsTransport {
    async fn subscribe(&self, channel: &str) -> broadcast::Receiver<PushEvent> {
        let rx = {
            let mut channels = self.channels.write().await;
            channels
                .entry(channel.to_string())
                .or_insert_with(|| broadcast::channel(self.buffer_size).0)
                .subscribe()
        };
        let _ = self.frame_tx.send(ClientFrame::Subscribe {
            channel: channel.to_string(),
        });
        rx
    }

    async fn publish(&self, channel: &str, event: PushEvent) {
        let _ = self.frame_tx.send(ClientFrame::Publish {
            channel: channel.to_string(),
            event,
        });
    }
}

/// Connection loop: connect, pump frames, reconnect on drop.
async fn run_connection(
    url: String,
    reconnect_delay: Duration,
    channels: ChannelMap,
    mut frame_rx: mpsc::UnboundedReceiver<ClientFrame>,
    mut stop_rx: watch::Receiver<bool>,
) {
    let mut subscribed: HashSet<String> = HashSet::new();

    loop {
        let socket = tokio::select! {
            result = connect_async(url.as_str()) => match result {
                Ok((socket, _)) => socket,
                Err(e) => {
                    warn!("Push gateway connection failed: {}", e);
                    tokio::select! {
                        _ = sleep(reconnect_delay) => continue,
                        _ = stop_rx.changed() => return,
                    }
                }
            },
            _ = stop_rx.changed() => return,
        };

        info!("Connected to push gateway at {}", url);
        let (mut sink, mut stream) = socket.split();

        for channel in &subscribed {
            let frame = ClientFrame::Subscribe {
                channel: channel.clone(),
            };
            if send_frame(&mut sink, &frame).await.is_err() {
                break;
            }
        }

        loop {
            tokio::select! {
                _ = stop_rx.changed() => {
                    let _ = sink.close().await;
                    return;
                }
                frame = frame_rx.recv() => match frame {
                    Some(frame) => {
                        if let ClientFrame::Subscribe { channel } = &frame {
                            subscribed.insert(channel.clone());
                        }
                        if send_frame(&mut sink, &frame).await.is_err() {
                            break;
                        }
                    }
                    None => return,
                },
                message = stream.next() => match message {
                    Some(Ok(Message::Text(text))) => {
                        dispatch_frame(&channels, &text).await;
                    }
                    Some(Ok(Message::Ping(data))) => {
                        let _ = sink.send(Message::Pong(data)).await;
                    }
                    Some(Ok(Message::Close(_))) | None => break,
                    Some(Ok(_)) => {}
                    Some(Err(e)) => {
                        warn!("Push gateway read error: {}", e);
                        break;
                    }
                },
            }
        }

        warn!("Push gateway connection lost, reconnecting");
        tokio::select! {
            _ = sleep(reconnect_delay) => {}
            _ = stop_rx.changed() => return,
        }
    }
}

/// Serialize and send one client frame.
async fn send_frame<S>(sink: &mut S, frame: &ClientFrame) -> Result<(), ()>
where
    S: SinkExt<Message> + Unpin,
{
    let json = match serde_json::to_string(frame) {
        Ok(json) => json,
        Err(e) => {
            warn!("Failed to serialize client frame: {}", e);
            return Ok(());
        }
    };
    sink.send(Message::text(json)).await.map_err(|_| ())
}

/// Parse one gateway frame and fan the event out to its channel.
async fn dispatch_frame(channels: &ChannelMap, text: &str) {
    match serde_json::from_str::<ServerFrame>(text) {
        Ok(ServerFrame::Event { channel, event }) => {
            let channels = channels.read().await;
            if let Some(tx) = channels.get(&channel) {
                let _ = tx.send(event);
            }
        }
        Ok(ServerFrame::Subscribed { channel }) => {
            debug!("Subscription confirmed for '{}'", channel);
        }
        Err(e) => {
            debug!("Discarding unparseable gateway frame: {}", e);
        }
    }
}
