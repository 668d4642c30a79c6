//! Push delivery transport configuration.

use serde::{Deserialize, Serialize};

/// Push delivery (WebSocket) transport configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RealtimeConfig {
    /// WebSocket URL of the push gateway.
    #[serde(default = "default_url")]
    pub url: String,
    /// Internal buffer size for per-channel broadcast fan-out.
    #[serde(default = "default_channel_buffer")]
    pub channel_buffer_size: usize,
    /// Delay in seconds before reconnecting a dropped socket.
    #[serde(default = "default_reconnect_delay")]
    pub reconnect_delay_seconds: u64,
}

impl Default for RealtimeConfig {
    fn default() -> Self {
        Self {
            url: default_url(),
            channel_buffer_size: default_channel_buffer(),
            reconnect_delay_seconds: default_reconnect_delay(),
        }
    }
}

fn default_url() -> String {
    "ws://127.0.0.1:6001/ws".to_string()
}

fn default_channel_buffer() -> usize {
    256
}

fn default_reconnect_delay() -> u64 {
    5
}
