//! Transient user-facing alerts.

use std::time::Duration;

use tokio::sync::broadcast;

/// A transient, auto-dismissing alert for a newly delivered notification.
///
/// Fire-and-forget: emitting a toast has no bearing on feed state, and
/// nobody listening is not an error.
#[derive(Debug, Clone)]
pub struct Toast {
    /// Human-readable message from the event payload.
    pub message: String,
    /// How long the presentation should keep the toast visible.
    pub duration: Duration,
}

/// Broadcast bus carrying toasts to any subscribed presentation.
#[derive(Debug)]
pub struct ToastBus {
    tx: broadcast::Sender<Toast>,
    duration: Duration,
}

impl ToastBus {
    /// Create a bus with the configured auto-dismiss duration.
    pub fn new(duration_ms: u64) -> Self {
        let (tx, _) = broadcast::channel(32);
        Self {
            tx,
            duration: Duration::from_millis(duration_ms),
        }
    }

    /// Emit a toast. Lagging or absent receivers are ignored.
    pub fn emit(&self, message: impl Into<String>) {
        let _ = self.tx.send(Toast {
            message: message.into(),
            duration: self.duration,
        });
    }

    /// Attach a receiver for subsequent toasts.
    pub fn subscribe(&self) -> broadcast::Receiver<Toast> {
        self.tx.subscribe()
    }
}
