//! Subscription handles with independent teardown.

use tokio::sync::watch;
use tokio::task::JoinHandle;

/// Handle to one open channel subscription.
///
/// Dropping the handle or calling [`unsubscribe`](Self::unsubscribe) stops
/// delivery for this channel only; other subscriptions and anything already
/// delivered are unaffected.
#[derive(Debug)]
pub struct SubscriptionHandle {
    /// Channel name this handle controls.
    channel: String,
    /// Stop signal observed by the delivery task.
    stop: watch::Sender<bool>,
    /// The delivery task.
    task: JoinHandle<()>,
}

impl SubscriptionHandle {
    /// Wrap a spawned delivery task.
    pub fn new(channel: String, stop: watch::Sender<bool>, task: JoinHandle<()>) -> Self {
        Self {
            channel,
            stop,
            task,
        }
    }

    /// The channel this subscription listens on.
    pub fn channel(&self) -> &str {
        &self.channel
    }

    /// Stop delivery for this channel. Already-delivered feed contents are
    /// not touched.
    pub fn unsubscribe(self) {
        let _ = self.stop.send(true);
        self.task.abort();
    }
}
