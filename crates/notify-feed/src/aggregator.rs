//! The notification aggregator.
//!
//! Owns the feed for the lifetime of the authenticated session. Sources:
//! one bulk fetch at startup plus any number of push subscriptions, each
//! with its own duplicate-suppression set. Presentation layers get
//! read-only snapshots, a toast stream, and an unread badge; the only
//! mutation they can request is a read-state change.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock};

use chrono::Utc;
use dashmap::DashMap;
use tokio::sync::{broadcast, watch};
use tracing::{debug, info, trace, warn};

use notify_client::NotificationApi;
use notify_core::config::inbox::InboxConfig;
use notify_core::types::{NotificationId, UserId};
use notify_entity::{Notification, NotificationCategory};
use notify_realtime::{ChannelSpec, PushEvent, PushTransport, SubscriptionHandle};

use crate::feed::{Feed, ReadOutcome};
use crate::seen::SeenSet;
use crate::toast::{Toast, ToastBus};

/// Aggregates bulk-fetched and push-delivered notifications into one feed
/// and mediates read-state changes.
#[derive(Clone)]
pub struct NotificationAggregator {
    inner: Arc<Inner>,
}

struct Inner {
    /// Backend API for the bulk fetch and read reconciliation.
    api: Arc<dyn NotificationApi>,
    /// Push delivery source.
    transport: Arc<dyn PushTransport>,
    /// The authenticated user, for push-event addressing checks.
    user_id: UserId,
    /// Inbox behavior settings.
    config: InboxConfig,
    /// The feed. Mutated only inside synchronous critical sections; no
    /// await point ever splits a feed mutation.
    feed: RwLock<Feed>,
    /// Per-channel duplicate suppression.
    seen: DashMap<String, SeenSet>,
    /// Transient alert stream.
    toasts: ToastBus,
    /// Unread count, published after every feed mutation.
    badge: watch::Sender<usize>,
    /// Stop signal for delivery and refresh tasks.
    stop: watch::Sender<bool>,
    /// Set on shutdown; late responses are discarded once set.
    closed: AtomicBool,
}

impl Inner {
    fn is_closed(&self) -> bool {
        self.closed.load(Ordering::Acquire)
    }

    fn publish_badge(&self) {
        let count = self
            .feed
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .unread_count();
        let _ = self.badge.send(count);
    }

    /// Apply one delivered push event to the feed.
    fn ingest(&self, channel: &str, event: PushEvent) {
        if self.is_closed() {
            return;
        }
        if !event.addressed_to(self.user_id) {
            trace!(channel, "Push event not addressed to this user, discarded");
            return;
        }

        let id = match event.id.as_deref() {
            Some("") => {
                debug!(channel, "Push event with empty identity discarded");
                return;
            }
            Some(raw) => NotificationId::parse(raw),
            None => NotificationId::synthesize(Utc::now()),
        };

        let newly_seen = self
            .seen
            .entry(channel.to_string())
            .or_insert_with(|| SeenSet::new(self.config.seen_capacity_per_channel))
            .insert(id.clone());
        if !newly_seen {
            trace!(channel, %id, "Duplicate delivery suppressed");
            return;
        }

        let notification = Notification {
            id,
            category: NotificationCategory::from_tag(&event.category),
            title: event.title.unwrap_or_default(),
            message: event.message.clone(),
            payload: event.payload,
            created_at: event.created_at.unwrap_or_else(Utc::now),
            read_at: None,
        };

        let inserted = {
            let mut feed = self.feed.write().unwrap_or_else(|e| e.into_inner());
            feed.prepend(notification)
        };
        if inserted {
            self.publish_badge();
            self.toasts.emit(event.message);
        }
    }
}

impl NotificationAggregator {
    /// Create an aggregator for one authenticated user.
    ///
    /// When `refresh_interval_seconds` is nonzero, a background task
    /// periodically re-fetches the bulk endpoint and merges read state.
    pub fn new(
        api: Arc<dyn NotificationApi>,
        transport: Arc<dyn PushTransport>,
        user_id: UserId,
        config: InboxConfig,
    ) -> Self {
        let (badge, _) = watch::channel(0);
        let (stop, _) = watch::channel(false);
        let toast_duration_ms = config.toast_duration_ms;
        let refresh_interval = config.refresh_interval_seconds;

        let inner = Arc::new(Inner {
            api,
            transport,
            user_id,
            config,
            feed: RwLock::new(Feed::new()),
            seen: DashMap::new(),
            toasts: ToastBus::new(toast_duration_ms),
            badge,
            stop,
            closed: AtomicBool::new(false),
        });

        if refresh_interval > 0 {
            tokio::spawn(run_refresh(Arc::clone(&inner), refresh_interval));
        }

        Self { inner }
    }

    /// Load the existing notifications with one bulk fetch.
    ///
    /// On success the feed is replaced with the returned set, in server
    /// order. On failure the feed stays empty and the rest of the system
    /// carries on; the inbox is simply empty until a later refresh.
    pub async fn initialize(&self) {
        match self.inner.api.fetch_notifications().await {
            Ok(entries) => {
                if self.inner.is_closed() {
                    return;
                }
                let count = entries.len();
                {
                    let mut feed = self.inner.feed.write().unwrap_or_else(|e| e.into_inner());
                    feed.replace(entries);
                }
                self.inner.publish_badge();
                info!(count, "Notification feed initialized");
            }
            Err(e) => {
                warn!("Initial notification fetch failed, feed stays empty: {}", e);
            }
        }
    }

    /// Open a push subscription and feed its deliveries into the inbox.
    ///
    /// The returned handle tears down this channel only; the feed keeps
    /// whatever the channel already delivered.
    pub async fn subscribe(&self, spec: &ChannelSpec) -> SubscriptionHandle {
        let channel = spec.to_channel_string();
        let mut events = self.inner.transport.subscribe(&channel).await;
        let (stop_tx, mut stop_rx) = watch::channel(false);

        let inner = Arc::clone(&self.inner);
        let task_channel = channel.clone();
        let task = tokio::spawn(async move {
            let mut aggregator_stop = inner.stop.subscribe();
            loop {
                tokio::select! {
                    _ = stop_rx.changed() => return,
                    _ = aggregator_stop.changed() => return,
                    event = events.recv() => match event {
                        Ok(event) => inner.ingest(&task_channel, event),
                        Err(broadcast::error::RecvError::Lagged(missed)) => {
                            warn!(channel = %task_channel, missed, "Push delivery lagged, events dropped");
                        }
                        Err(broadcast::error::RecvError::Closed) => return,
                    },
                }
            }
        });

        info!(%channel, "Subscribed to push channel");
        SubscriptionHandle::new(channel, stop_tx, task)
    }

    /// Mark one notification as read.
    ///
    /// Idempotent: the local entry is marked first, inside the critical
    /// section, so a second call (even one racing the backend response)
    /// observes the read state and issues no further call. Durable
    /// identities get one best-effort backend call; ephemeral identities
    /// have no backend row and never touch the network. A failed call is
    /// logged and the local read state kept.
    pub async fn mark_read(&self, id: &NotificationId) {
        let outcome = {
            let mut feed = self.inner.feed.write().unwrap_or_else(|e| e.into_inner());
            feed.mark_read(id, Utc::now())
        };

        match outcome {
            ReadOutcome::Marked => {
                self.inner.publish_badge();
                if let Some(durable) = id.as_durable() {
                    if let Err(e) = self.inner.api.mark_read(durable).await {
                        warn!(%id, "Mark-read call failed, keeping local read state: {}", e);
                    }
                }
            }
            ReadOutcome::AlreadyRead => {}
            ReadOutcome::NotFound => {
                debug!(%id, "Mark-read for unknown identity ignored");
            }
        }
    }

    /// Mark every unread entry as read, in feed order.
    pub async fn mark_all_read(&self) {
        let unread = {
            let feed = self.inner.feed.read().unwrap_or_else(|e| e.into_inner());
            feed.unread_ids()
        };
        for id in unread {
            self.mark_read(&id).await;
        }
    }

    /// Current number of unread entries.
    pub fn unread_count(&self) -> usize {
        self.inner
            .feed
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .unread_count()
    }

    /// Entries created within the trailing `days`-day window (inclusive
    /// boundary), for space-constrained presentations.
    pub fn recent_window(&self, days: i64) -> Vec<Notification> {
        self.inner
            .feed
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .recent_window(days, Utc::now())
    }

    /// Read-only copy of the whole feed, newest arrival first.
    pub fn snapshot(&self) -> Vec<Notification> {
        self.inner
            .feed
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .entries()
            .to_vec()
    }

    /// Receiver for transient new-arrival alerts.
    pub fn toasts(&self) -> broadcast::Receiver<Toast> {
        self.inner.toasts.subscribe()
    }

    /// Receiver for the unread badge count.
    pub fn badge(&self) -> watch::Receiver<usize> {
        self.inner.badge.subscribe()
    }

    /// Tear down: stop all delivery and refresh tasks. Responses already in
    /// flight are discarded when they arrive.
    pub fn shutdown(&self) {
        self.inner.closed.store(true, Ordering::Release);
        self.inner.stop.send_replace(true);
    }
}

/// Periodic reconciliation: re-fetch the bulk endpoint and merge.
async fn run_refresh(inner: Arc<Inner>, interval_seconds: u64) {
    let mut stop = inner.stop.subscribe();
    let mut ticker = tokio::time::interval(std::time::Duration::from_secs(interval_seconds));
    ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
    // The first tick fires immediately; initialize() covers startup.
    ticker.tick().await;

    loop {
        tokio::select! {
            _ = stop.changed() => return,
            _ = ticker.tick() => match inner.api.fetch_notifications().await {
                Ok(entries) => {
                    if inner.is_closed() {
                        return;
                    }
                    {
                        let mut feed = inner.feed.write().unwrap_or_else(|e| e.into_inner());
                        feed.merge(entries);
                    }
                    inner.publish_badge();
                    debug!("Reconciliation refresh applied");
                }
                Err(e) => warn!("Reconciliation refresh failed: {}", e),
            },
        }
    }
}
