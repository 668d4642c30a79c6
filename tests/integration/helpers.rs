//! Shared test helpers for integration tests.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use notify_client::NotificationApi;
use notify_core::config::inbox::InboxConfig;
use notify_core::error::AppError;
use notify_core::result::AppResult;
use notify_core::types::{NotificationId, UserId};
use notify_entity::{Notification, NotificationCategory};
use notify_feed::NotificationAggregator;
use notify_realtime::{MemoryTransport, PushEvent, PushTransport};

/// The user the test inbox acts for.
pub const TEST_USER: i64 = 42;

/// Scriptable backend double recording mark-read calls.
pub struct FakeBackend {
    /// Rows returned by the bulk fetch.
    pub entries: Mutex<Vec<Notification>>,
    /// When set, the bulk fetch fails with a transport error.
    pub fail_fetch: Mutex<bool>,
    /// Durable identifiers the aggregator asked to mark read.
    pub mark_read_calls: Mutex<Vec<String>>,
}

impl FakeBackend {
    pub fn new(entries: Vec<Notification>) -> Arc<Self> {
        Arc::new(Self {
            entries: Mutex::new(entries),
            fail_fetch: Mutex::new(false),
            mark_read_calls: Mutex::new(Vec::new()),
        })
    }

    pub fn calls(&self) -> Vec<String> {
        self.mark_read_calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl NotificationApi for FakeBackend {
    async fn fetch_notifications(&self) -> AppResult<Vec<Notification>> {
        if *self.fail_fetch.lock().unwrap() {
            return Err(AppError::transport("backend down"));
        }
        Ok(self.entries.lock().unwrap().clone())
    }

    async fn mark_read(&self, id: &str) -> AppResult<()> {
        self.mark_read_calls.lock().unwrap().push(id.to_string());
        Ok(())
    }
}

/// Test inbox context: fake backend + in-memory transport + aggregator.
pub struct TestInbox {
    pub backend: Arc<FakeBackend>,
    pub transport: Arc<MemoryTransport>,
    pub aggregator: NotificationAggregator,
}

impl TestInbox {
    /// Create a new test inbox for user 42.
    pub fn new(entries: Vec<Notification>) -> Self {
        let backend = FakeBackend::new(entries);
        let transport = Arc::new(MemoryTransport::new(32));
        let aggregator = NotificationAggregator::new(
            Arc::clone(&backend) as Arc<dyn NotificationApi>,
            Arc::clone(&transport) as Arc<dyn PushTransport>,
            UserId::new(TEST_USER),
            InboxConfig::default(),
        );
        Self {
            backend,
            transport,
            aggregator,
        }
    }

    /// Publish a push event on a channel.
    pub async fn deliver(&self, channel: &str, event: PushEvent) {
        self.transport.publish(channel, event).await;
    }
}

/// Build a bulk-fetch row.
pub fn notification(
    id: &str,
    created_at: DateTime<Utc>,
    read_at: Option<DateTime<Utc>>,
) -> Notification {
    Notification {
        id: NotificationId::parse(id),
        category: NotificationCategory::HandoverChecklist,
        title: String::new(),
        message: format!("entry {id}"),
        payload: None,
        created_at,
        read_at,
    }
}

/// Build a push event.
pub fn event(id: Option<&str>, category: &str, message: &str, user_ids: Option<Vec<i64>>) -> PushEvent {
    PushEvent {
        id: id.map(str::to_string),
        category: category.to_string(),
        title: None,
        message: message.to_string(),
        payload: None,
        user_ids: user_ids.map(|ids| ids.into_iter().map(UserId::new).collect()),
        created_at: None,
    }
}

/// Poll until a condition holds or the deadline passes.
pub async fn eventually(cond: impl Fn() -> bool) {
    for _ in 0..200 {
        if cond() {
            return;
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    panic!("condition not reached in time");
}
