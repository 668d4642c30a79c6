//! Integration tests for the notification inbox end to end: bulk fetch,
//! push delivery, duplicate suppression, addressing, and read state.

mod helpers;

use std::time::Duration;

use chrono::{Duration as ChronoDuration, Utc};

use notify_core::types::NotificationId;
use notify_entity::NotificationCategory;
use notify_realtime::ChannelSpec;

use helpers::{TestInbox, event, eventually, notification};

#[tokio::test]
async fn test_bulk_fetch_sets_unread_count() {
    let now = Utc::now();
    let inbox = TestInbox::new(vec![
        notification("a-1", now - ChronoDuration::days(2), None),
        notification(
            "a-2",
            now - ChronoDuration::days(3),
            Some(now - ChronoDuration::days(1)),
        ),
    ]);

    inbox.aggregator.initialize().await;
    assert_eq!(inbox.aggregator.unread_count(), 1);
}

#[tokio::test]
async fn test_redelivered_event_lands_once() {
    let inbox = TestInbox::new(Vec::new());
    inbox.aggregator.initialize().await;
    let _handle = inbox
        .aggregator
        .subscribe(&ChannelSpec::Category(
            NotificationCategory::HandoverChecklist,
        ))
        .await;

    for _ in 0..2 {
        inbox
            .deliver(
                "category:phc",
                event(Some("p-5"), "phc", "Checklist submitted", Some(vec![42])),
            )
            .await;
    }

    eventually(|| !inbox.aggregator.snapshot().is_empty()).await;
    tokio::time::sleep(Duration::from_millis(50)).await;
    assert_eq!(inbox.aggregator.snapshot().len(), 1);
    assert_eq!(inbox.aggregator.snapshot()[0].id.to_string(), "p-5");
}

#[tokio::test]
async fn test_mark_read_is_optimistic_and_issues_one_call() {
    let now = Utc::now();
    let inbox = TestInbox::new(vec![notification("a-1", now, None)]);
    inbox.aggregator.initialize().await;

    let id = NotificationId::parse("a-1");
    inbox.aggregator.mark_read(&id).await;
    assert_eq!(inbox.aggregator.unread_count(), 0);

    inbox.aggregator.mark_read(&id).await;
    assert_eq!(inbox.backend.calls(), vec!["a-1".to_string()]);
}

#[tokio::test]
async fn test_ephemeral_identity_skips_backend() {
    let inbox = TestInbox::new(Vec::new());
    inbox.aggregator.initialize().await;
    let _handle = inbox
        .aggregator
        .subscribe(&ChannelSpec::Category(NotificationCategory::Log))
        .await;

    inbox
        .deliver("category:log", event(None, "log", "Site log updated", None))
        .await;
    eventually(|| inbox.aggregator.unread_count() == 1).await;

    let id = inbox.aggregator.snapshot()[0].id.clone();
    assert!(!id.is_durable());
    inbox.aggregator.mark_read(&id).await;

    assert_eq!(inbox.aggregator.unread_count(), 0);
    assert!(inbox.backend.calls().is_empty());
}

#[tokio::test]
async fn test_event_for_other_user_is_discarded() {
    let inbox = TestInbox::new(Vec::new());
    inbox.aggregator.initialize().await;
    let _handle = inbox
        .aggregator
        .subscribe(&ChannelSpec::Category(
            NotificationCategory::HandoverChecklist,
        ))
        .await;

    inbox
        .deliver(
            "category:phc",
            event(Some("p-1"), "phc", "not addressed here", Some(vec![999])),
        )
        .await;
    inbox
        .deliver(
            "category:phc",
            event(Some("p-2"), "phc", "addressed here", Some(vec![42])),
        )
        .await;

    eventually(|| inbox.aggregator.snapshot().len() == 1).await;
    assert_eq!(inbox.aggregator.snapshot()[0].id.to_string(), "p-2");
}

#[tokio::test]
async fn test_recent_window_includes_exact_boundary() {
    let now = Utc::now();
    let inbox = TestInbox::new(vec![
        notification("a-1", now - ChronoDuration::days(7), None),
        notification("a-2", now - ChronoDuration::days(30), None),
    ]);
    inbox.aggregator.initialize().await;

    let recent = inbox.aggregator.recent_window(7);
    assert_eq!(recent.len(), 1);
    assert_eq!(recent[0].id.to_string(), "a-1");
    // The full feed keeps all history for unbounded presentations.
    assert_eq!(inbox.aggregator.snapshot().len(), 2);
}

#[tokio::test]
async fn test_failed_fetch_degrades_to_empty_inbox() {
    let inbox = TestInbox::new(vec![notification("a-1", Utc::now(), None)]);
    *inbox.backend.fail_fetch.lock().unwrap() = true;

    inbox.aggregator.initialize().await;
    assert!(inbox.aggregator.snapshot().is_empty());
    assert_eq!(inbox.aggregator.unread_count(), 0);
}

#[tokio::test]
async fn test_user_channel_delivery_and_toast() {
    let inbox = TestInbox::new(Vec::new());
    inbox.aggregator.initialize().await;
    let mut toasts = inbox.aggregator.toasts();
    let _handle = inbox
        .aggregator
        .subscribe(&ChannelSpec::User(notify_core::types::UserId::new(42)))
        .await;

    inbox
        .deliver(
            "user:42",
            event(Some("wo-7"), "work order", "WO-0007 assigned to you", None),
        )
        .await;

    let toast = tokio::time::timeout(Duration::from_secs(1), toasts.recv())
        .await
        .expect("toast within deadline")
        .expect("toast delivered");
    assert_eq!(toast.message, "WO-0007 assigned to you");
    eventually(|| inbox.aggregator.unread_count() == 1).await;
}
