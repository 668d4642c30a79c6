//! SiteDesk Notify Agent
//!
//! Headless notification inbox for one authenticated SiteDesk user. Wires
//! the backend client, push transport, and aggregator together and runs
//! until shutdown, surfacing toasts and badge changes in the log.

use std::sync::Arc;

use tracing_subscriber::{EnvFilter, fmt};

use notify_client::BackendClient;
use notify_core::config::AppConfig;
use notify_core::error::AppError;
use notify_core::types::UserId;
use notify_entity::NotificationCategory;
use notify_feed::NotificationAggregator;
use notify_realtime::{ChannelSpec, PushTransport, WsTransport};

#[tokio::main]
async fn main() {
    let env = std::env::var("SITEDESK_ENV").unwrap_or_else(|_| "development".to_string());

    let config = match AppConfig::load(&env) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!("Agent error: {}", e);
        std::process::exit(1);
    }
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}

/// Main agent run function
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting SiteDesk Notify v{}", env!("CARGO_PKG_VERSION"));

    let user_id = UserId::new(config.session.user_id);

    // ── Step 1: Backend client ───────────────────────────────────
    let client = Arc::new(BackendClient::new(&config.backend, &config.session)?);

    // ── Step 2: Push transport ───────────────────────────────────
    tracing::info!("Connecting to push gateway at {}...", config.realtime.url);
    let transport = Arc::new(WsTransport::connect(&config.realtime));

    // ── Step 3: Aggregator ───────────────────────────────────────
    let aggregator = NotificationAggregator::new(
        client,
        Arc::clone(&transport) as Arc<dyn PushTransport>,
        user_id,
        config.inbox.clone(),
    );
    aggregator.initialize().await;

    // ── Step 4: Channel subscriptions ────────────────────────────
    let mut subscriptions = Vec::new();
    for spec in [
        ChannelSpec::Category(NotificationCategory::HandoverChecklist),
        ChannelSpec::Category(NotificationCategory::WorkOrder),
        ChannelSpec::Category(NotificationCategory::DeliveryOrder),
        ChannelSpec::Category(NotificationCategory::Invoice),
        ChannelSpec::User(user_id),
    ] {
        subscriptions.push(aggregator.subscribe(&spec).await);
    }

    // ── Step 5: Surface toasts and badge updates ─────────────────
    let mut toasts = aggregator.toasts();
    tokio::spawn(async move {
        while let Ok(toast) = toasts.recv().await {
            tracing::info!("{}", toast.message);
        }
    });

    let mut badge = aggregator.badge();
    tokio::spawn(async move {
        while badge.changed().await.is_ok() {
            let unread = *badge.borrow();
            tracing::info!(unread, "Unread count changed");
        }
    });

    tracing::info!(
        unread = aggregator.unread_count(),
        "SiteDesk Notify agent running"
    );

    // ── Step 6: Graceful shutdown ────────────────────────────────
    shutdown_signal().await;
    tracing::info!("Shutdown signal received, stopping...");

    for handle in subscriptions {
        handle.unsubscribe();
    }
    aggregator.shutdown();
    transport.shutdown();

    tracing::info!("SiteDesk Notify agent shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
