//! Bearer-token-authenticated REST client for the notification endpoints.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use notify_core::config::backend::BackendConfig;
use notify_core::config::session::SessionConfig;
use notify_core::error::AppError;
use notify_core::result::AppResult;
use notify_entity::Notification;

use crate::api::NotificationApi;
use crate::record::NotificationRecord;

/// REST client for the SiteDesk backend notification endpoints.
#[derive(Debug, Clone)]
pub struct BackendClient {
    /// Shared HTTP client.
    http: reqwest::Client,
    /// Backend base URL, without a trailing slash.
    base_url: String,
    /// Opaque bearer credential attached to every request.
    token: String,
}

/// The bulk-fetch endpoint either wraps the rows in a `data` envelope or
/// returns a bare array, depending on backend version.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum FetchBody {
    Wrapped { data: Vec<NotificationRecord> },
    Bare(Vec<NotificationRecord>),
}

impl FetchBody {
    fn into_records(self) -> Vec<NotificationRecord> {
        match self {
            Self::Wrapped { data } => data,
            Self::Bare(records) => records,
        }
    }
}

impl BackendClient {
    /// Create a new backend client from configuration.
    pub fn new(backend: &BackendConfig, session: &SessionConfig) -> AppResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(backend.request_timeout_seconds))
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            http,
            base_url: backend.base_url.trim_end_matches('/').to_string(),
            token: session.token.clone(),
        })
    }
}

#[async_trait]
impl NotificationApi for BackendClient {
    async fn fetch_notifications(&self) -> AppResult<Vec<Notification>> {
        let url = format!("{}/api/notifications", self.base_url);

        let body: FetchBody = self
            .http
            .get(&url)
            .bearer_auth(&self.token)
            .send()
            .await
            .map_err(|e| AppError::transport(format!("Bulk fetch request failed: {e}")))?
            .error_for_status()
            .map_err(|e| AppError::transport(format!("Bulk fetch rejected: {e}")))?
            .json()
            .await
            .map_err(|e| AppError::transport(format!("Bulk fetch body unreadable: {e}")))?;

        let records = body.into_records();
        let total = records.len();
        let notifications: Vec<Notification> = records
            .into_iter()
            .filter_map(NotificationRecord::normalize)
            .collect();

        if notifications.len() < total {
            debug!(
                dropped = total - notifications.len(),
                "Dropped malformed notification rows from bulk fetch"
            );
        }

        Ok(notifications)
    }

    async fn mark_read(&self, id: &str) -> AppResult<()> {
        let url = format!("{}/api/notifications/{id}/read", self.base_url);

        self.http
            .post(&url)
            .bearer_auth(&self.token)
            .send()
            .await
            .map_err(|e| AppError::transport(format!("Mark-read request failed: {e}")))?
            .error_for_status()
            .map_err(|e| AppError::transport(format!("Mark-read rejected: {e}")))?;

        Ok(())
    }
}
