//! Authenticated session configuration.

use serde::{Deserialize, Serialize};

/// The authenticated session this agent acts for.
///
/// The token is an opaque bearer credential attached to every backend
/// request; the user id is used for push-event addressing checks.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Opaque bearer token for the backend API.
    pub token: String,
    /// Numeric id of the authenticated user.
    pub user_id: i64,
}
