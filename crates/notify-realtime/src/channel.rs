//! Channel naming and parsing.

use notify_core::types::UserId;
use notify_entity::NotificationCategory;

/// Typed channel identifiers.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ChannelSpec {
    /// Public category broadcast channel.
    Category(NotificationCategory),
    /// Private direct-delivery channel for one user.
    User(UserId),
}

impl ChannelSpec {
    /// Parses a channel string into a typed channel.
    pub fn parse(channel: &str) -> Option<Self> {
        let parts: Vec<&str> = channel.splitn(2, ':').collect();
        match parts.as_slice() {
            ["category", tag] => Some(ChannelSpec::Category(NotificationCategory::from_tag(tag))),
            ["user", id] => id.parse().ok().map(ChannelSpec::User),
            _ => None,
        }
    }

    /// Converts back to a channel string.
    pub fn to_channel_string(&self) -> String {
        match self {
            ChannelSpec::Category(category) => format!("category:{category}"),
            ChannelSpec::User(user_id) => format!("user:{user_id}"),
        }
    }
}
