//! Notification entity model and category enumeration.

pub mod category;
pub mod model;

pub use category::NotificationCategory;
pub use model::Notification;
