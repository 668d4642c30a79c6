//! # notify-realtime
//!
//! Push delivery transport for SiteDesk Notify. Provides:
//!
//! - The [`PushEvent`] delivery envelope with recipient addressing
//! - Typed channel naming for category broadcasts and direct user delivery
//! - The [`PushTransport`] seam with in-memory and WebSocket implementations
//! - Subscription handles with independent teardown

pub mod channel;
pub mod event;
pub mod memory;
pub mod subscription;
pub mod transport;
pub mod ws;

pub use channel::ChannelSpec;
pub use event::PushEvent;
pub use memory::MemoryTransport;
pub use subscription::SubscriptionHandle;
pub use transport::PushTransport;
pub use ws::WsTransport;
