//! Domain models for admin notifications

mod message;
mod snapshot;

pub use message::{Message, MessageId, MessageKind};
pub use snapshot::{CategoryCount, NotificationSnapshot, Summary};
