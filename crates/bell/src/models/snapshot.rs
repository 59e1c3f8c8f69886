//! Notification snapshot returned by the admin summary endpoint

use super::{Message, MessageKind};

/// Unreplied count for one message category
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CategoryCount {
    pub unreplied: u64,
}

/// Per-category unreplied counts plus the overall total
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Summary {
    pub total_unreplied: u64,
    pub contact_messages: CategoryCount,
    pub general_messages: CategoryCount,
    pub user_messages: CategoryCount,
}

impl Summary {
    /// Unreplied count for a category; unknown categories have none
    pub fn unreplied(&self, kind: &MessageKind) -> u64 {
        match kind {
            MessageKind::Contact => self.contact_messages.unreplied,
            MessageKind::General => self.general_messages.unreplied,
            MessageKind::User => self.user_messages.unreplied,
            MessageKind::Other(_) => 0,
        }
    }
}

/// The most recently fetched notification state
///
/// Replaced wholesale on every successful fetch, never patched in place.
/// `recent_messages` keeps the order the server sent (newest first).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NotificationSnapshot {
    pub summary: Summary,
    pub recent_messages: Vec<Message>,
}

impl NotificationSnapshot {
    pub fn new(summary: Summary, recent_messages: Vec<Message>) -> Self {
        Self {
            summary,
            recent_messages,
        }
    }

    pub fn total_unreplied(&self) -> u64 {
        self.summary.total_unreplied
    }
}
