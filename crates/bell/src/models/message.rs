//! Message model for an unreplied admin message

use chrono::{DateTime, Utc};

/// Identifier of a message, unique within its [`MessageKind`]
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MessageId(pub String);

impl MessageId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for MessageId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for MessageId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<i64> for MessageId {
    fn from(n: i64) -> Self {
        Self(n.to_string())
    }
}

/// Category a message belongs to
///
/// The backend only ever sends `contact`, `general` and `user`. Anything else
/// is kept verbatim in [`MessageKind::Other`] so it can still be displayed.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum MessageKind {
    Contact,
    General,
    User,
    Other(String),
}

impl MessageKind {
    pub fn parse(raw: &str) -> Self {
        match raw {
            "contact" => Self::Contact,
            "general" => Self::General,
            "user" => Self::User,
            other => Self::Other(other.to_string()),
        }
    }

    /// Wire name of the kind
    pub fn as_str(&self) -> &str {
        match self {
            Self::Contact => "contact",
            Self::General => "general",
            Self::User => "user",
            Self::Other(raw) => raw,
        }
    }
}

/// A recent unreplied message as shown in the dropdown preview
#[derive(Debug, Clone, PartialEq)]
pub struct Message {
    pub id: MessageId,
    pub kind: MessageKind,
    /// Display name of whoever sent the message
    pub sender_name: Option<String>,
    pub subject: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    /// Raw message text, only used when there is no subject
    pub body: Option<String>,
}

impl Message {
    pub fn new(id: impl Into<MessageId>, kind: MessageKind) -> Self {
        Self {
            id: id.into(),
            kind,
            sender_name: None,
            subject: None,
            created_at: None,
            body: None,
        }
    }

    pub fn sender_name(mut self, name: impl Into<String>) -> Self {
        self.sender_name = Some(name.into());
        self
    }

    pub fn subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = Some(subject.into());
        self
    }

    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    pub fn created_at(mut self, at: DateTime<Utc>) -> Self {
        self.created_at = Some(at);
        self
    }
}
