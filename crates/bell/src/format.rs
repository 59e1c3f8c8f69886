//! Display formatting for notification previews
//!
//! Pure helpers: nothing here touches widget state.

use chrono::{DateTime, Local, Utc};

use crate::models::{Message, MessageKind};

/// Shown when a message has no sender name
pub const UNKNOWN_SENDER: &str = "Unknown";

/// Shown when a message has neither subject nor body
pub const NO_SUBJECT: &str = "No subject";

/// Number of body characters used when a message has no subject
pub const EXCERPT_CHARS: usize = 50;

const MS_PER_MINUTE: i64 = 60_000;
const MS_PER_HOUR: i64 = 3_600_000;
const MS_PER_DAY: i64 = 86_400_000;

/// Simple HTML escape for untrusted text
///
/// Absent text becomes an empty string.
pub fn escape_html(text: Option<&str>) -> String {
    let Some(s) = text else {
        return String::new();
    };
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Relative time of `at` as seen from `now`
///
/// Buckets use floor division of the elapsed milliseconds, first match wins.
/// Anything a week or older is shown as a local calendar date.
pub fn relative_time(at: Option<DateTime<Utc>>, now: DateTime<Utc>) -> String {
    let Some(at) = at else {
        return String::new();
    };

    let elapsed_ms = (now - at).num_milliseconds();
    let minutes = elapsed_ms.div_euclid(MS_PER_MINUTE);
    let hours = elapsed_ms.div_euclid(MS_PER_HOUR);
    let days = elapsed_ms.div_euclid(MS_PER_DAY);

    if minutes < 1 {
        "Just now".to_string()
    } else if minutes < 60 {
        format!("{}m ago", minutes)
    } else if hours < 24 {
        format!("{}h ago", hours)
    } else if days < 7 {
        format!("{}d ago", days)
    } else {
        at.with_timezone(&Local).format("%-m/%-d/%Y").to_string()
    }
}

/// Relative time of `at` against the current wall clock
pub fn format_relative_time(at: Option<DateTime<Utc>>) -> String {
    relative_time(at, Utc::now())
}

/// Admin change-view URL for a message
///
/// Unknown kinds use the user message template.
pub fn message_url(message: &Message) -> String {
    let model = match message.kind {
        MessageKind::Contact => "contactmessage",
        MessageKind::General => "generalmessage",
        MessageKind::User | MessageKind::Other(_) => "message",
    };
    format!("/admin/notifications/{}/{}/change/", model, message.id.as_str())
}

/// Capitalized label for a message kind; unknown kinds pass through
pub fn type_label(kind: &MessageKind) -> &str {
    match kind {
        MessageKind::Contact => "Contact",
        MessageKind::General => "General",
        MessageKind::User => "User",
        MessageKind::Other(raw) => raw,
    }
}

/// Sender name, or [`UNKNOWN_SENDER`]
pub fn sender_display(message: &Message) -> &str {
    message
        .sender_name
        .as_deref()
        .filter(|name| !name.is_empty())
        .unwrap_or(UNKNOWN_SENDER)
}

/// Subject line, falling back to a body excerpt and then [`NO_SUBJECT`]
pub fn subject_display(message: &Message) -> String {
    if let Some(subject) = message.subject.as_deref().filter(|s| !s.is_empty()) {
        return subject.to_string();
    }
    message
        .body
        .as_deref()
        .map(|body| body.chars().take(EXCERPT_CHARS).collect::<String>())
        .filter(|excerpt| !excerpt.is_empty())
        .unwrap_or_else(|| NO_SUBJECT.to_string())
}
