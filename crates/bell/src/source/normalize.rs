//! Summary response normalization
//!
//! Converts admin summary responses to domain models.

use chrono::{DateTime, Local, NaiveDateTime, TimeZone, Utc};
use log::debug;

use super::api::{CategoryBody, RawId, RecentMessage, SummaryBody, SummaryResponse};
use crate::error::FetchError;
use crate::models::{
    CategoryCount, Message, MessageId, MessageKind, NotificationSnapshot, Summary,
};

/// Parse a response body into a snapshot
pub fn parse_summary(body: &str) -> Result<NotificationSnapshot, FetchError> {
    let response: SummaryResponse =
        serde_json::from_str(body).map_err(|e| FetchError::Parse(e.to_string()))?;
    Ok(normalize_summary(response))
}

/// Normalize a summary response, defaulting anything missing
pub fn normalize_summary(response: SummaryResponse) -> NotificationSnapshot {
    let summary = response.summary.map(normalize_counts).unwrap_or_default();
    let recent_messages = response
        .recent_messages
        .unwrap_or_default()
        .into_iter()
        .map(normalize_message)
        .collect();

    NotificationSnapshot::new(summary, recent_messages)
}

fn normalize_counts(body: SummaryBody) -> Summary {
    let count = |c: Option<CategoryBody>| CategoryCount {
        unreplied: c.and_then(|c| c.unreplied).unwrap_or(0),
    };

    Summary {
        total_unreplied: body.total_unreplied.unwrap_or(0),
        contact_messages: count(body.contact_messages),
        general_messages: count(body.general_messages),
        user_messages: count(body.user_messages),
    }
}

fn normalize_message(raw: RecentMessage) -> Message {
    let id = match raw.id {
        Some(RawId::Number(n)) => MessageId::from(n),
        Some(RawId::Text(s)) => MessageId::from(s),
        None => MessageId::new(""),
    };
    let kind = MessageKind::parse(raw.kind.as_deref().unwrap_or_default());

    Message {
        id,
        kind,
        sender_name: non_empty(raw.sender_name).or_else(|| non_empty(raw.name)),
        subject: non_empty(raw.subject),
        created_at: raw.created_at.as_deref().and_then(parse_timestamp),
        body: non_empty(raw.message),
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.is_empty())
}

/// ISO 8601 without an offset, as produced for naive server timestamps
const NAIVE_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S"];

/// Parse an RFC 3339 timestamp, or a naive one read as local time.
/// Unparseable values count as absent.
fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(at) = DateTime::parse_from_rfc3339(raw) {
        return Some(at.with_timezone(&Utc));
    }

    let naive = NAIVE_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok());
    match naive.and_then(|naive| Local.from_local_datetime(&naive).earliest()) {
        Some(at) => Some(at.with_timezone(&Utc)),
        None => {
            debug!("Ignoring unparseable created_at {:?}", raw);
            None
        }
    }
}
