//! Data sources for the admin notification summary
//!
//! This module provides:
//! - The [`SummarySource`] trait the fetch controller reads through
//! - An HTTP implementation backed by ureq
//! - An in-memory implementation with scripted responses
//! - Wire types and their normalization to domain models

mod http;
mod memory;
mod normalize;

pub use http::HttpSummarySource;
pub use memory::InMemorySource;
pub use normalize::{normalize_summary, parse_summary};

use async_trait::async_trait;

use crate::error::FetchError;
use crate::models::NotificationSnapshot;

/// Something that can produce the current notification snapshot
#[async_trait]
pub trait SummarySource: Send + Sync {
    /// One read-only round trip to the backend
    async fn fetch_summary(&self) -> Result<NotificationSnapshot, FetchError>;
}

/// Admin summary endpoint response types
///
/// Every field is optional; missing values are defaulted during
/// normalization rather than rejected.
pub mod api {
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    /// Body of the admin summary endpoint
    #[derive(Debug, Default, Deserialize)]
    pub struct SummaryResponse {
        pub summary: Option<SummaryBody>,
        pub recent_messages: Option<Vec<RecentMessage>>,
    }

    /// Unreplied counts
    #[derive(Debug, Default, Deserialize)]
    pub struct SummaryBody {
        #[serde(default, deserialize_with = "lenient_count")]
        pub total_unreplied: Option<u64>,
        pub contact_messages: Option<CategoryBody>,
        pub general_messages: Option<CategoryBody>,
        pub user_messages: Option<CategoryBody>,
    }

    #[derive(Debug, Default, Deserialize)]
    pub struct CategoryBody {
        #[serde(default, deserialize_with = "lenient_count")]
        pub unreplied: Option<u64>,
    }

    /// Read a count without rejecting the payload: fractions are truncated,
    /// negatives clamp to zero, numeric strings are parsed, and anything
    /// else counts as missing.
    fn lenient_count<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Option::<Value>::deserialize(deserializer)?;
        Ok(value.as_ref().and_then(count_from_value))
    }

    fn count_from_value(value: &Value) -> Option<u64> {
        let n = match value {
            Value::Number(n) => {
                if let Some(n) = n.as_u64() {
                    return Some(n);
                }
                n.as_f64()?
            }
            Value::String(s) => s.trim().parse::<f64>().ok()?,
            _ => return None,
        };
        if !n.is_finite() {
            return None;
        }
        Some(n.max(0.0) as u64)
    }

    /// A message preview. Different message models name their fields
    /// differently, hence `sender_name`/`name` and `subject`/`message`.
    #[derive(Debug, Default, Deserialize)]
    pub struct RecentMessage {
        pub id: Option<RawId>,
        #[serde(rename = "type")]
        pub kind: Option<String>,
        pub sender_name: Option<String>,
        pub name: Option<String>,
        pub subject: Option<String>,
        pub message: Option<String>,
        pub created_at: Option<String>,
    }

    /// Primary keys arrive as numbers or strings depending on the model
    #[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
    #[serde(untagged)]
    pub enum RawId {
        Number(i64),
        Text(String),
    }
}
