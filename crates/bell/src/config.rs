//! Widget configuration
//!
//! Settings are loaded from (in order of priority):
//! 1. Environment variables (`BEACON_*`)
//! 2. An explicit JSON file, or `widget.json` in the Beacon config directory
//! 3. Built-in defaults

use anyhow::{Context, Result};
use log::warn;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;
use url::Url;

/// Config filename in the Beacon config directory
pub const CONFIG_FILE: &str = "widget.json";

pub const DEFAULT_API_URL: &str = "/api/v1/notifications/admin-summary/";
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 60_000;
pub const DEFAULT_MAX_MESSAGES: usize = 10;
pub const DEFAULT_MESSAGES_URL: &str = "/admin/notifications/message/";

pub const ENV_API_URL: &str = "BEACON_API_URL";
pub const ENV_BASE_URL: &str = "BEACON_BASE_URL";
pub const ENV_POLL_INTERVAL_MS: &str = "BEACON_POLL_INTERVAL_MS";
pub const ENV_SESSION_COOKIE: &str = "BEACON_SESSION_COOKIE";
/// Path of an explicit config file, used when none is passed on the command line
pub const ENV_CONFIG_FILE: &str = "BEACON_CONFIG";

/// Options recognized by the notification widget
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WidgetConfig {
    /// Summary endpoint path, resolved against `base_url`
    pub api_url: String,
    /// Origin of the admin site
    pub base_url: String,
    /// Milliseconds between polls
    pub poll_interval_ms: u64,
    /// Informational: the backend decides how many recent messages to
    /// send. Nothing reads this, and the list is never truncated here.
    pub max_messages: usize,
    /// Cookie header sent with each request
    pub session_cookie: Option<String>,
    /// Target of the "View All Messages" footer link
    pub messages_url: String,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
            max_messages: DEFAULT_MAX_MESSAGES,
            session_cookie: None,
            messages_url: DEFAULT_MESSAGES_URL.to_string(),
        }
    }
}

impl WidgetConfig {
    /// Load the config file from the Beacon config directory (if present)
    /// and apply environment overrides
    pub fn load() -> Result<Self> {
        let from_file = match config::ConfigDir::discover() {
            Some(dir) => dir.load_json_optional::<Self>(CONFIG_FILE)?,
            None => None,
        };
        Ok(from_file.unwrap_or_default().with_env())
    }

    /// Load `explicit` if given, otherwise the config directory's file
    pub fn resolve(explicit: Option<&Path>) -> Result<Self> {
        match explicit {
            Some(path) => Self::from_file(path),
            None => Self::load(),
        }
    }

    /// Load from a specific JSON file and apply environment overrides
    pub fn from_file(path: &Path) -> Result<Self> {
        let config: Self = config::load_json_file(path)?;
        Ok(config.with_env())
    }

    /// Parse from a JSON string; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("Failed to parse widget config JSON")
    }

    /// Apply `BEACON_*` environment overrides
    pub fn with_env(self) -> Self {
        self.with_overrides(|name| std::env::var(name).ok())
    }

    /// Apply overrides from `lookup`. Values that don't parse are ignored.
    pub fn with_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| {
            lookup(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        if let Some(api_url) = get(ENV_API_URL) {
            self.api_url = api_url;
        }
        if let Some(base_url) = get(ENV_BASE_URL) {
            self.base_url = base_url;
        }
        if let Some(ms) = get(ENV_POLL_INTERVAL_MS)
            .and_then(|v| parse_or_warn(ENV_POLL_INTERVAL_MS, &v))
        {
            self.poll_interval_ms = ms;
        }
        if let Some(cookie) = get(ENV_SESSION_COOKIE) {
            self.session_cookie = Some(cookie);
        }
        self
    }

    /// Poll period. Zero is not a usable period and falls back to the default.
    pub fn poll_interval(&self) -> Duration {
        if self.poll_interval_ms == 0 {
            warn!(
                "poll_interval_ms must be positive, using {}ms",
                DEFAULT_POLL_INTERVAL_MS
            );
            return Duration::from_millis(DEFAULT_POLL_INTERVAL_MS);
        }
        Duration::from_millis(self.poll_interval_ms)
    }

    /// Absolute URL of the summary endpoint
    pub fn endpoint(&self) -> Result<Url> {
        let base = Url::parse(&self.base_url)
            .with_context(|| format!("Invalid base_url: {}", self.base_url))?;
        base.join(&self.api_url)
            .with_context(|| format!("Invalid api_url: {}", self.api_url))
    }
}

fn parse_or_warn<T: FromStr>(name: &str, raw: &str) -> Option<T> {
    match raw.parse() {
        Ok(value) => Some(value),
        Err(_) => {
            warn!("Ignoring {}={:?}: not a valid value", name, raw);
            None
        }
    }
}
