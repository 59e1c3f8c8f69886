//! Error types for the notification widget

/// Why a refresh could not produce a snapshot
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FetchError {
    #[error("Network error: {0}")]
    Transport(String),

    #[error("HTTP {0}")]
    Status(u16),

    #[error("Invalid summary payload: {0}")]
    Parse(String),
}

/// The widget could not find anywhere to attach itself
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MountError {
    #[error("Could not find navbar (tried {})", tried.join(", "))]
    NoInsertionPoint { tried: Vec<String> },
}
