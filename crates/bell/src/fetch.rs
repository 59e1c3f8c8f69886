//! Fetch controller
//!
//! Owns the round trip to the summary source and hands the result to the
//! widget state. Failures never propagate: they are logged and the cached
//! snapshot is dropped.

use std::sync::{Arc, Mutex, PoisonError};

use log::{debug, error};
use tokio_util::sync::CancellationToken;

use crate::source::SummarySource;
use crate::state::WidgetState;

/// What a refresh did to the widget
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    /// A new snapshot was cached and rendered
    Applied,
    /// The fetch failed and the cached snapshot was cleared
    Failed,
    /// The widget was disposed (or is inert), state left untouched
    Discarded,
}

pub(crate) struct FetchController {
    source: Arc<dyn SummarySource>,
    cancel: CancellationToken,
}

impl FetchController {
    pub(crate) fn new(source: Arc<dyn SummarySource>, cancel: CancellationToken) -> Self {
        Self { source, cancel }
    }

    /// Fetch once and apply the result
    ///
    /// Overlapping refreshes are allowed. Each one applies its own result
    /// under the state lock, so whichever completes last wins.
    pub(crate) async fn refresh(&self, state: &Mutex<WidgetState>) -> FetchOutcome {
        if self.cancel.is_cancelled() {
            return FetchOutcome::Discarded;
        }

        let result = tokio::select! {
            biased;
            _ = self.cancel.cancelled() => {
                debug!("Refresh cancelled mid-flight");
                return FetchOutcome::Discarded;
            }
            result = self.source.fetch_summary() => result,
        };

        let mut state = state.lock().unwrap_or_else(PoisonError::into_inner);
        if self.cancel.is_cancelled() {
            return FetchOutcome::Discarded;
        }

        match result {
            Ok(snapshot) => {
                debug!(
                    "Fetched {} unreplied, {} recent",
                    snapshot.total_unreplied(),
                    snapshot.recent_messages.len()
                );
                state.apply_snapshot(snapshot);
                FetchOutcome::Applied
            }
            Err(e) => {
                error!(target: "bell::fetch", "Notification fetch error: {}", e);
                state.invalidate();
                FetchOutcome::Failed
            }
        }
    }
}
