//! The notification bell widget instance
//!
//! A [`Widget`] owns everything one bell needs: its cached snapshot, the
//! dropdown state, the poll timer and a cancellation token. Several widgets
//! can live side by side, and [`Widget::dispose`] tears one down cleanly.
//!
//! Lifecycle:
//! 1. [`Widget::initialize`] mounts onto the host page, starts the first
//!    fetch (badge only) in the background and starts polling
//! 2. The host forwards bell activations to [`Widget::toggle`] and every
//!    document click to [`Widget::handle_document_click`]
//! 3. [`Widget::dispose`] stops the timer and fences off in-flight fetches

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use log::{debug, info, warn};
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;

use crate::config::WidgetConfig;
use crate::fetch::{FetchController, FetchOutcome};
use crate::models::NotificationSnapshot;
use crate::mount::{self, HostPage, Mount};
use crate::poll::PollScheduler;
use crate::render::WidgetView;
use crate::source::SummarySource;
use crate::state::{RenderStats, WidgetState};
use crate::ui::{ClickEvent, Transition};

static NEXT_WIDGET: AtomicUsize = AtomicUsize::new(1);

/// State shared between the widget handle and its background tasks
struct Shared {
    fetcher: FetchController,
    state: Mutex<WidgetState>,
    /// Outcome of the fetch started by `initialize`, once it is known
    first_fetch: watch::Sender<Option<FetchOutcome>>,
}

impl Shared {
    async fn refresh(&self) -> FetchOutcome {
        self.fetcher.refresh(&self.state).await
    }

    fn state(&self) -> MutexGuard<'_, WidgetState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// A mounted (or inert) notification bell
pub struct Widget {
    root_id: String,
    config: WidgetConfig,
    mount: Option<Mount>,
    shared: Arc<Shared>,
    poller: Mutex<PollScheduler>,
    cancel: CancellationToken,
}

impl Widget {
    fn new(config: WidgetConfig, source: Arc<dyn SummarySource>) -> Self {
        let cancel = CancellationToken::new();
        let state = WidgetState::new(config.messages_url.clone());
        Self {
            root_id: format!(
                "notification-wrapper-{}",
                NEXT_WIDGET.fetch_add(1, Ordering::Relaxed)
            ),
            config,
            mount: None,
            shared: Arc::new(Shared {
                fetcher: FetchController::new(source, cancel.clone()),
                state: Mutex::new(state),
                first_fetch: watch::Sender::new(None),
            }),
            poller: Mutex::new(PollScheduler::new()),
            cancel,
        }
    }

    /// Mount onto `page`, start the first fetch and start polling
    ///
    /// Returns without waiting for the backend: the first fetch runs in the
    /// background and the poll timer is armed immediately, so a slow
    /// backend neither delays the widget nor shifts later ticks. Use
    /// [`Widget::first_fetch`] to wait for it.
    ///
    /// If the page has no navbar the widget is returned inert: a warning is
    /// logged, nothing is fetched and every operation is a no-op. Mounting
    /// is not retried.
    pub async fn initialize(
        config: WidgetConfig,
        source: Arc<dyn SummarySource>,
        page: &dyn HostPage,
    ) -> Self {
        let mut widget = Self::new(config, source);

        match mount::locate(page) {
            Ok(mount) => {
                page.attach(&mount, &widget.html());
                info!(
                    "Notification bell {} mounted in {}",
                    widget.root_id, mount.container_id
                );
                widget.mount = Some(mount);
            }
            Err(e) => {
                warn!("Notification: {}", e);
                widget.shared.first_fetch.send_replace(Some(FetchOutcome::Discarded));
                return widget;
            }
        }

        let shared = Arc::clone(&widget.shared);
        tokio::spawn(async move {
            let outcome = shared.refresh().await;
            shared.first_fetch.send_replace(Some(outcome));
        });
        widget.start_polling(widget.config.poll_interval());
        widget
    }

    /// Wait for the fetch started by [`Widget::initialize`]
    ///
    /// Inert widgets report [`FetchOutcome::Discarded`] right away.
    pub async fn first_fetch(&self) -> FetchOutcome {
        let mut outcomes = self.shared.first_fetch.subscribe();
        let outcome = match outcomes.wait_for(Option::is_some).await {
            Ok(outcome) => *outcome,
            Err(_) => None,
        };
        outcome.unwrap_or(FetchOutcome::Discarded)
    }

    /// Mounted and not disposed
    pub fn is_active(&self) -> bool {
        self.mount.is_some() && !self.cancel.is_cancelled()
    }

    /// Never mounted
    pub fn is_inert(&self) -> bool {
        self.mount.is_none()
    }

    pub fn is_disposed(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// Fetch now, outside the poll schedule
    pub async fn refresh(&self) -> FetchOutcome {
        if !self.is_active() {
            return FetchOutcome::Discarded;
        }
        self.shared.refresh().await
    }

    /// Bell activated. Opening renders from the cached snapshot; it never
    /// triggers a fetch.
    pub fn toggle(&self) -> Transition {
        if !self.is_active() {
            return Transition::Unchanged;
        }
        let transition = self.shared.state().toggle();
        debug!("Dropdown toggle: {:?}", transition);
        transition
    }

    /// Document-level click. Closes the dropdown when the click landed
    /// outside the widget.
    pub fn handle_document_click(&self, event: &ClickEvent) -> Transition {
        if !self.is_active() {
            return Transition::Unchanged;
        }
        self.shared.state().dismiss(event, &self.root_id)
    }

    /// (Re)start polling every `interval`, replacing any running timer
    pub fn start_polling(&self, interval: Duration) {
        if !self.is_active() {
            debug!("Not polling: widget {} is not active", self.root_id);
            return;
        }

        let shared = Arc::clone(&self.shared);
        self.poller().start(interval, move || {
            let shared = Arc::clone(&shared);
            async move {
                shared.refresh().await;
            }
        });
        debug!("Polling every {:?}", interval);
    }

    pub fn stop_polling(&self) {
        self.poller().stop();
    }

    pub fn is_polling(&self) -> bool {
        self.poller().is_running()
    }

    /// Stop polling and cancel in-flight fetches. Idempotent.
    ///
    /// A fetch that resolves after this returns leaves the widget untouched.
    pub fn dispose(&self) {
        if self.cancel.is_cancelled() {
            return;
        }
        self.cancel.cancel();
        self.stop_polling();
        info!("Notification bell {} disposed", self.root_id);
    }

    /// Most recent successful snapshot, if the last fetch succeeded
    pub fn snapshot(&self) -> Option<Arc<NotificationSnapshot>> {
        self.shared.state().snapshot()
    }

    pub fn is_open(&self) -> bool {
        self.shared.state().is_open()
    }

    pub fn view(&self) -> WidgetView {
        self.shared.state().view().clone()
    }

    /// Current markup of the widget subtree
    pub fn html(&self) -> String {
        self.shared.state().view().to_html(&self.root_id)
    }

    pub fn render_stats(&self) -> RenderStats {
        self.shared.state().stats()
    }

    /// Subscribe to view changes
    pub fn watch(&self) -> watch::Receiver<WidgetView> {
        self.shared.state().subscribe()
    }

    /// Element id of the widget's root `<li>`
    pub fn root_id(&self) -> &str {
        &self.root_id
    }

    pub fn mount_point(&self) -> Option<&Mount> {
        self.mount.as_ref()
    }

    pub fn config(&self) -> &WidgetConfig {
        &self.config
    }

    fn poller(&self) -> MutexGuard<'_, PollScheduler> {
        self.poller.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Drop for Widget {
    fn drop(&mut self) {
        self.dispose();
    }
}
