//! Mutable per-widget state
//!
//! Everything a widget instance caches lives here, behind one lock, so a
//! completed fetch replaces the snapshot and re-renders in a single step.

use std::sync::Arc;

use chrono::Utc;
use log::debug;
use tokio::sync::watch;

use crate::models::NotificationSnapshot;
use crate::render::{self, WidgetView};
use crate::ui::{ClickEvent, DropdownState, Transition};

/// Number of render passes performed, by kind
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderStats {
    pub badge_renders: usize,
    pub dropdown_renders: usize,
}

pub(crate) struct WidgetState {
    snapshot: Option<Arc<NotificationSnapshot>>,
    dropdown: DropdownState,
    view: WidgetView,
    stats: RenderStats,
    messages_url: String,
    views: watch::Sender<WidgetView>,
}

impl WidgetState {
    pub(crate) fn new(messages_url: impl Into<String>) -> Self {
        Self {
            snapshot: None,
            dropdown: DropdownState::default(),
            view: WidgetView::default(),
            stats: RenderStats::default(),
            messages_url: messages_url.into(),
            views: watch::Sender::new(WidgetView::default()),
        }
    }

    /// Receiver that sees the view after every change
    pub(crate) fn subscribe(&self) -> watch::Receiver<WidgetView> {
        self.views.subscribe()
    }

    pub(crate) fn snapshot(&self) -> Option<Arc<NotificationSnapshot>> {
        self.snapshot.clone()
    }

    pub(crate) fn view(&self) -> &WidgetView {
        &self.view
    }

    pub(crate) fn stats(&self) -> RenderStats {
        self.stats
    }

    pub(crate) fn is_open(&self) -> bool {
        self.dropdown.is_open()
    }

    /// Successful fetch: replace the snapshot, re-render the badge, and
    /// re-render the dropdown if it is open
    pub(crate) fn apply_snapshot(&mut self, snapshot: NotificationSnapshot) {
        self.snapshot = Some(Arc::new(snapshot));
        self.render_badge();
        if self.dropdown.is_open() {
            self.render_dropdown();
        }
        self.publish();
    }

    /// Failed fetch: forget the snapshot, leave everything rendered as is
    pub(crate) fn invalidate(&mut self) {
        self.snapshot = None;
    }

    pub(crate) fn toggle(&mut self) -> Transition {
        let transition = self.dropdown.toggle();
        self.view.open = self.dropdown.is_open();
        if transition == Transition::Opened {
            self.render_dropdown();
        }
        self.publish();
        transition
    }

    pub(crate) fn dismiss(&mut self, event: &ClickEvent, root_id: &str) -> Transition {
        let transition = self.dropdown.dismiss(event.originated_within(root_id));
        if transition == Transition::Closed {
            self.view.open = false;
            self.publish();
        }
        transition
    }

    fn publish(&self) {
        self.views.send_replace(self.view.clone());
    }

    fn render_badge(&mut self) {
        self.view.badge = render::render_badge(self.snapshot.as_deref());
        self.stats.badge_renders += 1;
    }

    fn render_dropdown(&mut self) {
        self.stats.dropdown_renders += 1;
        match render::render_dropdown(self.snapshot.as_deref(), &self.messages_url, Utc::now()) {
            Some(content) => self.view.content = content,
            None => debug!("No snapshot cached, keeping dropdown content"),
        }
    }
}
