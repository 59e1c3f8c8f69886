//! Bell crate - unread message notifications for the admin console
//!
//! This crate provides the notification bell that sits in the admin navbar:
//! - Domain models (NotificationSnapshot, Message, Summary)
//! - Summary sources (HTTP via ureq, in-memory for tests)
//! - Formatting and HTML rendering of the badge and dropdown
//! - Fetch controller and fixed-period poll scheduler
//! - Dropdown state machine with outside-click dismissal
//! - Widget instances with explicit mount and teardown
//!
//! The host page is injected through [`HostPage`]; the crate never reaches
//! for a global document.

pub mod config;
pub mod diagnostics;
pub mod error;
pub mod fetch;
pub mod format;
pub mod models;
pub mod mount;
pub mod poll;
pub mod render;
pub mod source;
pub mod state;
pub mod ui;
pub mod widget;

pub use config::WidgetConfig;
pub use diagnostics::{DiagnosticLog, LogCallback, LogEntry, init_diagnostics, set_log_callback};
pub use error::{FetchError, MountError};
pub use fetch::FetchOutcome;
pub use format::{escape_html, format_relative_time, message_url, relative_time, type_label};
pub use models::{CategoryCount, Message, MessageId, MessageKind, NotificationSnapshot, Summary};
pub use mount::{HostPage, Mount, NavContainer, NavItem, Placement, StaticPage, NAV_SELECTORS};
pub use poll::{DEFAULT_POLL_INTERVAL, PollScheduler};
pub use render::{BadgeView, WidgetView, render_badge, render_dropdown};
pub use source::{HttpSummarySource, InMemorySource, SummarySource};
pub use state::RenderStats;
pub use ui::{ClickEvent, DropdownState, Transition};
pub use widget::Widget;
