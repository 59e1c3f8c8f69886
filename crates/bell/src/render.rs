//! HTML rendering for the notification bell and dropdown
//!
//! Renders cached notification state into markup. Every piece of text that
//! came from the server passes through [`escape_html`] first.

use chrono::{DateTime, Utc};

use crate::format::{
    escape_html, message_url, relative_time, sender_display, subject_display, type_label,
};
use crate::models::{MessageKind, NotificationSnapshot};

/// Highest count the primary badge shows before switching to "99+"
pub const BADGE_CAP: u64 = 99;

/// Dropdown body shown until the first render with data
pub const LOADING_HTML: &str = r#"<div class="notification-loading">
<div class="spinner"></div>
<p>Loading...</p>
</div>
"#;

/// Rendered state of the primary and header badges
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BadgeView {
    /// Primary badge text, capped at "99+"
    pub text: String,
    /// Whether the primary badge carries the `hidden` class
    pub hidden: bool,
    /// Header badge text, never capped
    pub header_text: String,
}

impl Default for BadgeView {
    fn default() -> Self {
        render_badge(None)
    }
}

/// Render both badges from the cached snapshot
///
/// A missing snapshot renders as zero: hidden badge, "0 unreplied".
pub fn render_badge(snapshot: Option<&NotificationSnapshot>) -> BadgeView {
    let count = snapshot.map_or(0, NotificationSnapshot::total_unreplied);
    let text = if count > BADGE_CAP {
        format!("{}+", BADGE_CAP)
    } else {
        count.to_string()
    };

    BadgeView {
        text,
        hidden: count == 0,
        header_text: format!("{} unreplied", count),
    }
}

/// Render the dropdown body from the cached snapshot
///
/// Returns `None` when there is no snapshot, meaning the previous markup
/// should stay in place.
pub fn render_dropdown(
    snapshot: Option<&NotificationSnapshot>,
    messages_url: &str,
    now: DateTime<Utc>,
) -> Option<String> {
    let snapshot = snapshot?;
    let summary = &snapshot.summary;

    let mut html = String::from("<div class=\"notification-summary\">\n");
    for kind in [MessageKind::Contact, MessageKind::General, MessageKind::User] {
        html.push_str(&format!(
            r#"<div class="summary-item">
<span class="count">{}</span>
<span class="label">{}</span>
</div>
"#,
            summary.unreplied(&kind),
            type_label(&kind)
        ));
    }
    html.push_str("</div>\n");

    if snapshot.recent_messages.is_empty() {
        html.push_str(
            r#"<div class="notification-empty">
<i class="fas fa-check-circle"></i>
<p>No unreplied messages</p>
</div>
"#,
        );
    } else {
        html.push_str("<div class=\"notification-list\">\n");
        for message in &snapshot.recent_messages {
            let subject = subject_display(message);
            html.push_str(&format!(
                r#"<a href="{url}" class="notification-item">
<div class="sender">
{sender}
<span class="type-badge {kind}">{label}</span>
</div>
<div class="subject">{subject}</div>
<div class="time">{time}</div>
</a>
"#,
                url = escape_html(Some(message_url(message).as_str())),
                sender = escape_html(Some(sender_display(message))),
                kind = escape_html(Some(message.kind.as_str())),
                label = escape_html(Some(type_label(&message.kind))),
                subject = escape_html(Some(subject.as_str())),
                time = relative_time(message.created_at, now),
            ));
        }
        html.push_str("</div>\n");
    }

    html.push_str(&format!(
        r#"<div class="notification-footer">
<a href="{}">View All Messages</a>
</div>
"#,
        escape_html(Some(messages_url))
    ));

    Some(html)
}

/// The widget's rendered subtree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WidgetView {
    pub badge: BadgeView,
    /// Whether the dropdown carries the `show` class
    pub open: bool,
    /// Last rendered dropdown body
    pub content: String,
}

impl Default for WidgetView {
    fn default() -> Self {
        Self {
            badge: BadgeView::default(),
            open: false,
            content: LOADING_HTML.to_string(),
        }
    }
}

impl WidgetView {
    /// Serialize the subtree rooted at the widget's `<li>`
    ///
    /// The dropdown body is only emitted while the dropdown is open.
    pub fn to_html(&self, root_id: &str) -> String {
        let badge_class = if self.badge.hidden {
            "notification-badge hidden"
        } else {
            "notification-badge"
        };
        let dropdown_class = if self.open {
            "notification-dropdown show"
        } else {
            "notification-dropdown"
        };
        let body = if self.open { self.content.as_str() } else { "" };

        format!(
            r##"<li class="nav-item notification-wrapper" id="{root}">
<a class="nav-link notification-bell" href="#" role="button" aria-label="Notifications">
<i class="fas fa-bell"></i>
<span class="{badge_class}">{badge}</span>
</a>
<div class="{dropdown_class}">
<div class="notification-header">
<span>Notifications</span>
<span class="badge">{header}</span>
</div>
<div class="notification-content">
{body}</div>
</div>
</li>
"##,
            root = escape_html(Some(root_id)),
            badge = self.badge.text,
            header = self.badge.header_text,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CategoryCount, Message, MessageKind, Summary};
    use chrono::Duration;

    fn snapshot(total: u64, messages: Vec<Message>) -> NotificationSnapshot {
        NotificationSnapshot::new(
            Summary {
                total_unreplied: total,
                contact_messages: CategoryCount { unreplied: 1 },
                general_messages: CategoryCount { unreplied: 2 },
                user_messages: CategoryCount::default(),
            },
            messages,
        )
    }

    #[test]
    fn test_badge_counts() {
        for (count, text, hidden) in [
            (0, "0", true),
            (1, "1", false),
            (42, "42", false),
            (99, "99", false),
            (100, "99+", false),
            (5000, "99+", false),
        ] {
            let badge = render_badge(Some(&snapshot(count, vec![])));
            assert_eq!(badge.text, text, "count {}", count);
            assert_eq!(badge.hidden, hidden, "count {}", count);
        }
    }

    #[test]
    fn test_header_badge_is_not_capped() {
        let badge = render_badge(Some(&snapshot(250, vec![])));
        assert_eq!(badge.text, "99+");
        assert_eq!(badge.header_text, "250 unreplied");
    }

    #[test]
    fn test_missing_snapshot_badge() {
        let badge = render_badge(None);
        assert_eq!(badge.text, "0");
        assert!(badge.hidden);
        assert_eq!(badge.header_text, "0 unreplied");
    }

    #[test]
    fn test_dropdown_without_snapshot_keeps_markup() {
        assert!(render_dropdown(None, "/admin/notifications/message/", Utc::now()).is_none());
    }

    #[test]
    fn test_dropdown_empty_state() {
        let html =
            render_dropdown(Some(&snapshot(3, vec![])), "/admin/notifications/message/", Utc::now())
                .unwrap();
        assert!(html.contains("No unreplied messages"));
        assert!(!html.contains("notification-list"));
        assert!(html.contains(r#"<a href="/admin/notifications/message/">View All Messages</a>"#));
        assert!(html.contains("<span class=\"count\">1</span>\n<span class=\"label\">Contact</span>"));
        assert!(html.contains("<span class=\"count\">2</span>\n<span class=\"label\">General</span>"));
        assert!(html.contains("<span class=\"count\">0</span>\n<span class=\"label\">User</span>"));
    }

    #[test]
    fn test_dropdown_lists_messages_in_order() {
        let now = Utc::now();
        let messages = vec![
            Message::new("2", MessageKind::Contact)
                .sender_name("Second")
                .subject("Newest")
                .created_at(now - Duration::minutes(5)),
            Message::new("1", MessageKind::General)
                .sender_name("First")
                .body("Body text used as subject")
                .created_at(now - Duration::hours(3)),
        ];
        let html = render_dropdown(Some(&snapshot(2, messages)), "/all/", now).unwrap();

        let newest = html.find("Newest").unwrap();
        let older = html.find("Body text used as subject").unwrap();
        assert!(newest < older);
        assert!(html.contains(r#"href="/admin/notifications/contactmessage/2/change/""#));
        assert!(html.contains(r#"<span class="type-badge general">General</span>"#));
        assert!(html.contains("5m ago"));
        assert!(html.contains("3h ago"));
        assert!(!html.contains("No unreplied messages"));
    }

    #[test]
    fn test_dropdown_escapes_untrusted_text() {
        let messages = vec![
            Message::new("1", MessageKind::parse("<b>"))
                .sender_name("<script>alert(1)</script>")
                .subject("\"quoted\" & 'single'"),
        ];
        let html = render_dropdown(Some(&snapshot(1, messages)), "/all/", Utc::now()).unwrap();

        assert!(!html.contains("<script>"));
        assert!(!html.contains("<b>"));
        assert!(html.contains("&lt;script&gt;alert(1)&lt;/script&gt;"));
        assert!(html.contains("&quot;quoted&quot; &amp; &#39;single&#39;"));
    }

    #[test]
    fn test_view_hides_body_when_closed() {
        let mut view = WidgetView::default();
        let closed = view.to_html("bell-root");
        assert!(closed.contains("notification-badge hidden"));
        assert!(!closed.contains("Loading..."));

        view.open = true;
        let open = view.to_html("bell-root");
        assert!(open.contains("notification-dropdown show"));
        assert!(open.contains("Loading..."));
    }
}
