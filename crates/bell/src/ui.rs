//! Dropdown open/closed state machine and outside-click dismissal

/// Result of applying a user interaction to the dropdown
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Opened,
    Closed,
    Unchanged,
}

/// Open/closed state of the dropdown. Starts closed.
///
/// Only user interaction changes this; fetches never do.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DropdownState {
    is_open: bool,
}

impl DropdownState {
    pub fn is_open(&self) -> bool {
        self.is_open
    }

    /// Bell activated: flip the state
    pub fn toggle(&mut self) -> Transition {
        self.is_open = !self.is_open;
        if self.is_open {
            Transition::Opened
        } else {
            Transition::Closed
        }
    }

    /// Document click: close if open and the click came from outside the widget
    pub fn dismiss(&mut self, inside_widget: bool) -> Transition {
        if !self.is_open || inside_widget {
            return Transition::Unchanged;
        }
        self.is_open = false;
        Transition::Closed
    }
}

/// A click observed at document level
///
/// `path` lists element ids from the click target up to the document root,
/// the same chain a DOM event bubbles through.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClickEvent {
    pub path: Vec<String>,
}

impl ClickEvent {
    pub fn new<I, S>(path: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            path: path.into_iter().map(Into::into).collect(),
        }
    }

    /// Whether the click target is the element `root_id` or one of its descendants
    pub fn originated_within(&self, root_id: &str) -> bool {
        self.path.iter().any(|id| id == root_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_closed() {
        assert!(!DropdownState::default().is_open());
    }

    #[test]
    fn test_toggle_twice_returns_to_closed() {
        let mut state = DropdownState::default();
        assert_eq!(state.toggle(), Transition::Opened);
        assert!(state.is_open());
        assert_eq!(state.toggle(), Transition::Closed);
        assert_eq!(state, DropdownState::default());
    }

    #[test]
    fn test_dismiss_outside_closes() {
        let mut state = DropdownState::default();
        state.toggle();
        assert_eq!(state.dismiss(false), Transition::Closed);
        assert!(!state.is_open());
    }

    #[test]
    fn test_dismiss_inside_is_ignored() {
        let mut state = DropdownState::default();
        state.toggle();
        assert_eq!(state.dismiss(true), Transition::Unchanged);
        assert!(state.is_open());
    }

    #[test]
    fn test_dismiss_while_closed_is_noop() {
        let mut state = DropdownState::default();
        assert_eq!(state.dismiss(false), Transition::Unchanged);
        assert!(!state.is_open());
    }

    #[test]
    fn test_click_path_containment() {
        let inside = ClickEvent::new(["notification-item-3", "bell-root", "navbar", "body"]);
        let outside = ClickEvent::new(["content-wrapper", "body"]);
        assert!(inside.originated_within("bell-root"));
        assert!(!outside.originated_within("bell-root"));
    }
}
