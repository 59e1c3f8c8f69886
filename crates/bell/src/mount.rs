//! Locating the widget's insertion point in the host page
//!
//! The host page is injected through [`HostPage`] so the widget never goes
//! looking for a global document on its own.

use std::collections::HashMap;
use std::sync::Mutex;

use log::debug;

use crate::error::MountError;

/// Navbar selectors tried in order, first match wins
pub const NAV_SELECTORS: [&str; 3] = [
    ".main-header .navbar-nav.ml-auto",
    ".main-header .navbar-nav:last-child",
    ".navbar-nav",
];

/// An item already present in a navbar
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavItem {
    pub id: String,
    pub classes: Vec<String>,
}

impl NavItem {
    /// `classes` is a space separated class attribute
    pub fn new(id: impl Into<String>, classes: &str) -> Self {
        Self {
            id: id.into(),
            classes: classes.split_whitespace().map(str::to_string).collect(),
        }
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    fn is_user_menu(&self) -> bool {
        self.has_class("nav-item") && self.has_class("dropdown")
    }
}

/// A navbar matched by a selector
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NavContainer {
    pub id: String,
    pub items: Vec<NavItem>,
}

/// Where the widget goes inside the navbar
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Placement {
    /// Insert as the sibling right before the item with this id
    Before(String),
    Append,
}

/// A resolved mount point
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mount {
    /// Selector that matched
    pub selector: String,
    pub container_id: String,
    pub placement: Placement,
}

/// The page the widget attaches to
pub trait HostPage: Send + Sync {
    /// First navbar matching `selector`, if any
    fn select(&self, selector: &str) -> Option<NavContainer>;

    /// Insert the widget markup at the resolved mount point
    fn attach(&self, mount: &Mount, markup: &str);
}

/// Resolve the mount point by trying [`NAV_SELECTORS`] in order
///
/// The widget goes before the user menu (an item with classes `nav-item`
/// and `dropdown`), else before the last item, else it is appended.
pub fn locate(page: &dyn HostPage) -> Result<Mount, MountError> {
    let Some((selector, container)) = NAV_SELECTORS
        .iter()
        .find_map(|selector| page.select(selector).map(|c| (*selector, c)))
    else {
        return Err(MountError::NoInsertionPoint {
            tried: NAV_SELECTORS.iter().map(|s| s.to_string()).collect(),
        });
    };

    let placement = container
        .items
        .iter()
        .find(|item| item.is_user_menu())
        .or_else(|| container.items.last())
        .map(|item| Placement::Before(item.id.clone()))
        .unwrap_or(Placement::Append);

    debug!("Mounting notification bell via {:?}: {:?}", selector, placement);

    Ok(Mount {
        selector: selector.to_string(),
        container_id: container.id,
        placement,
    })
}

/// In-memory host page
///
/// Used by the headless binary and by tests. Records whatever gets attached.
#[derive(Default)]
pub struct StaticPage {
    navs: HashMap<String, NavContainer>,
    attached: Mutex<Option<(Mount, String)>>,
}

impl StaticPage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a navbar that `selector` resolves to
    pub fn with_nav(mut self, selector: &str, container: NavContainer) -> Self {
        self.navs.insert(selector.to_string(), container);
        self
    }

    /// The navbar of a stock AdminLTE admin header with a user menu
    pub fn admin_navbar() -> Self {
        Self::new().with_nav(
            NAV_SELECTORS[0],
            NavContainer {
                id: "main-navbar".to_string(),
                items: vec![
                    NavItem::new("nav-search", "nav-item"),
                    NavItem::new("nav-user-menu", "nav-item dropdown"),
                ],
            },
        )
    }

    /// Mount point and markup of the last attach
    pub fn attached(&self) -> Option<(Mount, String)> {
        self.attached
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .clone()
    }
}

impl HostPage for StaticPage {
    fn select(&self, selector: &str) -> Option<NavContainer> {
        self.navs.get(selector).cloned()
    }

    fn attach(&self, mount: &Mount, markup: &str) {
        let mut attached = self
            .attached
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        *attached = Some((mount.clone(), markup.to_string()));
    }
}
