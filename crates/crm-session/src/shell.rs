//! Navigation view model.

use serde::Serialize;

use crate::guard::{DASHBOARD_PATH, HOME_PATH, LOGIN_PATH, REGISTER_PATH};
use crate::routes::normalize;
use crate::state::SessionState;

/// Shown above the admin controls.
pub const ADMIN_NOTICE: &str = "You are logged in with administrator privileges.";

/// Admin control panel entries.
pub const ADMIN_AFFORDANCES: &[&str] = &["User Management", "System Settings", "Reports"];

const AUTHENTICATED_NAV: &[(&str, &str)] = &[
    ("Dashboard", DASHBOARD_PATH),
    ("Customers", "/customers"),
    ("Interactions", "/interactions"),
];

const ANONYMOUS_NAV: &[(&str, &str)] = &[("Login", LOGIN_PATH), ("Register", REGISTER_PATH)];

/// A navigation link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavItem {
    /// Link text.
    pub label: &'static str,
    /// Target path.
    pub href: &'static str,
    /// The current path belongs to this item.
    pub active: bool,
}

/// Everything the shell needs to draw its chrome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShellView {
    /// Where the brand link points.
    pub brand_href: &'static str,
    /// Logged-in username.
    pub username: Option<String>,
    /// Main navigation.
    pub nav: Vec<NavItem>,
    /// Administrator notice, admins only.
    pub admin_notice: Option<&'static str>,
    /// Admin control panel entries, empty for non-admins.
    pub admin_affordances: Vec<&'static str>,
    /// Whether a logout control is offered.
    pub can_logout: bool,
}

impl ShellView {
    /// Builds the view for a session snapshot and the current path.
    #[must_use]
    pub fn render(state: &SessionState, current_path: &str) -> Self {
        let current = normalize(current_path);
        let logged_in = state.is_authenticated();
        let admin = state.is_admin();

        let links = if logged_in { AUTHENTICATED_NAV } else { ANONYMOUS_NAV };
        let nav = links
            .iter()
            .map(|&(label, href)| NavItem {
                label,
                href,
                active: is_active(href, current),
            })
            .collect();

        Self {
            brand_href: if logged_in { DASHBOARD_PATH } else { HOME_PATH },
            username: state.username().map(str::to_string),
            nav,
            admin_notice: admin.then_some(ADMIN_NOTICE),
            admin_affordances: if admin { ADMIN_AFFORDANCES.to_vec() } else { Vec::new() },
            can_logout: logged_in,
        }
    }

    /// Returns the active navigation item.
    #[must_use]
    pub fn active(&self) -> Option<&NavItem> {
        self.nav.iter().find(|item| item.active)
    }
}

/// Dashboard only matches exactly; other items own their sub-paths.
fn is_active(href: &str, current: &str) -> bool {
    if current == href {
        return true;
    }
    href != DASHBOARD_PATH
        && current
            .strip_prefix(href)
            .is_some_and(|rest| rest.starts_with('/'))
}
