//! Route table.
//!
//! Maps a requested path to the guard protecting it. Patterns are literal
//! segments plus `:name` placeholders that match any single non-empty
//! segment; the first matching route wins.

use serde::Serialize;

use crate::guard::{self, RenderDecision, DASHBOARD_PATH, LOGIN_PATH, REGISTER_PATH};
use crate::state::SessionState;

/// Guard level of a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Access {
    /// Rendered for everyone.
    Open,
    /// Only for logged-out users (login, registration).
    PublicOnly,
    /// Only for logged-in users.
    Protected,
    /// No route matched; rendered unguarded.
    NotFound,
}

/// A route pattern and its guard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Route {
    /// Path pattern, e.g. `/customers/:id/edit`.
    pub pattern: &'static str,
    /// Guard level.
    pub access: Access,
}

const fn route(pattern: &'static str, access: Access) -> Route {
    Route { pattern, access }
}

/// Routes of the CRM client.
pub const STANDARD_ROUTES: &[Route] = &[
    route("/", Access::Open),
    route("/landing", Access::Open),
    route(LOGIN_PATH, Access::PublicOnly),
    route(REGISTER_PATH, Access::PublicOnly),
    route(DASHBOARD_PATH, Access::Protected),
    route("/customers", Access::Protected),
    route("/customers/create", Access::Protected),
    route("/customers/:id", Access::Protected),
    route("/customers/:id/edit", Access::Protected),
    route("/interactions", Access::Protected),
    route("/interactions/create", Access::Protected),
    route("/interactions/:id/edit", Access::Protected),
];

/// Ordered set of routes.
#[derive(Debug, Clone)]
pub struct RouteTable {
    routes: Vec<Route>,
}

impl Default for RouteTable {
    fn default() -> Self {
        Self::new(STANDARD_ROUTES.iter().copied())
    }
}

impl RouteTable {
    /// Creates a table from routes in match order.
    #[must_use]
    pub fn new(routes: impl IntoIterator<Item = Route>) -> Self {
        Self {
            routes: routes.into_iter().collect(),
        }
    }

    /// Returns the routes in match order.
    #[must_use]
    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    /// Finds the route for a path.
    #[must_use]
    pub fn resolve(&self, path: &str) -> Option<&Route> {
        let path = normalize(path);
        self.routes.iter().find(|r| pattern_matches(r.pattern, path))
    }

    /// Returns the guard level for a path.
    #[must_use]
    pub fn access(&self, path: &str) -> Access {
        self.resolve(path).map_or(Access::NotFound, |r| r.access)
    }

    /// Checks if a path is only meant for logged-out users.
    #[must_use]
    pub fn is_auth_only(&self, path: &str) -> bool {
        self.access(path) == Access::PublicOnly
    }

    /// Applies the guard for `path` to `state`.
    #[must_use]
    pub fn decide(&self, state: &SessionState, path: &str) -> RenderDecision {
        match self.access(path) {
            Access::Open | Access::NotFound => RenderDecision::Render,
            Access::PublicOnly => guard::public(state),
            Access::Protected => guard::protected(state),
        }
    }
}

/// Strips query, fragment and trailing slashes.
#[must_use]
pub fn normalize(path: &str) -> &str {
    let end = path.find(['?', '#']).unwrap_or(path.len());
    let trimmed = path[..end].trim_end_matches('/');
    if trimmed.is_empty() {
        "/"
    } else {
        trimmed
    }
}

fn pattern_matches(pattern: &str, path: &str) -> bool {
    let mut pattern = pattern.split('/');
    let mut path = path.split('/');
    loop {
        match (pattern.next(), path.next()) {
            (None, None) => return true,
            (Some(p), Some(s)) if p.starts_with(':') => {
                if s.is_empty() {
                    return false;
                }
            }
            (Some(p), Some(s)) if p == s => {}
            _ => return false,
        }
    }
}
