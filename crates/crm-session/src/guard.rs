//! Route guards.
//!
//! Both guards are pure functions of a [`SessionState`]. While the session is
//! loading they always answer [`RenderDecision::Wait`], so a protected screen
//! never flashes before boot restore has finished and a public screen never
//! redirects on a stale "logged out" reading.

use serde::Serialize;

use crate::state::SessionState;

/// Login screen.
pub const LOGIN_PATH: &str = "/login";
/// Registration screen.
pub const REGISTER_PATH: &str = "/register";
/// Landing screen for authenticated users.
pub const DASHBOARD_PATH: &str = "/dashboard";
/// Landing screen for everyone else.
pub const HOME_PATH: &str = "/";

/// Navigation intent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Redirect {
    /// Target path.
    pub to: String,
    /// Replace the current history entry instead of pushing one.
    pub replace: bool,
}

impl Redirect {
    /// Creates a history-replacing redirect.
    #[must_use]
    pub fn replace(to: impl Into<String>) -> Self {
        Self {
            to: to.into(),
            replace: true,
        }
    }
}

/// What the presentation layer should do with a route.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "decision", rename_all = "snake_case")]
pub enum RenderDecision {
    /// Show a loading indicator.
    Wait,
    /// Navigate elsewhere.
    Redirect(Redirect),
    /// Render the screen.
    Render,
}

/// Guard for screens that require a logged-in identity.
#[must_use]
pub fn protected(state: &SessionState) -> RenderDecision {
    if state.loading {
        RenderDecision::Wait
    } else if state.identity.is_none() {
        RenderDecision::Redirect(Redirect::replace(LOGIN_PATH))
    } else {
        RenderDecision::Render
    }
}

/// Guard for screens only logged-out users should see.
#[must_use]
pub fn public(state: &SessionState) -> RenderDecision {
    if state.loading {
        RenderDecision::Wait
    } else if state.identity.is_some() {
        RenderDecision::Redirect(Redirect::replace(DASHBOARD_PATH))
    } else {
        RenderDecision::Render
    }
}
