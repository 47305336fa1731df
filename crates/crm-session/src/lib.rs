//! # crm-session
//!
//! The session state machine and the route-access decisions built on it.
//!
//! ## Components
//!
//! - [`SessionController`] - owns the current identity and the loading/error
//!   flags, and runs boot restore, login, registration, logout and expiry
//! - [`guard`] - pure render-vs-redirect decisions over a [`SessionState`]
//! - [`RouteTable`] - maps a path to the guard that protects it
//! - [`ShellView`] - navigation and role-gated affordances for the shell
//!
//! Consumers read state through [`SessionController::state`] or the watch
//! receiver from [`SessionController::subscribe`]; they never mutate it.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod controller;
pub mod error;
pub mod guard;
pub mod routes;
pub mod shell;
pub mod state;

pub use controller::{InitOutcome, SessionController};
pub use error::{SessionError, SessionResult};
pub use guard::{Redirect, RenderDecision};
pub use routes::{Access, RouteTable};
pub use shell::{NavItem, ShellView};
pub use state::SessionState;
