//! # crm-identity
//!
//! The identity provider boundary.
//!
//! The session core only ever talks to an [`IdentityService`]. Two
//! implementations ship here:
//!
//! - [`HttpIdentityService`] - the REST auth service (`/auth/login`,
//!   `/auth/register`, `/auth/status`, plus `/auth/me` where deployed; without
//!   it the identity is rebuilt from the credential, see [`local`])
//! - [`DemoIdentityService`] - canned responses for offline demos; selected
//!   only by explicit configuration, never as a fallback
//!
//! ## Example
//!
//! ```ignore
//! use crm_identity::{HttpIdentityService, IdentityService};
//!
//! let provider = HttpIdentityService::new(&config.identity)?;
//! let grant = provider.login("admin", "admin123").await?;
//! ```

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod demo;
pub mod dto;
pub mod error;
pub mod http;
pub mod local;
pub mod provider;

pub use demo::DemoIdentityService;
pub use error::{IdentityError, IdentityResult};
pub use http::HttpIdentityService;
pub use local::rebuild_identity;
pub use provider::{IdentityService, LoginGrant, ProviderStatus};
