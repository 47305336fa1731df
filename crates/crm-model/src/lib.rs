//! # crm-model
//!
//! Domain models for the CRM client session core.
//!
//! - [`Identity`] - the logged-in user as resolved by the identity provider
//! - [`Credential`] - the bearer token plus the display name it was issued for
//! - [`RegistrationProfile`] - the sign-up form payload and its field rules

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod credential;
pub mod error;
pub mod identity;
pub mod registration;

pub use credential::Credential;
pub use error::{ModelError, ModelResult};
pub use identity::{roles, Identity};
pub use registration::RegistrationProfile;
