//! # crm-core
//!
//! Configuration and audit events shared by the CRM client crates.
//!
//! This crate holds the foundational types every other crate can depend on
//! without pulling in storage, HTTP or runtime concerns.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod config;
pub mod event;

pub use config::{ClientConfig, IdentityConfig, StorageConfig};
pub use event::{EventOutcome, EventType, SessionEvent, SessionEventBuilder};
