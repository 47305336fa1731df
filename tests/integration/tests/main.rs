//! Integration tests for the CRM client session.
//!
//! Every test runs the real HTTP adapter and file store against an
//! in-process auth service.

mod common;
mod provider_failures;
mod restore_without_lookup;
mod session_flows;
