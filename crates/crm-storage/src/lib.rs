//! # crm-storage
//!
//! Durable persistence of the session credential.
//!
//! ## Layers
//!
//! - [`KeyValueStore`] - raw string entries (in-memory or file-backed)
//! - [`TokenStore`] - the credential contract the session controller consumes
//! - [`DurableTokenStore`] - enforces the both-or-neither rule over any
//!   [`KeyValueStore`]
//!
//! The credential is kept as two independent entries, [`TOKEN_KEY`] and
//! [`USERNAME_KEY`]. A crash between the two writes leaves one entry behind;
//! the next [`TokenStore::get`] sees the half and clears it.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod error;
pub mod file;
pub mod kv;
pub mod memory;
pub mod token;

pub use error::{StorageError, StorageResult};
pub use file::FileStore;
pub use kv::KeyValueStore;
pub use memory::MemoryStore;
pub use token::{DurableTokenStore, TokenStore, TOKEN_KEY, USERNAME_KEY};
