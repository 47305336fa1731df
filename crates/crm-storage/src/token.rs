//! Credential store contract.

use crm_model::Credential;

use crate::error::StorageResult;
use crate::kv::KeyValueStore;

/// Key under which the bearer token is kept.
pub const TOKEN_KEY: &str = "token";

/// Key under which the display name is kept.
pub const USERNAME_KEY: &str = "username";

/// Durable home of the current credential.
///
/// Operations are synchronous: logout must be able to clear storage without
/// suspending.
pub trait TokenStore: Send + Sync {
    /// Loads the stored credential.
    ///
    /// A half-present credential is cleared and reported as `None`.
    fn get(&self) -> StorageResult<Option<Credential>>;

    /// Persists a credential, replacing any previous one.
    fn set(&self, credential: &Credential) -> StorageResult<()>;

    /// Removes the stored credential. Clearing an empty store is not an error.
    fn clear(&self) -> StorageResult<()>;
}

/// [`TokenStore`] over any [`KeyValueStore`], enforcing both-or-neither.
#[derive(Debug, Default)]
pub struct DurableTokenStore<K> {
    backend: K,
}

impl<K: KeyValueStore> DurableTokenStore<K> {
    /// Wraps a backend.
    #[must_use]
    pub const fn new(backend: K) -> Self {
        Self { backend }
    }

    /// Returns the underlying backend.
    #[must_use]
    pub const fn backend(&self) -> &K {
        &self.backend
    }
}

/// Empty entries count as absent.
fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

impl<K: KeyValueStore> TokenStore for DurableTokenStore<K> {
    fn get(&self) -> StorageResult<Option<Credential>> {
        let token = non_empty(self.backend.read(TOKEN_KEY)?);
        let username = non_empty(self.backend.read(USERNAME_KEY)?);

        match (token, username) {
            (Some(token), Some(username)) => Ok(Some(Credential { token, username })),
            (None, None) => Ok(None),
            (token, _) => {
                tracing::warn!(
                    has_token = token.is_some(),
                    "Stored credential is incomplete, clearing it"
                );
                self.clear()?;
                Ok(None)
            }
        }
    }

    fn set(&self, credential: &Credential) -> StorageResult<()> {
        self.backend.write(TOKEN_KEY, &credential.token)?;
        if let Err(e) = self.backend.write(USERNAME_KEY, &credential.username) {
            // leave nothing behind that get() would have to repair
            if let Err(rollback) = self.backend.remove(TOKEN_KEY) {
                tracing::warn!("Failed to roll back token after partial write: {}", rollback);
            }
            return Err(e);
        }
        Ok(())
    }

    fn clear(&self) -> StorageResult<()> {
        let token = self.backend.remove(TOKEN_KEY);
        let username = self.backend.remove(USERNAME_KEY);
        token.and(username)
    }
}
