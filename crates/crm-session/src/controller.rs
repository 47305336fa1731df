//! Session controller.
//!
//! ## Sequencing
//!
//! Every operation that changes identity state takes a ticket from a
//! monotonically increasing sequence. A suspended call (boot restore, login,
//! registration) re-checks its ticket when the provider answers; if another
//! operation has started since, the answer is dropped. The check and the
//! resulting store/state writes run under the sequence lock, so nothing can
//! slip in between them.
//!
//! The lock is never held across an `.await`, and it is always taken before
//! the state channel's own lock, never while a state guard is alive.

use std::fmt;
use std::sync::Arc;

use crm_core::event::{EventType, SessionEvent};
use crm_identity::{IdentityService, LoginGrant};
use crm_model::{Credential, Identity, RegistrationProfile};
use crm_storage::TokenStore;
use parking_lot::Mutex;
use tokio::sync::{watch, OnceCell};

use crate::error::{SessionError, SessionResult};
use crate::guard::{Redirect, DASHBOARD_PATH};
use crate::routes::RouteTable;
use crate::state::SessionState;

/// Error recorded when a session ends because the backend rejected it.
pub const SESSION_EXPIRED: &str = "session expired";

/// Result of [`SessionController::initialize`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InitOutcome {
    /// Identity restored from storage.
    pub identity: Option<Identity>,
    /// Navigation intent for the caller's current path.
    pub redirect: Option<Redirect>,
}

/// Owns the session state and every transition of it.
pub struct SessionController {
    store: Arc<dyn TokenStore>,
    provider: Arc<dyn IdentityService>,
    routes: RouteTable,
    state: watch::Sender<SessionState>,
    sequence: Mutex<u64>,
    boot: OnceCell<Option<Identity>>,
}

impl fmt::Debug for SessionController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // sequence is always locked before state; never hold both here
        let sequence = *self.sequence.lock();
        let state = self.state();
        f.debug_struct("SessionController")
            .field("state", &state)
            .field("sequence", &sequence)
            .finish_non_exhaustive()
    }
}

impl SessionController {
    /// Creates a controller in the initial loading state.
    #[must_use]
    pub fn new(store: Arc<dyn TokenStore>, provider: Arc<dyn IdentityService>) -> Self {
        let (state, _) = watch::channel(SessionState::initial());
        Self {
            store,
            provider,
            routes: RouteTable::default(),
            state,
            sequence: Mutex::new(0),
            boot: OnceCell::new(),
        }
    }

    /// Replaces the route table used to spot auth-only paths.
    #[must_use]
    pub fn with_routes(mut self, routes: RouteTable) -> Self {
        self.routes = routes;
        self
    }

    /// Returns the route table.
    #[must_use]
    pub const fn routes(&self) -> &RouteTable {
        &self.routes
    }

    /// Returns a snapshot of the current state.
    #[must_use]
    pub fn state(&self) -> SessionState {
        self.state.borrow().clone()
    }

    /// Subscribes to state changes.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.state.subscribe()
    }

    /// Checks if the logged-in identity is an administrator.
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.state.borrow().is_admin()
    }

    /// Restores the session from storage.
    ///
    /// The restore pass runs once per controller; concurrent and later callers
    /// share its result. The redirect is computed for each caller's own
    /// `current_path`: an authenticated caller sitting on an auth-only route
    /// is sent to the dashboard.
    pub async fn initialize(&self, current_path: &str) -> InitOutcome {
        let identity = self.boot.get_or_init(|| self.restore()).await.clone();
        let redirect = match identity {
            Some(_) if self.routes.is_auth_only(current_path) => {
                Some(Redirect::replace(DASHBOARD_PATH))
            }
            _ => None,
        };
        InitOutcome { identity, redirect }
    }

    async fn restore(&self) -> Option<Identity> {
        let ticket = self.begin(true);

        let credential = match self.store.get() {
            Ok(credential) => credential,
            Err(e) => {
                tracing::warn!("Failed to read stored credential: {}", e);
                self.discard_credential();
                None
            }
        };

        let Some(credential) = credential else {
            tracing::debug!("No stored credential");
            self.apply(ticket, || self.settle(None));
            return None;
        };

        let outcome = self
            .provider
            .fetch_current_user(&credential)
            .await
            .map_err(SessionError::from)
            .and_then(|found| found.map(|i| check_restored(&credential, i)).transpose());

        let applied = self.apply(ticket, || match outcome {
            Ok(Some(identity)) => {
                tracing::info!(username = %identity.username, "Session restored");
                SessionEvent::builder(EventType::SessionRestored)
                    .username(&identity.username)
                    .detail("roles", identity.roles_display())
                    .emit();
                self.settle(Some(identity.clone()));
                Some(identity)
            }
            Ok(None) => {
                tracing::warn!(username = %credential.username, "Stored credential no longer accepted");
                self.restore_failed(&credential, "credential rejected");
                None
            }
            Err(e) => {
                tracing::warn!(username = %credential.username, "Session restore failed: {}", e);
                self.restore_failed(&credential, &e.to_string());
                None
            }
        });

        applied.unwrap_or_else(|| {
            tracing::debug!("Session restore superseded");
            None
        })
    }

    /// Logs in and persists the issued credential.
    ///
    /// The caller decides where to navigate on success.
    ///
    /// ## Errors
    ///
    /// Returns the provider failure, a storage failure (identity is then
    /// none), or [`SessionError::Superseded`] if another session operation
    /// started meanwhile.
    pub async fn login(&self, username: &str, secret: &str) -> SessionResult<Identity> {
        let ticket = self.begin(true);
        let result = self.provider.login(username, secret).await;

        self.apply(ticket, || match result {
            Ok(grant) => self.accept(grant),
            Err(e) => {
                let err = SessionError::from(e);
                tracing::info!(username, "Login failed: {}", err);
                SessionEvent::builder(EventType::LoginError)
                    .username(username)
                    .failure(err.to_string())
                    .emit();
                self.record_failure(&err);
                Err(err)
            }
        })
        .unwrap_or_else(|| {
            tracing::debug!(username, "Login superseded");
            Err(SessionError::Superseded)
        })
    }

    /// Creates an account. Leaves identity and storage untouched.
    ///
    /// The provider's answer is always returned: an account created while a
    /// newer session operation started is still created. Only the state
    /// update (loading, error) is skipped in that case.
    ///
    /// ## Errors
    ///
    /// Returns the provider failure.
    pub async fn register(&self, profile: &RegistrationProfile) -> SessionResult<()> {
        let ticket = self.begin(true);
        let result = self.provider.register(profile).await.map_err(SessionError::from);

        match &result {
            Ok(()) => SessionEvent::builder(EventType::Register)
                .username(&profile.username)
                .emit(),
            Err(err) => SessionEvent::builder(EventType::RegisterError)
                .username(&profile.username)
                .failure(err.to_string())
                .emit(),
        }

        let applied = self.apply(ticket, || match &result {
            Ok(()) => self.state.send_modify(|s| s.loading = false),
            Err(err) => self.record_failure(err),
        });
        if applied.is_none() {
            tracing::debug!(username = %profile.username, "Registration finished after a newer session operation");
        }

        result
    }

    /// Ends the session. Never suspends and never contacts the provider.
    ///
    /// State is reset even when clearing storage fails.
    ///
    /// ## Errors
    ///
    /// Returns the storage failure, if any.
    pub fn logout(&self) -> SessionResult<()> {
        self.end(EventType::Logout, None)
    }

    /// Ends the session after the backend rejected the credential.
    ///
    /// Same as [`logout`](Self::logout), but records [`SESSION_EXPIRED`] if
    /// someone was logged in.
    ///
    /// ## Errors
    ///
    /// Returns the storage failure, if any.
    pub fn expire(&self) -> SessionResult<()> {
        self.end(EventType::SessionExpired, Some(SESSION_EXPIRED))
    }

    /// Takes a new ticket, optionally entering the loading state.
    fn begin(&self, loading: bool) -> u64 {
        let mut sequence = self.sequence.lock();
        *sequence += 1;
        if loading {
            self.state.send_modify(|s| {
                s.loading = true;
                s.error = None;
            });
        }
        *sequence
    }

    /// Runs `f` only if `ticket` is still current.
    fn apply<T>(&self, ticket: u64, f: impl FnOnce() -> T) -> Option<T> {
        let sequence = self.sequence.lock();
        (*sequence == ticket).then(f)
    }

    fn accept(&self, grant: LoginGrant) -> SessionResult<Identity> {
        let LoginGrant { identity, credential } = grant;

        if let Err(e) = self.store.set(&credential) {
            tracing::warn!(username = %credential.username, "Failed to persist credential: {}", e);
            self.discard_credential();
            let err = SessionError::Storage(e);
            SessionEvent::builder(EventType::LoginError)
                .username(&credential.username)
                .failure(err.to_string())
                .emit();
            self.state.send_modify(|s| {
                s.identity = None;
                s.loading = false;
                s.error = Some(err.to_string());
            });
            return Err(err);
        }

        tracing::info!(username = %identity.username, "Logged in");
        SessionEvent::builder(EventType::Login)
            .username(&identity.username)
            .detail("roles", identity.roles_display())
            .emit();
        self.state.send_modify(|s| {
            s.identity = Some(identity.clone());
            s.loading = false;
            s.error = None;
        });
        Ok(identity)
    }

    fn end(&self, event: EventType, expired_error: Option<&str>) -> SessionResult<()> {
        let mut sequence = self.sequence.lock();
        *sequence += 1;

        let cleared = self.store.clear();
        if let Err(e) = &cleared {
            tracing::warn!("Failed to clear stored credential: {}", e);
        }

        let mut ended = None;
        self.state.send_if_modified(|s| {
            ended = s.identity.take().map(|i| i.username);
            let error = ended.as_ref().and(expired_error).map(str::to_string);
            let changed = ended.is_some() || s.loading || s.error != error;
            s.loading = false;
            s.error = error;
            changed
        });
        drop(sequence);

        if let Some(username) = ended {
            tracing::info!(%username, ?event, "Session ended");
            SessionEvent::builder(event).username(username).emit();
        }

        cleared.map_err(SessionError::from)
    }

    /// Leaves the loading state with the given identity.
    fn settle(&self, identity: Option<Identity>) {
        self.state.send_modify(|s| {
            s.identity = identity;
            s.loading = false;
        });
    }

    /// Boot failures are recovered silently: no error is recorded.
    fn restore_failed(&self, credential: &Credential, reason: &str) {
        SessionEvent::builder(EventType::SessionRestoreError)
            .username(&credential.username)
            .failure(reason)
            .emit();
        self.discard_credential();
        self.settle(None);
    }

    fn record_failure(&self, err: &SessionError) {
        self.state.send_modify(|s| {
            s.loading = false;
            s.error = Some(err.to_string());
        });
    }

    fn discard_credential(&self) {
        if let Err(e) = self.store.clear() {
            tracing::warn!("Failed to clear stored credential: {}", e);
        }
    }
}

/// The provider must echo the name the credential was stored under.
fn check_restored(credential: &Credential, identity: Identity) -> SessionResult<Identity> {
    if identity.username.is_empty() {
        return Err(SessionError::MalformedStoredIdentity(
            "provider returned an empty username".to_string(),
        ));
    }
    if identity.username != credential.username {
        return Err(SessionError::MalformedStoredIdentity(format!(
            "stored for '{}', provider returned '{}'",
            credential.username, identity.username
        )));
    }
    Ok(identity)
}
