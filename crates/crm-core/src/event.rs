//! Session audit events.
//!
//! Every identity transition (boot restore, login, registration, logout,
//! expiry) produces a [`SessionEvent`]. Events are emitted through `tracing`
//! as structured records so the shell's subscriber decides where they go.
//!
//! Events carry the display name only; tokens never appear in them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Event type categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventType {
    // Boot
    /// Stored credential resolved into an identity.
    SessionRestored,
    /// Stored credential could not be resolved and was discarded.
    SessionRestoreError,

    // Interactive authentication
    /// User logged in.
    Login,
    /// User login failed.
    LoginError,
    /// User logged out.
    Logout,
    /// Session dropped after the backend rejected the credential.
    SessionExpired,

    // Account events
    /// User registered.
    Register,
    /// User registration failed.
    RegisterError,
}

/// Outcome of an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventOutcome {
    /// Operation succeeded.
    Success,
    /// Operation failed.
    Failure,
}

/// A session event for audit logging.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionEvent {
    /// Unique event identifier.
    pub id: Uuid,
    /// Timestamp of the event.
    pub timestamp: DateTime<Utc>,
    /// Type of event.
    pub event_type: EventType,
    /// Outcome of the event.
    pub outcome: EventOutcome,
    /// Display name the event concerns, when known.
    pub username: Option<String>,
    /// Error message (for failure events).
    pub error: Option<String>,
    /// Additional details as key-value pairs.
    pub details: Vec<(String, String)>,
}

impl SessionEvent {
    /// Creates a new event builder.
    #[must_use]
    pub const fn builder(event_type: EventType) -> SessionEventBuilder {
        SessionEventBuilder::new(event_type)
    }

    /// Writes the event to the tracing framework.
    ///
    /// Failures are logged at WARN, everything else at INFO.
    pub fn emit(&self) {
        match self.outcome {
            EventOutcome::Success => tracing::info!(
                event_id = %self.id,
                event_type = ?self.event_type,
                outcome = ?self.outcome,
                username = ?self.username,
                details = ?self.details,
                "session_event"
            ),
            EventOutcome::Failure => tracing::warn!(
                event_id = %self.id,
                event_type = ?self.event_type,
                outcome = ?self.outcome,
                username = ?self.username,
                error = ?self.error,
                details = ?self.details,
                "session_event"
            ),
        }
    }
}

/// Builder for creating events.
#[derive(Debug)]
pub struct SessionEventBuilder {
    event_type: EventType,
    outcome: EventOutcome,
    username: Option<String>,
    error: Option<String>,
    details: Vec<(String, String)>,
}

impl SessionEventBuilder {
    /// Creates a new event builder.
    #[must_use]
    pub const fn new(event_type: EventType) -> Self {
        Self {
            event_type,
            outcome: EventOutcome::Success,
            username: None,
            error: None,
            details: Vec::new(),
        }
    }

    /// Sets the outcome to failure with an error message.
    #[must_use]
    pub fn failure(mut self, error: impl Into<String>) -> Self {
        self.outcome = EventOutcome::Failure;
        self.error = Some(error.into());
        self
    }

    /// Sets the username.
    #[must_use]
    pub fn username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    /// Adds a detail key-value pair.
    #[must_use]
    pub fn detail(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.details.push((key.into(), value.into()));
        self
    }

    /// Builds the event.
    #[must_use]
    pub fn build(self) -> SessionEvent {
        SessionEvent {
            id: Uuid::now_v7(),
            timestamp: Utc::now(),
            event_type: self.event_type,
            outcome: self.outcome,
            username: self.username,
            error: self.error,
            details: self.details,
        }
    }

    /// Builds the event and emits it.
    pub fn emit(self) {
        self.build().emit();
    }
}
