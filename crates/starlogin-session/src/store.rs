//! The session store: every pending verification, keyed by chat account.
//!
//! This is the single source of truth for the verification flow:
//! - the login handler `put`s a session when a player joins
//! - the command handler `verify`s a submitted code against it
//! - the sweeper `sweep`s out sessions whose TTL has run out
//!
//! # Concurrency note
//!
//! `SessionStore` is NOT thread-safe by itself — it's a plain `HashMap`.
//! The service owns it behind a mutex and never holds the lock across an
//! `.await`, so every operation here runs to completion before any
//! outbound call starts. Nobody can observe a half-applied update.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use starlogin_protocol::ChatAccountId;
use tokio::sync::Mutex;
use tokio::time::Instant;

use crate::{SessionConfig, SessionError, VerificationSession};

/// A store shared between the event handlers and the sweeper.
pub type SharedStore<S> = Arc<Mutex<SessionStore<S>>>;

/// In-memory map from chat account to its pending verification.
///
/// ## Lifecycle
///
/// ```text
///  put() ──→ [pending] ──verify() ok──→ removed
///   ↑            │
///   │            ├──verify() wrong/stale──→ [pending] (unchanged)
///   │            │
///   │            └──sweep() once age ≥ ttl──→ removed
///   │
///   └── put() again for the same account replaces the session
/// ```
#[derive(Debug)]
pub struct SessionStore<S> {
    /// One session per chat account; inserting replaces.
    sessions: HashMap<ChatAccountId, VerificationSession<S>>,

    config: SessionConfig,
}

impl<S> SessionStore<S> {
    /// Creates an empty store with the given config.
    pub fn new(config: SessionConfig) -> Self {
        Self {
            sessions: HashMap::new(),
            config,
        }
    }

    /// Stores `session` under its chat account, replacing whatever was
    /// pending there. Last write wins: the replaced session's code stops
    /// working immediately.
    ///
    /// Returns the replaced session, if any.
    pub fn put(
        &mut self,
        session: VerificationSession<S>,
    ) -> Option<VerificationSession<S>> {
        let key = session.chat_account_id.clone();
        let replaced = self.sessions.insert(key, session);
        if let Some(old) = &replaced {
            tracing::debug!(
                chat_account = %old.chat_account_id,
                player = %old.player_name,
                "pending verification replaced"
            );
        }
        replaced
    }

    /// Looks up the session pending for `key`.
    pub fn get(&self, key: &ChatAccountId) -> Option<&VerificationSession<S>> {
        self.sessions.get(key)
    }

    /// Removes the session pending for `key`. Removing an absent key is a
    /// no-op.
    pub fn remove(&mut self, key: &ChatAccountId) -> Option<VerificationSession<S>> {
        self.sessions.remove(key)
    }

    /// Checks `code` against the session pending for `key` at `now`.
    ///
    /// On success the session is removed and handed back so the caller can
    /// complete the login on its server. On failure the store is untouched.
    ///
    /// # Errors
    /// - [`SessionError::NoPendingSession`] → nothing stored for `key`
    /// - [`SessionError::InvalidOrExpiredCode`] → wrong code, or
    ///   `now - created_at >= ttl`
    pub fn verify(
        &mut self,
        key: &ChatAccountId,
        code: &str,
        now: Instant,
    ) -> Result<VerificationSession<S>, SessionError> {
        let session = self
            .sessions
            .get(key)
            .ok_or_else(|| SessionError::NoPendingSession(key.clone()))?;

        if !session.accepts(code, self.config.ttl, now) {
            return Err(SessionError::InvalidOrExpiredCode(key.clone()));
        }

        self.sessions
            .remove(key)
            .ok_or_else(|| SessionError::NoPendingSession(key.clone()))
    }

    /// Removes every session whose age at `now` has reached the TTL.
    ///
    /// Returns how many were removed. Younger sessions are left alone.
    pub fn sweep(&mut self, now: Instant) -> usize {
        let ttl = self.config.ttl;
        let before = self.sessions.len();
        self.sessions.retain(|_, session| session.is_fresh(ttl, now));
        before - self.sessions.len()
    }

    /// The configured time-to-live.
    pub fn ttl(&self) -> Duration {
        self.config.ttl
    }

    /// Number of pending sessions (including expired ones not yet swept).
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    /// Wraps the store for sharing across tasks.
    pub fn into_shared(self) -> SharedStore<S> {
        Arc::new(Mutex::new(self))
    }
}

impl<S> Default for SessionStore<S> {
    fn default() -> Self {
        Self::new(SessionConfig::default())
    }
}

// =========================================================================
// Tests
// =========================================================================
