//! Session types: the pending verification of one player.
//!
//! A verification session is the server's record of "someone joined the
//! game as this player and claims this chat account". It tracks:
//! - WHO should confirm (`chat_account_id`)
//! - WHICH player and server to log in on success (`player_name`, `server`)
//! - WHAT they must send back (`code`)
//! - WHEN it was issued, so it can expire (`created_at`)

use std::time::Duration;

use starlogin_protocol::ChatAccountId;
use tokio::time::Instant;

// ---------------------------------------------------------------------------
// SessionConfig
// ---------------------------------------------------------------------------

/// Configuration for verification sessions.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// How long a code stays valid after it was issued.
    ///
    /// A session is matchable while `now - created_at < ttl`. At exactly
    /// `ttl` it is already expired.
    pub ttl: Duration,
}

impl SessionConfig {
    /// Ten minutes.
    pub const DEFAULT_TTL: Duration = Duration::from_secs(10 * 60);
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            ttl: Self::DEFAULT_TTL,
        }
    }
}

// ---------------------------------------------------------------------------
// VerificationSession
// ---------------------------------------------------------------------------

/// A single pending verification.
///
/// Sessions are never edited in place: a repeated join replaces the whole
/// record, which is what invalidates the previous code.
///
/// `S` is the game server handle; the session carries it so a successful
/// verification can be completed on the server the player actually joined.
/// `Instant` is Tokio's monotonic clock, so tests can pause and advance it.
#[derive(Debug, Clone)]
pub struct VerificationSession<S> {
    /// Chat account that must send the code back. Also the store key.
    pub chat_account_id: ChatAccountId,

    /// Display name of the player on the game server.
    pub player_name: String,

    /// Opaque handle to the originating game server.
    pub server: S,

    /// The 6-digit code the player must submit.
    pub code: String,

    /// When the code was issued.
    pub created_at: Instant,
}

impl<S> VerificationSession<S> {
    pub fn new(
        chat_account_id: ChatAccountId,
        player_name: impl Into<String>,
        server: S,
        code: impl Into<String>,
        created_at: Instant,
    ) -> Self {
        Self {
            chat_account_id,
            player_name: player_name.into(),
            server,
            code: code.into(),
            created_at,
        }
    }

    /// Time elapsed since the code was issued, as seen at `now`.
    ///
    /// Saturates to zero if `now` is before `created_at`.
    pub fn age(&self, now: Instant) -> Duration {
        now.saturating_duration_since(self.created_at)
    }

    /// Whether the session is still inside its TTL at `now`.
    pub fn is_fresh(&self, ttl: Duration, now: Instant) -> bool {
        self.age(now) < ttl
    }

    /// Whether `code` completes this session at `now`.
    pub fn accepts(&self, code: &str, ttl: Duration, now: Instant) -> bool {
        self.code == code && self.is_fresh(ttl, now)
    }
}
