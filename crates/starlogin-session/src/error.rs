//! Error types for the session layer.

use starlogin_protocol::ChatAccountId;

/// Why a submitted verification code was not accepted.
///
/// Both variants are user-visible: the service turns them into a chat
/// reply. Neither changes the store.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    /// Nobody joined the game server with this chat account, or the
    /// pending verification was already completed or swept away.
    #[error("no pending verification for {0}")]
    NoPendingSession(ChatAccountId),

    /// A verification is pending, but the code doesn't match or its TTL
    /// has run out. The session stays so the player can retry.
    #[error("invalid or expired code for {0}")]
    InvalidOrExpiredCode(ChatAccountId),
}
