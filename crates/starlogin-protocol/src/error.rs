//! Error types for the protocol layer.
//!
//! Two families live here: [`ProtocolError`] for events that cannot be
//! decoded, and [`DeliveryError`] for outbound calls into the chat
//! platform or the game bridge that did not go through.

/// Errors that can occur while decoding events.
#[derive(Debug, thiserror::Error)]
pub enum ProtocolError {
    /// Deserialization failed: malformed JSON, missing fields, or an
    /// unknown event type.
    #[cfg(feature = "json")]
    #[error("decode failed: {0}")]
    Decode(serde_json::Error),

    /// The event parsed but makes no sense (for example an empty line).
    #[error("invalid message: {0}")]
    InvalidMessage(String),
}

/// An outbound call to a collaborator failed.
///
/// Delivery failures are never surfaced to the player and never touch the
/// pending verification; callers log them and move on.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DeliveryError {
    /// The chat platform refused or failed to deliver a direct message.
    #[error("direct message to {target} failed: {reason}")]
    DirectMessage { target: String, reason: String },

    /// The bridge could not run a command (connection gone, timeout on
    /// the bridge side, ...).
    #[error("command `{command}` failed: {reason}")]
    Command { command: String, reason: String },

    /// The command reached the game server, which reported failure.
    #[error("command `{command}` rejected by server: {output}")]
    CommandRejected { command: String, output: String },

    /// Replying through the inbound message's context failed.
    #[error("reply failed: {0}")]
    Reply(String),
}
