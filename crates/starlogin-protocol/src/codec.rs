//! Codec trait and implementations for decoding inbound events.
//!
//! Hosts hand StarLogin events in whatever format their bridge produces.
//! The service doesn't care how events are serialized; it only needs
//! something that implements [`Codec`]. [`JsonCodec`] covers the JSON
//! lines that the console demo and most bridge logs use.

use serde::de::DeserializeOwned;

use crate::ProtocolError;

/// A codec that turns raw event bytes into typed values.
///
/// `Send + Sync + 'static` because the codec lives inside the long-running
/// host and may be used from any Tokio worker thread.
pub trait Codec: Send + Sync + 'static {
    /// Deserializes bytes back into a value.
    ///
    /// # Errors
    /// Returns `ProtocolError::Decode` if the bytes are malformed or don't
    /// match the expected type.
    fn decode<T: DeserializeOwned>(&self, data: &[u8]) -> Result<T, ProtocolError>;
}

// ---------------------------------------------------------------------------
// JsonCodec
// ---------------------------------------------------------------------------

/// A [`Codec`] that uses JSON (via `serde_json`).
///
/// Behind the `json` feature flag (enabled by default).
///
/// ## Example
///
/// ```rust
/// use starlogin_protocol::{Codec, InboundEvent, JsonCodec};
///
/// let codec = JsonCodec;
/// let event: InboundEvent = codec
///     .decode(br#"{"type":"direct_message","sender_id":"1","raw_message":"hi"}"#)
///     .unwrap();
///
/// assert!(matches!(event, InboundEvent::DirectMessage { .. }));
/// ```
#[cfg(feature = "json")]
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCodec;

#[cfg(feature = "json")]
impl Codec for JsonCodec {
    fn decode<T: DeserializeOwned>(&self, data: &[u8]) -> Result<T, ProtocolError> {
        // Blank lines are common in hand-written event files; report them
        // as a protocol error rather than a serde "EOF while parsing".
        if data.iter().all(u8::is_ascii_whitespace) {
            return Err(ProtocolError::InvalidMessage("empty event".into()));
        }
        serde_json::from_slice(data).map_err(ProtocolError::Decode)
    }
}
