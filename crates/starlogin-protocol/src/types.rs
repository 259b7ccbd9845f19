//! Core types shared by every StarLogin layer.
//!
//! This module defines the data that crosses the boundary between StarLogin
//! and the platforms it talks to: the identity of a chat account, the
//! formatted messages sent to the chat platform, and the events that the
//! game bridge and the chat adapter deliver to us.

use serde::{Deserialize, Serialize};

use std::fmt;

// ---------------------------------------------------------------------------
// Identity types
// ---------------------------------------------------------------------------

/// Opaque identifier of an account on the chat platform.
///
/// A "newtype wrapper" around `String`: the chat platform decides what an
/// account id looks like (a QQ number, a snowflake, a handle), and we only
/// ever compare it, hash it, and hand it back. Wrapping it keeps it from
/// being mixed up with player names or codes, which are also strings.
///
/// `#[serde(transparent)]` serializes it as the bare string.
#[derive(
    Debug,
    Clone,
    Default,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
)]
#[serde(transparent)]
pub struct ChatAccountId(pub String);

impl ChatAccountId {
    /// Creates an id from anything string-like.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrows the raw id.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ChatAccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ChatAccountId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for ChatAccountId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

// ---------------------------------------------------------------------------
// MessageChain
// ---------------------------------------------------------------------------

/// One piece of a chat message.
///
/// Chat platforms don't send flat strings; they send a sequence of typed
/// segments. We only need the three kinds StarLogin actually produces.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum Segment {
    /// Plain text, rendered verbatim.
    Text(String),
    /// A line break.
    NextLine,
    /// A mention of another chat account, rendered as `@id`.
    At(ChatAccountId),
}

/// An ordered chain of [`Segment`]s forming a single chat message.
///
/// Built fluently:
///
/// ```rust
/// use starlogin_protocol::MessageChain;
///
/// let chain = MessageChain::new()
///     .text("Dear ")
///     .text("Alice")
///     .next_line()
///     .text("welcome!");
///
/// assert_eq!(chain.as_plain_text(), "Dear Alice\nwelcome!");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MessageChain {
    segments: Vec<Segment>,
}

impl MessageChain {
    /// Creates an empty chain.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a text segment.
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.segments.push(Segment::Text(text.into()));
        self
    }

    /// Appends a line break.
    pub fn next_line(mut self) -> Self {
        self.segments.push(Segment::NextLine);
        self
    }

    /// Appends a mention of `id`.
    pub fn at(mut self, id: ChatAccountId) -> Self {
        self.segments.push(Segment::At(id));
        self
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Concatenates every segment into the text a user would see.
    pub fn as_plain_text(&self) -> String {
        let mut out = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Text(text) => out.push_str(text),
                Segment::NextLine => out.push('\n'),
                Segment::At(id) => {
                    out.push('@');
                    out.push_str(id.as_str());
                }
            }
        }
        out
    }
}

impl fmt::Display for MessageChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_plain_text())
    }
}

// ---------------------------------------------------------------------------
// Inbound events
// ---------------------------------------------------------------------------

/// A player finished logging in to a game server behind the bridge.
///
/// The originating server connection travels next to this struct (it is a
/// live handle, not data), so only the serializable part lives here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerJoin {
    /// Display name of the player on the game server.
    pub player_name: String,

    /// Identity token the bridge reports for the player.
    ///
    /// StarLogin uses this token directly as the chat account to notify and
    /// as the key of the pending verification.
    pub player_game_id: String,
}

impl PlayerJoin {
    /// The chat account this join is verified against.
    pub fn chat_account_id(&self) -> ChatAccountId {
        ChatAccountId::new(self.player_game_id.clone())
    }
}

/// A private message the chat adapter received for the bot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectMessage {
    /// Who sent it.
    pub sender_id: ChatAccountId,
    /// The message exactly as received, untrimmed.
    pub raw_message: String,
}

/// A tagged inbound event, as fed to the service by a host or a log replay.
///
/// JSON shape:
///
/// ```json
/// {"type":"player_join","server":"survival","player_name":"Alice","player_game_id":"10001"}
/// {"type":"direct_message","sender_id":"10001","raw_message":"#login 123456"}
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InboundEvent {
    PlayerJoin {
        /// Name of the game server the player joined.
        server: String,
        player_name: String,
        player_game_id: String,
    },
    DirectMessage {
        sender_id: ChatAccountId,
        raw_message: String,
    },
}

// ---------------------------------------------------------------------------
// Command outcome
// ---------------------------------------------------------------------------

/// What the game server reported after running a command.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CommandOutcome {
    /// Whether the server considers the command to have succeeded.
    pub success: bool,
    /// Console output of the command, if any.
    pub text: String,
}

impl CommandOutcome {
    /// A successful outcome with the given output.
    pub fn ok(text: impl Into<String>) -> Self {
        Self {
            success: true,
            text: text.into(),
        }
    }

    /// A failed outcome with the given output.
    pub fn failed(text: impl Into<String>) -> Self {
        Self {
            success: false,
            text: text.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // =====================================================================
    // ChatAccountId
    // =====================================================================

    #[test]
    fn test_chat_account_id_serializes_as_plain_string() {
        let json = serde_json::to_string(&ChatAccountId::from("725439308")).unwrap();
        assert_eq!(json, "\"725439308\"");
    }

    #[test]
    fn test_chat_account_id_display_is_raw_id() {
        assert_eq!(ChatAccountId::new("10001").to_string(), "10001");
    }

    // =====================================================================
    // MessageChain
    // =====================================================================

    #[test]
    fn test_message_chain_plain_text_concatenates_segments() {
        let chain = MessageChain::new()
            .text("Dear ")
            .text("Alice")
            .next_line()
            .at(ChatAccountId::from("42"))
            .text(" hi");

        assert_eq!(chain.as_plain_text(), "Dear Alice\n@42 hi");
        assert_eq!(chain.len(), 5);
        assert_eq!(chain.to_string(), chain.as_plain_text());
    }

    #[test]
    fn test_message_chain_empty() {
        let chain = MessageChain::new();
        assert!(chain.is_empty());
        assert_eq!(chain.as_plain_text(), "");
    }

    #[test]
    fn test_segment_json_shape() {
        let json = serde_json::to_string(&Segment::Text("hi".into())).unwrap();
        assert_eq!(json, r#"{"type":"text","data":"hi"}"#);

        let json = serde_json::to_string(&Segment::NextLine).unwrap();
        assert_eq!(json, r#"{"type":"next_line"}"#);
    }

    // =====================================================================
    // Events
    // =====================================================================

    #[test]
    fn test_player_join_uses_game_id_as_chat_account() {
        let join = PlayerJoin {
            player_name: "Alice".into(),
            player_game_id: "QQ1".into(),
        };
        assert_eq!(join.chat_account_id(), ChatAccountId::from("QQ1"));
    }

    #[test]
    fn test_inbound_event_player_join_deserializes_from_tagged_json() {
        let json = r#"{"type":"player_join","server":"S1","player_name":"Alice","player_game_id":"QQ1"}"#;
        let event: InboundEvent = serde_json::from_str(json).unwrap();
        assert_eq!(
            event,
            InboundEvent::PlayerJoin {
                server: "S1".into(),
                player_name: "Alice".into(),
                player_game_id: "QQ1".into(),
            }
        );
    }

    #[test]
    fn test_inbound_event_direct_message_deserializes_from_tagged_json() {
        let json = r#"{"type":"direct_message","sender_id":"QQ1","raw_message":" #login 123456 "}"#;
        let event: InboundEvent = serde_json::from_str(json).unwrap();
        assert_eq!(
            event,
            InboundEvent::DirectMessage {
                sender_id: ChatAccountId::from("QQ1"),
                raw_message: " #login 123456 ".into(),
            }
        );
    }

    #[test]
    fn test_inbound_event_unknown_type_is_rejected() {
        let json = r#"{"type":"group_message","sender_id":"QQ1"}"#;
        assert!(serde_json::from_str::<InboundEvent>(json).is_err());
    }

    #[test]
    fn test_command_outcome_constructors() {
        assert!(CommandOutcome::ok("done").success);
        assert!(!CommandOutcome::failed("unknown command").success);
    }
}
