//! Shared vocabulary for StarLogin.
//!
//! This crate defines what the other layers exchange with the outside
//! world:
//!
//! - **Types** ([`ChatAccountId`], [`MessageChain`], [`PlayerJoin`],
//!   [`DirectMessage`], [`InboundEvent`]) — identities, formatted chat
//!   messages, and the events hosts deliver.
//! - **Collaborators** ([`GameServer`], [`ChatAdapter`], [`ReplyContext`])
//!   — the calls StarLogin makes into the game bridge and chat platform.
//! - **Codec** ([`Codec`] trait, [`JsonCodec`]) — decoding events from
//!   bytes.
//! - **Errors** ([`ProtocolError`], [`DeliveryError`]).
//!
//! # Architecture
//!
//! ```text
//! Service (handlers)  → Session (pending verifications)
//!        ↓
//! Protocol (this crate) ← implemented by the host's bridge and chat adapter
//! ```

mod codec;
mod error;
mod outbound;
mod types;

pub use codec::Codec;
#[cfg(feature = "json")]
pub use codec::JsonCodec;
pub use error::{DeliveryError, ProtocolError};
pub use outbound::{ChatAdapter, GameServer, ReplyContext};
pub use types::{
    ChatAccountId, CommandOutcome, DirectMessage, InboundEvent, MessageChain,
    PlayerJoin, Segment,
};
