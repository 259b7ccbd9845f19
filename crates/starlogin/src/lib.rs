//! # StarLogin
//!
//! Links a game-server player to a chat account with a short-lived numeric
//! code.
//!
//! When a player joins, StarLogin issues a 6-digit code, shows it in-game,
//! and asks the player (over chat) to send it back as `#login <code>`. A
//! correct code within ten minutes completes the login on the game server.
//!
//! The host implements [`GameServer`], [`ChatAdapter`] and [`ReplyContext`]
//! on top of its bridge and chat platform, then forwards events:
//!
//! ```rust,ignore
//! use starlogin::prelude::*;
//!
//! let service = StarLoginBuilder::new()
//!     .bot_account("725439308")
//!     .build::<_, MyServer>(my_chat)?;
//! service.spawn_sweeper();
//!
//! service.on_player_join(server, join).await;
//! service.on_direct_message(&message, reply).await;
//! ```

mod config;
mod error;
mod handler;
mod service;

pub use config::{Messages, StarLoginConfig};
pub use error::{ConfigError, StarLoginError};
pub use handler::{CommandResult, IgnoreReason, parse_login_command};
pub use service::{StarLogin, StarLoginBuilder};

/// Everything a host usually needs.
pub mod prelude {
    pub use crate::{
        CommandResult, ConfigError, IgnoreReason, Messages, StarLogin, StarLoginBuilder,
        StarLoginConfig, StarLoginError,
    };
    pub use starlogin_protocol::{
        ChatAccountId, ChatAdapter, Codec, CommandOutcome, DeliveryError, DirectMessage,
        GameServer, InboundEvent, JsonCodec, MessageChain, PlayerJoin, ReplyContext,
    };
    pub use starlogin_session::{CodeGenerator, RandomCodes, SessionError};
}
