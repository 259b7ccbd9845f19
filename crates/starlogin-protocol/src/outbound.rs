//! Collaborator traits: the calls StarLogin makes into other platforms.
//!
//! StarLogin doesn't talk to a game server or a chat platform itself.
//! Hosts implement these traits on top of whatever bridge and chat adapter
//! they run, and the service calls them while handling events. Tests
//! implement them with recording mocks.
//!
//! All three are "async traits" written the same way: a plain method that
//! returns `impl Future + Send`, so the returned futures can be moved into
//! spawned Tokio tasks.

use std::future::Future;

use crate::{ChatAccountId, CommandOutcome, DeliveryError, MessageChain};

/// Handle back to the game server a player joined through.
///
/// StarLogin never looks inside it. It is cloned into the pending
/// verification and into the delayed-prompt task, and used only to run
/// commands on that same server.
///
/// # Trait bounds
///
/// - `Clone` → the handle is stored in the session store and also moved
///   into background tasks. Implementations are usually an `Arc` inside.
/// - `Send + Sync + 'static` → it crosses task boundaries.
pub trait GameServer: Clone + Send + Sync + 'static {
    /// Runs `command` on the server on behalf of `player_name`.
    ///
    /// `enable_placeholders` asks the server to expand placeholder
    /// variables in the command before running it.
    ///
    /// # Returns
    /// - `Ok(CommandOutcome)` → the command reached the server; inspect
    ///   `success` to see what the server thought of it
    /// - `Err(DeliveryError)` → the command never ran
    fn run_command(
        &self,
        player_name: &str,
        command: &str,
        enable_placeholders: bool,
    ) -> impl Future<Output = Result<CommandOutcome, DeliveryError>> + Send;
}

/// Outbound side of the chat platform.
pub trait ChatAdapter: Send + Sync + 'static {
    /// Sends `chain` from the bot account `self_id` to `peer_id` as a
    /// private message.
    fn send_direct_message(
        &self,
        self_id: &ChatAccountId,
        peer_id: &ChatAccountId,
        chain: &MessageChain,
    ) -> impl Future<Output = Result<(), DeliveryError>> + Send;
}

/// Lets a handler answer the conversation an inbound message came from.
///
/// Handed over by value: the reply is sent from a background task after
/// the handler has returned.
pub trait ReplyContext: Send + Sync + 'static {
    fn reply(
        &self,
        chain: MessageChain,
    ) -> impl Future<Output = Result<(), DeliveryError>> + Send;
}
