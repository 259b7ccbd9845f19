//! Event handlers: player joins and chat commands.
//!
//! Each inbound event is handled by one call into this module. The flow:
//!   - Join: generate a code → store the session → notify on chat now
//!     and in-game after a delay (both in background tasks)
//!   - Direct message: filter → parse `#login <code>` → verify against the
//!     store → complete the login or reply with the reason it failed
//!
//! Store updates happen under the lock and finish before any outbound
//! call is issued. Outbound calls then run on their own tasks, so the
//! handlers return without waiting on the chat platform or the game
//! server. Failures are logged and never reach the store.

use std::sync::Arc;

use starlogin_protocol::{
    ChatAdapter, DeliveryError, DirectMessage, GameServer, PlayerJoin,
    ReplyContext,
};
use starlogin_session::{CodeGenerator, SessionError, VerificationSession};
use tokio::time::{self, Instant};

use crate::config::Messages;
use crate::service::ServiceState;

/// What a direct message did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandResult {
    /// Not for us; nothing was sent and nothing changed.
    Ignored(IgnoreReason),
    /// A verification command that failed. The player got a reply.
    Rejected(SessionError),
    /// The player is logged in and the session is gone.
    Completed { player_name: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    /// The bot's own account sent it.
    OwnMessage,
    /// It doesn't start with the command prefix.
    NotACommand,
}

/// Extracts the submitted code from a chat message.
///
/// The message is trimmed, must start with `prefix` exactly
/// (case-sensitive), and whatever follows is trimmed again. Returns `None`
/// when the message is not a verification command.
///
/// ```rust
/// use starlogin::parse_login_command;
///
/// assert_eq!(parse_login_command("  #login  123456 ", "#login "), Some("123456"));
/// assert_eq!(parse_login_command("#LOGIN 123456", "#login "), None);
/// assert_eq!(parse_login_command("#login", "#login "), None);
/// ```
pub fn parse_login_command<'a>(raw: &'a str, prefix: &str) -> Option<&'a str> {
    raw.trim().strip_prefix(prefix).map(str::trim)
}

/// Handles a player joining a game server. Returns the issued code.
///
/// Returns as soon as the session is stored and the notifications are
/// scheduled; it never waits on the chat platform or the game server.
pub(crate) async fn handle_player_join<C, S, G>(
    state: &Arc<ServiceState<C, S, G>>,
    server: S,
    join: PlayerJoin,
) -> String
where
    C: ChatAdapter,
    S: GameServer,
    G: CodeGenerator,
{
    let code = state.codes.generate();
    let chat_account = join.chat_account_id();
    let player = join.player_name;

    {
        let mut store = state.store.lock().await;
        store.put(VerificationSession::new(
            chat_account.clone(),
            player.clone(),
            server.clone(),
            code.clone(),
            Instant::now(),
        ));
    }

    tracing::info!(%player, %chat_account, "verification issued");
    tracing::debug!(%player, %code, "verification code");

    // --- Chat notice, right away ---
    let notice = state.config.messages.join_notice(&player);
    {
        let state = Arc::clone(state);
        let player = player.clone();
        tokio::spawn(async move {
            let bot = &state.config.bot_account_id;
            match state.chat.send_direct_message(bot, &chat_account, &notice).await {
                Ok(()) => tracing::info!(%player, "login notice sent"),
                Err(e) => tracing::warn!(%player, error = %e, "failed to send login notice"),
            }
        });
    }

    // --- In-game prompts, once the client has loaded ---
    let messages = &state.config.messages;
    let title = Messages::render(&messages.title_command, &player, &code);
    let tell = Messages::render(&messages.tell_command, &player, &code);
    let delay = state.config.prompt_delay;
    let placeholders = state.config.enable_placeholders;
    tokio::spawn(async move {
        time::sleep(delay).await;
        run_command_logged(&server, &player, &title, placeholders).await;
        run_command_logged(&server, &player, &tell, placeholders).await;
        tracing::info!(%player, "in-game prompts sent");
    });

    code
}

/// Handles a private message sent to the bot.
///
/// The verdict is final once this returns. The reply and any completion
/// commands are still in flight.
pub(crate) async fn handle_direct_message<C, S, G, R>(
    state: &Arc<ServiceState<C, S, G>>,
    message: &DirectMessage,
    reply: R,
) -> CommandResult
where
    C: ChatAdapter,
    S: GameServer,
    G: CodeGenerator,
    R: ReplyContext,
{
    let config = &state.config;
    let sender = &message.sender_id;

    if *sender == config.bot_account_id {
        tracing::trace!("ignoring message from the bot itself");
        return CommandResult::Ignored(IgnoreReason::OwnMessage);
    }

    let Some(code) = parse_login_command(&message.raw_message, &config.command_prefix) else {
        tracing::trace!(%sender, "ignoring non-command message");
        return CommandResult::Ignored(IgnoreReason::NotACommand);
    };

    // Lock only for the verification, drop before any outbound call.
    let verdict = {
        let mut store = state.store.lock().await;
        store.verify(sender, code, Instant::now())
    };

    let session = match verdict {
        Ok(session) => session,
        Err(err) => {
            tracing::warn!(%sender, error = %err, "verification rejected");
            let text = match &err {
                SessionError::NoPendingSession(_) => config.messages.no_pending_reply.clone(),
                SessionError::InvalidOrExpiredCode(_) => config.messages.invalid_code_reply.clone(),
            };
            tokio::spawn(async move { reply_logged(&reply, &text).await });
            return CommandResult::Rejected(err);
        }
    };

    let player_name = session.player_name.clone();
    let complete = Messages::render(&config.messages.complete_command, &player_name, code);
    let welcome = Messages::render(&config.messages.success_title_command, &player_name, code);
    let success = config.messages.success_reply.clone();
    let placeholders = config.enable_placeholders;

    // None of these waits on another; a hung bridge can't hold back the
    // chat reply.
    tokio::spawn(async move {
        let player = session.player_name.as_str();
        tokio::join!(
            run_command_logged(&session.server, player, &complete, placeholders),
            run_command_logged(&session.server, player, &welcome, placeholders),
            reply_logged(&reply, &success),
        );
    });

    tracing::info!(player = %player_name, %sender, "verification completed");
    CommandResult::Completed { player_name }
}

/// Runs a game command, logging any failure. Returns whether it succeeded.
async fn run_command_logged<S: GameServer>(
    server: &S,
    player: &str,
    command: &str,
    placeholders: bool,
) -> bool {
    let error = match server.run_command(player, command, placeholders).await {
        Ok(outcome) if outcome.success => {
            tracing::trace!(%player, %command, "game command ran");
            return true;
        }
        Ok(outcome) => DeliveryError::CommandRejected {
            command: command.to_string(),
            output: outcome.text,
        },
        Err(e) => e,
    };
    tracing::warn!(%player, error = %error, "game command failed");
    false
}

async fn reply_logged<R: ReplyContext>(reply: &R, text: &str) {
    if let Err(e) = reply.reply(Messages::reply(text)).await {
        tracing::warn!(error = %e, "failed to reply");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PREFIX: &str = "#login ";

    #[test]
    fn test_parse_login_command_extracts_code() {
        assert_eq!(parse_login_command("#login 123456", PREFIX), Some("123456"));
    }

    #[test]
    fn test_parse_login_command_trims_message_and_code() {
        assert_eq!(parse_login_command("\t #login   123456  \n", PREFIX), Some("123456"));
    }

    #[test]
    fn test_parse_login_command_is_case_sensitive() {
        assert_eq!(parse_login_command("#Login 123456", PREFIX), None);
    }

    #[test]
    fn test_parse_login_command_requires_space_after_keyword() {
        assert_eq!(parse_login_command("#login123456", PREFIX), None);
        assert_eq!(parse_login_command("#login", PREFIX), None);
        assert_eq!(parse_login_command("#login   ", PREFIX), None);
    }

    #[test]
    fn test_parse_login_command_ignores_other_text() {
        assert_eq!(parse_login_command("hello bot", PREFIX), None);
        assert_eq!(parse_login_command("please #login 123456", PREFIX), None);
    }

    #[test]
    fn test_parse_login_command_keeps_inner_garbage() {
        // Whatever follows the prefix is the code, even if it can't match.
        assert_eq!(parse_login_command("#login 12 34", PREFIX), Some("12 34"));
    }
}
