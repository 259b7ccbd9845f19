//! Console host for StarLogin.
//!
//! Reads one JSON event per line from stdin and prints everything the
//! service would send to the chat platform or a game server:
//!
//! ```text
//! {"type":"player_join","server":"survival","player_name":"Alice","player_game_id":"10001"}
//! {"type":"direct_message","sender_id":"10001","raw_message":"#login 123456"}
//! ```
//!
//! Usage: `starlogin-console [config.json]`. Without a config file the bot
//! account is `STARLOGIN_BOT` or `725439308`.

use std::sync::Arc;

use starlogin::prelude::*;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

// ---------------------------------------------------------------------------
// Console collaborators
// ---------------------------------------------------------------------------

struct ConsoleChat;

impl ChatAdapter for ConsoleChat {
    async fn send_direct_message(
        &self,
        self_id: &ChatAccountId,
        peer_id: &ChatAccountId,
        chain: &MessageChain,
    ) -> Result<(), DeliveryError> {
        println!("[dm {self_id} -> {peer_id}] {chain}");
        Ok(())
    }
}

#[derive(Clone)]
struct ConsoleServer {
    name: Arc<str>,
}

impl GameServer for ConsoleServer {
    async fn run_command(
        &self,
        player_name: &str,
        command: &str,
        enable_placeholders: bool,
    ) -> Result<CommandOutcome, DeliveryError> {
        println!("[{} as {player_name}, papi={enable_placeholders}] /{command}", self.name);
        Ok(CommandOutcome::ok(""))
    }
}

struct ConsoleReply {
    to: ChatAccountId,
}

impl ReplyContext for ConsoleReply {
    async fn reply(&self, chain: MessageChain) -> Result<(), DeliveryError> {
        println!("[reply -> {}] {chain}", self.to);
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Bootstrap
// ---------------------------------------------------------------------------

fn load_config() -> Result<StarLoginConfig, StarLoginError> {
    match std::env::args().nth(1) {
        Some(path) => Ok(StarLoginConfig::from_json_file(path)?),
        None => {
            let bot = std::env::var("STARLOGIN_BOT").unwrap_or_else(|_| "725439308".into());
            Ok(StarLoginConfig::for_bot(bot))
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("starlogin=info,starlogin_sweep=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let service = StarLoginBuilder::new()
        .config(load_config()?)
        .build::<_, ConsoleServer>(ConsoleChat)?;
    let _sweeper = service.spawn_sweeper();

    let codec = JsonCodec;
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    while let Some(line) = lines.next_line().await? {
        let event: InboundEvent = match codec.decode(line.as_bytes()) {
            Ok(event) => event,
            Err(e) => {
                tracing::warn!(error = %e, "skipping undecodable event");
                continue;
            }
        };

        match event {
            InboundEvent::PlayerJoin {
                server,
                player_name,
                player_game_id,
            } => {
                let server = ConsoleServer {
                    name: Arc::from(server),
                };
                let join = PlayerJoin {
                    player_name,
                    player_game_id,
                };
                service.on_player_join(server, join).await;
            }
            InboundEvent::DirectMessage {
                sender_id,
                raw_message,
            } => {
                let reply = ConsoleReply {
                    to: sender_id.clone(),
                };
                let message = DirectMessage {
                    sender_id,
                    raw_message,
                };
                let result = service.on_direct_message(&message, reply).await;
                tracing::debug!(?result, "direct message handled");
            }
        }
    }

    // Stdin closed: give pending in-game prompts a chance to fire.
    tokio::time::sleep(service.config().prompt_delay).await;
    Ok(())
}
