//! Service configuration and user-facing texts.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use starlogin_protocol::{ChatAccountId, MessageChain};
use starlogin_session::SessionConfig;
use starlogin_sweep::SweepConfig;

use crate::ConfigError;

// ---------------------------------------------------------------------------
// StarLoginConfig
// ---------------------------------------------------------------------------

/// Everything the service needs to know that isn't code.
///
/// Every field has a default, so a config file only needs to name what it
/// changes:
///
/// ```json
/// { "bot_account_id": "725439308", "code_ttl_ms": 300000 }
/// ```
///
/// Durations are written in milliseconds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StarLoginConfig {
    /// The bot's own chat account. Notifications are sent from it, and
    /// messages from it are ignored.
    pub bot_account_id: ChatAccountId,

    /// Literal that starts a verification command. Case-sensitive; the
    /// trailing space is part of it.
    pub command_prefix: String,

    /// How long an issued code stays valid.
    #[serde(rename = "code_ttl_ms", with = "duration_ms")]
    pub code_ttl: Duration,

    /// Delay between the join and the in-game prompts, so the client has
    /// finished loading when they render.
    #[serde(rename = "prompt_delay_ms", with = "duration_ms")]
    pub prompt_delay: Duration,

    /// Time between two expiry sweeps.
    #[serde(rename = "sweep_interval_ms", with = "duration_ms")]
    pub sweep_interval: Duration,

    /// Upper bound of a random delay added before the first sweep. Zero
    /// sweeps exactly one interval after start.
    #[serde(rename = "sweep_jitter_ms", with = "duration_ms")]
    pub sweep_jitter: Duration,

    /// Ask the game server to expand placeholders in the commands we send.
    pub enable_placeholders: bool,

    pub messages: Messages,
}

impl Default for StarLoginConfig {
    fn default() -> Self {
        Self {
            bot_account_id: ChatAccountId::default(),
            command_prefix: Self::DEFAULT_COMMAND_PREFIX.to_string(),
            code_ttl: SessionConfig::DEFAULT_TTL,
            prompt_delay: Self::DEFAULT_PROMPT_DELAY,
            sweep_interval: SweepConfig::DEFAULT_INTERVAL,
            sweep_jitter: Duration::ZERO,
            enable_placeholders: false,
            messages: Messages::default(),
        }
    }
}

impl StarLoginConfig {
    pub const DEFAULT_COMMAND_PREFIX: &'static str = "#login ";
    pub const DEFAULT_PROMPT_DELAY: Duration = Duration::from_millis(4000);

    /// Default config for the given bot account.
    pub fn for_bot(bot_account_id: impl Into<ChatAccountId>) -> Self {
        Self {
            bot_account_id: bot_account_id.into(),
            ..Default::default()
        }
    }

    /// Parses a JSON config. Missing fields keep their defaults.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads and parses a JSON config file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    /// Checks the values that would make the service misbehave.
    ///
    /// # Errors
    /// [`ConfigError::Invalid`] naming the first offending field.
    pub fn validated(self) -> Result<Self, ConfigError> {
        if self.bot_account_id.as_str().trim().is_empty() {
            return Err(ConfigError::Invalid("bot_account_id must be set".into()));
        }
        if self.command_prefix.trim().is_empty() {
            return Err(ConfigError::Invalid("command_prefix must not be blank".into()));
        }
        if self.code_ttl.is_zero() {
            return Err(ConfigError::Invalid("code_ttl_ms must be positive".into()));
        }
        if self.sweep_interval.is_zero() {
            return Err(ConfigError::Invalid("sweep_interval_ms must be positive".into()));
        }
        Ok(self)
    }

    /// The session-layer view of this config.
    pub fn session_config(&self) -> SessionConfig {
        SessionConfig { ttl: self.code_ttl }
    }

    /// The sweeper view of this config.
    pub fn sweep_config(&self) -> SweepConfig {
        SweepConfig {
            interval: self.sweep_interval,
            initial_jitter: self.sweep_jitter,
        }
    }
}

// ---------------------------------------------------------------------------
// Messages
// ---------------------------------------------------------------------------

/// Texts and command templates.
///
/// Command templates are sent to the game server as-is after substituting
/// `{player}` and `{code}`. The `§` sequences are in-game color codes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Messages {
    /// Opens the join notice, followed by the player name.
    pub join_greeting: String,
    /// Rest of the join notice.
    pub join_instructions: String,
    pub title_command: String,
    pub tell_command: String,
    pub complete_command: String,
    pub success_title_command: String,
    pub no_pending_reply: String,
    pub invalid_code_reply: String,
    pub success_reply: String,
}

impl Default for Messages {
    fn default() -> Self {
        Self {
            join_greeting: "Dear ".into(),
            join_instructions: " you have joined the server! Please send the code shown \
                in-game to finish logging in, formatted as '#login <code>'. If this wasn't \
                you, contact the server owner or an admin right away!"
                .into(),
            title_command: "vtitle {player} §a§l{player} please complete verification".into(),
            tell_command: "vtell {player} §a§lDM the bot with the verification code: {code}"
                .into(),
            complete_command: "endlogin {player}".into(),
            success_title_command: "vtitle {player} \"{player} welcome home!\"".into(),
            no_pending_reply: "No pending verification found. Please rejoin the server to \
                get a new code!"
                .into(),
            invalid_code_reply: "The code is wrong or has expired. Please get a new one!".into(),
            success_reply: "Welcome home!".into(),
        }
    }
}

impl Messages {
    /// Substitutes `{player}` and `{code}` in `template`.
    ///
    /// One pass, left to right: text coming from a substitution is never
    /// scanned again, so a player named `{code}` stays `{code}`.
    pub fn render(template: &str, player: &str, code: &str) -> String {
        let mut out = String::with_capacity(template.len() + player.len() + code.len());
        let mut rest = template;
        while let Some(open) = rest.find('{') {
            out.push_str(&rest[..open]);
            let tail = &rest[open..];
            if let Some(after) = tail.strip_prefix("{player}") {
                out.push_str(player);
                rest = after;
            } else if let Some(after) = tail.strip_prefix("{code}") {
                out.push_str(code);
                rest = after;
            } else {
                out.push('{');
                rest = &tail[1..];
            }
        }
        out.push_str(rest);
        out
    }

    /// The direct message sent when `player` joins.
    pub fn join_notice(&self, player: &str) -> MessageChain {
        MessageChain::new()
            .text(self.join_greeting.as_str())
            .text(player)
            .text(self.join_instructions.as_str())
    }

    /// A single-text chat reply.
    pub fn reply(text: &str) -> MessageChain {
        MessageChain::new().text(text)
    }
}

/// Serde adapter: `Duration` as whole milliseconds.
mod duration_ms {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(value.as_millis() as u64)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_millis)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_matches_documented_constants() {
        let config = StarLoginConfig::default();
        assert_eq!(config.command_prefix, "#login ");
        assert_eq!(config.code_ttl, Duration::from_secs(600));
        assert_eq!(config.prompt_delay, Duration::from_millis(4000));
        assert_eq!(config.sweep_interval, Duration::from_secs(3600));
        assert_eq!(config.sweep_jitter, Duration::ZERO);
        assert!(!config.enable_placeholders);
    }

    #[test]
    fn test_from_json_str_partial_keeps_defaults() {
        let config =
            StarLoginConfig::from_json_str(r#"{"bot_account_id":"725439308","code_ttl_ms":5000}"#)
                .unwrap();

        assert_eq!(config.bot_account_id, ChatAccountId::from("725439308"));
        assert_eq!(config.code_ttl, Duration::from_secs(5));
        assert_eq!(config.prompt_delay, StarLoginConfig::DEFAULT_PROMPT_DELAY);
        assert_eq!(config.messages, Messages::default());
    }

    #[test]
    fn test_from_json_str_overrides_single_message() {
        let config =
            StarLoginConfig::from_json_str(r#"{"messages":{"success_reply":"Hi!"}}"#).unwrap();

        assert_eq!(config.messages.success_reply, "Hi!");
        assert_eq!(config.messages.complete_command, "endlogin {player}");
    }

    #[test]
    fn test_from_json_str_malformed_returns_parse_error() {
        let result = StarLoginConfig::from_json_str("{ nope");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_from_json_file_missing_returns_io_error() {
        let result = StarLoginConfig::from_json_file("/definitely/not/here.json");
        assert!(matches!(result, Err(ConfigError::Io { .. })));
    }

    #[test]
    fn test_validated_requires_bot_account() {
        let result = StarLoginConfig::default().validated();
        assert!(matches!(result, Err(ConfigError::Invalid(msg)) if msg.contains("bot_account_id")));
    }

    #[test]
    fn test_validated_rejects_zero_ttl() {
        let config = StarLoginConfig {
            code_ttl: Duration::ZERO,
            ..StarLoginConfig::for_bot("bot")
        };
        assert!(matches!(config.validated(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_validated_accepts_defaults_with_bot() {
        assert!(StarLoginConfig::for_bot("bot").validated().is_ok());
    }

    #[test]
    fn test_layer_configs_follow_top_level() {
        let config = StarLoginConfig {
            code_ttl: Duration::from_secs(30),
            sweep_interval: Duration::from_secs(90),
            sweep_jitter: Duration::from_secs(5),
            ..StarLoginConfig::for_bot("bot")
        };
        assert_eq!(config.session_config().ttl, Duration::from_secs(30));
        assert_eq!(config.sweep_config().interval, Duration::from_secs(90));
        assert_eq!(config.sweep_config().initial_jitter, Duration::from_secs(5));
    }

    #[test]
    fn test_from_json_str_reads_sweep_jitter() {
        let config = StarLoginConfig::from_json_str(r#"{"sweep_jitter_ms":2500}"#).unwrap();
        assert_eq!(config.sweep_jitter, Duration::from_millis(2500));
    }

    #[test]
    fn test_render_substitutes_player_and_code() {
        let messages = Messages::default();
        assert_eq!(
            Messages::render(&messages.tell_command, "Alice", "123456"),
            "vtell Alice §a§lDM the bot with the verification code: 123456"
        );
        assert_eq!(
            Messages::render(&messages.title_command, "Alice", ""),
            "vtitle Alice §a§lAlice please complete verification"
        );
        assert_eq!(Messages::render(&messages.complete_command, "Alice", ""), "endlogin Alice");
    }

    #[test]
    fn test_render_does_not_expand_placeholders_inside_player_name() {
        let messages = Messages::default();
        assert_eq!(
            Messages::render(&messages.title_command, "{code}", "123456"),
            "vtitle {code} §a§l{code} please complete verification"
        );
        assert_eq!(
            Messages::render("{code} for {player}", "A", "{player}"),
            "{player} for A"
        );
    }

    #[test]
    fn test_render_keeps_unknown_braces() {
        assert_eq!(
            Messages::render("{x} {player} {", "Alice", "1"),
            "{x} Alice {"
        );
    }

    #[test]
    fn test_join_notice_contains_player_and_format() {
        let text = Messages::default().join_notice("Alice").as_plain_text();
        assert!(text.starts_with("Dear Alice you have joined"));
        assert!(text.contains("'#login <code>'"));
    }
}
