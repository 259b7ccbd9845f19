//! `StarLogin` builder and service handle.
//!
//! This is the entry point for hosting StarLogin. It ties the layers
//! together: config → session store → handlers → sweeper.

use std::sync::Arc;

use starlogin_protocol::{ChatAccountId, ChatAdapter, DirectMessage, GameServer, PlayerJoin, ReplyContext};
use starlogin_session::{CodeGenerator, RandomCodes, SessionStore, SharedStore};
use starlogin_sweep::ExpirySweeper;
use tokio::task::JoinHandle;

use crate::handler::{CommandResult, handle_direct_message, handle_player_join};
use crate::{StarLoginConfig, StarLoginError};

/// Shared service state passed to every handler and background task.
///
/// Wrapped in `Arc` so it can be cheaply cloned across tasks. The store
/// is the only mutable part.
pub(crate) struct ServiceState<C, S, G> {
    pub(crate) config: StarLoginConfig,
    pub(crate) store: SharedStore<S>,
    pub(crate) chat: C,
    pub(crate) codes: G,
}

/// Builder for configuring a StarLogin service.
///
/// # Example
///
/// ```rust,ignore
/// use starlogin::prelude::*;
///
/// let service = StarLoginBuilder::new()
///     .bot_account("725439308")
///     .build::<_, MyServer>(my_chat_adapter)?;
/// service.spawn_sweeper();
/// ```
pub struct StarLoginBuilder<G = RandomCodes> {
    config: StarLoginConfig,
    codes: G,
}

impl StarLoginBuilder {
    /// Creates a builder with default settings and random codes.
    pub fn new() -> Self {
        Self {
            config: StarLoginConfig::default(),
            codes: RandomCodes,
        }
    }
}

impl Default for StarLoginBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl<G: CodeGenerator> StarLoginBuilder<G> {
    /// Replaces the whole configuration.
    pub fn config(mut self, config: StarLoginConfig) -> Self {
        self.config = config;
        self
    }

    /// Sets the bot's chat account.
    pub fn bot_account(mut self, id: impl Into<ChatAccountId>) -> Self {
        self.config.bot_account_id = id.into();
        self
    }

    /// Uses `codes` instead of random codes.
    pub fn codes<G2: CodeGenerator>(self, codes: G2) -> StarLoginBuilder<G2> {
        StarLoginBuilder {
            config: self.config,
            codes,
        }
    }

    /// Validates the config and builds the service around `chat`.
    ///
    /// # Errors
    /// [`StarLoginError::Config`] if the configuration is unusable.
    pub fn build<C, S>(self, chat: C) -> Result<StarLogin<C, S, G>, StarLoginError>
    where
        C: ChatAdapter,
        S: GameServer,
    {
        let config = self.config.validated()?;
        let store = SessionStore::new(config.session_config()).into_shared();

        tracing::info!(
            bot = %config.bot_account_id,
            ttl_secs = config.code_ttl.as_secs(),
            "StarLogin loaded"
        );

        Ok(StarLogin {
            state: Arc::new(ServiceState {
                config,
                store,
                chat,
                codes: self.codes,
            }),
        })
    }
}

/// A running StarLogin service.
///
/// Cheap to clone; every clone shares the same store.
pub struct StarLogin<C, S, G = RandomCodes> {
    state: Arc<ServiceState<C, S, G>>,
}

impl<C, S, G> Clone for StarLogin<C, S, G> {
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
        }
    }
}

impl<C, S, G> StarLogin<C, S, G>
where
    C: ChatAdapter,
    S: GameServer,
    G: CodeGenerator,
{
    /// A player joined `server`. Issues a code and schedules the
    /// notifications; returns the code without waiting for them.
    pub async fn on_player_join(&self, server: S, join: PlayerJoin) -> String {
        handle_player_join(&self.state, server, join).await
    }

    /// The bot received a private message. Answers through `reply`.
    ///
    /// Returns once the store reflects the outcome; the reply and any
    /// game commands are sent in the background.
    pub async fn on_direct_message<R: ReplyContext>(
        &self,
        message: &DirectMessage,
        reply: R,
    ) -> CommandResult {
        handle_direct_message(&self.state, message, reply).await
    }

    /// Starts the periodic expiry sweeper on its own task.
    pub fn spawn_sweeper(&self) -> JoinHandle<()> {
        let sweeper = ExpirySweeper::new(self.store(), self.state.config.sweep_config());
        sweeper.spawn()
    }

    /// The session store, shared with the handlers.
    pub fn store(&self) -> SharedStore<S> {
        Arc::clone(&self.state.store)
    }

    pub fn config(&self) -> &StarLoginConfig {
        &self.state.config
    }

    /// Number of verifications still pending.
    pub async fn pending_count(&self) -> usize {
        self.state.store.lock().await.len()
    }
}
