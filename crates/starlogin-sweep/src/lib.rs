//! Periodic expiry sweeper for StarLogin.
//!
//! Codes stop matching the moment their TTL runs out, but the sessions
//! holding them stay in memory until something removes them. The
//! [`ExpirySweeper`] is that something: a background task that wakes up
//! at a fixed interval and drops every session whose age has reached the
//! TTL.
//!
//! It has no relationship with any particular join or command. It only
//! shares the store, through the same mutex the handlers use.
//!
//! # Integration
//!
//! ```ignore
//! let store = SessionStore::new(SessionConfig::default()).into_shared();
//! let handle = ExpirySweeper::new(Arc::clone(&store), SweepConfig::default()).spawn();
//! ```

use std::time::Duration;

use rand::Rng;
use starlogin_session::SharedStore;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::{debug, info, trace, warn};

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Configuration for the expiry sweeper.
#[derive(Debug, Clone)]
pub struct SweepConfig {
    /// Time between two sweep passes. The first pass runs one interval
    /// after the sweeper starts, not immediately.
    pub interval: Duration,
    /// Random delay (0–max) added to the *first* pass so several services
    /// started together don't all sweep at the same instant.
    pub initial_jitter: Duration,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            interval: Self::DEFAULT_INTERVAL,
            initial_jitter: Duration::ZERO,
        }
    }
}

impl SweepConfig {
    /// One hour.
    pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(60 * 60);

    /// Shortest interval accepted. Anything below is clamped up.
    pub const MIN_INTERVAL: Duration = Duration::from_secs(1);

    /// Create a config with the given interval and no jitter.
    pub fn with_interval(interval: Duration) -> Self {
        Self {
            interval,
            ..Default::default()
        }
    }

    /// Clamp out-of-range values so the config is safe to use.
    ///
    /// Called automatically by [`ExpirySweeper::new`]. A zero interval
    /// would make `tokio::time::interval` panic.
    pub fn validated(mut self) -> Self {
        if self.interval < Self::MIN_INTERVAL {
            warn!(
                interval_ms = self.interval.as_millis() as u64,
                min_ms = Self::MIN_INTERVAL.as_millis() as u64,
                "sweep interval below minimum — clamping"
            );
            self.interval = Self::MIN_INTERVAL;
        }
        self
    }
}

// ---------------------------------------------------------------------------
// Report
// ---------------------------------------------------------------------------

/// The result of one sweep pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SweepReport {
    /// Pass number, starting at 1.
    pub pass: u64,
    /// Sessions removed by this pass.
    pub removed: usize,
    /// Sessions still pending after this pass.
    pub remaining: usize,
}

// ---------------------------------------------------------------------------
// Sweeper
// ---------------------------------------------------------------------------

/// Background task that purges expired verification sessions.
pub struct ExpirySweeper<S> {
    store: SharedStore<S>,
    config: SweepConfig,
    passes: u64,
    total_removed: u64,
}

impl<S> ExpirySweeper<S>
where
    S: Send + 'static,
{
    pub fn new(store: SharedStore<S>, config: SweepConfig) -> Self {
        Self {
            store,
            config: config.validated(),
            passes: 0,
            total_removed: 0,
        }
    }

    /// Run a single pass now.
    ///
    /// Holds the store lock only for the duration of the in-memory sweep.
    pub async fn sweep_once(&mut self) -> SweepReport {
        let now = Instant::now();
        let (removed, remaining) = {
            let mut store = self.store.lock().await;
            let removed = store.sweep(now);
            (removed, store.len())
        };

        self.passes += 1;
        self.total_removed += removed as u64;

        if removed > 0 {
            info!(
                pass = self.passes,
                removed, remaining, "removed expired verification sessions"
            );
        } else {
            trace!(pass = self.passes, remaining, "sweep found nothing to remove");
        }

        SweepReport {
            pass: self.passes,
            removed,
            remaining,
        }
    }

    /// Sweep forever at the configured interval.
    ///
    /// A pass that runs late (a stalled runtime, a suspended process) is
    /// not followed by a burst of catch-up passes; the schedule resumes
    /// from the late pass.
    pub async fn run(mut self) {
        let start = Instant::now() + self.config.interval + self.first_jitter();
        let mut ticker = time::interval_at(start, self.config.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        debug!(
            interval_secs = self.config.interval.as_secs(),
            "expiry sweeper started"
        );

        loop {
            ticker.tick().await;
            self.sweep_once().await;
        }
    }

    /// Move the sweeper onto its own Tokio task.
    pub fn spawn(self) -> JoinHandle<()> {
        tokio::spawn(self.run())
    }

    /// Passes run so far.
    pub fn passes(&self) -> u64 {
        self.passes
    }

    /// Sessions removed across all passes.
    pub fn total_removed(&self) -> u64 {
        self.total_removed
    }

    pub fn interval(&self) -> Duration {
        self.config.interval
    }

    fn first_jitter(&self) -> Duration {
        let max = self.config.initial_jitter.as_millis() as u64;
        if max == 0 {
            Duration::ZERO
        } else {
            Duration::from_millis(rand::rng().random_range(0..max))
        }
    }
}
