//! Unified error type for StarLogin.

/// Loading or validating [`StarLoginConfig`](crate::StarLoginConfig) failed.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("cannot read config {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The config is not valid JSON or has the wrong shape.
    #[error("cannot parse config: {0}")]
    Parse(#[from] serde_json::Error),

    /// The config parsed but a value is unusable.
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Error returned by [`StarLoginBuilder::build`](crate::StarLoginBuilder::build).
///
/// Once the service runs, nothing escalates: rejected codes come back as
/// [`CommandResult::Rejected`](crate::CommandResult::Rejected) and failed
/// outbound calls are only logged.
#[derive(Debug, thiserror::Error)]
pub enum StarLoginError {
    #[error(transparent)]
    Config(#[from] ConfigError),
}
