use thiserror::Error;

/// Errors surfaced by the plugin to the host engine.
#[derive(Debug, Error)]
pub enum PluginError {
    /// A required setting was absent from both the environment and the
    /// config file.
    #[error("missing required setting: {0}")]
    MissingSetting(&'static str),

    /// The alert's raw data did not contain a usable `"labels": {...}`
    /// block, so no silence link can be built.
    #[error("no labels block found in alert raw data")]
    MalformedRawData,

    /// Transport-level delivery failure (connection error, timeout).
    /// Non-2xx HTTP responses are not errors and never produce this.
    #[error("Rocket.Chat delivery failed: {0}")]
    Delivery(String),
}

pub type Result<T> = std::result::Result<T, PluginError>;
