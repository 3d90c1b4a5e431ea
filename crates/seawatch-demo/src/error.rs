//! Error types for the demo binary.
//!
//! [`DemoError`] wraps every failure mode of the demo run so `main` can
//! propagate with `?`.

use seawatch_core::{ConfigError, TrackerError};

/// Top-level error for the demo binary.
#[derive(Debug, thiserror::Error)]
pub enum DemoError {
    /// Configuration loading failed.
    #[error("config error: {source}")]
    Config {
        /// The underlying config error.
        #[from]
        source: ConfigError,
    },

    /// A tracker operation was rejected.
    #[error("tracker error: {source}")]
    Tracker {
        /// The underlying tracker error.
        #[from]
        source: TrackerError,
    },

    /// Rendering the page as JSON failed.
    #[error("render error: {source}")]
    Render {
        /// The underlying serialization error.
        #[from]
        source: serde_json::Error,
    },
}
