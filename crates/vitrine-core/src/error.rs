//! Error types and result aliases for vitrine.
//!
//! Errors are structured for programmatic handling and include context for debugging.

/// The result type used throughout vitrine.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur outside of catalog loading.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// An invalid identifier was provided.
    #[error("invalid identifier: {message}")]
    InvalidId {
        /// Description of what made the ID invalid.
        message: String,
    },

    /// A name cannot be used as a single path segment.
    #[error("invalid path segment {segment:?}: {reason}")]
    InvalidSegment {
        /// The rejected name.
        segment: String,
        /// Why the name was rejected.
        reason: &'static str,
    },

    /// Invalid input was provided.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Process configuration is missing or invalid.
    #[error("configuration error: {message}")]
    Config {
        /// Description of the configuration problem.
        message: String,
    },

    /// An internal error occurred that should not happen in normal operation.
    #[error("internal error: {message}")]
    Internal {
        /// Description of the internal error.
        message: String,
    },
}

impl Error {
    /// Creates a new configuration error with the given message.
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Creates a new internal error with the given message.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }
}
