//! Error types for infl-cli

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

/// Errors that can occur in CLI operations
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Error from infl-core
    #[error(transparent)]
    Core(#[from] infl_core::Error),

    /// Error from infl-meta
    #[error(transparent)]
    Meta(#[from] infl_meta::Error),

    /// Error from infl-codec
    #[error(transparent)]
    Codec(#[from] infl_codec::Error),

    /// JSON output error
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// User-facing error with a message
    #[error("{message}")]
    User { message: String },
}

impl CliError {
    /// Create a new user error with the given message
    pub fn user(message: impl Into<String>) -> Self {
        Self::User {
            message: message.into(),
        }
    }
}

impl From<infl_core::DispatchError> for CliError {
    fn from(err: infl_core::DispatchError) -> Self {
        Self::Core(err.into())
    }
}
