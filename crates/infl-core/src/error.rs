//! Error types for infl-core

use std::time::Duration;

use infl_codec::Felt;

/// Result type for infl-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Failure of a single dispatcher interaction.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DispatchError {
    /// The read call failed, which the dispatcher does for values never written
    #[error("{entrypoint} returned no value: {message}")]
    NotFound { entrypoint: String, message: String },

    /// The node refused the transaction before it was accepted
    #[error("Transaction rejected: {reason}")]
    Rejected { reason: String },

    /// The transaction was included but reverted
    #[error("Transaction {tx:#x} reverted: {reason}")]
    Reverted { tx: Felt, reason: String },

    /// Confirmation did not arrive in time
    #[error("Transaction {tx:#x} not confirmed after {after:?}")]
    Timeout { tx: Felt, after: Duration },

    /// Network or RPC failure
    #[error("Transport error: {0}")]
    Transport(String),
}

impl DispatchError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, DispatchError::NotFound { .. })
    }
}

/// Errors that can occur in infl-core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A record kept failing until the retry policy gave up
    #[error("Giving up on {record} after {attempts} attempts: {source}")]
    RetriesExhausted {
        record: String,
        attempts: u32,
        #[source]
        source: DispatchError,
    },

    /// The dispatcher answered with data that does not fit the expected layout
    #[error("Malformed response for {record}: {reason}")]
    MalformedResponse { record: String, reason: String },

    /// Dispatcher error outside of a retried operation
    #[error(transparent)]
    Dispatch(#[from] DispatchError),

    /// Encoding error from infl-codec
    #[error(transparent)]
    Codec(#[from] infl_codec::Error),

    /// Configuration error from infl-meta
    #[error(transparent)]
    Meta(#[from] infl_meta::Error),
}
