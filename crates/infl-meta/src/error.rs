//! Error types for infl-meta

use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Codec(#[from] infl_codec::Error),

    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Configuration not found at {path}")]
    ConfigNotFound { path: PathBuf },

    #[error("Failed to parse {format} config at {path}: {message}")]
    ConfigParse {
        path: PathBuf,
        format: String,
        message: String,
    },

    #[error("Unsupported config format: .{extension}")]
    UnsupportedFormat { extension: String },

    #[error("Invalid configuration at {path}: {message}")]
    InvalidConfig { path: PathBuf, message: String },

    #[error("Network not found: {name} (available: {available})")]
    NetworkNotFound { name: String, available: String },

    #[error("Account '{account}' is not configured for network '{network}'")]
    AccountNotFound { network: String, account: String },

    #[error("No account given and network '{network}' has no default_account")]
    NoAccount { network: String },

    #[error("Private key for account '{account}' not available: {reason}")]
    MissingPrivateKey { account: String, reason: String },

    #[error("Duplicate {kind} id {id} in catalog")]
    DuplicateId { kind: String, id: u64 },

    #[error("Duplicate constant '{name}' in catalog")]
    DuplicateConstant { name: String },

    #[error("{kind} '{name}' is missing from the deployment manifest")]
    NotDeployed { kind: String, name: String },
}
