//! Configuration for Influence admin tooling.
//!
//! Everything the synchronizer needs besides the ledger itself:
//! the manifest (`influence.toml`) with per-network RPC endpoints and
//! accounts, the synchronizer settings, the deployment manifest produced
//! by contract deployment and the desired-state catalog.

pub mod catalog;
pub mod deployments;
pub mod error;
pub mod manifest;
pub mod network;
pub mod settings;
pub mod store;

pub use catalog::Catalog;
pub use deployments::Deployments;
pub use error::{Error, Result};
pub use manifest::{CatalogRef, DEFAULT_MANIFEST, Manifest};
pub use network::{AccountConfig, NetworkConfig, ResolvedAccount};
pub use settings::{BackoffSettings, SyncSettings};
pub use store::{ConfigStore, Format};
