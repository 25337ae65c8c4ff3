//! Shared test utilities for the Influence admin workspace.
//!
//! Dev-dependency only, never published.
//!
//! # Modules
//!
//! - [`dispatcher`]: [`MemoryDispatcher`], an in-memory ledger with scripted failures
//! - [`fixtures`]: sample catalog records
//! - [`workspace`]: [`TestWorkspace`], a temporary manifest + catalog + deployments

pub mod dispatcher;
pub mod fixtures;
pub mod workspace;

pub use dispatcher::{JournalEntry, MemoryDispatcher};
pub use workspace::TestWorkspace;
