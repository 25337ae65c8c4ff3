//! Idempotent synchronization of on-chain configuration
//!
//! This module provides:
//! - **engine**: the [`Synchronizer`] read-compare-write loop
//! - **report**: per-record outcomes of a pass
//! - **diff**: field-level differences shown by dry runs

mod diff;
mod engine;
mod report;

pub use diff::{FieldChange, FieldDiff};
pub use engine::{SyncOptions, Synchronizer};
pub use report::{Outcome, SyncCounts, SyncEntry, SyncReport};
