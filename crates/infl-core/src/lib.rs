//! Idempotent on-chain configuration synchronizer for Influence.
//!
//! This crate sits between the configuration layer (`infl-meta`), the
//! encoders (`infl-codec`) and the chain:
//!
//! - **dispatcher**: the [`Dispatcher`] trait and its Starknet implementation
//! - **records**: [`Syncable`] components, constants and registry entries
//! - **retry**: bounded retries with configurable backoff
//! - **sync**: the [`Synchronizer`] and its [`SyncReport`]

pub mod dispatcher;
pub mod error;
pub mod records;
pub mod retry;
pub mod sync;

pub use dispatcher::{Call, Dispatcher, StarknetDispatcher, TxHash};
pub use error::{DispatchError, Error, Result};
pub use records::{
    ComponentRecord, ConstantRecord, RegistryKind, RegistryRecord, Syncable, component_records,
    constant_records, registry_records,
};
pub use retry::{BackoffStrategy, RetryOutcome, RetryPolicy, retry};
pub use sync::{
    FieldChange, FieldDiff, Outcome, SyncCounts, SyncEntry, SyncOptions, SyncReport, Synchronizer,
};
