//! Synchronizer implementation
//!
//! For each record, strictly in order: encode the desired value, read the
//! stored one, compare, and if they differ write and wait for
//! confirmation. A failing record is retried in place; the pass never moves
//! on to the next record until the current one is settled.

use std::sync::Arc;

use infl_codec::Felt;
use tracing::{debug, error, info};

use super::diff::FieldDiff;
use super::report::{Outcome, SyncEntry, SyncReport};
use crate::dispatcher::{Call, Dispatcher, TxHash};
use crate::records::Syncable;
use crate::retry::{RetryOutcome, RetryPolicy, retry};
use crate::{DispatchError, Error, Result};

/// Options for a synchronization pass
#[derive(Debug, Clone, Copy, Default)]
pub struct SyncOptions {
    /// Read and compare only; report `WouldUpdate` instead of writing
    pub dry_run: bool,
}

/// Converges stored values to their desired encodings.
pub struct Synchronizer {
    dispatcher: Arc<dyn Dispatcher>,
    policy: RetryPolicy,
    options: SyncOptions,
}

impl Synchronizer {
    pub fn new(dispatcher: Arc<dyn Dispatcher>, policy: RetryPolicy) -> Self {
        Self {
            dispatcher,
            policy,
            options: SyncOptions::default(),
        }
    }

    pub fn with_options(mut self, options: SyncOptions) -> Self {
        self.options = options;
        self
    }

    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    pub fn options(&self) -> SyncOptions {
        self.options
    }

    /// Synchronize `records` in order.
    ///
    /// # Errors
    ///
    /// Stops at the first record whose encoding fails or whose retries are
    /// exhausted; records after it are not touched.
    pub async fn run<S: Syncable>(&self, records: &[S]) -> Result<SyncReport> {
        self.run_observed(records, |_| {}).await
    }

    /// Like [`Synchronizer::run`], calling `on_entry` as each record settles.
    pub async fn run_observed<S, F>(&self, records: &[S], mut on_entry: F) -> Result<SyncReport>
    where
        S: Syncable,
        F: FnMut(&SyncEntry),
    {
        let mut report = SyncReport::start(self.options.dry_run);
        for record in records {
            let entry = self.sync_one(record).await?;
            on_entry(&entry);
            report.push(entry);
        }
        Ok(report.finish())
    }

    /// Settle a single record.
    pub async fn sync_one<S: Syncable>(&self, record: &S) -> Result<SyncEntry> {
        let label = record.label();
        let desired = record.desired()?;
        let existing = self.read(record, &label).await?;

        if existing == desired {
            info!(record = %label, "already up to date");
            return Ok(SyncEntry {
                label,
                outcome: Outcome::UpToDate,
                attempts: 0,
                tx: None,
                diff: None,
            });
        }

        let diff = FieldDiff::compute(&record.render(&existing), &record.render(&desired));
        debug!(record = %label, stored = ?existing, desired = ?desired, "Stored value differs");

        if self.options.dry_run {
            info!(record = %label, "would update");
            return Ok(SyncEntry {
                label,
                outcome: Outcome::WouldUpdate,
                attempts: 0,
                tx: None,
                diff: Some(diff),
            });
        }

        let write = record.write_call(&desired)?;
        let this = self;
        let call = &write;
        match retry(&self.policy, &label, move |_| this.write_and_confirm(call)).await {
            RetryOutcome::Success { value: tx, attempts } => {
                info!(record = %label, attempts, tx = %hex(tx), "updated");
                Ok(SyncEntry {
                    label,
                    outcome: Outcome::Updated,
                    attempts,
                    tx: Some(hex(tx)),
                    diff: Some(diff),
                })
            }
            RetryOutcome::Exhausted {
                attempts,
                last_error,
            } => Err(self.exhausted(label, attempts, last_error)),
        }
    }

    /// Read the stored value; a `NotFound` read yields the record's absent value.
    async fn read<S: Syncable>(&self, record: &S, label: &str) -> Result<S::Value> {
        let call = record.read_call()?;
        let this = self;
        let call = &call;
        let outcome = retry(&self.policy, label, move |_| {
            let calldata = call.calldata.clone();
            async move {
                match this.dispatcher.call(call.entrypoint, calldata).await {
                    Ok(raw) => Ok(Some(raw)),
                    Err(err) if err.is_not_found() => Ok(None),
                    Err(err) => Err(err),
                }
            }
        })
        .await;

        match outcome {
            RetryOutcome::Success {
                value: Some(raw), ..
            } => record.decode(raw),
            RetryOutcome::Success { value: None, .. } => {
                debug!(record = %label, "No stored value");
                Ok(record.absent())
            }
            RetryOutcome::Exhausted {
                attempts,
                last_error,
            } => Err(self.exhausted(label.to_string(), attempts, last_error)),
        }
    }

    async fn write_and_confirm(&self, call: &Call) -> std::result::Result<TxHash, DispatchError> {
        debug!(entrypoint = call.entrypoint, calldata = ?call.calldata, "Submitting transaction");
        let tx = self
            .dispatcher
            .invoke(call.entrypoint, call.calldata.clone())
            .await?;

        debug!(tx = %hex(tx), "Waiting for transaction");
        let timeout = self.policy.confirm_timeout;
        match tokio::time::timeout(timeout, self.dispatcher.wait_for_transaction(tx)).await {
            Ok(confirmed) => confirmed.map(|()| tx),
            Err(_) => Err(DispatchError::Timeout { tx, after: timeout }),
        }
    }

    fn exhausted(&self, record: String, attempts: u32, source: DispatchError) -> Error {
        error!(record = %record, attempts, error = %source, "giving up");
        Error::RetriesExhausted {
            record,
            attempts,
            source,
        }
    }
}

fn hex(felt: Felt) -> String {
    format!("{felt:#x}")
}
