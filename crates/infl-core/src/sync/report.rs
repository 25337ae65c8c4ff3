//! Outcome of one synchronization pass

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::diff::FieldDiff;

/// What happened to a single record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    /// Stored value already matched
    UpToDate,
    /// A write was submitted and confirmed
    Updated,
    /// Dry run: a write would have been submitted
    WouldUpdate,
}

/// Report line for one record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncEntry {
    pub label: String,
    pub outcome: Outcome,
    /// Attempts spent on the write, 0 when nothing was written
    pub attempts: u32,
    /// Confirmed transaction, hex encoded
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tx: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub diff: Option<FieldDiff>,
}

/// Record counts by outcome.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncCounts {
    pub updated: usize,
    pub up_to_date: usize,
    pub would_update: usize,
}

/// Report from a synchronization pass
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SyncReport {
    pub dry_run: bool,
    pub started_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,
    pub counts: SyncCounts,
    pub entries: Vec<SyncEntry>,
}

impl SyncReport {
    /// Start an empty report stamped with the current time
    pub fn start(dry_run: bool) -> Self {
        Self {
            dry_run,
            started_at: Utc::now(),
            finished_at: None,
            counts: SyncCounts::default(),
            entries: Vec::new(),
        }
    }

    pub fn push(&mut self, entry: SyncEntry) {
        match entry.outcome {
            Outcome::UpToDate => self.counts.up_to_date += 1,
            Outcome::Updated => self.counts.updated += 1,
            Outcome::WouldUpdate => self.counts.would_update += 1,
        }
        self.entries.push(entry);
    }

    /// Append the entries of a later pass and take its finish time
    pub fn merge(&mut self, other: SyncReport) {
        for entry in other.entries {
            self.push(entry);
        }
        self.finished_at = other.finished_at.or(self.finished_at);
    }

    pub fn finish(mut self) -> Self {
        self.finished_at = Some(Utc::now());
        self
    }

    pub fn updated(&self) -> usize {
        self.counts.updated
    }

    pub fn up_to_date(&self) -> usize {
        self.counts.up_to_date
    }

    pub fn would_update(&self) -> usize {
        self.counts.would_update
    }

    /// True when every record already matched
    pub fn is_converged(&self) -> bool {
        self.counts.updated == 0 && self.counts.would_update == 0
    }
}
