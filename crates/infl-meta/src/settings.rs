//! Synchronizer settings from the `[sync]` manifest table

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Delay between attempts on the same record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BackoffSettings {
    /// Retry immediately
    None,
    /// Constant delay
    Fixed { delay_ms: u64 },
    /// Doubling delay, capped at `max_ms`
    Exponential { initial_ms: u64, max_ms: u64 },
}

impl Default for BackoffSettings {
    fn default() -> Self {
        BackoffSettings::Exponential {
            initial_ms: 500,
            max_ms: 10_000,
        }
    }
}

/// How many times a record is attempted and how long a confirmation may take.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SyncSettings {
    pub max_attempts: u32,
    pub confirm_timeout_secs: u64,
    pub poll_interval_ms: u64,
    pub backoff: BackoffSettings,
}

impl Default for SyncSettings {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            confirm_timeout_secs: 300,
            poll_interval_ms: 2_000,
            backoff: BackoffSettings::default(),
        }
    }
}

impl SyncSettings {
    pub fn confirm_timeout(&self) -> Duration {
        Duration::from_secs(self.confirm_timeout_secs)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn partial_table_keeps_defaults() {
        let settings: SyncSettings = toml::from_str("max_attempts = 2").unwrap();
        assert_eq!(settings.max_attempts, 2);
        assert_eq!(settings.confirm_timeout(), Duration::from_secs(300));
        assert_eq!(settings.backoff, BackoffSettings::default());
    }

    #[test]
    fn parses_backoff_kinds() {
        let settings: SyncSettings =
            toml::from_str("backoff = { kind = \"fixed\", delay_ms = 250 }").unwrap();
        assert_eq!(settings.backoff, BackoffSettings::Fixed { delay_ms: 250 });

        let settings: SyncSettings = toml::from_str("backoff = { kind = \"none\" }").unwrap();
        assert_eq!(settings.backoff, BackoffSettings::None);
    }
}
