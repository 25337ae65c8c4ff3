//! Human and JSON rendering of sync progress

use colored::Colorize;
use infl_core::{FieldChange, Outcome, SyncEntry, SyncReport};

use crate::error::Result;

/// Prints one line per settled record, or only the final report with `--json`.
#[derive(Debug, Clone, Copy)]
pub struct Printer {
    json: bool,
}

impl Printer {
    pub fn new(json: bool) -> Self {
        Self { json }
    }

    pub fn header(&self, action: &str, network: &str) {
        if self.json {
            return;
        }
        println!("{} {} on {}...", "=>".blue().bold(), action, network.cyan());
    }

    pub fn entry(&self, entry: &SyncEntry) {
        if self.json {
            return;
        }
        match entry.outcome {
            Outcome::UpToDate => {
                println!("   {} {} already up to date", "OK".green().bold(), entry.label);
            }
            Outcome::Updated => {
                let retries = if entry.attempts > 1 {
                    format!(" (attempt {})", entry.attempts)
                } else {
                    String::new()
                };
                println!(
                    "   {} {} updated{}",
                    "UPDATED".cyan().bold(),
                    entry.label,
                    retries.dimmed()
                );
            }
            Outcome::WouldUpdate => {
                println!("   {} {} would update", "DIFF".yellow().bold(), entry.label);
                for change in entry.diff.iter().flat_map(|d| &d.changes) {
                    match change {
                        FieldChange::Removed(line) => println!("        {}", format!("- {line}").red()),
                        FieldChange::Added(line) => println!("        {}", format!("+ {line}").green()),
                    }
                }
            }
        }
    }

    pub fn summary(&self, report: &SyncReport) -> Result<()> {
        if self.json {
            println!("{}", serde_json::to_string_pretty(report)?);
            return Ok(());
        }

        println!();
        if report.dry_run {
            println!(
                "{} {} would update, {} already up to date",
                "DRY RUN".yellow().bold(),
                report.would_update(),
                report.up_to_date()
            );
        } else {
            println!(
                "{} {} updated, {} already up to date",
                "OK".green().bold(),
                report.updated(),
                report.up_to_date()
            );
        }
        Ok(())
    }
}
