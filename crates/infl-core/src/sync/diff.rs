//! Field-level diff between a stored and a desired value

use std::fmt;

use serde::{Deserialize, Serialize};
use similar::{ChangeTag, TextDiff};

/// One differing field line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "change", content = "line", rename_all = "snake_case")]
pub enum FieldChange {
    /// Present on chain, absent from the desired value
    Removed(String),
    /// Present in the desired value only
    Added(String),
}

/// Changes needed to turn the stored value into the desired one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDiff {
    pub changes: Vec<FieldChange>,
}

impl FieldDiff {
    /// Diff two per-field renderings line by line.
    pub fn compute(stored: &[String], desired: &[String]) -> Self {
        let old: Vec<&str> = stored.iter().map(String::as_str).collect();
        let new: Vec<&str> = desired.iter().map(String::as_str).collect();

        let changes = TextDiff::from_slices(&old, &new)
            .iter_all_changes()
            .filter_map(|change| match change.tag() {
                ChangeTag::Delete => Some(FieldChange::Removed(change.value().to_string())),
                ChangeTag::Insert => Some(FieldChange::Added(change.value().to_string())),
                ChangeTag::Equal => None,
            })
            .collect();

        Self { changes }
    }

    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }
}

impl fmt::Display for FieldDiff {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for change in &self.changes {
            match change {
                FieldChange::Removed(line) => writeln!(f, "- {line}")?,
                FieldChange::Added(line) => writeln!(f, "+ {line}")?,
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn lines(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn reports_only_changed_fields() {
        let diff = FieldDiff::compute(
            &lines(&["[0] 2", "[1] 5", "[2] 60"]),
            &lines(&["[0] 2", "[1] 5", "[2] 120"]),
        );

        assert_eq!(
            diff.changes,
            vec![
                FieldChange::Removed("[2] 60".into()),
                FieldChange::Added("[2] 120".into()),
            ]
        );
        assert_eq!(diff.to_string(), "- [2] 60\n+ [2] 120\n");
    }

    #[test]
    fn absent_value_shows_every_field_added() {
        let diff = FieldDiff::compute(&[], &lines(&["[0] 1", "[1] 7"]));
        assert_eq!(diff.changes.len(), 2);
        assert!(diff.changes.iter().all(|c| matches!(c, FieldChange::Added(_))));
    }

    #[test]
    fn equal_values_have_empty_diff() {
        assert!(FieldDiff::compute(&lines(&["7"]), &lines(&["7"])).is_empty());
    }
}
