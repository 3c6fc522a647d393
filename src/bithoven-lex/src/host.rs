//! Boundary with the host editor.
//!
//! Hosts report a transaction as a batch of changes, all positioned in the
//! text as it was before the transaction, sorted and non-overlapping. The
//! lexer works on one edit at a time against the current text, so the batch
//! is rebased into a sequence of [`EditDelta`]s.

use crate::error::EditError;
use crate::relex::EditDelta;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostChange {
    pub from: usize,
    pub to: usize,
    #[serde(default)]
    pub insert: String,
}

impl HostChange {
    pub fn new(from: usize, to: usize, insert: impl Into<String>) -> Self {
        Self {
            from,
            to,
            insert: insert.into(),
        }
    }
}

pub fn to_edit_deltas(changes: &[HostChange]) -> Result<Vec<EditDelta>, EditError> {
    let mut deltas = Vec::with_capacity(changes.len());
    let mut added = 0usize;
    let mut removed = 0usize;
    let mut previous_to: Option<usize> = None;
    for change in changes {
        if change.from > change.to {
            return Err(EditError::Inverted {
                start: change.from,
                end: change.to,
            });
        }
        if let Some(previous_to) = previous_to {
            if change.from < previous_to {
                return Err(EditError::OverlappingChanges {
                    from: change.from,
                    previous_to,
                });
            }
        }
        let start = change.from + added - removed;
        let end = change.to + added - removed;
        deltas.push(EditDelta::new(start, end, change.insert.clone()));
        added += change.insert.len();
        removed += change.to - change.from;
        previous_to = Some(change.to);
    }
    Ok(deltas)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn apply_all(text: &str, changes: &[HostChange]) -> String {
        let mut out = text.to_string();
        for delta in to_edit_deltas(changes).unwrap() {
            delta.apply(&mut out).unwrap();
        }
        out
    }

    #[test]
    fn test_rebases_later_changes() {
        let changes = vec![
            HostChange::new(0, 0, "// "),
            HostChange::new(6, 11, "after"),
            HostChange::new(12, 13, "9"),
        ];
        assert_eq!(apply_all("older older 1;", &changes), "// older after 9;");
    }

    #[test]
    fn test_adjacent_changes_are_allowed() {
        let changes = vec![HostChange::new(0, 2, "x"), HostChange::new(2, 4, "yz")];
        assert_eq!(apply_all("abcd!", &changes), "xyz!");
    }

    #[test]
    fn test_rejects_overlap_and_inversion() {
        assert_eq!(
            to_edit_deltas(&[HostChange::new(0, 3, ""), HostChange::new(2, 4, "")]),
            Err(EditError::OverlappingChanges {
                from: 2,
                previous_to: 3
            })
        );
        assert_eq!(
            to_edit_deltas(&[HostChange::new(4, 1, "")]),
            Err(EditError::Inverted { start: 4, end: 1 })
        );
    }

    #[test]
    fn test_deserializes_host_json() {
        let changes: Vec<HostChange> =
            serde_json::from_str(r#"[{"from": 1, "to": 2}, {"from": 5, "to": 5, "insert": "x"}]"#)
                .unwrap();
        assert_eq!(changes[0], HostChange::new(1, 2, ""));
        assert_eq!(changes[1].insert, "x");
    }
}
