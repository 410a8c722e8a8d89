use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde::Serialize;

use crate::store::RecordStore;

/// A single advisory finding. Diagnostics are data, never errors: the store
/// stays fully editable no matter how many exist.
///
/// The `Display` form is the stable textual contract
/// (`Duplicate ID: <id>` / `Row N: ...`); consumers that need the affected
/// rows read them from the variant instead of re-parsing strings.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Diagnostic {
    DuplicateId {
        id: String,
        /// 1-based rows of every record carrying the duplicated id.
        rows: Vec<usize>,
    },
    BrokenLink {
        /// 1-based row of the record with the dangling link.
        row: usize,
        target: String,
    },
}

impl Diagnostic {
    /// 1-based rows this finding is attributable to.
    pub fn rows(&self) -> Vec<usize> {
        match self {
            Diagnostic::DuplicateId { rows, .. } => rows.clone(),
            Diagnostic::BrokenLink { row, .. } => vec![*row],
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::DuplicateId { id, .. } => write!(f, "Duplicate ID: {id}"),
            Diagnostic::BrokenLink { row, target } => {
                write!(f, "Row {row}: broken link to '{target}'")
            }
        }
    }
}

/// Scans the store for duplicated ids and dangling links.
///
/// One `DuplicateId` per distinct duplicated id value (in order of first
/// occurrence), then one `BrokenLink` per offending row.
pub fn validate(store: &RecordStore) -> Vec<Diagnostic> {
    let records = store.records();

    let mut first_seen: Vec<&str> = Vec::new();
    let mut rows_by_id: BTreeMap<&str, Vec<usize>> = BTreeMap::new();
    for (row, record) in records.iter().enumerate() {
        let rows = rows_by_id.entry(record.id.as_str()).or_default();
        if rows.is_empty() {
            first_seen.push(record.id.as_str());
        }
        rows.push(row + 1);
    }

    let mut diagnostics = Vec::new();
    for id in &first_seen {
        let rows = &rows_by_id[id];
        if rows.len() > 1 {
            diagnostics.push(Diagnostic::DuplicateId {
                id: (*id).to_string(),
                rows: rows.clone(),
            });
        }
    }

    let known_ids: BTreeSet<&str> = records.iter().map(|r| r.id.as_str()).collect();
    for (row, record) in records.iter().enumerate() {
        if record.has_link() && !known_ids.contains(record.link_target.as_str()) {
            diagnostics.push(Diagnostic::BrokenLink {
                row: row + 1,
                target: record.link_target.clone(),
            });
        }
    }

    diagnostics
}
