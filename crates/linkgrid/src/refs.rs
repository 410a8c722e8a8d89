//! Cascading maintenance of outgoing link references.
//!
//! These helpers run inside every rename-capable or destructive mutation;
//! they are never exposed as freestanding user actions.

use crate::record::Record;
use crate::store::RecordStore;

/// Rewrites every outgoing link equal to `old_id` to `new_id`.
///
/// Guard: a blank `old_id` or a no-op rename does nothing, so unset link
/// fields can never be populated by a coincidental match.
pub fn rewrite_references(records: &mut [Record], old_id: &str, new_id: &str) {
    if old_id.is_empty() || old_id == new_id {
        return;
    }
    for record in records.iter_mut() {
        if record.link_target == old_id {
            record.link_target = new_id.to_string();
        }
    }
}

/// Clears outgoing links that point at any of `removed_ids`.
pub fn clear_references(records: &mut [Record], removed_ids: &[String]) {
    if removed_ids.is_empty() {
        return;
    }
    for record in records.iter_mut() {
        if record.has_link() && removed_ids.iter().any(|id| *id == record.link_target) {
            record.link_target.clear();
        }
    }
}

/// Rows whose outgoing link points at `id`; used to report deletion impact
/// before a record is removed.
pub fn referencing_rows(store: &RecordStore, id: &str) -> Vec<usize> {
    if id.is_empty() {
        return Vec::new();
    }
    store
        .records()
        .iter()
        .enumerate()
        .filter(|(_, record)| record.link_target == id)
        .map(|(row, _)| row)
        .collect()
}
