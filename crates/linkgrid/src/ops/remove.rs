use crate::refs::{clear_references, referencing_rows};
use crate::store::RecordStore;

/// Rows still pointing at a record about to be removed.
///
/// Computed before deletion so the caller can report what the removal will
/// disconnect.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DeleteImpact {
    pub target_id: String,
    pub referencing_rows: Vec<usize>,
}

pub fn delete_impact(store: &RecordStore, row: usize) -> Option<DeleteImpact> {
    let record = store.get(row)?;
    Some(DeleteImpact {
        target_id: record.id.clone(),
        referencing_rows: referencing_rows(store, &record.id),
    })
}

/// Removes the record at `row` and clears every surviving link to its id.
pub fn delete_record(store: &RecordStore, row: usize) -> RecordStore {
    if row >= store.len() {
        return store.clone();
    }
    let mut records = store.records().to_vec();
    let removed = records.remove(row);
    clear_references(&mut records, &[removed.id]);
    RecordStore::from_records(records)
}

/// Removes every record carrying `container` (all runs, not just the first)
/// and clears surviving links to each removed id.
pub fn delete_container(store: &RecordStore, container: &str) -> RecordStore {
    let mut removed_ids = Vec::new();
    let mut records = Vec::with_capacity(store.len());
    for record in store.records() {
        if record.container == container {
            removed_ids.push(record.id.clone());
        } else {
            records.push(record.clone());
        }
    }
    if removed_ids.is_empty() {
        return store.clone();
    }
    clear_references(&mut records, &removed_ids);
    RecordStore::from_records(records)
}
