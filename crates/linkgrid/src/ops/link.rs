use crate::store::RecordStore;

/// Points the record at `row` to `target`, optionally replacing the label.
///
/// `target` is not required to resolve; a dangling link is a validator
/// finding, not an edit failure.
pub fn set_link(
    store: &RecordStore,
    row: usize,
    target: &str,
    label: Option<&str>,
) -> RecordStore {
    let mut records = store.records().to_vec();
    let Some(record) = records.get_mut(row) else {
        return store.clone();
    };
    record.link_target = target.to_string();
    if let Some(label) = label {
        record.link_label = label.to_string();
    }
    RecordStore::from_records(records)
}

/// Clears the outgoing link target at `row`; the label is left as-is.
pub fn clear_link(store: &RecordStore, row: usize) -> RecordStore {
    let mut records = store.records().to_vec();
    let Some(record) = records.get_mut(row) else {
        return store.clone();
    };
    record.link_target.clear();
    RecordStore::from_records(records)
}
