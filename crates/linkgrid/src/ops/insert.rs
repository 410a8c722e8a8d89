use regex::Regex;

use crate::record::Record;
use crate::store::RecordStore;

/// Caller-supplied fields for a new record; the id is always derived.
#[derive(Clone, Debug, Default)]
pub struct NewRecord {
    pub container: String,
    pub name: String,
    pub link_target: String,
    pub link_label: String,
}

/// Appends a new record with derived id and default visibility flags.
pub fn add_record(store: &RecordStore, new: NewRecord) -> RecordStore {
    let mut records = store.records().to_vec();
    records.push(Record::new(
        new.container,
        new.name,
        new.link_target,
        new.link_label,
    ));
    RecordStore::from_records(records)
}

/// Clones the record at `row` under the next free `base_N` name within its
/// container run, inserting the clone right after the source.
///
/// The clone never inherits the source's outgoing link, link label, item
/// note, or link note; the container note is copied.
pub fn duplicate_record(store: &RecordStore, row: usize) -> RecordStore {
    let Some(source) = store.get(row) else {
        return store.clone();
    };
    let Some(run) = store.container_run(row) else {
        return store.clone();
    };

    let siblings = store.records()[run].iter().map(|r| r.name.as_str());
    let name = next_suffix_name(&source.name, siblings);

    let mut clone = Record::new(source.container.clone(), name, "", "");
    clone.link_visible = source.link_visible;
    clone.node_visible = source.node_visible;
    clone.container_note = source.container_note.clone();

    let mut records = store.records().to_vec();
    records.insert(row + 1, clone);
    RecordStore::from_records(records)
}

/// Clones every record of `container`'s first run under a freshly generated
/// container name, inserted immediately after the original run.
///
/// Outgoing links and item/link notes are cleared on the clones; container
/// notes are copied.
pub fn duplicate_container(store: &RecordStore, container: &str) -> RecordStore {
    let Some(run) = store.container_run_of(container) else {
        return store.clone();
    };

    let names = store.container_names();
    let new_container = next_suffix_name(container, names.iter().map(String::as_str));

    let clones: Vec<Record> = store.records()[run.clone()]
        .iter()
        .map(|source| {
            let mut clone = Record::new(new_container.clone(), source.name.clone(), "", "");
            clone.link_visible = source.link_visible;
            clone.node_visible = source.node_visible;
            clone.container_note = source.container_note.clone();
            clone
        })
        .collect();

    let mut records = store.records().to_vec();
    records.splice(run.end..run.end, clones);
    RecordStore::from_records(records)
}

/// `base_N` with N one past the highest suffix already taken.
///
/// Suffixes are discovered by matching `^base_(\d+)$` against the existing
/// names; a bare `base` occupies suffix 1 so the first duplicate of `B`
/// becomes `B_2` once `B` itself exists.
fn next_suffix_name<'a>(base: &str, existing: impl Iterator<Item = &'a str>) -> String {
    let pattern =
        Regex::new(&format!(r"^{}_(\d+)$", regex::escape(base))).expect("Invalid regex");

    let mut max_suffix: u64 = 0;
    for name in existing {
        if name == base {
            max_suffix = max_suffix.max(1);
        } else if let Some(captures) = pattern.captures(name) {
            if let Ok(suffix) = captures[1].parse::<u64>() {
                max_suffix = max_suffix.max(suffix);
            }
        }
    }
    format!("{base}_{}", max_suffix + 1)
}
