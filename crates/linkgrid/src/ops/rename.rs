use crate::record::Record;
use crate::refs::rewrite_references;
use crate::store::RecordStore;

/// Renames the item at `row`, re-deriving its id and rewriting every link
/// that pointed at the old id.
pub fn rename_item(store: &RecordStore, row: usize, new_name: &str) -> RecordStore {
    let mut records = store.records().to_vec();
    let Some(record) = records.get_mut(row) else {
        return store.clone();
    };
    let old_id = record.id.clone();
    record.name = new_name.to_string();
    record.refresh_id();
    let new_id = record.id.clone();
    rewrite_references(&mut records, &old_id, &new_id);
    RecordStore::from_records(records)
}

/// Renames the container cell at `row`.
///
/// `collapsed` mirrors how the row was presented: a collapsed container is
/// edited as a whole, so the rename applies to every record carrying the old
/// container value; an expanded edit moves only that one row into the new
/// container (detaching it from its run).
pub fn rename_container(
    store: &RecordStore,
    row: usize,
    new_container: &str,
    collapsed: bool,
) -> RecordStore {
    let Some(record) = store.get(row) else {
        return store.clone();
    };
    if collapsed {
        let from = record.container.clone();
        return rename_group(store, &from, new_container);
    }

    let mut records = store.records().to_vec();
    let record = &mut records[row];
    let old_id = record.id.clone();
    record.container = new_container.to_string();
    record.refresh_id();
    let new_id = record.id.clone();
    rewrite_references(&mut records, &old_id, &new_id);
    RecordStore::from_records(records)
}

/// Moves every record with `container == from` to `to`, re-deriving each id
/// and cascading the reference rewrite per record.
pub fn rename_group(store: &RecordStore, from: &str, to: &str) -> RecordStore {
    let mut records = store.records().to_vec();
    let rows: Vec<usize> = records
        .iter()
        .enumerate()
        .filter(|(_, r)| r.container == from)
        .map(|(row, _)| row)
        .collect();

    for row in rows {
        let old_id = records[row].id.clone();
        records[row].container = to.to_string();
        records[row].refresh_id();
        let new_id = records[row].id.clone();
        rewrite_references(&mut records, &old_id, &new_id);
    }
    RecordStore::from_records(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> RecordStore {
        RecordStore::from_records(vec![
            Record::new("R", "A", "", ""),
            Record::new("R", "B", "R-A", ""),
            Record::new("S", "C", "R-B", ""),
        ])
    }

    #[test]
    fn rename_item_cascades_to_references() {
        let next = rename_item(&store(), 0, "Z");
        assert_eq!(next.records()[0].id, "R-Z");
        assert_eq!(next.records()[1].link_target, "R-Z");
        assert_eq!(next.records()[2].link_target, "R-B");
    }

    #[test]
    fn rename_container_expanded_moves_single_row() {
        let next = rename_container(&store(), 0, "T", false);
        assert_eq!(next.records()[0].container, "T");
        assert_eq!(next.records()[0].id, "T-A");
        assert_eq!(next.records()[1].container, "R");
        assert_eq!(next.records()[1].link_target, "T-A");
    }

    #[test]
    fn rename_container_collapsed_renames_whole_group() {
        let next = rename_container(&store(), 1, "T", true);
        assert_eq!(next.records()[0].id, "T-A");
        assert_eq!(next.records()[1].id, "T-B");
        assert_eq!(next.records()[1].link_target, "T-A");
        assert_eq!(next.records()[2].link_target, "T-B");
    }

    #[test]
    fn rename_group_ignores_other_containers() {
        let next = rename_group(&store(), "S", "U");
        assert_eq!(next.records()[2].id, "U-C");
        assert_eq!(next.records()[0].id, "R-A");
    }
}
