use crate::record::Record;
use crate::store::RecordStore;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MoveDirection {
    Up,
    Down,
}

/// Swaps the record at `row` with its immediate neighbor, constrained to its
/// container run; a move at the run boundary is a no-op.
pub fn move_record(store: &RecordStore, row: usize, direction: MoveDirection) -> RecordStore {
    let Some(run) = store.container_run(row) else {
        return store.clone();
    };
    let neighbor = match direction {
        MoveDirection::Up if row > run.start => row - 1,
        MoveDirection::Down if row + 1 < run.end => row + 1,
        _ => return store.clone(),
    };
    let mut records = store.records().to_vec();
    records.swap(row, neighbor);
    RecordStore::from_records(records)
}

/// Swaps the whole contiguous run of `container` with the adjacent run.
///
/// Used when the container is presented collapsed, so the block moves as one.
pub fn move_container(
    store: &RecordStore,
    container: &str,
    direction: MoveDirection,
) -> RecordStore {
    let Some(run) = store.container_run_of(container) else {
        return store.clone();
    };
    let neighbor = match direction {
        MoveDirection::Up if run.start > 0 => match store.container_run(run.start - 1) {
            Some(neighbor) => neighbor,
            None => return store.clone(),
        },
        MoveDirection::Down if run.end < store.len() => match store.container_run(run.end) {
            Some(neighbor) => neighbor,
            None => return store.clone(),
        },
        _ => return store.clone(),
    };

    let records = store.records();
    let (first, second) = if neighbor.start < run.start {
        (neighbor, run)
    } else {
        (run, neighbor)
    };

    let mut reordered: Vec<Record> = Vec::with_capacity(records.len());
    reordered.extend_from_slice(&records[..first.start]);
    reordered.extend_from_slice(&records[second.clone()]);
    reordered.extend_from_slice(&records[first.clone()]);
    reordered.extend_from_slice(&records[second.end..]);
    RecordStore::from_records(reordered)
}
