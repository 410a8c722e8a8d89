use crate::store::RecordStore;

pub const DEFAULT_HISTORY_CAPACITY: usize = 50;

/// Bounded undo/redo history of full-store snapshots.
///
/// The top of the `past` stack is the current state. Snapshots are
/// independent value copies: mutating a store returned from `undo`/`redo`
/// never affects the history.
#[derive(Clone, Debug)]
pub struct SnapshotHistory {
    capacity: usize,
    past: Vec<RecordStore>,
    future: Vec<RecordStore>,
}

impl SnapshotHistory {
    /// Capacity is fixed at construction; at least one slot is kept so the
    /// current state always has somewhere to live.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            past: Vec::new(),
            future: Vec::new(),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Records a new current state. Clears the redo stack; at capacity the
    /// oldest retained snapshot is evicted.
    pub fn push(&mut self, snapshot: RecordStore) {
        self.future.clear();
        if self.past.len() == self.capacity {
            self.past.remove(0);
        }
        self.past.push(snapshot);
    }

    /// Moves the current state to the redo stack and returns the prior
    /// snapshot, or `None` when there is nothing left to undo.
    pub fn undo(&mut self) -> Option<RecordStore> {
        if self.past.len() < 2 {
            return None;
        }
        let current = self.past.pop()?;
        self.future.push(current);
        self.past.last().cloned()
    }

    pub fn redo(&mut self) -> Option<RecordStore> {
        let next = self.future.pop()?;
        if self.past.len() == self.capacity {
            self.past.remove(0);
        }
        self.past.push(next.clone());
        Some(next)
    }

    pub fn can_undo(&self) -> bool {
        self.past.len() > 1
    }

    pub fn can_redo(&self) -> bool {
        !self.future.is_empty()
    }
}

impl Default for SnapshotHistory {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::Record;

    fn snapshot(name: &str) -> RecordStore {
        RecordStore::from_records(vec![Record::new("S", name, "", "")])
    }

    #[test]
    fn capacity_evicts_oldest_snapshot() {
        let mut history = SnapshotHistory::new(2);
        history.push(snapshot("1"));
        history.push(snapshot("2"));
        history.push(snapshot("3"));

        // S1 was evicted: one undo reaches S2, a second finds nothing.
        assert_eq!(history.undo(), Some(snapshot("2")));
        assert_eq!(history.undo(), None);
        assert!(!history.can_undo());
    }

    #[test]
    fn undo_then_redo_round_trips() {
        let mut history = SnapshotHistory::new(10);
        history.push(snapshot("1"));
        history.push(snapshot("2"));

        assert_eq!(history.undo(), Some(snapshot("1")));
        assert!(history.can_redo());
        assert_eq!(history.redo(), Some(snapshot("2")));
        assert!(!history.can_redo());
    }

    #[test]
    fn push_clears_redo_stack() {
        let mut history = SnapshotHistory::new(10);
        history.push(snapshot("1"));
        history.push(snapshot("2"));
        history.undo();
        history.push(snapshot("3"));
        assert!(!history.can_redo());
        assert_eq!(history.undo(), Some(snapshot("1")));
    }

    #[test]
    fn snapshots_are_independent_copies() {
        let mut history = SnapshotHistory::new(10);
        history.push(snapshot("1"));
        history.push(snapshot("2"));

        let mut undone = history.undo().unwrap();
        undone = crate::ops::add_record(
            &undone,
            crate::ops::NewRecord {
                container: "X".into(),
                name: "mutant".into(),
                ..Default::default()
            },
        );
        assert_eq!(undone.len(), 2);
        // History still holds the untouched snapshot.
        assert_eq!(history.redo(), Some(snapshot("2")));
    }
}
