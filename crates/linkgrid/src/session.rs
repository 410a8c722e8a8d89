use crate::delta::{BatchOutcome, DeltaOp, apply_batch};
use crate::error::GridError;
use crate::history::{DEFAULT_HISTORY_CAPACITY, SnapshotHistory};
use crate::ops::{
    self, DeleteImpact, MoveDirection, NewRecord, SortDirection, SortField,
};
use crate::record::Record;
use crate::store::RecordStore;
use crate::table;
use crate::validate::{Diagnostic, validate};

/// High-level facade owning the record store and its snapshot history.
///
/// Constructed once and passed by reference to callers; there is no ambient
/// global state. Each mutating call is one logical transaction: all cascading
/// reference rewrites complete before the result is committed to history, and
/// edits that change nothing commit nothing.
#[derive(Debug)]
pub struct GridSession {
    store: RecordStore,
    history: SnapshotHistory,
    last_sort: Option<(SortField, SortDirection)>,
}

impl GridSession {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_HISTORY_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self::from_store(RecordStore::new(), capacity)
    }

    pub fn from_store(store: RecordStore, capacity: usize) -> Self {
        let mut history = SnapshotHistory::new(capacity);
        history.push(store.clone());
        Self {
            store,
            history,
            last_sort: None,
        }
    }

    pub fn store(&self) -> &RecordStore {
        &self.store
    }

    pub fn records(&self) -> &[Record] {
        self.store.records()
    }

    fn commit(&mut self, next: RecordStore) {
        if next == self.store {
            return;
        }
        self.store = next;
        self.history.push(self.store.clone());
    }

    pub fn add_record(&mut self, new: NewRecord) {
        self.commit(ops::add_record(&self.store, new));
    }

    pub fn delete_impact(&self, row: usize) -> Option<DeleteImpact> {
        ops::delete_impact(&self.store, row)
    }

    pub fn delete_record(&mut self, row: usize) {
        self.commit(ops::delete_record(&self.store, row));
    }

    pub fn delete_container(&mut self, container: &str) {
        self.commit(ops::delete_container(&self.store, container));
    }

    pub fn duplicate_record(&mut self, row: usize) {
        self.commit(ops::duplicate_record(&self.store, row));
    }

    pub fn duplicate_container(&mut self, container: &str) {
        self.commit(ops::duplicate_container(&self.store, container));
    }

    pub fn rename_item(&mut self, row: usize, new_name: &str) {
        self.commit(ops::rename_item(&self.store, row, new_name));
    }

    pub fn rename_container(&mut self, row: usize, new_container: &str, collapsed: bool) {
        self.commit(ops::rename_container(&self.store, row, new_container, collapsed));
    }

    pub fn set_link(&mut self, row: usize, target: &str, label: Option<&str>) {
        self.commit(ops::set_link(&self.store, row, target, label));
    }

    pub fn clear_link(&mut self, row: usize) {
        self.commit(ops::clear_link(&self.store, row));
    }

    pub fn move_record(&mut self, row: usize, direction: MoveDirection) {
        self.commit(ops::move_record(&self.store, row, direction));
    }

    pub fn move_container(&mut self, container: &str, direction: MoveDirection) {
        self.commit(ops::move_container(&self.store, container, direction));
    }

    /// Sorts by `field`; sorting by the same field again flips the direction.
    pub fn sort_by(&mut self, field: SortField) -> SortDirection {
        let direction = match self.last_sort {
            Some((last_field, last_direction)) if last_field == field => last_direction.toggled(),
            _ => SortDirection::Ascending,
        };
        self.last_sort = Some((field, direction));
        self.commit(ops::sort_records(&self.store, field, direction));
        direction
    }

    /// Applies a delta batch as one transaction and commits the result.
    pub fn apply_delta(&mut self, ops: &[DeltaOp]) -> BatchOutcome {
        let outcome = apply_batch(&self.store, ops);
        self.commit(outcome.store.clone());
        outcome
    }

    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        validate(&self.store)
    }

    /// Replaces the whole store from the tabular format; an unparseable
    /// document fails without touching the current store. Returns the number
    /// of imported records.
    pub fn import_table(&mut self, input: &str) -> Result<usize, GridError> {
        let store = table::parse_table(input)?;
        let imported = store.len();
        self.commit(store);
        Ok(imported)
    }

    pub fn export_table(&self) -> String {
        table::render_table(&self.store)
    }

    pub fn undo(&mut self) -> bool {
        match self.history.undo() {
            Some(prior) => {
                self.store = prior;
                true
            }
            None => false,
        }
    }

    pub fn redo(&mut self) -> bool {
        match self.history.redo() {
            Some(next) => {
                self.store = next;
                true
            }
            None => false,
        }
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }
}

impl Default for GridSession {
    fn default() -> Self {
        Self::new()
    }
}
