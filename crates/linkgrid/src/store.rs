use std::ops::Range;

use crate::record::Record;

/// Ordered record sequence; the single source of truth for the grid.
///
/// Order is semantically meaningful: a container's membership is the
/// contiguous run of rows sharing its `container` value, and run bounds are
/// computed by scanning rather than stored. The store is a value type: every
/// mutation in [`crate::ops`] takes a store and returns a new one, so callers
/// never edit rows in place.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RecordStore {
    records: Vec<Record>,
}

impl RecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_records(records: Vec<Record>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn into_records(self) -> Vec<Record> {
        self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, row: usize) -> Option<&Record> {
        self.records.get(row)
    }

    pub fn find_by_id(&self, id: &str) -> Option<&Record> {
        self.records.iter().find(|r| r.id == id)
    }

    /// Row of the first record whose id matches, if any.
    pub fn position_of_id(&self, id: &str) -> Option<usize> {
        self.records.iter().position(|r| r.id == id)
    }

    /// Contiguous run of rows sharing the container of `row`.
    pub fn container_run(&self, row: usize) -> Option<Range<usize>> {
        let container = &self.records.get(row)?.container;
        let mut start = row;
        while start > 0 && self.records[start - 1].container == *container {
            start -= 1;
        }
        let mut end = row + 1;
        while end < self.records.len() && self.records[end].container == *container {
            end += 1;
        }
        Some(start..end)
    }

    /// Run of the first record carrying `container`, if any.
    pub fn container_run_of(&self, container: &str) -> Option<Range<usize>> {
        let row = self.records.iter().position(|r| r.container == container)?;
        self.container_run(row)
    }

    pub fn is_first_of_run(&self, row: usize) -> bool {
        match self.container_run(row) {
            Some(run) => run.start == row,
            None => false,
        }
    }

    /// Container names in row order, one entry per contiguous run.
    pub fn container_names(&self) -> Vec<String> {
        let mut names: Vec<String> = Vec::new();
        for record in &self.records {
            if names.last().map(String::as_str) != Some(record.container.as_str()) {
                names.push(record.container.clone());
            }
        }
        names
    }
}
