use crate::record::Record;
use crate::store::RecordStore;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SortField {
    Container,
    Name,
    Id,
    LinkTarget,
    LinkLabel,
}

impl SortField {
    fn key<'a>(&self, record: &'a Record) -> &'a str {
        match self {
            SortField::Container => &record.container,
            SortField::Name => &record.name,
            SortField::Id => &record.id,
            SortField::LinkTarget => &record.link_target,
            SortField::LinkLabel => &record.link_label,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn toggled(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }
}

/// Stable sort of the full store by one field.
///
/// Equal keys keep their relative order, so repeated sorts by different
/// fields compose the way a user expects from a table view.
pub fn sort_records(store: &RecordStore, field: SortField, direction: SortDirection) -> RecordStore {
    let mut records = store.records().to_vec();
    records.sort_by(|a, b| {
        let ordering = field.key(a).cmp(field.key(b));
        match direction {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    });
    RecordStore::from_records(records)
}
