//! Record store and mutation engine for editing a node-link diagram through
//! a flat, table-like record set.
//!
//! The store is an ordered sequence of [`Record`]s; container membership is
//! positional (contiguous runs), ids are derived from `container + "-" +
//! name`, and every mutation keeps cross-references consistent as names
//! change. Rendering, file formats beyond the tabular codec, and the
//! assistant transport are collaborators outside this crate.

pub mod delta;
pub mod error;
pub mod history;
pub mod ops;
pub mod record;
pub mod refs;
pub mod session;
pub mod store;
pub mod table;
pub mod validate;

pub use delta::{BatchOutcome, DeltaNode, DeltaOp, apply_batch, parse_batch, parse_delta_document};
pub use error::GridError;
pub use history::{DEFAULT_HISTORY_CAPACITY, SnapshotHistory};
pub use ops::{
    DeleteImpact, MoveDirection, NewRecord, SortDirection, SortField, add_record,
    clear_link, delete_container, delete_impact, delete_record, duplicate_container,
    duplicate_record, move_container, move_record, rename_container, rename_group, rename_item,
    set_link, sort_records,
};
pub use record::{Record, derive_id};
pub use refs::{clear_references, referencing_rows, rewrite_references};
pub use session::GridSession;
pub use store::RecordStore;
pub use table::{load_table, parse_table, render_table, save_table};
pub use validate::{Diagnostic, validate};
