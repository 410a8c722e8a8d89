//! The mutation API: every edit takes a store and returns a new store.
//!
//! Out-of-range rows and unknown containers are no-ops rather than errors;
//! the grid has no fatal states, only edits that do nothing.

pub mod insert;
pub mod link;
pub mod remove;
pub mod rename;
pub mod reorder;
pub mod sort;

pub use insert::{NewRecord, add_record, duplicate_container, duplicate_record};
pub use link::{clear_link, set_link};
pub use remove::{DeleteImpact, delete_container, delete_impact, delete_record};
pub use rename::{rename_container, rename_group, rename_item};
pub use reorder::{MoveDirection, move_container, move_record};
pub use sort::{SortDirection, SortField, sort_records};
