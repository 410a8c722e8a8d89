//! Full-replacement tabular codec.
//!
//! The wire format is a comma-separated table with the header
//! `container,name,id,linkTargetId,linkLabel[,containerInfo,itemInfo,linkInfo]`.
//! Import either replaces the whole store or fails as one typed error; it
//! never partially applies. Ids in the input are recomputed, never trusted.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::GridError;
use crate::record::Record;
use crate::store::RecordStore;

const HEADER: [&str; 8] = [
    "container",
    "name",
    "id",
    "linkTargetId",
    "linkLabel",
    "containerInfo",
    "itemInfo",
    "linkInfo",
];
const SHORT_COLUMNS: usize = 5;

pub fn parse_table(input: &str) -> Result<RecordStore, GridError> {
    let mut rows = parse_rows(input)?.into_iter();

    let Some((_, header)) = rows.next() else {
        return Err(GridError::Import("empty document".into()));
    };
    let columns = header.len();
    if columns != SHORT_COLUMNS && columns != HEADER.len() {
        return Err(GridError::Import(format!(
            "unrecognized header: expected {} or {} columns, found {}",
            SHORT_COLUMNS,
            HEADER.len(),
            columns
        )));
    }
    for (field, expected) in header.iter().zip(HEADER.iter()) {
        if field.trim() != *expected {
            return Err(GridError::Import(format!(
                "unrecognized header column '{}' (expected '{}')",
                field.trim(),
                expected
            )));
        }
    }

    let mut records = Vec::new();
    for (row, fields) in rows {
        if fields.len() != columns {
            return Err(GridError::Import(format!(
                "row {row}: expected {columns} columns, found {}",
                fields.len()
            )));
        }
        if fields[0].is_empty() || fields[1].is_empty() {
            debug!(row, "dropping row without container or name");
            continue;
        }
        // fields[2] is the incoming id; Record::new re-derives it.
        let mut record = Record::new(
            fields[0].clone(),
            fields[1].clone(),
            fields[3].clone(),
            fields[4].clone(),
        );
        if columns == HEADER.len() {
            record.container_note = fields[5].clone();
            record.item_note = fields[6].clone();
            record.link_note = fields[7].clone();
        }
        records.push(record);
    }
    Ok(RecordStore::from_records(records))
}

/// Renders the full eight-column form.
pub fn render_table(store: &RecordStore) -> String {
    let mut out = HEADER.join(",");
    out.push('\n');
    for record in store.records() {
        let fields = [
            record.container.as_str(),
            record.name.as_str(),
            record.id.as_str(),
            record.link_target.as_str(),
            record.link_label.as_str(),
            record.container_note.as_str(),
            record.item_note.as_str(),
            record.link_note.as_str(),
        ];
        let row: Vec<String> = fields.iter().map(|f| quote_field(f)).collect();
        out.push_str(&row.join(","));
        out.push('\n');
    }
    out
}

/// Reads and parses a table document from disk.
pub fn load_table(path: impl AsRef<Path>) -> Result<RecordStore, GridError> {
    let input = fs::read_to_string(path)?;
    parse_table(&input)
}

/// Renders `store` and writes it to `path`.
pub fn save_table(path: impl AsRef<Path>, store: &RecordStore) -> Result<(), GridError> {
    fs::write(path, render_table(store))?;
    Ok(())
}

fn quote_field(field: &str) -> String {
    if field.contains(',') || field.contains('"') || field.contains('\n') || field.contains('\r') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

/// Splits the whole document into logical rows, each tagged with the 1-based
/// physical line it starts on.
///
/// A quoted field may span physical lines, so rendered multiline notes
/// re-import. Blank lines between rows are skipped.
fn parse_rows(input: &str) -> Result<Vec<(usize, Vec<String>)>, GridError> {
    let mut rows = Vec::new();
    let mut fields: Vec<String> = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut line = 1;
    let mut row_start = 1;
    let mut chars = input.chars().peekable();

    while let Some(c) = chars.next() {
        if in_quotes {
            match c {
                '"' => {
                    if chars.peek() == Some(&'"') {
                        field.push('"');
                        chars.next();
                    } else {
                        in_quotes = false;
                    }
                }
                '\n' => {
                    line += 1;
                    field.push('\n');
                }
                _ => field.push(c),
            }
        } else {
            match c {
                '"' if field.is_empty() => in_quotes = true,
                ',' => fields.push(std::mem::take(&mut field)),
                '\r' if chars.peek() == Some(&'\n') => {}
                '\n' => {
                    line += 1;
                    end_row(&mut rows, &mut fields, &mut field, row_start);
                    row_start = line;
                }
                _ => field.push(c),
            }
        }
    }
    if in_quotes {
        return Err(GridError::Import(format!(
            "row {row_start}: unterminated quote"
        )));
    }
    end_row(&mut rows, &mut fields, &mut field, row_start);
    Ok(rows)
}

fn end_row(
    rows: &mut Vec<(usize, Vec<String>)>,
    fields: &mut Vec<String>,
    field: &mut String,
    row_start: usize,
) {
    if fields.is_empty() && field.trim().is_empty() {
        field.clear();
        return;
    }
    fields.push(std::mem::take(field));
    rows.push((row_start, std::mem::take(fields)));
}
