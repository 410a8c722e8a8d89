//! Interpreter for externally supplied delta batches.
//!
//! The batch format is a contract with the assistant collaborator: an array
//! of operation objects applied strictly left-to-right, each op seeing the
//! cumulative store. Unknown or malformed entries are skipped with a logged
//! warning, never fatal to the batch.

use std::collections::BTreeMap;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

use crate::error::GridError;
use crate::ops;
use crate::record::Record;
use crate::refs::{clear_references, rewrite_references};
use crate::store::RecordStore;

/// One entry of an `ADD` operation.
#[derive(Clone, Debug, Serialize, Deserialize, JsonSchema)]
pub struct DeltaNode {
    pub container: String,
    pub name: String,
    #[serde(default, rename = "linkTargetId")]
    pub link_target: String,
    #[serde(default, rename = "linkLabel")]
    pub link_label: String,
}

/// Atomic edit operation, exhaustively matched: misnaming an operation in
/// Rust code is a compile error, while unknown names on the wire are handled
/// during parsing.
#[derive(Clone, Debug, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "op")]
pub enum DeltaOp {
    #[serde(rename = "ADD")]
    Add { nodes: Vec<DeltaNode> },
    #[serde(rename = "DELETE")]
    Delete { ids: Vec<String> },
    #[serde(rename = "UPDATE")]
    Update {
        id: String,
        changes: BTreeMap<String, Value>,
    },
    #[serde(rename = "RENAME_GROUP")]
    RenameGroup { from: String, to: String },
    #[serde(rename = "CONNECT")]
    Connect {
        from: String,
        to: String,
        #[serde(default)]
        label: Option<String>,
    },
    #[serde(rename = "DISCONNECT")]
    Disconnect { id: String },
}

const KNOWN_OPS: [&str; 6] = [
    "ADD",
    "DELETE",
    "UPDATE",
    "RENAME_GROUP",
    "CONNECT",
    "DISCONNECT",
];

/// Result of applying one batch: the new store, ordered human-readable change
/// descriptions, and warnings for every skipped entry or unresolved id.
#[derive(Clone, Debug, Default)]
pub struct BatchOutcome {
    pub store: RecordStore,
    pub changes: Vec<String>,
    pub warnings: Vec<String>,
}

/// Parses a full delta document: a JSON array of operation entries.
///
/// A document that is not valid JSON, or not an array, is a single typed
/// failure; per-entry leniency starts once the array shape holds.
pub fn parse_delta_document(input: &str) -> Result<(Vec<DeltaOp>, Vec<String>), GridError> {
    let payload: Value = serde_json::from_str(input)?;
    let Some(entries) = payload.as_array() else {
        return Err(GridError::Serialization(
            "expected a JSON array of operations".into(),
        ));
    };
    Ok(parse_batch(entries))
}

/// Lenient parse of a batch payload. Entries with an unknown `op` or missing
/// required fields are dropped with a warning; everything else goes through.
pub fn parse_batch(entries: &[Value]) -> (Vec<DeltaOp>, Vec<String>) {
    let mut parsed = Vec::with_capacity(entries.len());
    let mut warnings = Vec::new();

    for (index, entry) in entries.iter().enumerate() {
        let name = entry.get("op").and_then(Value::as_str).unwrap_or("");
        if !KNOWN_OPS.contains(&name) {
            warn!(op = name, index, "skipping unknown delta operation");
            warnings.push(format!("op {index}: unknown operation '{name}' skipped"));
            continue;
        }
        match serde_json::from_value::<DeltaOp>(entry.clone()) {
            Ok(op) => parsed.push(op),
            Err(err) => {
                warn!(op = name, index, %err, "skipping malformed delta operation");
                warnings.push(format!("op {index}: malformed {name} skipped ({err})"));
            }
        }
    }
    (parsed, warnings)
}

/// Applies `ops` in order, each seeing the effects of the previous ones.
pub fn apply_batch(store: &RecordStore, ops: &[DeltaOp]) -> BatchOutcome {
    let mut outcome = BatchOutcome {
        store: store.clone(),
        changes: Vec::new(),
        warnings: Vec::new(),
    };
    for op in ops {
        apply_op(&mut outcome, op);
    }
    outcome
}

fn apply_op(outcome: &mut BatchOutcome, op: &DeltaOp) {
    match op {
        DeltaOp::Add { nodes } => {
            for node in nodes {
                outcome.store = ops::add_record(
                    &outcome.store,
                    ops::NewRecord {
                        container: node.container.clone(),
                        name: node.name.clone(),
                        link_target: node.link_target.clone(),
                        link_label: node.link_label.clone(),
                    },
                );
                let added = &outcome.store.records()[outcome.store.len() - 1];
                outcome.changes.push(format!("Added '{}'", added.id));
            }
        }
        DeltaOp::Delete { ids } => {
            let mut removed_ids = Vec::new();
            let mut records = Vec::with_capacity(outcome.store.len());
            for record in outcome.store.records() {
                if ids.iter().any(|id| *id == record.id) {
                    removed_ids.push(record.id.clone());
                } else {
                    records.push(record.clone());
                }
            }
            clear_references(&mut records, &removed_ids);
            outcome.store = RecordStore::from_records(records);
            for id in &removed_ids {
                outcome.changes.push(format!("Removed '{id}'"));
            }
            for id in ids {
                if !removed_ids.contains(id) {
                    skip(outcome, "DELETE", id);
                }
            }
        }
        DeltaOp::Update { id, changes } => {
            let Some(row) = outcome.store.position_of_id(id) else {
                skip(outcome, "UPDATE", id);
                return;
            };
            let mut records = outcome.store.records().to_vec();
            let old_id = records[row].id.clone();
            let mut applied = false;
            let mut identity_changed = false;
            for (field, value) in changes {
                match apply_field_change(&mut records[row], field, value) {
                    FieldChange::Applied => applied = true,
                    FieldChange::Identity => {
                        applied = true;
                        identity_changed = true;
                    }
                    FieldChange::Rejected(reason) => {
                        warn!(id = %id, field = %field, reason, "skipping update field");
                        outcome
                            .warnings
                            .push(format!("UPDATE '{id}': field '{field}' skipped ({reason})"));
                    }
                }
            }
            // Every field rejected: nothing changed, so nothing to report.
            if !applied {
                return;
            }
            if identity_changed {
                records[row].refresh_id();
                let new_id = records[row].id.clone();
                rewrite_references(&mut records, &old_id, &new_id);
            }
            let final_id = records[row].id.clone();
            outcome.store = RecordStore::from_records(records);
            outcome.changes.push(format!("Updated '{final_id}'"));
        }
        DeltaOp::RenameGroup { from, to } => {
            let members = outcome
                .store
                .records()
                .iter()
                .filter(|r| r.container == *from)
                .count();
            outcome.store = ops::rename_group(&outcome.store, from, to);
            outcome
                .changes
                .push(format!("Renamed group '{from}' to '{to}' ({members} records)"));
        }
        DeltaOp::Connect { from, to, label } => {
            let Some(row) = outcome.store.position_of_id(from) else {
                skip(outcome, "CONNECT", from);
                return;
            };
            outcome.store = ops::set_link(&outcome.store, row, to, label.as_deref());
            outcome.changes.push(format!("Connected '{from}' to '{to}'"));
        }
        DeltaOp::Disconnect { id } => {
            let Some(row) = outcome.store.position_of_id(id) else {
                skip(outcome, "DISCONNECT", id);
                return;
            };
            outcome.store = ops::clear_link(&outcome.store, row);
            outcome.changes.push(format!("Disconnected '{id}'"));
        }
    }
}

fn skip(outcome: &mut BatchOutcome, op: &str, id: &str) {
    warn!(op, id, "delta operation target not found");
    outcome
        .warnings
        .push(format!("{op} '{id}': no matching record, skipped"));
}

enum FieldChange {
    Applied,
    /// `container` or `name` changed; the id must be re-derived afterwards.
    Identity,
    Rejected(&'static str),
}

fn apply_field_change(record: &mut Record, field: &str, value: &Value) -> FieldChange {
    match field {
        "id" => FieldChange::Rejected("id is derived and cannot be written"),
        "container" => match value.as_str() {
            Some(v) => {
                record.container = v.to_string();
                FieldChange::Identity
            }
            None => FieldChange::Rejected("expected a string"),
        },
        "name" => match value.as_str() {
            Some(v) => {
                record.name = v.to_string();
                FieldChange::Identity
            }
            None => FieldChange::Rejected("expected a string"),
        },
        "linkTargetId" | "linkLabel" | "containerInfo" | "itemInfo" | "linkInfo" => {
            match value.as_str() {
                Some(v) => {
                    let slot = match field {
                        "linkTargetId" => &mut record.link_target,
                        "linkLabel" => &mut record.link_label,
                        "containerInfo" => &mut record.container_note,
                        "itemInfo" => &mut record.item_note,
                        _ => &mut record.link_note,
                    };
                    *slot = v.to_string();
                    FieldChange::Applied
                }
                None => FieldChange::Rejected("expected a string"),
            }
        }
        "linkVisible" | "nodeVisible" => match value.as_bool() {
            Some(v) => {
                if field == "linkVisible" {
                    record.link_visible = v;
                } else {
                    record.node_visible = v;
                }
                FieldChange::Applied
            }
            None => FieldChange::Rejected("expected a boolean"),
        },
        _ => FieldChange::Rejected("unknown field"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn document_must_be_a_json_array() {
        assert!(matches!(
            parse_delta_document(r#"{"op": "ADD"}"#),
            Err(GridError::Serialization(_))
        ));
        assert!(matches!(
            parse_delta_document("not json"),
            Err(GridError::Serialization(_))
        ));

        let (ops, warnings) =
            parse_delta_document(r#"[{"op": "DISCONNECT", "id": "R-A"}]"#).unwrap();
        assert_eq!(ops.len(), 1);
        assert!(warnings.is_empty());
    }

    #[test]
    fn parse_skips_unknown_ops_and_keeps_the_rest() {
        let entries = vec![
            json!({"op": "ADD", "nodes": [{"container": "X", "name": "Y"}]}),
            json!({"op": "EXPLODE"}),
            json!({"op": "DELETE"}),
        ];
        let (ops, warnings) = parse_batch(&entries);
        assert_eq!(ops.len(), 1);
        assert_eq!(warnings.len(), 2);
        assert!(warnings[0].contains("unknown operation 'EXPLODE'"));
        assert!(warnings[1].contains("malformed DELETE"));
    }

    #[test]
    fn add_then_connect_sees_prior_effects() {
        let entries = vec![
            json!({"op": "ADD", "nodes": [{"container": "X", "name": "Y"}]}),
            json!({"op": "CONNECT", "from": "X-Y", "to": "R-A"}),
        ];
        let (ops, warnings) = parse_batch(&entries);
        assert!(warnings.is_empty());

        let outcome = apply_batch(&RecordStore::new(), &ops);
        assert_eq!(outcome.store.len(), 1);
        let record = &outcome.store.records()[0];
        assert_eq!(record.id, "X-Y");
        // Dangling target: allowed here, reported by the validator.
        assert_eq!(record.link_target, "R-A");
        assert_eq!(outcome.changes.len(), 2);
    }

    #[test]
    fn update_rederives_id_and_rewrites_references() {
        let store = RecordStore::from_records(vec![
            Record::new("R", "A", "", ""),
            Record::new("R", "B", "R-A", ""),
        ]);
        let ops = vec![DeltaOp::Update {
            id: "R-A".into(),
            changes: BTreeMap::from([("name".to_string(), json!("Z"))]),
        }];
        let outcome = apply_batch(&store, &ops);
        assert_eq!(outcome.store.records()[0].id, "R-Z");
        assert_eq!(outcome.store.records()[1].link_target, "R-Z");
    }

    #[test]
    fn update_rejects_direct_id_writes() {
        let store = RecordStore::from_records(vec![Record::new("R", "A", "", "")]);
        let ops = vec![DeltaOp::Update {
            id: "R-A".into(),
            changes: BTreeMap::from([("id".to_string(), json!("forged"))]),
        }];
        let outcome = apply_batch(&store, &ops);
        assert_eq!(outcome.store.records()[0].id, "R-A");
        assert_eq!(outcome.warnings.len(), 1);
        // Nothing was applied, so nothing is reported as changed.
        assert!(outcome.changes.is_empty());
    }

    #[test]
    fn missing_targets_are_per_op_noops() {
        let store = RecordStore::from_records(vec![Record::new("R", "A", "", "")]);
        let ops = vec![
            DeltaOp::Disconnect { id: "ghost".into() },
            DeltaOp::Connect {
                from: "R-A".into(),
                to: "R-B".into(),
                label: Some("next".into()),
            },
        ];
        let outcome = apply_batch(&store, &ops);
        assert_eq!(outcome.warnings.len(), 1);
        assert_eq!(outcome.store.records()[0].link_target, "R-B");
        assert_eq!(outcome.store.records()[0].link_label, "next");
    }

    #[test]
    fn delete_clears_links_to_every_removed_id() {
        let store = RecordStore::from_records(vec![
            Record::new("R", "A", "", ""),
            Record::new("R", "B", "R-A", ""),
            Record::new("S", "C", "R-B", ""),
        ]);
        let ops = vec![DeltaOp::Delete {
            ids: vec!["R-A".into(), "R-B".into()],
        }];
        let outcome = apply_batch(&store, &ops);
        assert_eq!(outcome.store.len(), 1);
        assert_eq!(outcome.store.records()[0].link_target, "");
        assert_eq!(outcome.changes.len(), 2);
    }
}
