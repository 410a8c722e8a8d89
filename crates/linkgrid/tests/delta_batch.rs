use linkgrid::{GridSession, NewRecord, parse_batch};
use serde_json::json;

fn seeded_session() -> GridSession {
    let mut session = GridSession::new();
    for (container, name) in [("Trunk", "Alpha"), ("Trunk", "Beta"), ("Branch", "Gamma")] {
        session.add_record(NewRecord {
            container: container.into(),
            name: name.into(),
            ..Default::default()
        });
    }
    session
}

#[test]
fn batch_runs_left_to_right_over_the_cumulative_store() {
    let mut session = seeded_session();
    let entries = vec![
        json!({"op": "ADD", "nodes": [{"container": "Branch", "name": "Delta"}]}),
        json!({"op": "CONNECT", "from": "Branch-Delta", "to": "Trunk-Alpha", "label": "feeds"}),
        json!({"op": "RENAME_GROUP", "from": "Trunk", "to": "Root"}),
    ];
    let (ops, warnings) = parse_batch(&entries);
    assert!(warnings.is_empty());

    let outcome = session.apply_delta(&ops);
    assert_eq!(outcome.changes.len(), 3);

    let records = session.records();
    assert_eq!(records.len(), 4);
    // The link created in op 2 followed the rename in op 3.
    let delta = records.iter().find(|r| r.id == "Branch-Delta").unwrap();
    assert_eq!(delta.link_target, "Root-Alpha");
    assert_eq!(delta.link_label, "feeds");
    assert!(session.diagnostics().is_empty());
}

#[test]
fn whole_batch_is_one_undo_step() {
    let mut session = seeded_session();
    let entries = vec![
        json!({"op": "DELETE", "ids": ["Trunk-Alpha"]}),
        json!({"op": "UPDATE", "id": "Trunk-Beta", "changes": {"itemInfo": "kept"}}),
    ];
    let (ops, warnings) = parse_batch(&entries);
    assert!(warnings.is_empty());

    session.apply_delta(&ops);
    assert_eq!(session.records().len(), 2);
    assert_eq!(session.records()[0].item_note, "kept");

    assert!(session.undo());
    assert_eq!(session.records().len(), 3);
    assert_eq!(session.records()[0].id, "Trunk-Alpha");
    assert_eq!(session.records()[1].item_note, "");
}

#[test]
fn skipped_entries_do_not_abort_the_batch() {
    let mut session = seeded_session();
    let entries = vec![
        json!({"op": "VANISH", "id": "Trunk-Alpha"}),
        json!({"op": "UPDATE", "id": "Nobody", "changes": {"name": "x"}}),
        json!({"op": "DISCONNECT", "id": "Trunk-Beta"}),
    ];
    let (ops, mut warnings) = parse_batch(&entries);
    assert_eq!(warnings.len(), 1);
    assert!(warnings[0].contains("unknown operation 'VANISH'"));

    let outcome = session.apply_delta(&ops);
    warnings.extend(outcome.warnings);
    assert_eq!(warnings.len(), 2);
    assert!(warnings[1].contains("UPDATE 'Nobody'"));
    assert_eq!(outcome.changes, vec!["Disconnected 'Trunk-Beta'".to_string()]);
}

#[test]
fn empty_batch_leaves_history_untouched() {
    let mut session = seeded_session();
    let outcome = session.apply_delta(&[]);
    assert!(outcome.changes.is_empty());

    // Nothing new was committed: the three seed mutations remain the only
    // undo steps.
    assert!(session.undo());
    assert!(session.undo());
    assert!(session.undo());
    assert!(!session.undo());
    assert!(session.records().is_empty());
}
