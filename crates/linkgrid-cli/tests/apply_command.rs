use assert_cmd::Command;
use predicates::str::contains;
use std::fs;
use tempfile::TempDir;

fn cli() -> Command {
    Command::new(env!("CARGO_BIN_EXE_linkgrid"))
}

fn write_table(dir: &TempDir) -> std::path::PathBuf {
    let table = dir.path().join("diagram.csv");
    fs::write(
        &table,
        "container,name,id,linkTargetId,linkLabel\n\
         Root,Alpha,,,\n\
         Root,Beta,,Root-Alpha,next\n",
    )
    .unwrap();
    table
}

#[test]
fn apply_is_a_dry_run_by_default() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    let table = write_table(&temp);
    let before = fs::read_to_string(&table)?;

    let delta = temp.path().join("batch.json");
    fs::write(
        &delta,
        r#"[{"op": "ADD", "nodes": [{"container": "Root", "name": "Gamma"}]}]"#,
    )?;

    let mut cmd = cli();
    cmd.arg("apply").arg(&table).arg("--delta").arg(&delta);

    cmd.assert()
        .success()
        .stdout(contains("Applied 1 operation(s)"))
        .stdout(contains("Added 'Root-Gamma'"))
        .stdout(contains("Dry run: no files written"));

    assert_eq!(fs::read_to_string(&table)?, before);
    Ok(())
}

#[test]
fn apply_write_persists_the_result() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    let table = write_table(&temp);

    let delta = temp.path().join("batch.json");
    fs::write(
        &delta,
        r#"[{"op": "RENAME_GROUP", "from": "Root", "to": "Trunk"}]"#,
    )?;

    let mut cmd = cli();
    cmd.arg("apply")
        .arg(&table)
        .arg("--delta")
        .arg(&delta)
        .arg("--write");

    cmd.assert()
        .success()
        .stdout(contains("Renamed group 'Root' to 'Trunk' (2 records)"));

    let after = fs::read_to_string(&table)?;
    assert!(after.contains("Trunk,Alpha,Trunk-Alpha"));
    // References followed the rename.
    assert!(after.contains("Trunk-Alpha,next"));
    Ok(())
}

#[test]
fn apply_surfaces_skipped_entries_as_warnings() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    let table = write_table(&temp);

    let delta = temp.path().join("batch.json");
    fs::write(
        &delta,
        r#"[{"op": "TELEPORT"}, {"op": "DISCONNECT", "id": "Root-Ghost"}]"#,
    )?;

    let mut cmd = cli();
    cmd.arg("apply").arg(&table).arg("--delta").arg(&delta);

    cmd.assert()
        .success()
        .stdout(contains("unknown operation 'TELEPORT' skipped"))
        .stdout(contains("DISCONNECT 'Root-Ghost': no matching record, skipped"));
    Ok(())
}

#[test]
fn apply_reports_diagnostics_on_the_result() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    let table = write_table(&temp);

    let delta = temp.path().join("batch.json");
    fs::write(
        &delta,
        r#"[{"op": "CONNECT", "from": "Root-Alpha", "to": "Root-Nowhere"}]"#,
    )?;

    let mut cmd = cli();
    cmd.arg("apply").arg(&table).arg("--delta").arg(&delta);

    // Dangling targets are advisory, not fatal.
    cmd.assert()
        .success()
        .stdout(contains("Connected 'Root-Alpha' to 'Root-Nowhere'"))
        .stdout(contains("Row 1: broken link to 'Root-Nowhere'"));
    Ok(())
}

#[test]
fn apply_rejects_a_non_array_delta_document() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    let table = write_table(&temp);

    let delta = temp.path().join("batch.json");
    fs::write(&delta, r#"{"op": "ADD"}"#)?;

    let mut cmd = cli();
    cmd.arg("apply").arg(&table).arg("--delta").arg(&delta);

    cmd.assert()
        .failure()
        .code(65)
        .stderr(contains("expected a JSON array"));
    Ok(())
}
