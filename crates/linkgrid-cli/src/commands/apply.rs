use std::fs;

use clap::{Arg, ArgAction, ArgMatches, Command};
use linkgrid::{apply_batch, load_table, parse_delta_document, save_table, validate};

use crate::commands::CommandResult;
use crate::error::CliError;

pub fn command() -> Command {
    Command::new("apply")
        .about("Apply a delta batch to a table document")
        .arg(
            Arg::new("file")
                .value_name("FILE")
                .required(true)
                .help("Path to the table document"),
        )
        .arg(
            Arg::new("delta")
                .long("delta")
                .value_name("BATCH")
                .required(true)
                .help("Path to a JSON array of delta operations"),
        )
        .arg(
            Arg::new("write")
                .long("write")
                .action(ArgAction::SetTrue)
                .help("Write the resulting table back to FILE (default is a dry run)"),
        )
}

pub fn run(matches: &ArgMatches) -> Result<CommandResult, CliError> {
    let path = matches
        .get_one::<String>("file")
        .expect("clap ensures required option");
    let delta_path = matches
        .get_one::<String>("delta")
        .expect("clap ensures required option");
    let write = matches.get_flag("write");

    let store = load_table(path)?;

    let delta_input = fs::read_to_string(delta_path)?;
    let (ops, mut warnings) = parse_delta_document(&delta_input)?;
    let outcome = apply_batch(&store, &ops);
    warnings.extend(outcome.warnings);

    let diagnostics = validate(&outcome.store);
    if write {
        save_table(path, &outcome.store)?;
    }

    Ok(CommandResult::Apply {
        path: path.clone(),
        records: outcome.store.len(),
        changes: outcome.changes,
        warnings,
        diagnostics,
        written: write,
    })
}
