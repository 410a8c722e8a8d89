use clap::{Arg, ArgMatches, Command};
use linkgrid::{load_table, validate};

use crate::commands::CommandResult;
use crate::error::CliError;

pub fn command() -> Command {
    Command::new("check")
        .about("Validate a table document for duplicate ids and broken links")
        .arg(
            Arg::new("file")
                .value_name("FILE")
                .required(true)
                .help("Path to the table document"),
        )
}

pub fn run(matches: &ArgMatches) -> Result<CommandResult, CliError> {
    let path = matches
        .get_one::<String>("file")
        .expect("clap ensures required option");

    let store = load_table(path)?;
    let diagnostics = validate(&store);

    Ok(CommandResult::Check {
        path: path.clone(),
        records: store.len(),
        diagnostics,
    })
}
