use std::process::ExitCode;

use linkgrid::Diagnostic;
use serde_json::json;

use crate::commands::CommandResult;
use crate::error::CliError;

pub enum OutputFormat {
    Text,
    Json,
}

/// Renders a `CommandResult` as either human-readable text or newline-delimited
/// JSON, then converts the outcome into a deterministic exit code.
pub fn emit_result(result: CommandResult, format: OutputFormat) -> Result<ExitCode, CliError> {
    match format {
        OutputFormat::Text => print_text(&result),
        OutputFormat::Json => print_json(&result)?,
    };
    Ok(ExitCode::from(result.exit_status().code()))
}

fn print_text(result: &CommandResult) {
    match result {
        CommandResult::Check {
            records,
            diagnostics,
            ..
        } => {
            if diagnostics.is_empty() {
                println!("Table status: OK ({records} records)");
            } else {
                println!("Table status: FAIL ({records} records)");
                for diagnostic in diagnostics {
                    println!("  - {}", describe(diagnostic));
                }
            }
        }
        CommandResult::Apply {
            path,
            records,
            changes,
            warnings,
            diagnostics,
            written,
        } => {
            println!(
                "Applied {} operation(s) to {path} ({records} records)",
                changes.len()
            );
            for change in changes {
                println!("  + {change}");
            }
            for warning in warnings {
                println!("  ! {warning}");
            }
            for diagnostic in diagnostics {
                println!("  - {}", describe(diagnostic));
            }
            if !written {
                println!("Dry run: no files written (pass --write to save)");
            }
        }
    }
}

fn print_json(result: &CommandResult) -> Result<(), CliError> {
    let payload = json!(result);
    println!("{payload}");
    Ok(())
}

fn describe(diagnostic: &Diagnostic) -> String {
    match diagnostic {
        // The duplicate message names only the id; rows make it actionable.
        Diagnostic::DuplicateId { .. } => {
            let rows: Vec<String> = diagnostic.rows().iter().map(ToString::to_string).collect();
            format!("{diagnostic} (rows {})", rows.join(", "))
        }
        Diagnostic::BrokenLink { .. } => diagnostic.to_string(),
    }
}
