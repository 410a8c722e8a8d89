use linkgrid::Diagnostic;
use serde::Serialize;

use crate::error::ExitStatus;

pub mod apply;
pub mod check;

#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CommandResult {
    Check {
        path: String,
        records: usize,
        diagnostics: Vec<Diagnostic>,
    },
    Apply {
        path: String,
        records: usize,
        changes: Vec<String>,
        warnings: Vec<String>,
        diagnostics: Vec<Diagnostic>,
        written: bool,
    },
}

impl CommandResult {
    pub fn exit_status(&self) -> ExitStatus {
        match self {
            CommandResult::Check { diagnostics, .. } => {
                if diagnostics.is_empty() {
                    ExitStatus::Ok
                } else {
                    ExitStatus::Data
                }
            }
            CommandResult::Apply { .. } => ExitStatus::Ok,
        }
    }
}
