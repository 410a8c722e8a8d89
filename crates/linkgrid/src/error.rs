use thiserror::Error;

/// High-level error type shared across linkgrid components.
///
/// Validation findings are not errors (see [`crate::validate`]); this type
/// covers the all-or-nothing failures: a table that cannot be imported and
/// serialization of external payloads.
#[derive(Debug, Error)]
pub enum GridError {
    #[error("import error: {0}")]
    Import(String),
    #[error("serialization error: {0}")]
    Serialization(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<serde_json::Error> for GridError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}
