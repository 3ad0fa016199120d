//! CLI errors

use std::path::Path;
use std::path::PathBuf;

use ledger_lib::error::ConfigError;

use crate::cli::Kind;

/// Anything that stops the CLI from printing a view.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// A file could not be read.
    #[error("Failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The records file is not a JSON array of the requested kind.
    #[error("Invalid {kind} export: {source}")]
    Records {
        kind: Kind,
        source: serde_json::Error,
    },

    /// `--group-by` names a field the record kind does not have.
    #[error("Cannot group {kind} by '{field}': expected one of {}", expected.join(", "))]
    UnknownField {
        kind: Kind,
        field: String,
        expected: Vec<&'static str>,
    },

    /// Table configuration was rejected.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Writing the view failed.
    #[error("Failed to write output: {0}")]
    Write(#[from] std::io::Error),

    /// The logger could not be installed.
    #[error("Failed to initialize logger: {0}")]
    Logger(#[from] log::SetLoggerError),
}

impl CliError {
    /// Creates a new read error.
    pub fn read(path: &Path, source: std::io::Error) -> Self {
        Self::Read {
            path: path.to_path_buf(),
            source,
        }
    }

    /// Creates a new unknown field error.
    pub fn unknown_field(kind: Kind, field: impl Into<String>, expected: &[&'static str]) -> Self {
        Self::UnknownField {
            kind,
            field: field.into(),
            expected: expected.to_vec(),
        }
    }
}
