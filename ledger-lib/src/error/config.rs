//! Table configuration errors

use super::ColumnError;

/// Error raised while building a table from its configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A page size of zero was configured.
    #[error("Invalid page size {size}: must be greater than zero")]
    InvalidPageSize { size: usize },

    /// A page-size option of zero was configured.
    #[error("Invalid page size option {size}: must be greater than zero")]
    InvalidPageSizeOption { size: usize },

    /// Controlled pagination reported zero total pages.
    #[error("Controlled pagination must report at least one page")]
    NoPages,

    /// The column set failed validation.
    #[error(transparent)]
    Column(#[from] ColumnError),

    /// A configuration document could not be parsed.
    #[error("Invalid table configuration: {0}")]
    Parse(#[from] serde_json::Error),
}

impl ConfigError {
    /// Creates a new invalid page size error.
    pub fn invalid_page_size(size: usize) -> Self {
        Self::InvalidPageSize { size }
    }
}
