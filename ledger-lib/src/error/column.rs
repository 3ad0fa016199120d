//! Column set validation errors

/// Error raised while validating a set of column descriptors.
///
/// Column sets are validated once, when the table is configured. A table
/// never sees these at sort time.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ColumnError {
    /// Two columns in the same set share a key.
    #[error("Duplicate column key '{key}'")]
    DuplicateKey { key: String },

    /// A sortable column has neither a sort function nor a field the row
    /// type can resolve.
    #[error("Column '{key}' is sortable but field '{field}' cannot be resolved on {row_type}")]
    Unresolvable {
        key: String,
        field: String,
        row_type: &'static str,
    },
}

impl ColumnError {
    /// Creates a new duplicate key error.
    pub fn duplicate_key(key: impl Into<String>) -> Self {
        Self::DuplicateKey { key: key.into() }
    }

    /// Creates a new unresolvable column error.
    pub fn unresolvable(
        key: impl Into<String>,
        field: impl Into<String>,
        row_type: &'static str,
    ) -> Self {
        Self::Unresolvable {
            key: key.into(),
            field: field.into(),
            row_type,
        }
    }
}
