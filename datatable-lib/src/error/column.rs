//! Column definition errors

/// Errors raised when a column cannot be added to a table.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ColumnError {
    /// The label is empty after trimming whitespace.
    #[error("Column label must not be empty")]
    EmptyLabel,

    /// Another column already uses the derived id.
    #[error("Column '{id}' already exists")]
    Duplicate { id: String },

    /// The derived id names a field the table manages itself.
    #[error("Column id '{id}' is reserved")]
    Reserved { id: String },
}

impl ColumnError {
    /// Creates a new duplicate column error.
    pub fn duplicate(id: impl Into<String>) -> Self {
        Self::Duplicate { id: id.into() }
    }

    /// Creates a new reserved column id error.
    pub fn reserved(id: impl Into<String>) -> Self {
        Self::Reserved { id: id.into() }
    }
}
