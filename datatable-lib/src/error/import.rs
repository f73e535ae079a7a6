//! CSV import errors

/// Errors that abort a CSV import.
///
/// When an import fails, no rows have been added to the table.
#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    /// The CSV structure could not be parsed.
    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),

    /// The input could not be read.
    #[error("Failed to read import: {0}")]
    Io(#[from] std::io::Error),

    /// A parsed record could not be turned into a row.
    #[error("Error mapping CSV row {row}: {message}")]
    Mapping {
        /// Zero-based index of the data row (header excluded).
        row: usize,
        /// Description of the mapping failure.
        message: String,
    },
}

impl ImportError {
    /// Creates a new mapping error.
    pub fn mapping(row: usize, message: impl Into<String>) -> Self {
        Self::Mapping {
            row,
            message: message.into(),
        }
    }

    /// Returns the data row index if this is a mapping error.
    pub fn row(&self) -> Option<usize> {
        match self {
            Self::Mapping { row, .. } => Some(*row),
            _ => None,
        }
    }
}
