//! CSV export errors

/// Errors that can occur while writing a CSV export.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    /// The CSV writer rejected a record.
    #[error("CSV writing error: {0}")]
    Csv(#[from] csv::Error),

    /// The destination could not be written or flushed.
    #[error("Failed to write export: {0}")]
    Io(#[from] std::io::Error),
}
