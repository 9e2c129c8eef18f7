use thiserror::Error;

/// Errors that can occur while rendering a CSV export.
#[derive(Debug, Error)]
pub enum ExportError {
    /// CSV serialization failed.
    #[error("failed to write CSV export")]
    Csv {
        #[source]
        source: csv::Error,
    },

    /// Underlying writer failed while flushing.
    #[error("failed to flush CSV export")]
    Flush {
        #[source]
        source: std::io::Error,
    },
}

/// Result type for export operations.
pub type Result<T> = std::result::Result<T, ExportError>;
