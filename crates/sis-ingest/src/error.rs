//! Error types for import reconciliation.
//!
//! Only resource-level failures surface here. Structural and semantic
//! problems with individual lines are recorded in the
//! [`ReconcileOutcome`](crate::ReconcileOutcome) instead of being raised.

use thiserror::Error;

/// Errors that abort an import before or during stream reading.
#[derive(Debug, Error)]
pub enum IngestError {
    /// The input stream held no bytes at all.
    #[error("import stream is empty")]
    EmptyStream,

    /// The input stream failed mid-read.
    #[error("failed to read import stream")]
    Read {
        #[source]
        source: std::io::Error,
    },
}

/// Result type for reconciliation operations.
pub type Result<T> = std::result::Result<T, IngestError>;
