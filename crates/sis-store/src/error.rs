//! Error types for store operations.

use std::path::PathBuf;

use sis_model::StudentId;
use thiserror::Error;

/// Errors that can occur during store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Enrollment number already present (case-insensitive).
    #[error("enrollment number already exists: {number}")]
    DuplicateEnrollment { number: String },

    /// No record with the given internal id.
    #[error("student not found: {id}")]
    NotFound { id: StudentId },

    /// Update attempted to change an immutable enrollment number.
    #[error("enrollment number of student {id} cannot be changed")]
    ImmutableEnrollmentNumber { id: StudentId },

    /// A thread panicked while holding the store lock.
    #[error("store lock poisoned")]
    LockPoisoned,

    /// File I/O error while reading or writing a snapshot.
    #[error("failed to {operation} snapshot file: {path}")]
    Io {
        operation: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Snapshot file holds invalid JSON or violates record invariants.
    #[error("invalid snapshot file: {path}")]
    InvalidSnapshot {
        path: PathBuf,
        reason: String,
    },

    /// Atomic write failed (temp file could not be renamed).
    #[error("failed to complete snapshot save to {target_path}")]
    AtomicWriteFailed {
        temp_path: PathBuf,
        target_path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Result type alias for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
