use thiserror::Error;

/// Errors surfaced by registry core operations.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error(transparent)]
    Model(#[from] sis_model::ModelError),

    #[error(transparent)]
    Store(#[from] sis_store::StoreError),

    #[error(transparent)]
    Ingest(#[from] sis_ingest::IngestError),

    #[error(transparent)]
    Export(#[from] sis_report::ExportError),
}

impl CoreError {
    /// True when the error is an enrollment-number uniqueness conflict,
    /// e.g. a lost allocation race.
    pub fn is_conflict(&self) -> bool {
        matches!(
            self,
            Self::Store(sis_store::StoreError::DuplicateEnrollment { .. })
        )
    }
}

/// Result type for registry core operations.
pub type Result<T> = std::result::Result<T, CoreError>;
