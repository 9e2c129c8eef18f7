//! Storage collaborator interface.

use sis_model::{StudentId, StudentRecord};

use crate::error::Result;

/// Narrow interface the allocator and import pipeline depend on.
///
/// Implementations own the final uniqueness guarantee: any write that
/// would produce two records sharing an enrollment number
/// (case-insensitively) must fail with
/// [`StoreError::DuplicateEnrollment`](crate::StoreError::DuplicateEnrollment)
/// rather than overwrite.
pub trait StudentStore: Send + Sync {
    /// All records in stable iteration order.
    fn find_all(&self) -> Result<Vec<StudentRecord>>;

    /// Lookup by internal id; absence is a signal, not an error.
    fn find_by_id(&self, id: &StudentId) -> Result<Option<StudentRecord>>;

    /// The ordinally greatest enrollment number starting with `prefix`,
    /// compared byte-wise, or `None` when no record matches.
    fn greatest_with_prefix(&self, prefix: &str) -> Result<Option<String>>;

    fn insert(&self, record: StudentRecord) -> Result<()>;

    /// Inserts a batch atomically: either every record is persisted or
    /// none are.
    fn insert_many(&self, records: Vec<StudentRecord>) -> Result<()>;

    /// Replaces the record with the same id. The enrollment number is
    /// immutable; a changed number is rejected.
    fn update(&self, record: StudentRecord) -> Result<()>;

    /// Removes a record; returns whether anything was deleted.
    fn delete(&self, id: &StudentId) -> Result<bool>;
}
