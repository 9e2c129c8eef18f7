//! Student registry core.
//!
//! Two loosely coupled pieces sit here on top of the storage collaborator:
//!
//! - **Allocation**: deriving the next enrollment number for a cohort from
//!   the store's existing data (no separate counter state).
//! - **[`StudentService`]**: the operation surface request-handling glue
//!   consumes: create, read, update, delete, CSV import, CSV export.

mod alloc;
mod error;
mod service;

pub use alloc::{SEQUENCE_WIDTH, next_enrollment_number};
pub use error::{CoreError, Result};
pub use service::{CreateStudent, ExportFile, StudentService, UpdateStudent};
