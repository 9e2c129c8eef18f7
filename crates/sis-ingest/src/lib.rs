//! CSV import reconciliation.
//!
//! Validates, deduplicates, and classifies a batch of candidate student
//! records in a single pass over a raw byte stream:
//!
//! - **Line splitting**: comma-separated fields with per-line quote state
//! - **Structural validation**: minimum field count
//! - **Semantic validation**: required fields and calendar dates
//! - **Duplicate detection**: against the store and within the same file,
//!   case-insensitively
//!
//! One malformed row never blocks the rest of the batch: per-line problems
//! land in the [`ReconcileOutcome`], and only resource-level failures
//! (empty or unreadable stream) abort the run.

mod error;
mod line;
mod outcome;
mod reconcile;

pub use error::{IngestError, Result};
pub use line::split_line;
pub use outcome::ReconcileOutcome;
pub use reconcile::{ExistingNumbers, HEADER_TOKEN, reconcile};
