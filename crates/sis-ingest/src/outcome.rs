//! Per-run reconciliation outcome.

use sis_model::StudentRecord;

/// Classified result of one reconciliation run.
///
/// Accepted records, plus the 1-based line numbers of every duplicate and
/// invalid line. Blank lines and a detected header consume line numbers
/// silently and appear in no category.
#[derive(Debug, Default, serde::Serialize)]
pub struct ReconcileOutcome {
    pub accepted: Vec<StudentRecord>,
    pub duplicate_lines: Vec<u64>,
    pub invalid_lines: Vec<u64>,
}

impl ReconcileOutcome {
    pub fn accepted_count(&self) -> usize {
        self.accepted.len()
    }

    pub fn duplicate_count(&self) -> usize {
        self.duplicate_lines.len()
    }

    pub fn invalid_count(&self) -> usize {
        self.invalid_lines.len()
    }

    /// True when every processed line was accepted.
    pub fn is_clean(&self) -> bool {
        self.duplicate_lines.is_empty() && self.invalid_lines.is_empty()
    }
}
