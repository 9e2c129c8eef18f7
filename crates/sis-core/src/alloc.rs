//! Enrollment number allocation.

use sis_model::{CohortCodes, EnrollmentNumber};
use sis_store::StudentStore;

use crate::error::Result;

/// Minimum width of the decimal sequence suffix. Sequences past 9999
/// widen the identifier instead of being truncated.
pub const SEQUENCE_WIDTH: usize = 4;

/// An existing number shorter than this cannot carry a usable sequence
/// suffix and is ignored, restarting the cohort at 1. Malformed legacy
/// values fall through the same way.
const MIN_PARSEABLE_LEN: usize = 9;

/// Derives the next enrollment number for a cohort.
///
/// The sequence is not stored anywhere; it is re-derived on every call
/// from the ordinally greatest number sharing the cohort prefix. No
/// uniqueness re-check happens here: the caller must persist the result
/// immediately, and the store's uniqueness constraint is the last line of
/// defense against a concurrent allocation of the same number.
pub fn next_enrollment_number<S: StudentStore + ?Sized>(
    store: &S,
    cohort: &CohortCodes,
) -> Result<EnrollmentNumber> {
    let prefix = cohort.prefix();
    let last = store.greatest_with_prefix(&prefix)?;
    let sequence = next_sequence(last.as_deref());
    tracing::debug!(%prefix, last = last.as_deref().unwrap_or("<none>"), sequence, "allocated");
    Ok(EnrollmentNumber::new(format!(
        "{prefix}{sequence:0width$}",
        width = SEQUENCE_WIDTH
    ))?)
}

fn next_sequence(last: Option<&str>) -> u32 {
    let Some(last) = last else {
        return 1;
    };
    if last.len() < MIN_PARSEABLE_LEN {
        return 1;
    }
    last.get(last.len() - SEQUENCE_WIDTH..)
        .and_then(|suffix| suffix.parse::<u32>().ok())
        .map_or(1, |sequence| sequence + 1)
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use sis_model::StudentRecord;
    use sis_store::MemoryStore;

    use super::*;

    fn cohort() -> CohortCodes {
        CohortCodes::new("C", "1", "42", "3").unwrap()
    }

    fn seed(store: &MemoryStore, number: &str) {
        store
            .insert(
                StudentRecord::new(
                    EnrollmentNumber::new(number).unwrap(),
                    "Seed",
                    None,
                    NaiveDate::from_ymd_opt(2000, 1, 1).unwrap(),
                )
                .unwrap(),
            )
            .unwrap();
    }

    #[test]
    fn empty_store_starts_at_one() {
        let store = MemoryStore::new();
        let number = next_enrollment_number(&store, &cohort()).unwrap();
        assert_eq!(number.as_str(), "C14230001");
    }

    #[test]
    fn increments_the_greatest_existing_number() {
        let store = MemoryStore::new();
        seed(&store, "C14230007");
        let number = next_enrollment_number(&store, &cohort()).unwrap();
        assert_eq!(number.as_str(), "C14230008");
    }

    #[test]
    fn short_legacy_value_is_ignored() {
        let store = MemoryStore::new();
        seed(&store, "C1423");
        let number = next_enrollment_number(&store, &cohort()).unwrap();
        assert_eq!(number.as_str(), "C14230001");
    }

    #[test]
    fn non_digit_suffix_restarts_at_one() {
        let store = MemoryStore::new();
        seed(&store, "C1423XYZW");
        let number = next_enrollment_number(&store, &cohort()).unwrap();
        assert_eq!(number.as_str(), "C14230001");
    }

    #[test]
    fn cohorts_number_independently() {
        let store = MemoryStore::new();
        seed(&store, "C14230007");
        let other = CohortCodes::new("D", "9", "99", "9").unwrap();
        let number = next_enrollment_number(&store, &other).unwrap();
        assert_eq!(number.as_str(), "D99990001");
    }

    #[test]
    fn sequence_widens_past_four_digits() {
        let store = MemoryStore::new();
        seed(&store, "C14239999");
        let number = next_enrollment_number(&store, &cohort()).unwrap();
        assert_eq!(number.as_str(), "C142310000");
    }

    #[test]
    fn persisted_results_form_a_contiguous_run() {
        let store = MemoryStore::new();
        for expected in 1..=5u32 {
            let number = next_enrollment_number(&store, &cohort()).unwrap();
            assert_eq!(number.as_str(), format!("C1423{expected:04}"));
            seed(&store, number.as_str());
        }
    }

    #[test]
    fn multibyte_tail_is_treated_as_unparseable() {
        let store = MemoryStore::new();
        seed(&store, "C1423ééé");
        let number = next_enrollment_number(&store, &cohort()).unwrap();
        assert_eq!(number.as_str(), "C14230001");
    }
}
