//! Single-pass CSV reconciliation.

use std::collections::HashSet;
use std::io::{BufRead, BufReader, Read};

use chrono::NaiveDate;
use sis_model::{EnrollmentNumber, StudentRecord};

use crate::error::{IngestError, Result};
use crate::line::split_line;
use crate::outcome::ReconcileOutcome;

/// Column name whose presence on line 1 marks a header row.
pub const HEADER_TOKEN: &str = "EnrollmentNumber";

/// Case-insensitive set of enrollment numbers a run deduplicates against.
///
/// Seeded from the store before the run, grown by every accepted line so
/// later lines in the same file are checked against earlier ones. Scoped
/// to one reconciliation call and discarded afterwards.
#[derive(Debug, Default)]
pub struct ExistingNumbers(HashSet<String>);

impl ExistingNumbers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, number: &str) -> bool {
        self.0.contains(&number.to_ascii_lowercase())
    }

    pub fn insert(&mut self, number: &EnrollmentNumber) {
        self.0.insert(number.fold_key());
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<'a> FromIterator<&'a EnrollmentNumber> for ExistingNumbers {
    fn from_iter<I: IntoIterator<Item = &'a EnrollmentNumber>>(iter: I) -> Self {
        Self(iter.into_iter().map(EnrollmentNumber::fold_key).collect())
    }
}

/// Reconciles a CSV stream against the given enrollment numbers.
///
/// Strictly line-oriented and single-pass: every physical line consumes a
/// 1-based line number; blank lines and a line-1 header are skipped
/// silently; every other line ends up in exactly one outcome category.
/// Per-line problems are recorded, never raised; the call itself fails
/// only when the stream is empty or unreadable.
pub fn reconcile(reader: impl Read, mut existing: ExistingNumbers) -> Result<ReconcileOutcome> {
    let mut reader = BufReader::new(reader);
    let mut outcome = ReconcileOutcome::default();
    let mut raw = String::new();
    let mut line_number: u64 = 0;

    loop {
        raw.clear();
        let read = reader
            .read_line(&mut raw)
            .map_err(|e| IngestError::Read { source: e })?;
        if read == 0 {
            break;
        }
        line_number += 1;

        let mut line = raw.strip_suffix('\n').unwrap_or(&raw);
        line = line.strip_suffix('\r').unwrap_or(line);
        if line_number == 1 {
            line = line.strip_prefix('\u{feff}').unwrap_or(line);
        }

        if line.trim().is_empty() {
            continue;
        }
        if line_number == 1 && is_header(line) {
            continue;
        }

        classify_line(line, line_number, &mut existing, &mut outcome);
    }

    if line_number == 0 {
        return Err(IngestError::EmptyStream);
    }

    tracing::debug!(
        lines = line_number,
        accepted = outcome.accepted_count(),
        duplicates = outcome.duplicate_count(),
        invalid = outcome.invalid_count(),
        "reconciled import stream"
    );
    Ok(outcome)
}

fn is_header(line: &str) -> bool {
    line.to_ascii_lowercase()
        .contains(&HEADER_TOKEN.to_ascii_lowercase())
}

fn classify_line(
    line: &str,
    line_number: u64,
    existing: &mut ExistingNumbers,
    outcome: &mut ReconcileOutcome,
) {
    let fields = split_line(line);
    if fields.len() < 4 {
        outcome.invalid_lines.push(line_number);
        return;
    }

    let number = fields[0].trim();
    let first_name = fields[1].trim();
    let last_name = fields[2].trim();
    let Some(date_of_birth) = parse_date_of_birth(fields[3].trim()) else {
        outcome.invalid_lines.push(line_number);
        return;
    };
    if number.is_empty() || first_name.is_empty() {
        outcome.invalid_lines.push(line_number);
        return;
    }

    if existing.contains(number) {
        outcome.duplicate_lines.push(line_number);
        return;
    }

    // Both constructors only reject emptiness, which is already ruled out
    // above; a failure still classifies the line rather than aborting.
    let Ok(enrollment_number) = EnrollmentNumber::new(number) else {
        outcome.invalid_lines.push(line_number);
        return;
    };
    let Ok(record) =
        StudentRecord::new(enrollment_number, first_name, Some(last_name), date_of_birth)
    else {
        outcome.invalid_lines.push(line_number);
        return;
    };

    existing.insert(&record.enrollment_number);
    outcome.accepted.push(record);
}

/// Parses a locale-independent calendar date: ISO-8601 date, or the date
/// part of an ISO/RFC-3339 timestamp.
fn parse_date_of_birth(value: &str) -> Option<NaiveDate> {
    if let Ok(date) = value.parse::<NaiveDate>() {
        return Some(date);
    }
    if let Ok(datetime) = value.parse::<chrono::NaiveDateTime>() {
        return Some(datetime.date());
    }
    chrono::DateTime::parse_from_rfc3339(value)
        .ok()
        .map(|dt| dt.date_naive())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(input: &str) -> ReconcileOutcome {
        reconcile(input.as_bytes(), ExistingNumbers::new()).unwrap()
    }

    #[test]
    fn accepts_a_well_formed_line() {
        let outcome = run("EnrollmentNumber,FirstName,LastName,DOB\nA1230001,Jane,Doe,2001-05-04\n");
        assert_eq!(outcome.accepted_count(), 1);
        assert_eq!(outcome.duplicate_count(), 0);
        assert_eq!(outcome.invalid_count(), 0);

        let record = &outcome.accepted[0];
        assert_eq!(record.enrollment_number.as_str(), "A1230001");
        assert_eq!(record.first_name, "Jane");
        assert_eq!(record.last_name.as_deref(), Some("Doe"));
        assert_eq!(record.date_of_birth.to_string(), "2001-05-04");
    }

    #[test]
    fn empty_stream_is_a_resource_error() {
        let err = reconcile(&b""[..], ExistingNumbers::new()).unwrap_err();
        assert!(matches!(err, IngestError::EmptyStream));
    }

    #[test]
    fn header_only_stream_yields_empty_outcome() {
        let outcome = run("EnrollmentNumber,FirstName,LastName,DOB\n");
        assert_eq!(outcome.accepted_count(), 0);
        assert!(outcome.is_clean());
    }

    #[test]
    fn header_is_only_recognized_on_line_one() {
        let outcome = run("A1230001,Jane,Doe,2001-05-04\nEnrollmentNumber,FirstName,LastName,DOB\n");
        assert_eq!(outcome.accepted_count(), 1);
        // Line 2 looks like a header but is past line 1: its date column
        // fails to parse, so it is invalid.
        assert_eq!(outcome.invalid_lines, vec![2]);
    }

    #[test]
    fn blank_lines_consume_numbers_silently() {
        let outcome = run("\n   \nA1230001,Jane,Doe,2001-05-04\n");
        assert_eq!(outcome.accepted_count(), 1);
        assert!(outcome.is_clean());
    }

    #[test]
    fn intra_file_duplicate_is_case_insensitive() {
        let outcome = run("a1230001,Jane,Doe,2001-05-04\nA1230001,John,Smith,2002-06-05\n");
        assert_eq!(outcome.accepted_count(), 1);
        assert_eq!(outcome.duplicate_lines, vec![2]);
        assert_eq!(outcome.accepted[0].enrollment_number.as_str(), "a1230001");
    }

    #[test]
    fn store_duplicate_is_detected() {
        let stored = EnrollmentNumber::new("A1230001").unwrap();
        let existing: ExistingNumbers = [&stored].into_iter().collect();
        let outcome = reconcile(
            &b"a1230001,Jane,Doe,2001-05-04\n"[..],
            existing,
        )
        .unwrap();
        assert_eq!(outcome.accepted_count(), 0);
        assert_eq!(outcome.duplicate_lines, vec![1]);
    }

    #[test]
    fn too_few_fields_is_invalid() {
        let outcome = run("A1230001,Jane,2001-05-04\n");
        assert_eq!(outcome.invalid_lines, vec![1]);
        assert_eq!(outcome.accepted_count(), 0);
    }

    #[test]
    fn empty_first_name_is_invalid() {
        let outcome = run("A1230001,  ,Doe,2001-05-04\n");
        assert_eq!(outcome.invalid_lines, vec![1]);
    }

    #[test]
    fn empty_enrollment_number_is_invalid() {
        let outcome = run(" ,Jane,Doe,2001-05-04\n");
        assert_eq!(outcome.invalid_lines, vec![1]);
    }

    #[test]
    fn unparseable_date_is_invalid() {
        let outcome = run("A1230001,Jane,Doe,04/05/2001\n");
        assert_eq!(outcome.invalid_lines, vec![1]);
    }

    #[test]
    fn timestamp_dates_are_accepted() {
        let outcome = run("A1230001,Jane,Doe,2001-05-04T00:00:00\n");
        assert_eq!(outcome.accepted_count(), 1);
        assert_eq!(outcome.accepted[0].date_of_birth.to_string(), "2001-05-04");
    }

    #[test]
    fn blank_last_name_is_absent_not_empty() {
        let outcome = run("A1230001,Jane,   ,2001-05-04\n");
        assert_eq!(outcome.accepted[0].last_name, None);
    }

    #[test]
    fn quoted_fields_keep_commas_and_quotes() {
        let outcome = run("A1230001,Jane,\"Smith, \"\"Jr.\"\"\",2001-05-04\n");
        assert_eq!(
            outcome.accepted[0].last_name.as_deref(),
            Some("Smith, \"Jr.\"")
        );
    }

    #[test]
    fn line_numbers_count_every_physical_line() {
        let input = "EnrollmentNumber,FirstName,LastName,DOB\n\
                     A1230001,Jane,Doe,2001-05-04\n\
                     \n\
                     bad-line\n\
                     A1230001,John,Smith,2002-06-05\n";
        let outcome = run(input);
        assert_eq!(outcome.accepted_count(), 1);
        assert_eq!(outcome.invalid_lines, vec![4]);
        assert_eq!(outcome.duplicate_lines, vec![5]);
    }

    #[test]
    fn missing_trailing_newline_still_processes_last_line() {
        let outcome = run("A1230001,Jane,Doe,2001-05-04");
        assert_eq!(outcome.accepted_count(), 1);
    }

    #[test]
    fn bom_on_first_line_is_stripped() {
        let outcome = run("\u{feff}EnrollmentNumber,FirstName,LastName,DOB\nA1230001,Jane,Doe,2001-05-04\n");
        assert_eq!(outcome.accepted_count(), 1);
        assert!(outcome.is_clean());
    }

    #[test]
    fn read_failure_surfaces_as_resource_error() {
        struct Broken;
        impl std::io::Read for Broken {
            fn read(&mut self, _buf: &mut [u8]) -> std::io::Result<usize> {
                Err(std::io::Error::other("wire cut"))
            }
        }
        let err = reconcile(Broken, ExistingNumbers::new()).unwrap_err();
        assert!(matches!(err, IngestError::Read { .. }));
    }
}
