//! CSV rendering of student records.

use std::io::Write;

use chrono::{DateTime, Utc};
use sis_model::StudentRecord;

use crate::error::{ExportError, Result};

/// Fixed export column order, matching the import column order.
pub const EXPORT_HEADER: [&str; 4] = ["EnrollmentNumber", "FirstName", "LastName", "DateOfBirth"];

/// Writes records as CSV to `writer` in the given iteration order.
///
/// Fields containing a comma, quote, or line break are quoted with
/// internal quotes doubled; everything else is emitted bare. Dates are
/// always rendered `YYYY-MM-DD`, and an absent last name becomes an empty
/// field rather than any placeholder text.
pub fn write_csv<W: Write>(records: &[StudentRecord], writer: W) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer
        .write_record(EXPORT_HEADER)
        .map_err(|e| ExportError::Csv { source: e })?;

    for record in records {
        let date_of_birth = record.date_of_birth.format("%Y-%m-%d").to_string();
        csv_writer
            .write_record([
                record.enrollment_number.as_str(),
                record.first_name.as_str(),
                record.last_name.as_deref().unwrap_or(""),
                date_of_birth.as_str(),
            ])
            .map_err(|e| ExportError::Csv { source: e })?;
    }

    csv_writer
        .flush()
        .map_err(|e| ExportError::Flush { source: e })?;
    Ok(())
}

/// Renders records to CSV bytes (UTF-8, `\n` row terminators).
pub fn render_csv(records: &[StudentRecord]) -> Result<Vec<u8>> {
    let mut buffer = Vec::new();
    write_csv(records, &mut buffer)?;
    Ok(buffer)
}

/// Timestamped download name for an export taken at `now`.
pub fn suggested_file_name(now: DateTime<Utc>) -> String {
    format!("students-{}.csv", now.format("%Y%m%d%H%M%S"))
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, TimeZone};
    use sis_model::EnrollmentNumber;

    use super::*;

    fn record(number: &str, first: &str, last: Option<&str>) -> StudentRecord {
        StudentRecord::new(
            EnrollmentNumber::new(number).unwrap(),
            first,
            last,
            NaiveDate::from_ymd_opt(2001, 5, 4).unwrap(),
        )
        .unwrap()
    }

    fn render(records: &[StudentRecord]) -> String {
        String::from_utf8(render_csv(records).unwrap()).unwrap()
    }

    #[test]
    fn renders_header_for_empty_store() {
        assert_eq!(
            render(&[]),
            "EnrollmentNumber,FirstName,LastName,DateOfBirth\n"
        );
    }

    #[test]
    fn absent_last_name_is_an_empty_field() {
        let csv = render(&[record("A1230001", "Jane", None)]);
        assert_eq!(
            csv,
            "EnrollmentNumber,FirstName,LastName,DateOfBirth\n\
             A1230001,Jane,,2001-05-04\n"
        );
    }

    #[test]
    fn commas_and_quotes_are_escaped() {
        let csv = render(&[record("A1230001", "Jane", Some("Smith, \"Jr.\""))]);
        assert_eq!(
            csv,
            "EnrollmentNumber,FirstName,LastName,DateOfBirth\n\
             A1230001,Jane,\"Smith, \"\"Jr.\"\"\",2001-05-04\n"
        );
    }

    #[test]
    fn rows_follow_input_order() {
        let csv = render(&[
            record("B0000002", "Second", None),
            record("A0000001", "First", None),
        ]);
        insta::assert_snapshot!(csv, @r"
        EnrollmentNumber,FirstName,LastName,DateOfBirth
        B0000002,Second,,2001-05-04
        A0000001,First,,2001-05-04
        ");
    }

    #[test]
    fn literal_null_text_is_not_special() {
        let csv = render(&[record("A1230001", "Jane", Some("null"))]);
        assert!(csv.contains("A1230001,Jane,null,2001-05-04"));
    }

    #[test]
    fn file_name_uses_compact_utc_timestamp() {
        let now = Utc.with_ymd_and_hms(2026, 8, 30, 13, 5, 9).unwrap();
        assert_eq!(suggested_file_name(now), "students-20260830130509.csv");
    }
}
