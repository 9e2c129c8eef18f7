//! Service facade over the storage collaborator.

use std::io::Read;
use std::sync::{Mutex, PoisonError};

use chrono::{NaiveDate, Utc};
use sis_ingest::{ExistingNumbers, ReconcileOutcome, reconcile};
use sis_model::{
    CohortCodes, EnrollmentNumber, StudentId, StudentRecord, normalize_last_name,
};
use sis_report::{render_csv, suggested_file_name};
use sis_store::StudentStore;

use crate::alloc::next_enrollment_number;
use crate::error::{CoreError, Result};

/// Request to create a single student interactively.
#[derive(Debug, Clone)]
pub struct CreateStudent {
    pub cohort: CohortCodes,
    pub first_name: String,
    pub last_name: Option<String>,
    pub date_of_birth: NaiveDate,
}

/// Mutable fields of an existing record; id and enrollment number stay.
#[derive(Debug, Clone)]
pub struct UpdateStudent {
    pub first_name: String,
    pub last_name: Option<String>,
    pub date_of_birth: NaiveDate,
}

/// A rendered export plus its suggested download name.
#[derive(Debug)]
pub struct ExportFile {
    pub bytes: Vec<u8>,
    pub file_name: String,
}

/// The operations the registry exposes to request-handling callers.
///
/// Creation serializes allocate-then-insert behind an internal lock: the
/// in-memory store has no transactions, so without it two concurrent
/// creations in one cohort could both derive the same sequence. The
/// store's uniqueness constraint still backstops external writers.
pub struct StudentService<S> {
    store: S,
    create_lock: Mutex<()>,
}

impl<S: StudentStore> StudentService<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            create_lock: Mutex::new(()),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Derives the next enrollment number for a cohort without persisting
    /// anything. Callers must insert immediately or accept the race.
    pub fn allocate_enrollment_number(&self, cohort: &CohortCodes) -> Result<EnrollmentNumber> {
        next_enrollment_number(&self.store, cohort)
    }

    /// Allocates an enrollment number and persists the new record.
    pub fn create(&self, request: &CreateStudent) -> Result<StudentRecord> {
        let _guard = self
            .create_lock
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        let number = next_enrollment_number(&self.store, &request.cohort)?;
        let record = StudentRecord::new(
            number,
            &request.first_name,
            request.last_name.as_deref(),
            request.date_of_birth,
        )?;
        self.store.insert(record.clone())?;
        tracing::info!(
            enrollment_number = %record.enrollment_number,
            id = %record.id,
            "created student"
        );
        Ok(record)
    }

    pub fn list(&self) -> Result<Vec<StudentRecord>> {
        Ok(self.store.find_all()?)
    }

    /// Lookup by internal id; `None` when nothing matches.
    pub fn get(&self, id: &StudentId) -> Result<Option<StudentRecord>> {
        Ok(self.store.find_by_id(id)?)
    }

    /// Applies mutable fields to an existing record. Returns `None` when
    /// the id is unknown.
    pub fn update(&self, id: &StudentId, request: &UpdateStudent) -> Result<Option<StudentRecord>> {
        let Some(mut record) = self.store.find_by_id(id)? else {
            return Ok(None);
        };
        let first_name = request.first_name.trim();
        if first_name.is_empty() {
            return Err(CoreError::Model(sis_model::ModelError::EmptyFirstName));
        }
        record.first_name = first_name.to_string();
        record.last_name = normalize_last_name(request.last_name.as_deref());
        record.date_of_birth = request.date_of_birth;
        self.store.update(record.clone())?;
        Ok(Some(record))
    }

    /// Deletes by internal id; returns whether a record existed.
    pub fn delete(&self, id: &StudentId) -> Result<bool> {
        Ok(self.store.delete(id)?)
    }

    /// Runs the reconciliation pipeline over `reader` and bulk-persists
    /// the accepted records.
    ///
    /// Existing enrollment numbers are loaded once up front. The bulk
    /// write happens only when at least one line was accepted, and it is
    /// all-or-nothing: a write failure leaves no partial batch behind.
    pub fn import(&self, reader: impl Read) -> Result<ReconcileOutcome> {
        let existing: ExistingNumbers = self
            .store
            .find_all()?
            .iter()
            .map(|record| &record.enrollment_number)
            .collect();
        let outcome = reconcile(reader, existing)?;
        if !outcome.accepted.is_empty() {
            self.store.insert_many(outcome.accepted.clone())?;
        }
        tracing::info!(
            accepted = outcome.accepted_count(),
            duplicates = outcome.duplicate_count(),
            invalid = outcome.invalid_count(),
            "import finished"
        );
        Ok(outcome)
    }

    /// Renders every record as CSV, in store iteration order.
    pub fn export(&self) -> Result<ExportFile> {
        let records = self.store.find_all()?;
        let bytes = render_csv(&records)?;
        Ok(ExportFile {
            bytes,
            file_name: suggested_file_name(Utc::now()),
        })
    }
}

#[cfg(test)]
mod tests {
    use sis_store::{MemoryStore, StoreError};

    use super::*;

    fn service() -> StudentService<MemoryStore> {
        StudentService::new(MemoryStore::new())
    }

    fn create_request(first: &str) -> CreateStudent {
        CreateStudent {
            cohort: CohortCodes::new("C", "1", "42", "3").unwrap(),
            first_name: first.to_string(),
            last_name: Some("Doe".to_string()),
            date_of_birth: NaiveDate::from_ymd_opt(2001, 5, 4).unwrap(),
        }
    }

    #[test]
    fn create_assigns_sequential_numbers() {
        let service = service();
        let first = service.create(&create_request("Jane")).unwrap();
        let second = service.create(&create_request("John")).unwrap();
        assert_eq!(first.enrollment_number.as_str(), "C14230001");
        assert_eq!(second.enrollment_number.as_str(), "C14230002");
        assert_ne!(first.id, second.id);
    }

    #[test]
    fn allocate_alone_does_not_persist() {
        let service = service();
        let cohort = CohortCodes::new("C", "1", "42", "3").unwrap();
        let a = service.allocate_enrollment_number(&cohort).unwrap();
        let b = service.allocate_enrollment_number(&cohort).unwrap();
        // Nothing was written, so the same number is derived again.
        assert_eq!(a, b);
        assert!(service.list().unwrap().is_empty());
    }

    #[test]
    fn update_changes_names_but_not_the_number() {
        let service = service();
        let created = service.create(&create_request("Jane")).unwrap();
        let updated = service
            .update(
                &created.id,
                &UpdateStudent {
                    first_name: " Janet ".to_string(),
                    last_name: Some("  ".to_string()),
                    date_of_birth: NaiveDate::from_ymd_opt(2000, 1, 2).unwrap(),
                },
            )
            .unwrap()
            .unwrap();
        assert_eq!(updated.first_name, "Janet");
        assert_eq!(updated.last_name, None);
        assert_eq!(updated.enrollment_number, created.enrollment_number);
    }

    #[test]
    fn update_of_unknown_id_is_absence_not_error() {
        let service = service();
        let missing = service
            .update(
                &StudentId::new(),
                &UpdateStudent {
                    first_name: "Jane".to_string(),
                    last_name: None,
                    date_of_birth: NaiveDate::from_ymd_opt(2000, 1, 2).unwrap(),
                },
            )
            .unwrap();
        assert!(missing.is_none());
    }

    #[test]
    fn import_loads_existing_numbers_once_and_bulk_persists() {
        let service = service();
        let created = service.create(&create_request("Jane")).unwrap();
        assert_eq!(created.enrollment_number.as_str(), "C14230001");

        let input = "EnrollmentNumber,FirstName,LastName,DateOfBirth\n\
                     C14230001,Dup,Licate,2001-01-01\n\
                     A0010001,New,Person,2002-02-02\n";
        let outcome = service.import(input.as_bytes()).unwrap();
        assert_eq!(outcome.accepted_count(), 1);
        assert_eq!(outcome.duplicate_lines, vec![2]);
        assert_eq!(service.list().unwrap().len(), 2);
    }

    #[test]
    fn import_with_no_accepted_lines_writes_nothing() {
        let service = service();
        let outcome = service
            .import(&b"EnrollmentNumber,FirstName,LastName,DateOfBirth\nbad\n"[..])
            .unwrap();
        assert_eq!(outcome.accepted_count(), 0);
        assert!(service.list().unwrap().is_empty());
    }

    #[test]
    fn allocation_race_surfaces_as_store_conflict() {
        let service = service();
        let cohort = CohortCodes::new("C", "1", "42", "3").unwrap();
        let number = service.allocate_enrollment_number(&cohort).unwrap();
        // Another writer takes the number before we persist.
        service.create(&create_request("Rival")).unwrap();
        let record =
            StudentRecord::new(number, "Late", None, NaiveDate::from_ymd_opt(2001, 5, 4).unwrap())
                .unwrap();
        let err = service.store().insert(record).unwrap_err();
        assert!(matches!(err, StoreError::DuplicateEnrollment { .. }));
        assert!(CoreError::from(err).is_conflict());
    }

    #[test]
    fn export_includes_every_record_in_store_order() {
        let service = service();
        service.create(&create_request("Jane")).unwrap();
        service.create(&create_request("John")).unwrap();
        let export = service.export().unwrap();
        let text = String::from_utf8(export.bytes).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[1].starts_with("C14230001"));
        assert!(lines[2].starts_with("C14230002"));
        assert!(export.file_name.starts_with("students-"));
        assert!(export.file_name.ends_with(".csv"));
    }
}
