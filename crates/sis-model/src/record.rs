use chrono::{Datelike, NaiveDate, Utc};

use crate::{EnrollmentNumber, ModelError, StudentId};

/// A student's persisted identity.
///
/// `id` and `enrollment_number` are immutable once assigned; name and date
/// of birth fields may change through updates.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct StudentRecord {
    pub id: StudentId,
    pub enrollment_number: EnrollmentNumber,
    pub first_name: String,
    /// Absent (not empty string) when the source value was blank.
    pub last_name: Option<String>,
    pub date_of_birth: NaiveDate,
}

impl StudentRecord {
    /// Builds a record with a freshly generated internal id.
    ///
    /// Names are trimmed; a blank last name is stored as absent. An empty
    /// first name after trimming is rejected.
    pub fn new(
        enrollment_number: EnrollmentNumber,
        first_name: &str,
        last_name: Option<&str>,
        date_of_birth: NaiveDate,
    ) -> Result<Self, ModelError> {
        let first_name = first_name.trim();
        if first_name.is_empty() {
            return Err(ModelError::EmptyFirstName);
        }
        Ok(Self {
            id: StudentId::new(),
            enrollment_number,
            first_name: first_name.to_string(),
            last_name: normalize_last_name(last_name),
            date_of_birth,
        })
    }

    /// Display name: first and last name joined, trimmed when the last
    /// name is absent.
    pub fn full_name(&self) -> String {
        match &self.last_name {
            Some(last) => format!("{} {}", self.first_name, last),
            None => self.first_name.clone(),
        }
    }

    /// Age in whole years as of `today`, decremented when the birthday has
    /// not yet occurred this year.
    pub fn age_on(&self, today: NaiveDate) -> i32 {
        let dob = self.date_of_birth;
        let mut age = today.year() - dob.year();
        if (today.month(), today.day()) < (dob.month(), dob.day()) {
            age -= 1;
        }
        age
    }

    /// Age in whole years as of the current UTC date.
    pub fn age(&self) -> i32 {
        self.age_on(Utc::now().date_naive())
    }
}

/// Trims an optional name; blank values collapse to `None`.
pub fn normalize_last_name(value: Option<&str>) -> Option<String> {
    value.map(str::trim).filter(|v| !v.is_empty()).map(String::from)
}
