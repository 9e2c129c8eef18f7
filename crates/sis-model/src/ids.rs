use std::fmt;
use std::str::FromStr;

use uuid::Uuid;

use crate::ModelError;

/// Opaque internal key for a student record.
///
/// Assigned once at creation (or import) and immutable afterwards. This is
/// never the human-facing enrollment number.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(transparent)]
pub struct StudentId(Uuid);

impl StudentId {
    /// Generates a fresh random id.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for StudentId {
    fn default() -> Self {
        Self::new()
    }
}

impl FromStr for StudentId {
    type Err = ModelError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let parsed = Uuid::parse_str(value.trim()).map_err(|e| ModelError::InvalidStudentId {
            value: value.to_string(),
            source: e,
        })?;
        Ok(Self(parsed))
    }
}

impl fmt::Display for StudentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Human-facing student identifier: cohort prefix plus zero-padded sequence.
///
/// The value is stored verbatim apart from surrounding whitespace. Uniqueness
/// across the store is case-insensitive; use [`EnrollmentNumber::fold_key`]
/// when building lookup keys.
#[derive(
    Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct EnrollmentNumber(String);

impl EnrollmentNumber {
    pub fn new(value: impl Into<String>) -> Result<Self, ModelError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ModelError::InvalidEnrollmentNumber(value));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// ASCII-lowercased form used for case-insensitive uniqueness checks.
    pub fn fold_key(&self) -> String {
        self.0.to_ascii_lowercase()
    }
}

impl fmt::Display for EnrollmentNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enrollment_number_trims_and_keeps_case() {
        let number = EnrollmentNumber::new("  C14230001 ").unwrap();
        assert_eq!(number.as_str(), "C14230001");
        assert_eq!(number.fold_key(), "c14230001");
    }

    #[test]
    fn enrollment_number_rejects_blank() {
        assert!(matches!(
            EnrollmentNumber::new("   "),
            Err(ModelError::InvalidEnrollmentNumber(_))
        ));
    }

    #[test]
    fn student_id_parses_own_display() {
        let id = StudentId::new();
        let parsed: StudentId = id.to_string().parse().unwrap();
        assert_eq!(parsed, id);
    }

    #[test]
    fn student_id_rejects_garbage() {
        assert!(matches!(
            "not-a-uuid".parse::<StudentId>(),
            Err(ModelError::InvalidStudentId { .. })
        ));
    }

    #[test]
    fn enrollment_number_serializes_as_plain_string() {
        let number = EnrollmentNumber::new("A1230001").unwrap();
        let json = serde_json::to_string(&number).unwrap();
        assert_eq!(json, "\"A1230001\"");
    }
}
