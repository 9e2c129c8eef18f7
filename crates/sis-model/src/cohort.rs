use crate::ModelError;

/// Cohort attributes a new enrollment number is scoped to.
///
/// The four codes are caller-supplied short tokens. Casing is preserved
/// verbatim; the prefix is their plain concatenation with no separators.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CohortCodes {
    pub faculty: String,
    pub level: String,
    pub program: String,
    pub year: String,
}

impl CohortCodes {
    pub fn new(
        faculty: impl Into<String>,
        level: impl Into<String>,
        program: impl Into<String>,
        year: impl Into<String>,
    ) -> Result<Self, ModelError> {
        let codes = Self {
            faculty: faculty.into(),
            level: level.into(),
            program: program.into(),
            year: year.into(),
        };
        for (field, value) in [
            ("faculty", &codes.faculty),
            ("level", &codes.level),
            ("program", &codes.program),
            ("year", &codes.year),
        ] {
            if value.trim().is_empty() {
                return Err(ModelError::EmptyCohortCode { field });
            }
        }
        Ok(codes)
    }

    /// Numbering-scope prefix: faculty + level + program + year, verbatim.
    pub fn prefix(&self) -> String {
        format!("{}{}{}{}", self.faculty, self.level, self.program, self.year)
    }
}
