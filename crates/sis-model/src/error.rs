use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    /// Enrollment number is empty or whitespace-only.
    #[error("invalid enrollment number: {0:?}")]
    InvalidEnrollmentNumber(String),

    /// Required first name is empty after trimming.
    #[error("first name must not be empty")]
    EmptyFirstName,

    /// A cohort code required for prefix construction is empty.
    #[error("cohort {field} code must not be empty")]
    EmptyCohortCode { field: &'static str },

    /// Student id is not a valid UUID.
    #[error("invalid student id: {value}")]
    InvalidStudentId {
        value: String,
        #[source]
        source: uuid::Error,
    },
}

pub type Result<T> = std::result::Result<T, ModelError>;
