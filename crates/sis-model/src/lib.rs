//! Student registry data model.
//!
//! Core types shared by the allocator, import pipeline, export formatter,
//! and store: validated identifier newtypes, cohort attributes, and the
//! persisted [`StudentRecord`].

pub mod cohort;
pub mod error;
pub mod ids;
pub mod record;

pub use cohort::CohortCodes;
pub use error::{ModelError, Result};
pub use ids::{EnrollmentNumber, StudentId};
pub use record::{StudentRecord, normalize_last_name};
