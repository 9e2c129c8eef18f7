//! Student record export generation.
//!
//! Renders the full record set as UTF-8 CSV with RFC-4180-style quoting,
//! the fixed column order shared with the import pipeline, and a
//! timestamped suggested file name.

mod error;
mod export;

pub use error::{ExportError, Result};
pub use export::{EXPORT_HEADER, render_csv, suggested_file_name, write_csv};
