//! Shared infrastructure for the `sis` binary.

pub mod logging;
