//! Student record storage.
//!
//! This crate holds the narrow storage interface the registry core depends
//! on, an in-memory implementation that enforces the case-insensitive
//! enrollment-number uniqueness invariant, and a JSON snapshot layer with
//! atomic writes for durable state between CLI runs.

mod error;
mod memory;
mod snapshot;
mod store;

pub use error::{Result, StoreError};
pub use memory::MemoryStore;
pub use snapshot::{load_snapshot, save_snapshot};
pub use store::StudentStore;
