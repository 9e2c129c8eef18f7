//! JSON snapshot persistence for the in-memory store.
//!
//! Snapshots are plain JSON arrays of records. Saves go through a temp
//! file plus rename so a crash mid-write never corrupts the registry.

use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use sis_model::StudentRecord;

use crate::error::{Result, StoreError};

/// Loads records from a snapshot file.
///
/// A missing file is an empty registry, not an error.
pub fn load_snapshot(path: &Path) -> Result<Vec<StudentRecord>> {
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!(path = %path.display(), "no snapshot file, starting empty");
            return Ok(Vec::new());
        }
        Err(e) => {
            return Err(StoreError::Io {
                operation: "read",
                path: path.to_path_buf(),
                source: e,
            });
        }
    };

    let records: Vec<StudentRecord> =
        serde_json::from_slice(&bytes).map_err(|e| StoreError::InvalidSnapshot {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
    tracing::debug!(path = %path.display(), count = records.len(), "loaded snapshot");
    Ok(records)
}

/// Saves records to a snapshot file atomically (temp file + rename).
pub fn save_snapshot(path: &Path, records: &[StudentRecord]) -> Result<()> {
    let bytes = serde_json::to_vec_pretty(records).map_err(|e| StoreError::InvalidSnapshot {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    let temp_path = path.with_extension("json.tmp");

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(|e| StoreError::Io {
            operation: "create directory for",
            path: parent.to_path_buf(),
            source: e,
        })?;
    }

    let mut file = File::create(&temp_path).map_err(|e| StoreError::Io {
        operation: "create",
        path: temp_path.clone(),
        source: e,
    })?;
    file.write_all(&bytes).map_err(|e| StoreError::Io {
        operation: "write",
        path: temp_path.clone(),
        source: e,
    })?;
    file.sync_all().map_err(|e| StoreError::Io {
        operation: "sync",
        path: temp_path.clone(),
        source: e,
    })?;

    fs::rename(&temp_path, path).map_err(|e| StoreError::AtomicWriteFailed {
        temp_path: temp_path.clone(),
        target_path: path.to_path_buf(),
        source: e,
    })?;

    tracing::info!(path = %path.display(), count = records.len(), "saved snapshot");
    Ok(())
}
