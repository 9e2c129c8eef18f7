//! In-memory store with a case-insensitive uniqueness index.

use std::collections::HashSet;
use std::sync::RwLock;

use sis_model::{StudentId, StudentRecord};

use crate::error::{Result, StoreError};
use crate::store::StudentStore;

/// In-memory [`StudentStore`] backed by an insertion-ordered vector.
///
/// A folded-key set mirrors the vector so duplicate checks stay O(1); both
/// live behind one lock so every mutation is atomic, including
/// [`insert_many`](StudentStore::insert_many).
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: RwLock<Inner>,
}

#[derive(Debug, Default)]
struct Inner {
    records: Vec<StudentRecord>,
    keys: HashSet<String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<std::sync::RwLockReadGuard<'_, Inner>> {
        self.inner.read().map_err(|_| StoreError::LockPoisoned)
    }

    fn write(&self) -> Result<std::sync::RwLockWriteGuard<'_, Inner>> {
        self.inner.write().map_err(|_| StoreError::LockPoisoned)
    }

    /// Seeds a store from existing records, e.g. a loaded snapshot.
    ///
    /// Fails if the seed itself violates the uniqueness invariant.
    pub fn with_records(records: Vec<StudentRecord>) -> Result<Self> {
        let store = Self::new();
        {
            let mut inner = store.write()?;
            for record in records {
                inner.push_checked(record)?;
            }
        }
        Ok(store)
    }
}

impl Inner {
    fn push_checked(&mut self, record: StudentRecord) -> Result<()> {
        let key = record.enrollment_number.fold_key();
        if self.keys.contains(&key) {
            return Err(StoreError::DuplicateEnrollment {
                number: record.enrollment_number.as_str().to_string(),
            });
        }
        self.keys.insert(key);
        self.records.push(record);
        Ok(())
    }

    fn position(&self, id: &StudentId) -> Option<usize> {
        self.records.iter().position(|r| &r.id == id)
    }
}

impl StudentStore for MemoryStore {
    fn find_all(&self) -> Result<Vec<StudentRecord>> {
        let inner = self.read()?;
        Ok(inner.records.clone())
    }

    fn find_by_id(&self, id: &StudentId) -> Result<Option<StudentRecord>> {
        let inner = self.read()?;
        Ok(inner.position(id).map(|i| inner.records[i].clone()))
    }

    fn greatest_with_prefix(&self, prefix: &str) -> Result<Option<String>> {
        let inner = self.read()?;
        Ok(inner
            .records
            .iter()
            .map(|r| r.enrollment_number.as_str())
            .filter(|n| n.starts_with(prefix))
            .max()
            .map(String::from))
    }

    fn insert(&self, record: StudentRecord) -> Result<()> {
        let mut inner = self.write()?;
        inner.push_checked(record)
    }

    fn insert_many(&self, records: Vec<StudentRecord>) -> Result<()> {
        let mut inner = self.write()?;

        // Validate the whole batch (against the store and within itself)
        // before touching state, so a conflict leaves nothing behind.
        let mut batch_keys = HashSet::with_capacity(records.len());
        for record in &records {
            let key = record.enrollment_number.fold_key();
            if inner.keys.contains(&key) || !batch_keys.insert(key) {
                return Err(StoreError::DuplicateEnrollment {
                    number: record.enrollment_number.as_str().to_string(),
                });
            }
        }
        inner.keys.extend(batch_keys);
        inner.records.extend(records);
        Ok(())
    }

    fn update(&self, record: StudentRecord) -> Result<()> {
        let mut inner = self.write()?;
        let Some(index) = inner.position(&record.id) else {
            return Err(StoreError::NotFound { id: record.id });
        };
        if inner.records[index].enrollment_number.fold_key() != record.enrollment_number.fold_key()
        {
            return Err(StoreError::ImmutableEnrollmentNumber { id: record.id });
        }
        inner.records[index] = record;
        Ok(())
    }

    fn delete(&self, id: &StudentId) -> Result<bool> {
        let mut inner = self.write()?;
        let Some(index) = inner.position(id) else {
            return Ok(false);
        };
        let removed = inner.records.remove(index);
        inner.keys.remove(&removed.enrollment_number.fold_key());
        Ok(true)
    }
}
