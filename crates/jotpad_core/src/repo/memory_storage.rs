//! In-process note storage.
//!
//! Holds the same JSON blobs as the SQLite backend so malformed-data paths
//! behave identically. Nothing survives the process.

use crate::repo::note_storage::{decode_notes, encode_notes, NoteStorage, StorageResult};
use crate::repo::record::StoredNote;
use std::cell::RefCell;
use std::collections::BTreeMap;

#[derive(Debug, Default)]
pub struct MemoryNoteStorage {
    entries: RefCell<BTreeMap<String, String>>,
}

impl MemoryNoteStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `value` under `key` without validating it.
    pub fn insert_raw(&self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.borrow_mut().insert(key.into(), value.into());
    }

    pub fn raw(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

impl NoteStorage for MemoryNoteStorage {
    fn load(&self, key: &str) -> StorageResult<Option<Vec<StoredNote>>> {
        match self.raw(key) {
            Some(raw) => decode_notes(key, &raw).map(Some),
            None => Ok(None),
        }
    }

    fn save(&self, key: &str, notes: &[StoredNote]) -> StorageResult<()> {
        let encoded = encode_notes(notes)?;
        self.insert_raw(key, encoded);
        Ok(())
    }

    fn remove(&self, key: &str) -> StorageResult<()> {
        self.entries.borrow_mut().remove(key);
        Ok(())
    }

    fn clear(&self) -> StorageResult<()> {
        self.entries.borrow_mut().clear();
        Ok(())
    }
}
