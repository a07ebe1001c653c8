//! Persistence gateway contract for the note collection.
//!
//! # Responsibility
//! - Define the key/value gateway `NoteStorage` used by `NoteStore`.
//! - Encode/decode the collection blob as JSON shared by every backend.
//!
//! # Invariants
//! - The gateway stores wire records only; timestamp reconstitution is done
//!   by the caller (see `repo::record`).
//! - A blob that fails to parse is reported as `StorageError::Malformed`,
//!   never silently replaced.

use crate::db::DbError;
use crate::repo::record::StoredNote;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type StorageResult<T> = Result<T, StorageError>;

/// Persistence gateway failures.
#[derive(Debug)]
pub enum StorageError {
    /// Underlying SQLite/bootstrap error.
    Db(DbError),
    /// Collection could not be serialized.
    Encode(serde_json::Error),
    /// Stored blob under `key` is not a valid note collection.
    Malformed {
        key: String,
        source: serde_json::Error,
    },
    /// Backend is missing required schema objects.
    MissingRequiredTable(&'static str),
}

impl Display for StorageError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::Encode(err) => write!(f, "failed to encode note collection: {err}"),
            Self::Malformed { key, source } => {
                write!(f, "stored note collection `{key}` is malformed: {source}")
            }
            Self::MissingRequiredTable(table) => {
                write!(f, "note storage requires table `{table}`")
            }
        }
    }
}

impl Error for StorageError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Encode(err) => Some(err),
            Self::Malformed { source, .. } => Some(source),
            Self::MissingRequiredTable(_) => None,
        }
    }
}

impl From<DbError> for StorageError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for StorageError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Key/value gateway holding whole note collections.
pub trait NoteStorage {
    /// Loads the collection stored under `key`, `None` when absent.
    fn load(&self, key: &str) -> StorageResult<Option<Vec<StoredNote>>>;
    /// Replaces the collection stored under `key`.
    fn save(&self, key: &str, notes: &[StoredNote]) -> StorageResult<()>;
    /// Removes the collection stored under `key`. Missing keys are fine.
    fn remove(&self, key: &str) -> StorageResult<()>;
    /// Removes every stored collection.
    fn clear(&self) -> StorageResult<()>;
}

/// Serializes a collection into the JSON blob stored by backends.
pub fn encode_notes(notes: &[StoredNote]) -> StorageResult<String> {
    serde_json::to_string(notes).map_err(StorageError::Encode)
}

/// Parses a stored JSON blob back into wire records.
pub fn decode_notes(key: &str, raw: &str) -> StorageResult<Vec<StoredNote>> {
    serde_json::from_str(raw).map_err(|source| StorageError::Malformed {
        key: key.to_string(),
        source,
    })
}
