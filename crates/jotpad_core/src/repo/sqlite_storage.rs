//! SQLite-backed note storage.
//!
//! Collections are kept as JSON text in the `kv_store` table, one row per
//! key, mirroring browser-style local storage semantics.

use crate::repo::note_storage::{
    decode_notes, encode_notes, NoteStorage, StorageError, StorageResult,
};
use crate::repo::record::StoredNote;
use rusqlite::{params, Connection, OptionalExtension};

/// Note storage over a migrated SQLite connection.
pub struct SqliteNoteStorage<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteNoteStorage<'conn> {
    /// Constructs storage from a connection returned by `db::open_db*`.
    ///
    /// # Errors
    /// - `MissingRequiredTable` when migrations have not created `kv_store`.
    pub fn try_new(conn: &'conn Connection) -> StorageResult<Self> {
        let exists: i64 = conn.query_row(
            "SELECT EXISTS(
                SELECT 1
                FROM sqlite_master
                WHERE type = 'table' AND name = 'kv_store'
            );",
            [],
            |row| row.get(0),
        )?;
        if exists != 1 {
            return Err(StorageError::MissingRequiredTable("kv_store"));
        }
        Ok(Self { conn })
    }

    /// Returns the raw stored blob for `key`.
    pub fn raw(&self, key: &str) -> StorageResult<Option<String>> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM kv_store WHERE key = ?1;",
                [key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }

    /// Stores `value` under `key` without validating it.
    pub fn put_raw(&self, key: &str, value: &str) -> StorageResult<()> {
        self.conn.execute(
            "INSERT INTO kv_store (key, value, updated_at)
             VALUES (?1, ?2, strftime('%s', 'now') * 1000)
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at;",
            params![key, value],
        )?;
        Ok(())
    }
}

impl NoteStorage for SqliteNoteStorage<'_> {
    fn load(&self, key: &str) -> StorageResult<Option<Vec<StoredNote>>> {
        match self.raw(key)? {
            Some(raw) => decode_notes(key, &raw).map(Some),
            None => Ok(None),
        }
    }

    fn save(&self, key: &str, notes: &[StoredNote]) -> StorageResult<()> {
        let encoded = encode_notes(notes)?;
        self.put_raw(key, &encoded)
    }

    fn remove(&self, key: &str) -> StorageResult<()> {
        self.conn
            .execute("DELETE FROM kv_store WHERE key = ?1;", [key])?;
        Ok(())
    }

    fn clear(&self) -> StorageResult<()> {
        self.conn.execute("DELETE FROM kv_store;", [])?;
        Ok(())
    }
}
