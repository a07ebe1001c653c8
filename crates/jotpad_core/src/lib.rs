//! Core domain logic for Jotpad.
//! Owns the note collection, the checklist hierarchy engine and persistence.

pub mod checklist;
pub mod clock;
pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{Environment, StoreConfig};
pub use db::{open_db, open_db_in_memory, DbError, DbResult};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::checklist_item::{ChecklistItem, ItemId, MAX_ITEM_LEVEL};
pub use model::color::{ColorOption, COLOR_OPTIONS, DEFAULT_COLOR};
pub use model::note::{Note, NoteDraft, NoteId, NoteValidationError, Timestamp};
pub use repo::memory_storage::MemoryNoteStorage;
pub use repo::note_storage::{NoteStorage, StorageError, StorageResult};
pub use repo::record::{NoteDecodeError, StoredChecklistItem, StoredNote};
pub use repo::sqlite_storage::SqliteNoteStorage;
pub use service::note_store::{NoteStore, NoteStoreError, SubscriptionId};
pub use service::sample_notes::generate_sample_notes;

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
