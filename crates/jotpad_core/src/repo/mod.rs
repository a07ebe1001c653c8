//! Persistence gateway and its backends.
//!
//! # Responsibility
//! - Define the key/value gateway contract the note store persists through.
//! - Keep SQLite and wire-format details out of the store.
//!
//! # Invariants
//! - Backends store whole collections as one JSON blob per key.
//! - Backends never interpret note timestamps; reconstitution lives in
//!   `record`.

pub mod memory_storage;
pub mod note_storage;
pub mod record;
pub mod sqlite_storage;
