//! Checklist hierarchy engine.
//!
//! # Responsibility
//! - Maintain parent/child structure of flat, leveled checklist items under
//!   mutation (cascade check, indent/outdent, move, insert/delete).
//! - Convert between indented text and checklist items, per item sequence
//!   and per note.
//!
//! # Invariants
//! - An item's parent is the nearest preceding item with a smaller level.
//! - Levels stay within `0..=MAX_ITEM_LEVEL`; changes clamp, never fail.
//! - Unknown ids and out-of-range indices are silent no-ops.

pub mod convert;
pub mod engine;
pub mod text;
