//! Domain model for notes and checklist items.
//!
//! # Responsibility
//! - Define the canonical in-memory shapes the store and engine operate on.
//! - Own model-level invariants (`Note::validate`) and draft construction.
//!
//! # Invariants
//! - Every note is identified by a stable, non-empty `NoteId`.
//! - Checklist items are a flat leveled sequence, never an explicit tree.

pub mod checklist_item;
pub mod color;
pub mod note;
