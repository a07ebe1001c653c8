//! Note store and sample data services.
//!
//! # Responsibility
//! - Orchestrate model, checklist engine and storage into store operations.
//! - Keep hosts decoupled from wire records and storage backends.

pub mod note_store;
pub mod sample_notes;
