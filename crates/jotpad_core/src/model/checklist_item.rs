//! Checklist item model.
//!
//! # Responsibility
//! - Define one entry of a flat, leveled checklist sequence.
//! - Provide level clamping shared by parsing, editing and reconstitution.
//!
//! # Invariants
//! - `level` is always within `0..=MAX_ITEM_LEVEL`.
//! - An item's parent is the nearest preceding item with a smaller level.

use uuid::Uuid;

/// Identifier of one checklist item, unique within its note.
pub type ItemId = String;

/// Deepest nesting level a checklist item can reach.
pub const MAX_ITEM_LEVEL: u8 = 3;

/// One entry of a note checklist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChecklistItem {
    /// Stable id used by toggle/delete lookups.
    pub id: ItemId,
    /// Item text, already trimmed when produced by the parser.
    pub text: String,
    /// Completion state.
    pub checked: bool,
    /// Nesting depth in `0..=MAX_ITEM_LEVEL`.
    pub level: u8,
}

impl ChecklistItem {
    /// Creates an unchecked top-level item with a fresh id.
    pub fn new(text: impl Into<String>) -> Self {
        Self::with_level(text, 0)
    }

    /// Creates an unchecked item at `level`, clamped to the allowed range.
    pub fn with_level(text: impl Into<String>, level: u8) -> Self {
        Self {
            id: new_item_id(),
            text: text.into(),
            checked: false,
            level: level.min(MAX_ITEM_LEVEL),
        }
    }

    /// Returns whether this item owns the run of deeper items that follows it.
    pub fn is_top_level(&self) -> bool {
        self.level == 0
    }
}

/// Generates a fresh item id.
pub fn new_item_id() -> ItemId {
    Uuid::new_v4().to_string()
}

/// Clamps an arbitrary level value into `0..=MAX_ITEM_LEVEL`.
pub fn clamp_level(level: i64) -> u8 {
    // Clamped first, so the narrowing cast is lossless.
    level.clamp(0, i64::from(MAX_ITEM_LEVEL)) as u8
}
