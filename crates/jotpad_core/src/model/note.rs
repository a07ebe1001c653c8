//! Note domain model.
//!
//! # Responsibility
//! - Define the canonical note record held by the store.
//! - Build new notes from user drafts and validate model invariants.
//!
//! # Invariants
//! - `id` is stable and never reused for another note.
//! - A checklist note keeps `content` empty; its text is derived from items.
//! - A text note carries no checklist items.
//! - A new note is never empty on all of title, content and items.

use crate::checklist::text::{items_to_text, parse_text_to_items};
use crate::model::checklist_item::{ChecklistItem, MAX_ITEM_LEVEL};
use crate::model::color::DEFAULT_COLOR;
use chrono::{DateTime, Utc};
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable note identifier.
pub type NoteId = String;

/// Timestamp type used for creation/modification stamps.
pub type Timestamp = DateTime<Utc>;

/// Canonical note record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Note {
    pub id: NoteId,
    pub title: String,
    /// Free text body. Empty for checklist notes.
    pub content: String,
    pub created_at: Timestamp,
    /// Set on every edit/pin mutation; absent for never-modified notes.
    pub modified_at: Option<Timestamp>,
    pub is_checklist: bool,
    /// Flat leveled checklist. Empty means "absent".
    pub checklist_items: Vec<ChecklistItem>,
    pub color: String,
    pub is_pinned: bool,
}

impl Note {
    /// Generates a fresh note id.
    pub fn new_id() -> NoteId {
        Uuid::new_v4().to_string()
    }

    /// Returns the note text, deriving it from checklist items when needed.
    pub fn display_text(&self) -> String {
        if self.is_checklist {
            items_to_text(&self.checklist_items)
        } else {
            self.content.clone()
        }
    }

    /// Returns whether title, content and every item text are blank.
    pub fn is_blank(&self) -> bool {
        self.title.trim().is_empty()
            && self.content.trim().is_empty()
            && self
                .checklist_items
                .iter()
                .all(|item| item.text.trim().is_empty())
    }

    /// Validates model invariants for a note entering the store.
    ///
    /// # Errors
    /// - `EmptyId` when the id is blank.
    /// - `EmptyNote` when title, content and items are all blank.
    /// - `ChecklistWithContent` / `TextNoteWithItems` on mode mismatch.
    /// - Item-level errors for out-of-range levels, an indented first item,
    ///   or duplicate item ids.
    pub fn validate(&self) -> Result<(), NoteValidationError> {
        if self.id.trim().is_empty() {
            return Err(NoteValidationError::EmptyId);
        }
        if self.is_blank() {
            return Err(NoteValidationError::EmptyNote {
                note_id: self.id.clone(),
            });
        }
        if self.is_checklist && !self.content.is_empty() {
            return Err(NoteValidationError::ChecklistWithContent {
                note_id: self.id.clone(),
            });
        }
        if !self.is_checklist && !self.checklist_items.is_empty() {
            return Err(NoteValidationError::TextNoteWithItems {
                note_id: self.id.clone(),
            });
        }

        if let Some(first) = self.checklist_items.first() {
            if first.level != 0 {
                return Err(NoteValidationError::IndentedFirstItem {
                    item_id: first.id.clone(),
                });
            }
        }

        let mut seen = HashSet::new();
        for item in &self.checklist_items {
            if item.level > MAX_ITEM_LEVEL {
                return Err(NoteValidationError::ItemLevelOutOfRange {
                    item_id: item.id.clone(),
                    level: item.level,
                });
            }
            if !seen.insert(item.id.as_str()) {
                return Err(NoteValidationError::DuplicateItemId {
                    item_id: item.id.clone(),
                });
            }
        }

        Ok(())
    }
}

/// Model invariant violations reported by `Note::validate`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NoteValidationError {
    EmptyId,
    EmptyNote { note_id: NoteId },
    ChecklistWithContent { note_id: NoteId },
    TextNoteWithItems { note_id: NoteId },
    ItemLevelOutOfRange { item_id: String, level: u8 },
    IndentedFirstItem { item_id: String },
    DuplicateItemId { item_id: String },
}

impl Display for NoteValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyId => write!(f, "note id must not be blank"),
            Self::EmptyNote { note_id } => {
                write!(f, "note {note_id} has no title, content or items")
            }
            Self::ChecklistWithContent { note_id } => {
                write!(f, "checklist note {note_id} must not carry text content")
            }
            Self::TextNoteWithItems { note_id } => {
                write!(f, "text note {note_id} must not carry checklist items")
            }
            Self::ItemLevelOutOfRange { item_id, level } => write!(
                f,
                "checklist item {item_id} has level {level}, max is {MAX_ITEM_LEVEL}"
            ),
            Self::IndentedFirstItem { item_id } => {
                write!(f, "first checklist item {item_id} must be top-level")
            }
            Self::DuplicateItemId { item_id } => {
                write!(f, "checklist item id {item_id} is used more than once")
            }
        }
    }
}

impl Error for NoteValidationError {}

/// User input for a note that has not been saved yet.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoteDraft {
    pub title: String,
    pub content: String,
    /// Palette value; `None` falls back to `DEFAULT_COLOR`.
    pub color: Option<String>,
    /// When set, `content` is parsed into checklist items.
    pub is_checklist: bool,
    pub is_pinned: bool,
}

impl NoteDraft {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            ..Self::default()
        }
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    pub fn as_checklist(mut self) -> Self {
        self.is_checklist = true;
        self
    }

    pub fn pinned(mut self) -> Self {
        self.is_pinned = true;
        self
    }

    /// Builds a note stamped with `now` for both creation and modification.
    ///
    /// Title and text content are trimmed. Checklist drafts keep line
    /// indentation so nesting survives parsing; blank checklist content yields
    /// one empty item.
    ///
    /// # Errors
    /// - `EmptyNote` when title and content are both blank.
    pub fn into_note(self, now: Timestamp) -> Result<Note, NoteValidationError> {
        let id = Note::new_id();
        let title = self.title.trim().to_string();
        if title.is_empty() && self.content.trim().is_empty() {
            return Err(NoteValidationError::EmptyNote { note_id: id });
        }

        let (content, checklist_items) = if self.is_checklist {
            let mut items = parse_text_to_items(self.content.trim_matches(['\n', '\r']));
            if items.is_empty() {
                items.push(ChecklistItem::new(""));
            }
            (String::new(), items)
        } else {
            (self.content.trim().to_string(), Vec::new())
        };

        let note = Note {
            id,
            title,
            content,
            created_at: now,
            modified_at: Some(now),
            is_checklist: self.is_checklist,
            checklist_items,
            color: self.color.unwrap_or_else(|| DEFAULT_COLOR.to_string()),
            is_pinned: self.is_pinned,
        };
        note.validate()?;
        Ok(note)
    }
}

#[cfg(test)]
mod tests {
    use super::{NoteDraft, NoteValidationError};
    use crate::model::color::DEFAULT_COLOR;
    use chrono::{TimeZone, Utc};

    fn fixed_now() -> chrono::DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 1, 9, 30, 0).unwrap()
    }

    #[test]
    fn draft_trims_text_and_defaults_color() {
        let note = NoteDraft::new("  Groceries ", "  milk  ")
            .into_note(fixed_now())
            .unwrap();
        assert_eq!(note.title, "Groceries");
        assert_eq!(note.content, "milk");
        assert_eq!(note.color, DEFAULT_COLOR);
        assert_eq!(note.created_at, fixed_now());
        assert_eq!(note.modified_at, Some(fixed_now()));
        assert!(!note.is_pinned);
    }

    #[test]
    fn draft_rejects_blank_title_and_content() {
        let err = NoteDraft::new("  ", "\n\t").into_note(fixed_now()).unwrap_err();
        assert!(matches!(err, NoteValidationError::EmptyNote { .. }));
    }

    #[test]
    fn checklist_draft_parses_nested_lines_and_clears_content() {
        let note = NoteDraft::new("Trip", "Pack\n  socks\n  shoes\nBook hotel")
            .as_checklist()
            .into_note(fixed_now())
            .unwrap();
        assert!(note.is_checklist);
        assert!(note.content.is_empty());
        let levels: Vec<u8> = note.checklist_items.iter().map(|i| i.level).collect();
        assert_eq!(levels, vec![0, 1, 1, 0]);
        assert_eq!(note.display_text(), "Pack\n  socks\n  shoes\nBook hotel");
    }

    #[test]
    fn checklist_draft_with_only_title_gets_one_empty_item() {
        let note = NoteDraft::new("Todo", "")
            .as_checklist()
            .into_note(fixed_now())
            .unwrap();
        assert_eq!(note.checklist_items.len(), 1);
        assert_eq!(note.checklist_items[0].text, "");
    }

    #[test]
    fn validate_rejects_text_note_with_items() {
        let mut note = NoteDraft::new("t", "body").into_note(fixed_now()).unwrap();
        note.checklist_items
            .push(crate::model::checklist_item::ChecklistItem::new("x"));
        assert!(matches!(
            note.validate(),
            Err(NoteValidationError::TextNoteWithItems { .. })
        ));
    }

    #[test]
    fn validate_rejects_duplicate_item_ids() {
        let mut note = NoteDraft::new("t", "a\nb")
            .as_checklist()
            .into_note(fixed_now())
            .unwrap();
        let duplicate = note.checklist_items[0].id.clone();
        note.checklist_items[1].id = duplicate;
        assert!(matches!(
            note.validate(),
            Err(NoteValidationError::DuplicateItemId { .. })
        ));
    }
}
