//! Note-level switching between text and checklist mode.
//!
//! These helpers only reshape the note; stamping `modified_at` and
//! persisting is left to `NoteStore::update`.

use crate::checklist::engine::repair_items;
use crate::checklist::text::{items_to_text, parse_text_to_items};
use crate::model::checklist_item::ChecklistItem;
use crate::model::note::Note;

/// Turns a text note into a checklist note.
///
/// Each content line becomes an item. Blank content yields a single empty
/// item so the checklist is immediately editable. Content is cleared.
/// Returns `false` when the note already is a checklist.
pub fn convert_to_checklist(note: &mut Note) -> bool {
    if note.is_checklist {
        return false;
    }

    let mut items = parse_text_to_items(&note.content);
    if items.is_empty() {
        items.push(ChecklistItem::new(""));
    }
    note.checklist_items = items;
    note.content.clear();
    note.is_checklist = true;
    true
}

/// Turns a checklist note into a text note.
///
/// Items are rendered as indented lines into `content` and dropped.
/// Returns `false` when the note already is a text note.
pub fn convert_to_text(note: &mut Note) -> bool {
    if !note.is_checklist {
        return false;
    }

    note.content = items_to_text(&note.checklist_items);
    note.checklist_items.clear();
    note.is_checklist = false;
    true
}

/// Flips the note between text and checklist mode.
pub fn toggle_checklist_mode(note: &mut Note) {
    if note.is_checklist {
        convert_to_text(note);
    } else {
        convert_to_checklist(note);
    }
}

/// Restores mode consistency on a note edited outside the converters.
///
/// A checklist note drops leftover text content and gets its items repaired
/// (see [`repair_items`]). A text note still carrying
/// items folds them into blank content and drops them. Returns whether the
/// note changed.
pub fn normalize_mode(note: &mut Note) -> bool {
    let mut changed = false;
    if note.is_checklist {
        if !note.content.is_empty() {
            note.content.clear();
            changed = true;
        }
        changed |= repair_items(&mut note.checklist_items);
    } else if !note.checklist_items.is_empty() {
        if note.content.trim().is_empty() {
            note.content = items_to_text(&note.checklist_items);
        }
        note.checklist_items.clear();
        changed = true;
    }
    changed
}
