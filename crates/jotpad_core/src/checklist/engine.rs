//! Structural operations over a flat, leveled checklist.
//!
//! # Responsibility
//! - Cascade check state from a top-level item to its descendant run.
//! - Indent/outdent single items and repair the level of a moved item.
//!
//! # Invariants
//! - Every mutating operation returns `false` and leaves items untouched
//!   when the target id/index does not exist.
//! - Move repair only inspects the relocated item; it never re-levels the
//!   subtree that followed it.
//! - The first item of a sequence is kept at level 0.

use crate::model::checklist_item::{
    clamp_level, new_item_id, ChecklistItem, ItemId, MAX_ITEM_LEVEL,
};
use std::collections::HashSet;

/// How a moved item relates to its new predecessor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MovePlacement {
    /// Landed at index 0; forced to level 0.
    First,
    /// Predecessor is exactly one level shallower.
    UnderParent,
    /// Predecessor has the same level.
    BesideSibling,
    /// Predecessor is deeper; level kept as-is.
    AfterDeeper,
    /// Level jump from the predecessor was discontinuous and got repaired.
    Repaired { from_level: u8, to_level: u8 },
}

/// Returns the index of the item with `item_id`.
pub fn find_item_index(items: &[ChecklistItem], item_id: &str) -> Option<usize> {
    items.iter().position(|item| item.id == item_id)
}

/// Sets the checked state of `item_id`.
///
/// A top-level target also forces every immediately following item with
/// `level > 0` to the same state, stopping at the next top-level item.
/// Nested targets only change themselves.
pub fn toggle_cascade(items: &mut [ChecklistItem], item_id: &str, checked: bool) -> bool {
    let Some(index) = find_item_index(items, item_id) else {
        return false;
    };

    items[index].checked = checked;
    if items[index].is_top_level() {
        for item in items[index + 1..]
            .iter_mut()
            .take_while(|item| item.level > 0)
        {
            item.checked = checked;
        }
    }
    true
}

/// Inverts the checked state of `item_id` with cascade semantics.
pub fn toggle_item(items: &mut [ChecklistItem], item_id: &str) -> bool {
    let Some(index) = find_item_index(items, item_id) else {
        return false;
    };
    let checked = !items[index].checked;
    toggle_cascade(items, item_id, checked)
}

/// Increases the level at `index` by one, capped at `MAX_ITEM_LEVEL`.
///
/// The first item has no possible parent, so indenting it is a no-op.
pub fn indent(items: &mut [ChecklistItem], index: usize) -> bool {
    if index == 0 {
        return false;
    }
    match items.get_mut(index) {
        Some(item) if item.level < MAX_ITEM_LEVEL => {
            item.level += 1;
            true
        }
        _ => false,
    }
}

/// Decreases the level at `index` by one, floored at 0.
pub fn outdent(items: &mut [ChecklistItem], index: usize) -> bool {
    match items.get_mut(index) {
        Some(item) if item.level > 0 => {
            item.level -= 1;
            true
        }
        _ => false,
    }
}

/// Moves the item at `from_index` to `to_index` and repairs its level.
///
/// `to_index` is clamped to the last position. Only the moved item is
/// re-leveled (see [`reindent_after_move`]); if the move leaves an indented
/// item at the front, that item is lifted to level 0.
pub fn reorder(items: &mut Vec<ChecklistItem>, from_index: usize, to_index: usize) -> bool {
    if from_index >= items.len() {
        return false;
    }
    let to_index = to_index.min(items.len() - 1);
    if from_index == to_index {
        return false;
    }

    let moved = items.remove(from_index);
    items.insert(to_index, moved);
    reindent_after_move(items, to_index);
    ensure_root_start(items);
    true
}

/// Repairs the level of the item that was just relocated to `index`.
///
/// Parent and sibling predecessors keep the level. A deeper predecessor
/// also keeps it. A predecessor shallower by more than one level makes the
/// jump discontinuous: the item is re-leveled under the nearest preceding
/// item with a strictly smaller level, or to 0 when none exists.
pub fn reindent_after_move(items: &mut [ChecklistItem], index: usize) -> Option<MovePlacement> {
    let current = items.get(index)?.level;
    if index == 0 {
        items[0].level = 0;
        return Some(MovePlacement::First);
    }

    let previous = items[index - 1].level;
    let placement = if previous + 1 == current {
        MovePlacement::UnderParent
    } else if previous == current {
        MovePlacement::BesideSibling
    } else if previous > current {
        MovePlacement::AfterDeeper
    } else {
        let repaired = items[..index]
            .iter()
            .rev()
            .find(|item| item.level < current)
            .map_or(0, |anchor| (anchor.level + 1).min(MAX_ITEM_LEVEL));
        items[index].level = repaired;
        MovePlacement::Repaired {
            from_level: current,
            to_level: repaired,
        }
    };
    Some(placement)
}

/// Appends a new unchecked top-level item and returns its id.
pub fn add_item(items: &mut Vec<ChecklistItem>, text: impl Into<String>) -> ItemId {
    let item = ChecklistItem::new(text);
    let id = item.id.clone();
    items.push(item);
    id
}

/// Removes the item with `item_id`. Descendants stay in place.
pub fn delete_item(items: &mut Vec<ChecklistItem>, item_id: &str) -> bool {
    let Some(index) = find_item_index(items, item_id) else {
        return false;
    };
    items.remove(index);
    ensure_root_start(items);
    true
}

/// Replaces the text of the item at `index`.
pub fn set_item_text(items: &mut [ChecklistItem], index: usize, text: impl Into<String>) -> bool {
    match items.get_mut(index) {
        Some(item) => {
            item.text = text.into();
            true
        }
        None => false,
    }
}

/// Lifts an indented first item to level 0. Returns whether it changed.
pub fn ensure_root_start(items: &mut [ChecklistItem]) -> bool {
    match items.first_mut() {
        Some(first) if first.level != 0 => {
            first.level = 0;
            true
        }
        _ => false,
    }
}

/// Restores item invariants on a sequence edited outside the engine.
///
/// Levels are clamped into range, blank or repeated ids get fresh ones and
/// an indented first item is lifted. Returns whether anything changed.
pub fn repair_items(items: &mut [ChecklistItem]) -> bool {
    let mut changed = false;
    let mut seen = HashSet::new();
    for item in items.iter_mut() {
        let level = clamp_level(i64::from(item.level));
        if level != item.level {
            item.level = level;
            changed = true;
        }
        if item.id.trim().is_empty() || !seen.insert(item.id.clone()) {
            item.id = new_item_id();
            seen.insert(item.id.clone());
            changed = true;
        }
    }
    ensure_root_start(items) || changed
}

/// Iterates each top-level item together with its descendant run.
///
/// Items before the first top-level item belong to no run.
pub fn top_level_runs(items: &[ChecklistItem]) -> impl Iterator<Item = &[ChecklistItem]> + '_ {
    items
        .iter()
        .enumerate()
        .filter(|(_, item)| item.is_top_level())
        .map(move |(start, _)| {
            let descendants = items[start + 1..]
                .iter()
                .take_while(|item| item.level > 0)
                .count();
            &items[start..=start + descendants]
        })
}

/// Unchecked top-level items with their whole descendant runs.
pub fn active_items(items: &[ChecklistItem]) -> Vec<&ChecklistItem> {
    top_level_runs(items)
        .filter(|run| !run[0].checked)
        .flatten()
        .collect()
}

/// Checked top-level items with their whole descendant runs.
pub fn completed_items(items: &[ChecklistItem]) -> Vec<&ChecklistItem> {
    top_level_runs(items)
        .filter(|run| run[0].checked)
        .flatten()
        .collect()
}
