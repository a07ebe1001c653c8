//! Deterministic sample notes for development stores.
//!
//! # Invariants
//! - Output depends only on `now`: same ids, titles, items and pin flags on
//!   every call, with modification times staggered back from `now`.
//! - Pinned samples come first, so the output already satisfies the
//!   pinned-before-unpinned ordering.

use crate::model::checklist_item::ChecklistItem;
use crate::model::color::color_at;
use crate::model::note::{Note, Timestamp};
use chrono::Duration;

/// Number of generated sample notes.
pub const SAMPLE_NOTE_COUNT: usize = 11;

const FIRST_CHECKLIST_INDEX: usize = 5;
const PINNED_COUNT: usize = 3;
const MAX_LOREM_PARAGRAPHS: usize = 5;

const LOREM_IPSUM: &str = "Lorem ipsum dolor sit amet, consectetur adipiscing elit. Sed do eiusmod tempor incididunt ut labore et dolore magna aliqua. Ut enim ad minim veniam, quis nostrud exercitation ullamco laboris nisi ut aliquip ex ea commodo consequat.";

const TASK_TITLES: &[&str] = &[
    "Buy groceries",
    "Call doctor",
    "Schedule meeting",
    "Pay bills",
    "Finish project",
    "Send email to team",
    "Review documents",
    "Update website",
    "Research new tools",
    "Plan vacation",
    "Clean apartment",
    "Fix bug in code",
    "Prepare presentation",
    "Read article",
    "Write blog post",
    "Exercise",
    "Call mom",
    "Pick up package",
    "Renew subscription",
    "Update resume",
];

const SUBTASK_TITLES: &[&str] = &[
    "Review details",
    "Gather materials",
    "Make notes",
    "Set reminder",
    "Check requirements",
    "Verify information",
    "Follow up",
    "Prepare questions",
    "Create outline",
    "Schedule time",
    "Milk",
    "Eggs",
    "Bread",
    "Coffee",
    "Fruits",
    "Vegetables",
    "Cheese",
    "Yogurt",
    "Chicken",
    "Rice",
];

const SAMPLE_URLS: &[&str] = &[
    "https://example.com",
    "https://github.com",
    "https://docs.rs",
    "https://crates.io",
    "https://stackoverflow.com",
    "https://blog.rust-lang.org",
    "https://dev.to",
];

/// Generates the sample note set, lettered `A` through `K`.
///
/// The first five are text notes and the rest checklists; the first three
/// are pinned. Note `i` was last modified `i` hours before `now`.
pub fn generate_sample_notes(now: Timestamp) -> Vec<Note> {
    (0..SAMPLE_NOTE_COUNT)
        .map(|index| {
            let letter = char::from(b'A' + index as u8);
            let modified_at = now - Duration::hours(index as i64);
            let is_checklist = index >= FIRST_CHECKLIST_INDEX;
            let (title, content, checklist_items) = if is_checklist {
                (
                    format!("Checklist {letter}"),
                    String::new(),
                    sample_checklist(index),
                )
            } else {
                (format!("Note {letter}"), lorem_ipsum(index + 1), Vec::new())
            };

            Note {
                id: format!("dev-note-{letter}"),
                title,
                content,
                created_at: now,
                modified_at: Some(modified_at),
                is_checklist,
                checklist_items,
                color: color_at(index).value.to_string(),
                is_pinned: index < PINNED_COUNT,
            }
        })
        .collect()
}

fn lorem_ipsum(paragraphs: usize) -> String {
    vec![LOREM_IPSUM; paragraphs.min(MAX_LOREM_PARAGRAPHS)].join("\n\n")
}

fn sample_checklist(seed: usize) -> Vec<ChecklistItem> {
    let mut items = Vec::new();
    let top_level_count = 3 + seed % 5;

    for i in 0..top_level_count {
        let key = seed + i;
        let title = TASK_TITLES[key % TASK_TITLES.len()];
        let checked = key % 3 == 0;
        let text = if key % 7 == 0 {
            format!("{title} at {}", SAMPLE_URLS[key % SAMPLE_URLS.len()])
        } else {
            title.to_string()
        };
        items.push(sample_item(format!("task-{seed}-{i}"), text, checked, 0));

        if key % 2 != 0 {
            continue;
        }
        for j in 0..1 + key % 3 {
            let sub_key = key + j;
            let sub_title = SUBTASK_TITLES[sub_key % SUBTASK_TITLES.len()];
            let sub_checked = checked || sub_key % 4 == 0;
            items.push(sample_item(
                format!("task-{seed}-{i}-{j}"),
                sub_title.to_string(),
                sub_checked,
                1,
            ));

            if sub_key % 5 == 0 {
                items.push(sample_item(
                    format!("task-{seed}-{i}-{j}-0"),
                    format!("Detail for {}", sub_title.to_lowercase()),
                    sub_checked,
                    2,
                ));
            }
        }
    }

    items.push(sample_item(
        format!("task-{seed}-completed"),
        "Completed task".to_string(),
        true,
        0,
    ));
    items
}

fn sample_item(id: String, text: String, checked: bool, level: u8) -> ChecklistItem {
    ChecklistItem {
        id,
        text,
        checked,
        level,
    }
}
