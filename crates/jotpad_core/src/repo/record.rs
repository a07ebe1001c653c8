//! Wire records exchanged with the persistence gateway.
//!
//! # Responsibility
//! - Define the JSON shape of the persisted note collection.
//! - Reconstitute domain notes from wire records (timestamps, levels, mode).
//!
//! # Invariants
//! - Timestamps travel as RFC 3339 strings with millisecond precision.
//! - Reconstitution never rejects a recoverable record: out-of-range levels
//!   are clamped, an indented first item is lifted, and blank or repeated
//!   item ids are replaced.
//! - Only unparseable timestamps or a blank note id fail decoding.

use crate::checklist::convert::normalize_mode;
use crate::model::checklist_item::{clamp_level, ChecklistItem};
use crate::model::color::DEFAULT_COLOR;
use crate::model::note::{Note, NoteId, Timestamp};
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Persisted note record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredNote {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
    pub created_at: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modified_at: Option<String>,
    #[serde(rename = "isCheckList", default)]
    pub is_checklist: bool,
    #[serde(
        rename = "checkListItems",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub checklist_items: Option<Vec<StoredChecklistItem>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default)]
    pub is_pinned: bool,
}

/// Persisted checklist item record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredChecklistItem {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub checked: bool,
    /// Kept wide on the wire; clamped into range on reconstitution.
    #[serde(default)]
    pub level: i64,
}

/// Failure to turn a wire record into a domain note.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NoteDecodeError {
    MissingId,
    InvalidTimestamp {
        note_id: NoteId,
        field: &'static str,
        value: String,
    },
}

impl Display for NoteDecodeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingId => write!(f, "stored note has a blank id"),
            Self::InvalidTimestamp {
                note_id,
                field,
                value,
            } => write!(
                f,
                "stored note {note_id} has invalid {field} timestamp `{value}`"
            ),
        }
    }
}

impl Error for NoteDecodeError {}

/// Formats a timestamp for the wire.
pub fn format_timestamp(value: Timestamp) -> String {
    value.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Parses a wire timestamp with any offset into UTC.
pub fn parse_timestamp(value: &str) -> Option<Timestamp> {
    DateTime::parse_from_rfc3339(value.trim())
        .ok()
        .map(|parsed| parsed.with_timezone(&Utc))
}

impl From<&Note> for StoredNote {
    fn from(note: &Note) -> Self {
        let checklist_items = if note.checklist_items.is_empty() {
            None
        } else {
            Some(
                note.checklist_items
                    .iter()
                    .map(StoredChecklistItem::from)
                    .collect(),
            )
        };

        Self {
            id: note.id.clone(),
            title: note.title.clone(),
            content: note.content.clone(),
            created_at: format_timestamp(note.created_at),
            modified_at: note.modified_at.map(format_timestamp),
            is_checklist: note.is_checklist,
            checklist_items,
            color: Some(note.color.clone()),
            is_pinned: note.is_pinned,
        }
    }
}

impl From<&ChecklistItem> for StoredChecklistItem {
    fn from(item: &ChecklistItem) -> Self {
        Self {
            id: item.id.clone(),
            text: item.text.clone(),
            checked: item.checked,
            level: i64::from(item.level),
        }
    }
}

impl TryFrom<StoredNote> for Note {
    type Error = NoteDecodeError;

    /// Reconstitutes a note, repairing structural drift in old records.
    ///
    /// A checklist record drops leftover text content. A text record that
    /// still carries items folds them into blank content and drops them.
    fn try_from(record: StoredNote) -> Result<Self, Self::Error> {
        if record.id.trim().is_empty() {
            return Err(NoteDecodeError::MissingId);
        }

        let created_at = parse_timestamp(&record.created_at).ok_or_else(|| {
            NoteDecodeError::InvalidTimestamp {
                note_id: record.id.clone(),
                field: "createdAt",
                value: record.created_at.clone(),
            }
        })?;
        let modified_at = match record.modified_at.as_deref() {
            Some(value) => Some(parse_timestamp(value).ok_or_else(|| {
                NoteDecodeError::InvalidTimestamp {
                    note_id: record.id.clone(),
                    field: "modifiedAt",
                    value: value.to_string(),
                }
            })?),
            None => None,
        };

        let mut note = Note {
            id: record.id,
            title: record.title,
            content: record.content,
            created_at,
            modified_at,
            is_checklist: record.is_checklist,
            checklist_items: reconstitute_items(record.checklist_items.unwrap_or_default()),
            color: record
                .color
                .filter(|color| !color.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_COLOR.to_string()),
            is_pinned: record.is_pinned,
        };
        normalize_mode(&mut note);
        Ok(note)
    }
}

fn reconstitute_items(records: Vec<StoredChecklistItem>) -> Vec<ChecklistItem> {
    // Ids and the first level are repaired by `normalize_mode`.
    records
        .into_iter()
        .map(|record| ChecklistItem {
            id: record.id,
            text: record.text,
            checked: record.checked,
            level: clamp_level(record.level),
        })
        .collect()
}
