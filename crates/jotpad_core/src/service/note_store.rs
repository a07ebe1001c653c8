//! Canonical ordered note collection.
//!
//! # Responsibility
//! - Own the in-memory note snapshot and apply add/update/delete/pin/reorder.
//! - Persist the snapshot through a `NoteStorage` after every mutation.
//! - Populate and re-populate development stores with sample notes.
//! - Notify subscribers with the new snapshot after each change.
//!
//! # Invariants
//! - All pinned notes precede all unpinned notes at every observable point.
//! - Pinning moves a note to index 0; unpinning moves it to the partition
//!   boundary (count of the remaining pinned notes).
//! - Persistence failures are logged and never roll back the in-memory state.
//! - Sample notes loaded automatically are not written to storage until
//!   they are edited, pinned or reordered.
//! - Stored notes always pass `Note::validate`; ids are unique.
//! - Unknown ids are no-ops, not errors.

use crate::checklist::convert::normalize_mode;
use crate::checklist::engine::toggle_cascade;
use crate::clock::{Clock, SystemClock};
use crate::config::StoreConfig;
use crate::model::checklist_item::ChecklistItem;
use crate::model::note::{Note, NoteDraft, NoteId, NoteValidationError, Timestamp};
use crate::repo::note_storage::NoteStorage;
use crate::repo::record::StoredNote;
use crate::service::sample_notes::generate_sample_notes;
use log::{debug, error, info, warn};
use std::collections::{HashMap, HashSet};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Handle returned by `NoteStore::subscribe`.
pub type SubscriptionId = u64;

type Observer = Box<dyn FnMut(&[Note])>;

/// Rejected store mutations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NoteStoreError {
    /// Note breaks model invariants.
    Invalid(NoteValidationError),
    /// A note with the same id is already stored.
    DuplicateId(NoteId),
}

impl Display for NoteStoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Invalid(err) => write!(f, "{err}"),
            Self::DuplicateId(note_id) => write!(f, "note already exists: {note_id}"),
        }
    }
}

impl Error for NoteStoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Invalid(err) => Some(err),
            Self::DuplicateId(_) => None,
        }
    }
}

impl From<NoteValidationError> for NoteStoreError {
    fn from(value: NoteValidationError) -> Self {
        Self::Invalid(value)
    }
}

/// Note collection bound to one storage key.
pub struct NoteStore<S: NoteStorage> {
    storage: S,
    config: StoreConfig,
    clock: Box<dyn Clock>,
    notes: Vec<Note>,
    /// Auto-loaded sample notes, excluded from persistence.
    sample_ids: HashSet<NoteId>,
    pending_sample_reload: Option<Timestamp>,
    observers: Vec<(SubscriptionId, Observer)>,
    next_subscription_id: SubscriptionId,
}

impl<S: NoteStorage> NoteStore<S> {
    /// Opens a store over `storage` using the wall clock.
    pub fn open(storage: S, config: StoreConfig) -> Self {
        Self::open_with_clock(storage, config, SystemClock)
    }

    /// Opens a store and loads the persisted collection.
    ///
    /// Missing or malformed data yields an empty collection, which is
    /// populated with sample notes outside production.
    pub fn open_with_clock(storage: S, config: StoreConfig, clock: impl Clock + 'static) -> Self {
        let mut store = Self {
            storage,
            config,
            clock: Box::new(clock),
            notes: Vec::new(),
            sample_ids: HashSet::new(),
            pending_sample_reload: None,
            observers: Vec::new(),
            next_subscription_id: 1,
        };

        store.notes = store.load_persisted();
        info!(
            "event=store_open module=store status=ok env={} count={}",
            store.config.environment.as_str(),
            store.notes.len()
        );
        if store.notes.is_empty() && !store.config.environment.is_production() {
            store.populate_samples();
        }
        store
    }

    /// Current snapshot in display order.
    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    pub fn get_by_id(&self, note_id: &str) -> Option<&Note> {
        self.notes.iter().find(|note| note.id == note_id)
    }

    /// Index of the first unpinned note, equal to the pinned count.
    pub fn partition_boundary(&self) -> usize {
        self.notes.iter().take_while(|note| note.is_pinned).count()
    }

    pub fn pinned_notes(&self) -> &[Note] {
        &self.notes[..self.partition_boundary()]
    }

    pub fn unpinned_notes(&self) -> &[Note] {
        &self.notes[self.partition_boundary()..]
    }

    /// Returns whether `note_id` is an auto-loaded sample note.
    pub fn is_sample(&self, note_id: &str) -> bool {
        self.sample_ids.contains(note_id)
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn into_storage(self) -> S {
        self.storage
    }

    /// Builds a note from `draft` stamped with the store clock and adds it.
    ///
    /// # Errors
    /// - `Invalid` when the draft is empty.
    pub fn create(&mut self, draft: NoteDraft) -> Result<NoteId, NoteStoreError> {
        let note = draft.into_note(self.clock.now())?;
        let note_id = note.id.clone();
        self.add(note)?;
        Ok(note_id)
    }

    /// Adds `note` at the front of its pin partition and persists.
    ///
    /// # Errors
    /// - `Invalid` when the note fails `Note::validate`.
    /// - `DuplicateId` when the id is already stored.
    pub fn add(&mut self, note: Note) -> Result<(), NoteStoreError> {
        note.validate()?;
        if self.get_by_id(&note.id).is_some() {
            return Err(NoteStoreError::DuplicateId(note.id));
        }

        debug!(
            "event=note_add module=store status=ok note_id={} pinned={}",
            note.id, note.is_pinned
        );
        self.insert_by_pin(note);
        self.commit();
        Ok(())
    }

    /// Replaces the stored note with the same id and persists.
    ///
    /// Stamps `modified_at`, keeps the stored `created_at`, repairs item
    /// levels and ids, and re-splices the note when its pin flag changed.
    /// Returns `false` for unknown ids and for notes left blank, which keep
    /// the stored version.
    pub fn update(&mut self, mut note: Note) -> bool {
        let Some(index) = self.position(&note.id) else {
            debug!(
                "event=note_update module=store status=not_found note_id={}",
                note.id
            );
            return false;
        };

        normalize_mode(&mut note);
        if let Err(err) = note.validate() {
            warn!(
                "event=note_update module=store status=rejected note_id={} error={err}",
                note.id
            );
            return false;
        }

        let stored = &self.notes[index];
        let pin_changed = stored.is_pinned != note.is_pinned;
        note.created_at = stored.created_at;
        note.modified_at = Some(self.clock.now());
        // An edited sample becomes a regular note.
        self.sample_ids.remove(&note.id);

        if pin_changed {
            self.notes.remove(index);
            self.insert_by_pin(note);
        } else {
            self.notes[index] = note;
        }
        self.commit();
        true
    }

    /// Removes the note with `note_id` and persists.
    ///
    /// Emptying a development store schedules a deferred sample reload.
    pub fn delete(&mut self, note_id: &str) -> bool {
        let Some(index) = self.position(note_id) else {
            return false;
        };

        self.notes.remove(index);
        self.sample_ids.remove(note_id);
        debug!("event=note_delete module=store status=ok note_id={note_id}");
        self.commit();

        if self.notes.is_empty() && !self.config.environment.is_production() {
            self.schedule_sample_reload();
        }
        true
    }

    /// Inverts the pin flag of `note_id`, stamping `modified_at`.
    pub fn toggle_pin(&mut self, note_id: &str) -> bool {
        let Some(index) = self.position(note_id) else {
            return false;
        };

        let mut note = self.notes.remove(index);
        self.sample_ids.remove(&note.id);
        note.is_pinned = !note.is_pinned;
        note.modified_at = Some(self.clock.now());
        debug!(
            "event=note_pin module=store status=ok note_id={} pinned={}",
            note.id, note.is_pinned
        );
        self.insert_by_pin(note);
        self.commit();
        true
    }

    /// Replaces the collection with `ordered`.
    ///
    /// Known ids keep their stored fields and take only the incoming pin flag.
    /// Unknown ids pass through unchanged when valid. Only the first occurrence of an id
    /// is kept. Notes missing from `ordered` are dropped. The result is stably
    /// partitioned pinned-first and persisted in full, samples included.
    pub fn reorder(&mut self, ordered: Vec<Note>) {
        let mut stored: HashMap<NoteId, Note> = self
            .notes
            .drain(..)
            .map(|note| (note.id.clone(), note))
            .collect();

        let mut emitted = HashSet::new();
        let merged: Vec<Note> = ordered
            .into_iter()
            .filter(|incoming| emitted.insert(incoming.id.clone()))
            .filter_map(|incoming| match stored.remove(&incoming.id) {
                Some(mut note) => {
                    note.is_pinned = incoming.is_pinned;
                    Some(note)
                }
                None => match incoming.validate() {
                    Ok(()) => Some(incoming),
                    Err(err) => {
                        warn!(
                            "event=note_reorder module=store status=skipped note_id={} error={err}",
                            incoming.id
                        );
                        None
                    }
                },
            })
            .collect();

        self.notes = pinned_first(merged);
        self.sample_ids.clear();
        debug!(
            "event=note_reorder module=store status=ok count={}",
            self.notes.len()
        );
        self.commit();
    }

    /// Empties the collection and persists. No sample reload follows.
    pub fn clear(&mut self) {
        self.notes.clear();
        self.sample_ids.clear();
        self.pending_sample_reload = None;
        info!("event=store_clear module=store status=ok");
        self.commit();
    }

    /// Applies `op` to the items of checklist note `note_id` as an update.
    ///
    /// `op` reports whether it changed anything; unchanged items and text
    /// notes leave the store untouched.
    pub fn edit_checklist<F>(&mut self, note_id: &str, op: F) -> bool
    where
        F: FnOnce(&mut Vec<ChecklistItem>) -> bool,
    {
        let Some(mut note) = self.get_by_id(note_id).cloned() else {
            return false;
        };
        if !note.is_checklist || !op(&mut note.checklist_items) {
            return false;
        }
        self.update(note)
    }

    /// Sets `checked` on an item, cascading from top-level items.
    pub fn toggle_checklist_item(&mut self, note_id: &str, item_id: &str, checked: bool) -> bool {
        self.edit_checklist(note_id, |items| toggle_cascade(items, item_id, checked))
    }

    /// Imports the sample set as regular, persisted notes.
    ///
    /// Samples whose id is already stored are skipped. Returns the number of
    /// notes added.
    pub fn add_sample_notes(&mut self) -> usize {
        let mut added = 0;
        for note in generate_sample_notes(self.clock.now()) {
            if self.get_by_id(&note.id).is_some() {
                continue;
            }
            self.insert_by_pin(note);
            added += 1;
        }

        info!("event=sample_import module=store status=ok count={added}");
        if added > 0 {
            self.commit();
        }
        added
    }

    /// Deadline of the pending sample reload, if any.
    pub fn pending_sample_reload(&self) -> Option<Timestamp> {
        self.pending_sample_reload
    }

    /// Cancels the pending sample reload. Returns whether one was pending.
    pub fn cancel_sample_reload(&mut self) -> bool {
        self.pending_sample_reload.take().is_some()
    }

    /// Fires deferred tasks that are due.
    ///
    /// A due sample reload only repopulates a collection that is still empty.
    /// Returns whether sample notes were loaded.
    pub fn poll_deferred(&mut self) -> bool {
        let Some(due_at) = self.pending_sample_reload else {
            return false;
        };
        if self.clock.now() < due_at {
            return false;
        }

        self.pending_sample_reload = None;
        if !self.notes.is_empty() {
            info!(
                "event=sample_reload module=store status=skipped count={}",
                self.notes.len()
            );
            return false;
        }

        self.populate_samples();
        self.notify();
        true
    }

    /// Registers `observer`, called with the snapshot after every change.
    pub fn subscribe<F>(&mut self, observer: F) -> SubscriptionId
    where
        F: FnMut(&[Note]) + 'static,
    {
        let subscription_id = self.next_subscription_id;
        self.next_subscription_id += 1;
        self.observers.push((subscription_id, Box::new(observer)));
        subscription_id
    }

    pub fn unsubscribe(&mut self, subscription_id: SubscriptionId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(id, _)| *id != subscription_id);
        self.observers.len() != before
    }

    fn position(&self, note_id: &str) -> Option<usize> {
        self.notes.iter().position(|note| note.id == note_id)
    }

    fn insert_by_pin(&mut self, note: Note) {
        let index = if note.is_pinned {
            0
        } else {
            self.partition_boundary()
        };
        self.notes.insert(index, note);
    }

    fn schedule_sample_reload(&mut self) {
        let delay = chrono::Duration::from_std(self.config.sample_reload_delay)
            .unwrap_or_else(|_| chrono::Duration::zero());
        let now = self.clock.now();
        let due_at = now.checked_add_signed(delay).unwrap_or(now);
        self.pending_sample_reload = Some(due_at);
        info!(
            "event=sample_reload module=store status=scheduled delay_ms={}",
            self.config.sample_reload_delay.as_millis()
        );
    }

    fn populate_samples(&mut self) {
        self.notes = generate_sample_notes(self.clock.now());
        self.sample_ids = self.notes.iter().map(|note| note.id.clone()).collect();
        info!(
            "event=sample_load module=store status=ok count={}",
            self.notes.len()
        );
    }

    fn load_persisted(&self) -> Vec<Note> {
        let key = self.config.storage_key.as_str();
        let records = match self.storage.load(key) {
            Ok(Some(records)) => records,
            Ok(None) => return Vec::new(),
            Err(err) => {
                warn!("event=notes_load module=store status=fallback key={key} error={err}");
                return Vec::new();
            }
        };

        match records
            .into_iter()
            .map(Note::try_from)
            .collect::<Result<Vec<_>, _>>()
        {
            Ok(notes) => pinned_first(notes),
            Err(err) => {
                warn!("event=notes_load module=store status=fallback key={key} error={err}");
                Vec::new()
            }
        }
    }

    fn commit(&mut self) {
        self.persist();
        self.notify();
    }

    fn persist(&self) {
        let records: Vec<StoredNote> = self
            .notes
            .iter()
            .filter(|note| !self.sample_ids.contains(&note.id))
            .map(StoredNote::from)
            .collect();

        let key = self.config.storage_key.as_str();
        match self.storage.save(key, &records) {
            Ok(()) => debug!(
                "event=notes_persist module=store status=ok key={key} count={}",
                records.len()
            ),
            Err(err) => error!(
                "event=notes_persist module=store status=error key={key} count={} error={err}",
                records.len()
            ),
        }
    }

    fn notify(&mut self) {
        let notes = &self.notes;
        for (_, observer) in self.observers.iter_mut() {
            observer(notes);
        }
    }
}

/// Stable partition: pinned notes first, relative order kept on both sides.
fn pinned_first(notes: Vec<Note>) -> Vec<Note> {
    let (mut pinned, unpinned): (Vec<Note>, Vec<Note>) =
        notes.into_iter().partition(|note| note.is_pinned);
    pinned.extend(unpinned);
    pinned
}
