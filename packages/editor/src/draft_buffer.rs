//! # Collection Draft Buffer
//!
//! Shadow overlay for editing an ordered collection without touching the
//! canonical list until an explicit save.
//!
//! ## Layout
//!
//! ```text
//! entries:  [(k0, item), (k1, item), (k2, item)]   snapshot, in order
//! overlay:  k1 → { title → "Draft title" }          pending field values
//! ```
//!
//! Every entry carries an [`ItemKey`] minted from a per-buffer counter, so
//! overlay entries stay attached to their item while siblings are added or
//! removed. Keys are never reused.
//!
//! Structural edits (`add_item`, `remove_item`) apply to the snapshot
//! immediately; field edits only land in the overlay. `discard` clears the
//! overlay and leaves structural edits in place.

use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fmt;
use weddingsite_document::CollectionItem;

/// Session-local identity of an item inside a buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ItemKey(u64);

impl fmt::Display for ItemKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone)]
pub struct CollectionDraftBuffer<T: CollectionItem> {
    entries: Vec<(ItemKey, T)>,
    overlay: BTreeMap<ItemKey, BTreeMap<T::Field, String>>,
    next_key: u64,
    structurally_changed: bool,
}

impl<T: CollectionItem> Default for CollectionDraftBuffer<T> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            overlay: BTreeMap::new(),
            next_key: 0,
            structurally_changed: false,
        }
    }
}

impl<T: CollectionItem> CollectionDraftBuffer<T> {
    /// Buffer over a snapshot of the canonical collection
    pub fn from_snapshot(items: &[T]) -> Self {
        let mut buffer = Self::default();
        for item in items {
            let key = buffer.mint_key();
            buffer.entries.push((key, item.clone()));
        }
        buffer
    }

    fn mint_key(&mut self) -> ItemKey {
        let key = ItemKey(self.next_key);
        self.next_key += 1;
        key
    }

    /// Append an item to the snapshot
    pub fn add_item(&mut self, defaults: T) -> ItemKey {
        let key = self.mint_key();
        self.entries.push((key, defaults));
        self.structurally_changed = true;
        key
    }

    /// Remove an item and every pending draft for it
    pub fn remove_item(&mut self, key: ItemKey) -> bool {
        let Some(index) = self.position(key) else {
            return false;
        };
        self.entries.remove(index);
        self.overlay.remove(&key);
        self.structurally_changed = true;
        true
    }

    /// Record a pending value for one field of one item
    pub fn set_field_draft(&mut self, key: ItemKey, field: T::Field, value: impl Into<String>) -> bool {
        if self.position(key).is_none() {
            return false;
        }
        self.overlay
            .entry(key)
            .or_default()
            .insert(field, value.into());
        true
    }

    /// Value to display: pending draft, then canonical value, then empty
    pub fn field_value(&self, key: ItemKey, field: T::Field) -> Cow<'_, str> {
        if let Some(draft) = self.overlay.get(&key).and_then(|fields| fields.get(&field)) {
            return Cow::Borrowed(draft.as_str());
        }
        self.get(key)
            .map(|item| item.field(field))
            .unwrap_or(Cow::Borrowed(""))
    }

    /// Write every pending draft into the snapshot, clear the overlay and
    /// return the resulting collection
    pub fn flatten_and_commit(&mut self) -> Vec<T> {
        let overlay = std::mem::take(&mut self.overlay);
        for (key, fields) in overlay {
            if let Some((_, item)) = self.entries.iter_mut().find(|(k, _)| *k == key) {
                for (field, value) in fields {
                    item.set_field(field, value);
                }
            }
        }
        self.structurally_changed = false;
        self.snapshot()
    }

    /// Drop pending field drafts. Adds and removes already applied stay.
    pub fn discard(&mut self) {
        self.overlay.clear();
    }

    pub fn keys(&self) -> Vec<ItemKey> {
        self.entries.iter().map(|(key, _)| *key).collect()
    }

    pub fn key_at(&self, index: usize) -> Option<ItemKey> {
        self.entries.get(index).map(|(key, _)| *key)
    }

    pub fn position(&self, key: ItemKey) -> Option<usize> {
        self.entries.iter().position(|(k, _)| *k == key)
    }

    /// Canonical (un-drafted) item
    pub fn get(&self, key: ItemKey) -> Option<&T> {
        self.entries.iter().find(|(k, _)| *k == key).map(|(_, item)| item)
    }

    /// Canonical view of the snapshot, in order
    pub fn items(&self) -> impl Iterator<Item = &T> + '_ {
        self.entries.iter().map(|(_, item)| item)
    }

    pub fn snapshot(&self) -> Vec<T> {
        self.items().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn is_dirty(&self) -> bool {
        self.structurally_changed || !self.overlay.is_empty()
    }

    /// Number of pending field drafts
    pub fn pending_count(&self) -> usize {
        self.overlay.values().map(BTreeMap::len).sum()
    }

    /// Items that would be saved with a blank required field, with drafts
    /// taken into account
    pub fn incomplete_items(&self) -> Vec<(ItemKey, Vec<T::Field>)> {
        self.entries
            .iter()
            .filter_map(|(key, item)| {
                let mut merged = item.clone();
                if let Some(fields) = self.overlay.get(key) {
                    for (field, value) in fields {
                        merged.set_field(*field, value.clone());
                    }
                }
                let missing = merged.missing_required();
                (!missing.is_empty()).then_some((*key, missing))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use weddingsite_document::{FaqField, FaqItem, Milestone, MilestoneField};

    fn milestone(year: &str, title: &str) -> Milestone {
        Milestone {
            year: year.to_string(),
            title: title.to_string(),
            ..Milestone::default()
        }
    }

    fn timeline() -> CollectionDraftBuffer<Milestone> {
        CollectionDraftBuffer::from_snapshot(&[
            milestone("2017", "First Met"),
            milestone("2019", "First Trip"),
        ])
    }

    #[test]
    fn test_fresh_buffer_is_clean() {
        let buffer = timeline();
        assert_eq!(buffer.len(), 2);
        assert!(!buffer.is_dirty());
        assert_eq!(buffer.pending_count(), 0);
    }

    #[test]
    fn test_field_draft_is_isolated_from_siblings() {
        let mut buffer = timeline();
        let (a, b) = (buffer.keys()[0], buffer.keys()[1]);

        assert!(buffer.set_field_draft(a, MilestoneField::Title, "We Met"));

        assert_eq!(buffer.field_value(a, MilestoneField::Title), "We Met");
        assert_eq!(buffer.field_value(b, MilestoneField::Title), "First Trip");
        assert_eq!(buffer.len(), 2);
        assert_eq!(buffer.get(a).unwrap().title, "First Met");
        assert_eq!(buffer.keys(), vec![a, b]);
        assert!(buffer.is_dirty());
    }

    #[test]
    fn test_flatten_writes_drafts_and_clears_overlay() {
        let mut buffer = timeline();
        let a = buffer.keys()[0];
        buffer.set_field_draft(a, MilestoneField::Title, "We Met");

        let items = buffer.flatten_and_commit();
        assert_eq!(items[0].title, "We Met");
        assert_eq!(items[1].title, "First Trip");
        assert!(!buffer.is_dirty());

        let again = buffer.flatten_and_commit();
        assert_eq!(again, items);
    }

    #[test]
    fn test_remove_purges_overlay_for_that_item() {
        let mut buffer = timeline();
        let b = buffer.keys()[1];
        buffer.set_field_draft(b, MilestoneField::Title, "Draft for B");

        assert!(buffer.remove_item(b));
        let c = buffer.add_item(milestone("2021", "Engaged"));

        assert_eq!(buffer.position(c), Some(1));
        assert_ne!(c, b);
        assert_eq!(buffer.field_value(c, MilestoneField::Title), "Engaged");
        assert_eq!(buffer.pending_count(), 0);
    }

    #[test]
    fn test_removal_keeps_drafts_of_later_items() {
        let mut buffer = timeline();
        let c = buffer.add_item(milestone("2021", "Engaged"));
        buffer.set_field_draft(c, MilestoneField::Title, "Proposal");

        buffer.remove_item(buffer.keys()[0]);

        assert_eq!(buffer.position(c), Some(1));
        assert_eq!(buffer.field_value(c, MilestoneField::Title), "Proposal");
    }

    #[test]
    fn test_unknown_keys_are_noops() {
        let mut buffer = timeline();
        let gone = buffer.keys()[0];
        buffer.remove_item(gone);
        buffer.flatten_and_commit();

        assert!(!buffer.remove_item(gone));
        assert!(!buffer.set_field_draft(gone, MilestoneField::Title, "x"));
        assert_eq!(buffer.field_value(gone, MilestoneField::Title), "");
        assert!(!buffer.is_dirty());
    }

    #[test]
    fn test_discard_keeps_structural_changes() {
        let mut buffer = timeline();
        let added = buffer.add_item(milestone("2023", "New Home"));
        buffer.remove_item(buffer.keys()[0]);
        buffer.set_field_draft(added, MilestoneField::Title, "Moved In");

        buffer.discard();

        assert_eq!(buffer.len(), 2);
        assert_eq!(buffer.field_value(added, MilestoneField::Title), "New Home");
        assert!(buffer.is_dirty());
        assert_eq!(buffer.flatten_and_commit()[0].title, "First Trip");
    }

    #[test]
    fn test_incomplete_items_see_drafts() {
        let mut buffer = CollectionDraftBuffer::from_snapshot(&[FaqItem::starter("f-1")]);
        let key = buffer.keys()[0];
        assert!(buffer.incomplete_items().is_empty());

        buffer.set_field_draft(key, FaqField::Question, "  ");
        assert_eq!(buffer.incomplete_items(), vec![(key, vec![FaqField::Question])]);
    }
}
