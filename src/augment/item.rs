//! Capability contracts for items that carry tags and augment slots, plus
//! the concrete equipment instance used by the catalog and sessions.

use serde::{Deserialize, Serialize};

use super::matcher;
use super::types::{normalize_tag, ItemRecord};

/// Anything that carries a tag set.
pub trait Taggable {
    fn tags(&self) -> &[String];

    /// Add `tag` (uppercased) unless already present. Returns true if added.
    fn add_tag(&mut self, tag: &str) -> bool;

    /// Remove `tag` (case-insensitive). Returns true if it was present.
    fn remove_tag(&mut self, tag: &str) -> bool;

    /// Wildcard-aware tag query.
    fn has_tag(&self, pattern: &str) -> bool {
        matcher::matches(pattern, self.tags())
    }
}

/// A taggable item with ordered augment slots.
pub trait Augmentable: Taggable {
    fn host_id(&self) -> &str;

    fn slot_count(&self) -> usize;

    /// Declared type of the slot, or `None` when out of range.
    fn slot_type(&self, slot: usize) -> Option<&str>;

    /// Id of the augment installed in `slot`, `None` when empty or out of range.
    fn slot_occupant(&self, slot: usize) -> Option<&str>;

    /// Overwrite the slot occupancy. Out-of-range indices are ignored.
    fn set_slot_occupant(&mut self, slot: usize, occupant: Option<String>);

    /// Occupants of every slot except `skip`.
    fn other_occupants(&self, skip: usize) -> Vec<&str> {
        (0..self.slot_count())
            .filter(|&i| i != skip)
            .filter_map(|i| self.slot_occupant(i))
            .collect()
    }
}

/// An equipment instance: base tags from its record, plus any tags granted by
/// its installed augments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EquipItem {
    pub id: String,
    pub record_id: String,
    pub name: String,
    tags: Vec<String>,
    augment_slots: Vec<String>,
    augment_slot_items: Vec<Option<String>>,
}

impl EquipItem {
    pub fn new(id: &str, name: &str) -> Self {
        Self {
            id: id.to_string(),
            record_id: id.to_string(),
            name: name.to_string(),
            tags: Vec::new(),
            augment_slots: Vec::new(),
            augment_slot_items: Vec::new(),
        }
    }

    /// Instantiate a host from its catalog record with every slot empty.
    pub fn from_record(id: &str, record: &ItemRecord) -> Self {
        let mut item = Self::new(id, &record.name);
        item.record_id = record.id.clone();
        for tag in &record.tags {
            item.add_tag(tag);
        }
        for slot in &record.augment_slots {
            item = item.with_slot(slot);
        }
        item
    }

    pub fn with_tag(mut self, tag: &str) -> Self {
        self.add_tag(tag);
        self
    }

    pub fn with_slot(mut self, slot_type: &str) -> Self {
        self.augment_slots.push(slot_type.to_string());
        self.augment_slot_items.push(None);
        self
    }

    pub fn augment_slots(&self) -> &[String] {
        &self.augment_slots
    }

    pub fn augment_slot_items(&self) -> &[Option<String>] {
        &self.augment_slot_items
    }
}

impl Taggable for EquipItem {
    fn tags(&self) -> &[String] {
        &self.tags
    }

    fn add_tag(&mut self, tag: &str) -> bool {
        let tag = normalize_tag(tag);
        if tag.is_empty() || self.tags.contains(&tag) {
            return false;
        }
        self.tags.push(tag);
        true
    }

    fn remove_tag(&mut self, tag: &str) -> bool {
        let tag = normalize_tag(tag);
        let before = self.tags.len();
        self.tags.retain(|t| *t != tag);
        self.tags.len() != before
    }
}

impl Augmentable for EquipItem {
    fn host_id(&self) -> &str {
        &self.id
    }

    fn slot_count(&self) -> usize {
        self.augment_slots.len()
    }

    fn slot_type(&self, slot: usize) -> Option<&str> {
        self.augment_slots.get(slot).map(String::as_str)
    }

    fn slot_occupant(&self, slot: usize) -> Option<&str> {
        self.augment_slot_items.get(slot).and_then(|o| o.as_deref())
    }

    fn set_slot_occupant(&mut self, slot: usize, occupant: Option<String>) {
        if let Some(entry) = self.augment_slot_items.get_mut(slot) {
            *entry = occupant;
        }
    }
}
