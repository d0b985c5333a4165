//! Static item catalog loaded once at startup.
//!
//! The catalog is the explicit repository handed to the lifecycle controller:
//! item records by id, and the augment profile parsed from each record's
//! description. Profiles stay mutable so rules can be adjusted at runtime.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use log::info;

use super::errors::AugmentError;
use super::item::EquipItem;
use super::notetags::parse_augment_notes;
use super::types::{AugmentProfile, ItemRecord};

#[derive(Debug, Clone, Default)]
pub struct ItemCatalog {
    order: Vec<String>,
    records: HashMap<String, ItemRecord>,
    profiles: HashMap<String, AugmentProfile>,
}

impl ItemCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a catalog, parsing augment notes from every description.
    pub fn from_records(records: Vec<ItemRecord>) -> Result<Self, AugmentError> {
        let mut catalog = Self::new();
        for record in records {
            catalog.insert(record)?;
        }
        Ok(catalog)
    }

    /// Load the catalog from a JSON array of item records.
    pub fn load_from_json<P: AsRef<Path>>(path: P) -> Result<Self, AugmentError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)?;
        let records: Vec<ItemRecord> = serde_json::from_str(&contents)?;
        let catalog = Self::from_records(records)?;
        info!(
            "loaded {} catalog records ({} with augment notes) from {}",
            catalog.len(),
            catalog.annotated().count(),
            path.display()
        );
        Ok(catalog)
    }

    pub fn insert(&mut self, record: ItemRecord) -> Result<(), AugmentError> {
        if self.records.contains_key(&record.id) {
            return Err(AugmentError::DuplicateId(record.id));
        }
        let profile = parse_augment_notes(&record.description);
        self.order.push(record.id.clone());
        self.profiles.insert(record.id.clone(), profile);
        self.records.insert(record.id.clone(), record);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn record(&self, id: &str) -> Option<&ItemRecord> {
        self.records.get(id)
    }

    /// Records in load order.
    pub fn records(&self) -> impl Iterator<Item = &ItemRecord> {
        self.order.iter().filter_map(|id| self.records.get(id))
    }

    /// Augment profile for `id`. Items without notes have an empty profile.
    pub fn profile(&self, id: &str) -> Result<&AugmentProfile, AugmentError> {
        self.profiles
            .get(id)
            .ok_or_else(|| AugmentError::UnknownAugment(id.to_string()))
    }

    pub fn profile_mut(&mut self, id: &str) -> Result<&mut AugmentProfile, AugmentError> {
        self.profiles
            .get_mut(id)
            .ok_or_else(|| AugmentError::UnknownAugment(id.to_string()))
    }

    /// Records that declared at least one augment notetag, in load order.
    pub fn annotated(&self) -> impl Iterator<Item = (&ItemRecord, &AugmentProfile)> {
        self.records().filter_map(|record| {
            self.profiles
                .get(&record.id)
                .filter(|profile| !profile.is_empty())
                .map(|profile| (record, profile))
        })
    }

    /// Create a host instance of catalog record `record_id`.
    pub fn instantiate(
        &self,
        instance_id: &str,
        record_id: &str,
    ) -> Result<EquipItem, AugmentError> {
        let record = self
            .record(record_id)
            .ok_or_else(|| AugmentError::UnknownItem(record_id.to_string()))?;
        Ok(EquipItem::from_record(instance_id, record))
    }
}
