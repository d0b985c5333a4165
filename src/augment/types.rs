use serde::{Deserialize, Serialize};

use super::matcher;

/// Requirement and grant data attached to an augment item.
///
/// Built once from the item description and mutable afterwards. All tags are
/// stored uppercase without duplicates.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AugmentProfile {
    #[serde(default)]
    requirements: Vec<String>,
    #[serde(default)]
    granted_tags: Vec<String>,
    #[serde(default)]
    rejection_string: String,
}

impl AugmentProfile {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_requirement(mut self, tag: &str) -> Self {
        self.add_requirement(tag);
        self
    }

    pub fn with_granted_tag(mut self, tag: &str) -> Self {
        self.add_granted_tag(tag);
        self
    }

    pub fn with_rejection_string(mut self, text: &str) -> Self {
        self.set_rejection_string(text);
        self
    }

    pub fn requirements(&self) -> &[String] {
        &self.requirements
    }

    pub fn granted_tags(&self) -> &[String] {
        &self.granted_tags
    }

    pub fn rejection_string(&self) -> &str {
        &self.rejection_string
    }

    /// Returns false when the tag was already required.
    pub fn add_requirement(&mut self, tag: &str) -> bool {
        push_unique(&mut self.requirements, tag)
    }

    pub fn remove_requirement(&mut self, tag: &str) -> bool {
        remove_tag_from(&mut self.requirements, tag)
    }

    /// Returns false when the tag was already granted. Hosts already holding
    /// this augment need `AugmentController::reconcile_grants` afterwards.
    pub fn add_granted_tag(&mut self, tag: &str) -> bool {
        push_unique(&mut self.granted_tags, tag)
    }

    pub fn remove_granted_tag(&mut self, tag: &str) -> bool {
        remove_tag_from(&mut self.granted_tags, tag)
    }

    pub fn set_rejection_string(&mut self, text: impl Into<String>) {
        self.rejection_string = text.into();
    }

    /// True if this augment grants a tag matching `pattern`.
    pub fn grants(&self, pattern: &str) -> bool {
        matcher::matches(pattern, &self.granted_tags)
    }

    /// True if no requirement, grant or rejection text was declared.
    pub fn is_empty(&self) -> bool {
        self.requirements.is_empty()
            && self.granted_tags.is_empty()
            && self.rejection_string.is_empty()
    }
}

pub(crate) fn normalize_tag(tag: &str) -> String {
    tag.trim().to_uppercase()
}

fn push_unique(list: &mut Vec<String>, tag: &str) -> bool {
    let tag = normalize_tag(tag);
    if tag.is_empty() || list.contains(&tag) {
        return false;
    }
    list.push(tag);
    true
}

fn remove_tag_from(list: &mut Vec<String>, tag: &str) -> bool {
    let tag = normalize_tag(tag);
    let before = list.len();
    list.retain(|t| *t != tag);
    list.len() != before
}

/// How requirement entries are compared against host tags.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequirementMatching {
    /// Requirements may use `*` patterns, like every other tag lookup.
    #[default]
    Wildcard,
    /// Requirements must equal a host tag (ignoring case).
    Exact,
}

/// Catalog item categories.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    #[default]
    Item,
    Weapon,
    Armor,
}

/// One static item database record, as loaded from the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemRecord {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub kind: ItemKind,
    /// Free text; augment notetags are parsed out of it.
    #[serde(default)]
    pub description: String,
    /// Base tags provided by the tag collaborator.
    #[serde(default)]
    pub tags: Vec<String>,
    /// Declared slot types provided by the slot collaborator.
    #[serde(default)]
    pub augment_slots: Vec<String>,
}

impl ItemRecord {
    pub fn new(id: &str, name: &str, kind: ItemKind) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            kind,
            description: String::new(),
            tags: Vec::new(),
            augment_slots: Vec::new(),
        }
    }

    pub fn with_description(mut self, description: &str) -> Self {
        self.description = description.to_string();
        self
    }

    pub fn with_tag(mut self, tag: &str) -> Self {
        self.tags.push(tag.to_string());
        self
    }

    pub fn with_slot(mut self, slot_type: &str) -> Self {
        self.augment_slots.push(slot_type.to_string());
        self
    }
}

/// Result of an install attempt that did not hit an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InstallOutcome {
    Installed {
        augment_id: String,
        slot: usize,
        /// Prior occupant returned to the inventory.
        displaced: Option<String>,
        /// Namespaced tags newly added to the host.
        granted: Vec<String>,
        /// Namespaced tags revoked when the prior occupant left.
        revoked: Vec<String>,
    },
    Rejected {
        augment_id: String,
        slot: usize,
        /// Requirement entries no host tag satisfied.
        unmet: Vec<String>,
        /// Rejection string shown to the player; may be empty.
        message: String,
    },
}

impl InstallOutcome {
    pub fn is_installed(&self) -> bool {
        matches!(self, InstallOutcome::Installed { .. })
    }
}

/// Result of a removal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoveOutcome {
    /// The slot was already empty.
    NothingRemoved,
    Removed {
        augment_id: String,
        slot: usize,
        /// Namespaced tags taken off the host.
        revoked: Vec<String>,
        /// Units returned to the inventory.
        returned: u32,
    },
}

/// Represents a stack of identical items in the inventory
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ItemStack {
    pub item_id: String,
    pub quantity: u32,
}

impl ItemStack {
    pub fn new(item_id: &str, quantity: u32) -> Self {
        Self {
            item_id: item_id.to_string(),
            quantity,
        }
    }
}

/// Result of inventory operations
#[derive(Debug, Clone, PartialEq)]
pub enum InventoryResult {
    /// Item added successfully
    Added { quantity: u32, stacked: bool },
    /// Item removed successfully
    Removed { quantity: u32 },
    /// Operation failed
    Failed { reason: String },
}
