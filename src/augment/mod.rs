//! Augment rules: tag requirements that gate installation, tags granted to
//! the host while an augment is installed, and the rejection message shown
//! when an install is declined.
//!
//! The engine-side collaborators (host items, the party inventory, the
//! message window) are reached only through the traits re-exported here, so
//! any item representation can plug in.

pub mod catalog;
pub mod errors;
pub mod inventory;
pub mod item;
pub mod lifecycle;
pub mod matcher;
pub mod notetags;
pub mod rejection;
pub mod types;

pub use catalog::ItemCatalog;
pub use errors::AugmentError;
pub use inventory::{add_to_stacks, remove_from_stacks, Inventory, ItemBag};
pub use item::{Augmentable, EquipItem, Taggable};
pub use lifecycle::AugmentController;
pub use matcher::{matches, matches_with_index, TagPattern};
pub use notetags::{parse_augment_notes, scan_notetags, Notetag};
pub use rejection::{RejectionDisplay, RejectionWindow};
pub use types::*;
