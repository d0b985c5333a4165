/// Inventory collaborator used to move augment units between slots and the
/// party's bag.
use log::debug;

use super::types::{InventoryResult, ItemStack};

/// Party-side inventory consumed by the lifecycle controller.
pub trait Inventory {
    /// Add `quantity` units of `item_id`.
    fn gain_item(&mut self, item_id: &str, quantity: u32);

    /// Remove up to `quantity` units of `item_id`.
    fn lose_item(&mut self, item_id: &str, quantity: u32);

    /// Units of `item_id` currently held.
    fn quantity(&self, item_id: &str) -> u32;

    /// Called after a host's augments change so dependent views can refresh.
    fn refresh_holder(&mut self, _host_id: &str) {}
}

// ============================================================================
// Stack Operations
// ============================================================================

/// Add units to a stack list, stacking with an existing entry when present.
pub fn add_to_stacks(stacks: &mut Vec<ItemStack>, item_id: &str, quantity: u32) -> InventoryResult {
    if quantity == 0 {
        return InventoryResult::Failed {
            reason: "Cannot add zero items".to_string(),
        };
    }

    if let Some(stack) = stacks.iter_mut().find(|s| s.item_id == item_id) {
        stack.quantity = stack.quantity.saturating_add(quantity);
        return InventoryResult::Added {
            quantity,
            stacked: true,
        };
    }

    stacks.push(ItemStack::new(item_id, quantity));
    InventoryResult::Added {
        quantity,
        stacked: false,
    }
}

/// Remove units from a stack list, dropping the stack once it is empty.
pub fn remove_from_stacks(
    stacks: &mut Vec<ItemStack>,
    item_id: &str,
    quantity: u32,
) -> InventoryResult {
    if quantity == 0 {
        return InventoryResult::Failed {
            reason: "Cannot remove zero items".to_string(),
        };
    }

    let Some(index) = stacks.iter().position(|s| s.item_id == item_id) else {
        return InventoryResult::Failed {
            reason: "Item not in inventory".to_string(),
        };
    };

    let stack = &mut stacks[index];
    if quantity >= stack.quantity {
        let removed = stack.quantity;
        stacks.remove(index);
        InventoryResult::Removed { quantity: removed }
    } else {
        stack.quantity -= quantity;
        InventoryResult::Removed { quantity }
    }
}

/// Simple stacked bag, suitable for sessions and tests.
#[derive(Debug, Clone, Default)]
pub struct ItemBag {
    stacks: Vec<ItemStack>,
    refreshed: Vec<String>,
}

impl ItemBag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_item(mut self, item_id: &str, quantity: u32) -> Self {
        self.gain_item(item_id, quantity);
        self
    }

    pub fn stacks(&self) -> &[ItemStack] {
        &self.stacks
    }

    /// Host ids refreshed so far, oldest first.
    pub fn refreshed_hosts(&self) -> &[String] {
        &self.refreshed
    }

    /// Format the bag for display
    pub fn format_compact(&self) -> Vec<String> {
        if self.stacks.is_empty() {
            return vec!["Empty".to_string()];
        }
        let mut lines: Vec<String> = self
            .stacks
            .iter()
            .enumerate()
            .map(|(idx, stack)| format!("{}. {}x {}", idx + 1, stack.quantity, stack.item_id))
            .collect();
        lines.push(format!("Total: {} items", self.stacks.len()));
        lines
    }
}

impl Inventory for ItemBag {
    fn gain_item(&mut self, item_id: &str, quantity: u32) {
        let result = add_to_stacks(&mut self.stacks, item_id, quantity);
        debug!("bag gain {} x{}: {:?}", item_id, quantity, result);
    }

    fn lose_item(&mut self, item_id: &str, quantity: u32) {
        let result = remove_from_stacks(&mut self.stacks, item_id, quantity);
        debug!("bag lose {} x{}: {:?}", item_id, quantity, result);
    }

    fn quantity(&self, item_id: &str) -> u32 {
        self.stacks
            .iter()
            .find(|s| s.item_id == item_id)
            .map(|s| s.quantity)
            .unwrap_or(0)
    }

    fn refresh_holder(&mut self, host_id: &str) {
        self.refreshed.push(host_id.to_string());
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_creates_new_stack() {
        let mut stacks = Vec::new();
        let result = add_to_stacks(&mut stacks, "chip", 1);
        assert_eq!(
            result,
            InventoryResult::Added {
                quantity: 1,
                stacked: false
            }
        );
        assert_eq!(stacks.len(), 1);
        assert_eq!(stacks[0].item_id, "chip");
    }

    #[test]
    fn test_add_stacks() {
        let mut stacks = Vec::new();
        add_to_stacks(&mut stacks, "chip", 3);
        let result = add_to_stacks(&mut stacks, "chip", 2);
        assert_eq!(
            result,
            InventoryResult::Added {
                quantity: 2,
                stacked: true
            }
        );
        assert_eq!(stacks.len(), 1);
        assert_eq!(stacks[0].quantity, 5);
    }

    #[test]
    fn test_remove_partial_and_entire_stack() {
        let mut stacks = Vec::new();
        add_to_stacks(&mut stacks, "scope", 10);
        assert_eq!(
            remove_from_stacks(&mut stacks, "scope", 3),
            InventoryResult::Removed { quantity: 3 }
        );
        assert_eq!(stacks[0].quantity, 7);
        assert_eq!(
            remove_from_stacks(&mut stacks, "scope", 10),
            InventoryResult::Removed { quantity: 7 }
        );
        assert!(stacks.is_empty());
    }

    #[test]
    fn test_remove_nonexistent_item() {
        let mut stacks = Vec::new();
        match remove_from_stacks(&mut stacks, "nonexistent", 1) {
            InventoryResult::Failed { reason } => assert_eq!(reason, "Item not in inventory"),
            other => panic!("Expected Failed result, got {:?}", other),
        }
    }

    #[test]
    fn test_zero_quantity_is_rejected() {
        let mut stacks = Vec::new();
        assert!(matches!(
            add_to_stacks(&mut stacks, "chip", 0),
            InventoryResult::Failed { .. }
        ));
        assert!(stacks.is_empty());
    }

    #[test]
    fn test_bag_tracks_quantity_and_refreshes() {
        let mut bag = ItemBag::new().with_item("chip", 2);
        bag.lose_item("chip", 1);
        assert_eq!(bag.quantity("chip"), 1);
        assert_eq!(bag.quantity("other"), 0);
        bag.refresh_holder("rifle");
        assert_eq!(bag.refreshed_hosts(), ["rifle"]);
        assert_eq!(bag.format_compact(), vec!["1. 1x chip", "Total: 1 items"]);
    }
}
