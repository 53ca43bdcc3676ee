//! Container boundary and slot inventory

use crate::item::{ItemBatch, ItemSpec};
use crate::matcher::ItemMatcher;
use serde::{Deserialize, Serialize};

/// Bounded storage that holds base units of items.
///
/// This is the boundary stock units talk to. Batch quantities are bounded
/// by the spec's `max_batch`; the primitives report how much actually
/// moved so callers can detect and react to partial transfers.
pub trait Container {
    /// Insert a batch. Returns the overflow (base units that did not fit).
    fn insert_batch(&mut self, batch: ItemBatch<'_>) -> u32;

    /// Remove up to `batch.quantity` base units matching the batch spec.
    /// Returns the stacks actually removed, carrying their real specs —
    /// under a fuzzy policy these may differ from the batch spec, and a
    /// caller undoing a partial transfer must put back exactly these.
    fn remove_batch(&mut self, batch: ItemBatch<'_>, matcher: &dyn ItemMatcher) -> Vec<ItemStack>;

    /// Count base units matching the spec under the given policy.
    fn count_matching(&self, spec: &ItemSpec, matcher: &dyn ItemMatcher) -> u32;

    /// Count how many more base units of the spec would fit.
    fn count_free_space(&self, spec: &ItemSpec) -> u32;
}

/// A stack of identical items occupying one inventory slot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemStack {
    /// What is stacked here
    pub spec: ItemSpec,
    /// How many base units
    pub quantity: u32,
}

impl ItemStack {
    /// Create a new stack
    pub fn new(spec: ItemSpec, quantity: u32) -> Self {
        Self { spec, quantity }
    }

    /// Add to this stack, bounded by `max` (returns overflow)
    pub fn add(&mut self, amount: u32, max: u32) -> u32 {
        let space = max.saturating_sub(self.quantity);
        let to_add = amount.min(space);
        self.quantity += to_add;
        amount - to_add
    }

    /// Remove from this stack (returns amount actually removed)
    pub fn remove(&mut self, amount: u32) -> u32 {
        let to_remove = amount.min(self.quantity);
        self.quantity -= to_remove;
        to_remove
    }

    /// Check if this stack is empty
    pub fn is_empty(&self) -> bool {
        self.quantity == 0
    }

    /// Whether a batch of `spec` can merge into this stack
    pub fn can_merge(&self, spec: &ItemSpec) -> bool {
        self.spec.same_resource(spec)
    }
}

/// Slot-based inventory
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Inventory {
    /// Inventory slots (None = empty)
    slots: Vec<Option<ItemStack>>,
    /// Number of slots
    capacity: usize,
}

impl Inventory {
    /// Create a new inventory with given capacity
    pub fn new(capacity: usize) -> Self {
        Self {
            slots: vec![None; capacity],
            capacity,
        }
    }

    /// Get inventory capacity
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Get number of used slots
    pub fn used_slots(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    /// Get number of free slots
    pub fn free_slots(&self) -> usize {
        self.capacity - self.used_slots()
    }

    /// Check if inventory is full
    pub fn is_full(&self) -> bool {
        self.free_slots() == 0
    }

    /// Check if inventory is empty
    pub fn is_empty(&self) -> bool {
        self.used_slots() == 0
    }

    /// Get slot contents
    pub fn slot(&self, slot: usize) -> Option<&ItemStack> {
        self.slots.get(slot)?.as_ref()
    }

    /// Total base units across all slots
    pub fn total_quantity(&self) -> u32 {
        self.slots
            .iter()
            .filter_map(|s| s.as_ref())
            .map(|s| s.quantity)
            .sum()
    }

    fn find_empty_slot(&self) -> Option<usize> {
        self.slots.iter().position(|s| s.is_none())
    }
}

impl Container for Inventory {
    fn insert_batch(&mut self, batch: ItemBatch<'_>) -> u32 {
        let max = batch.spec.max_batch();
        let mut remaining = batch.quantity;

        // Top up existing stacks first
        for slot in &mut self.slots {
            if remaining == 0 {
                return 0;
            }
            if let Some(stack) = slot {
                if stack.can_merge(batch.spec) {
                    remaining = stack.add(remaining, max);
                }
            }
        }

        // Then fill empty slots
        while remaining > 0 {
            match self.find_empty_slot() {
                Some(empty) => {
                    let amount = remaining.min(max);
                    self.slots[empty] = Some(ItemStack::new(batch.spec.clone(), amount));
                    remaining -= amount;
                }
                None => break,
            }
        }

        remaining
    }

    fn remove_batch(&mut self, batch: ItemBatch<'_>, matcher: &dyn ItemMatcher) -> Vec<ItemStack> {
        let mut removed = Vec::new();
        let mut remaining = batch.quantity;

        for slot in &mut self.slots {
            if remaining == 0 {
                break;
            }
            if let Some(stack) = slot {
                if matcher.matches(batch.spec, &stack.spec) {
                    let taken = stack.remove(remaining);
                    if taken > 0 {
                        removed.push(ItemStack::new(stack.spec.clone(), taken));
                        remaining -= taken;
                    }
                    if stack.is_empty() {
                        *slot = None;
                    }
                }
            }
        }

        removed
    }

    fn count_matching(&self, spec: &ItemSpec, matcher: &dyn ItemMatcher) -> u32 {
        self.slots
            .iter()
            .filter_map(|s| s.as_ref())
            .filter(|s| matcher.matches(spec, &s.spec))
            .map(|s| s.quantity)
            .sum()
    }

    fn count_free_space(&self, spec: &ItemSpec) -> u32 {
        let max = spec.max_batch();
        let mut space = 0u32;

        for slot in &self.slots {
            match slot {
                None => space += max,
                Some(stack) if stack.can_merge(spec) => {
                    space += max.saturating_sub(stack.quantity);
                }
                Some(_) => {}
            }
        }

        space
    }
}

impl Default for Inventory {
    fn default() -> Self {
        Self::new(27)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matcher::{ExactMatcher, LooseMatcher};

    fn gold() -> ItemSpec {
        ItemSpec::new("gold").with_max_batch(64)
    }

    #[test]
    fn test_inventory_creation() {
        let inv = Inventory::new(10);

        assert_eq!(inv.capacity(), 10);
        assert_eq!(inv.used_slots(), 0);
        assert!(inv.is_empty());
    }

    #[test]
    fn test_insert_merges_then_fills() {
        let mut inv = Inventory::new(5);
        let gold = gold();

        assert_eq!(inv.insert_batch(ItemBatch::new(&gold, 50)), 0);
        assert_eq!(inv.insert_batch(ItemBatch::new(&gold, 30)), 0);

        // 50 + 30 = one full stack of 64 plus 16
        assert_eq!(inv.used_slots(), 2);
        assert_eq!(inv.slot(0).unwrap().quantity, 64);
        assert_eq!(inv.slot(1).unwrap().quantity, 16);
    }

    #[test]
    fn test_insert_overflow() {
        let mut inv = Inventory::new(2);
        let gold = gold();

        let overflow = inv.insert_batch(ItemBatch::new(&gold, 150));

        assert_eq!(overflow, 22); // 150 - 64 * 2
        assert_eq!(inv.total_quantity(), 128);
        assert!(inv.is_full());
    }

    #[test]
    fn test_remove_batch() {
        let mut inv = Inventory::new(5);
        let gold = gold();

        inv.insert_batch(ItemBatch::new(&gold, 100));
        let removed = inv.remove_batch(ItemBatch::new(&gold, 30), &ExactMatcher);

        assert_eq!(removed.iter().map(|s| s.quantity).sum::<u32>(), 30);
        assert_eq!(inv.count_matching(&gold, &ExactMatcher), 70);
    }

    #[test]
    fn test_remove_batch_reports_actual_specs() {
        use crate::item::ItemProperty;

        let mut inv = Inventory::new(5);
        let plain = ItemSpec::new("sword");
        let worn = ItemSpec::new("sword").with_property("durability", ItemProperty::Int(40));

        inv.insert_batch(ItemBatch::new(&worn, 1));
        let removed = inv.remove_batch(ItemBatch::new(&plain, 1), &LooseMatcher);

        // A fuzzy policy may take the worn sword; the result says so
        assert_eq!(removed.len(), 1);
        assert_eq!(removed[0].quantity, 1);
        assert!(removed[0].spec.same_resource(&worn));
    }

    #[test]
    fn test_remove_frees_emptied_slots() {
        let mut inv = Inventory::new(2);
        let gold = gold();

        inv.insert_batch(ItemBatch::new(&gold, 64));
        inv.remove_batch(ItemBatch::new(&gold, 64), &ExactMatcher);

        assert!(inv.is_empty());
    }

    #[test]
    fn test_count_respects_matcher_policy() {
        use crate::item::ItemProperty;

        let mut inv = Inventory::new(5);
        let plain = ItemSpec::new("sword");
        let worn = ItemSpec::new("sword").with_property("durability", ItemProperty::Int(40));

        inv.insert_batch(ItemBatch::new(&plain, 1));
        inv.insert_batch(ItemBatch::new(&worn, 1));

        assert_eq!(inv.count_matching(&plain, &ExactMatcher), 1);
        assert_eq!(inv.count_matching(&plain, &LooseMatcher), 2);
    }

    #[test]
    fn test_free_space_counts_partial_stacks() {
        let mut inv = Inventory::new(3);
        let gold = gold();

        inv.insert_batch(ItemBatch::new(&gold, 40));
        inv.insert_batch(ItemBatch::new(&ItemSpec::new("dirt").with_max_batch(64), 10));

        // One partial gold stack (24 left) plus one empty slot (64)
        assert_eq!(inv.count_free_space(&gold), 88);
    }
}
