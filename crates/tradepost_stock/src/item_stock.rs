//! Item-based stock unit

use core::any::Any;

use tradepost_inventory::inventory::{Container, ItemStack};
use tradepost_inventory::item::{ItemBatch, ItemSpec};
use tradepost_inventory::matcher::ExactMatcher;

use crate::codec::{self, DecodeError, EncodeError, StockFields};
use crate::result::{ActorId, FailureReason, StockError, TransactionResult};
use crate::unit::{StockContext, StockUnit};

/// Display surfaces cut names off after this many characters
pub const COMPACT_NAME_LIMIT: usize = 16;

/// Stock unit backed by physical items in a slot container.
///
/// One entry is `entries_per_unit` base units of `spec`. Transfers move
/// base units through the container in batches no larger than the spec's
/// `max_batch`, since that is the most one container primitive accepts.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemStockUnit {
    spec: ItemSpec,
    entries_per_unit: u32,
}

impl ItemStockUnit {
    /// Variant tag in the persisted encoding
    pub const KIND: &'static str = "item";

    /// Create a new item stock unit.
    /// The multiplier is fixed for the unit's lifetime and must be >= 1.
    pub fn new(spec: ItemSpec, entries_per_unit: u32) -> Result<Self, StockError> {
        if entries_per_unit == 0 {
            return Err(StockError::InvalidEntriesPerUnit);
        }
        Ok(Self {
            spec,
            entries_per_unit,
        })
    }

    /// Get the item description (one base unit's worth)
    pub fn spec(&self) -> &ItemSpec {
        &self.spec
    }

    /// Decode from the persisted textual form without requiring the tag
    pub fn decode(text: &str) -> Result<Self, DecodeError> {
        Self::from_fields(&codec::decode_fields(text)?)
    }

    pub(crate) fn from_fields(fields: &StockFields) -> Result<Self, DecodeError> {
        let spec = ItemSpec::decode(&fields.item).map_err(DecodeError::InvalidItem)?;
        let entries_per_unit = codec::parse_count(&fields.entries_per_unit)?;
        Self::new(spec, entries_per_unit)
            .map_err(|_| DecodeError::InvalidCount(fields.entries_per_unit.clone()))
    }

    fn base_units(&self, entries: u32) -> Result<u32, StockError> {
        entries
            .checked_mul(self.entries_per_unit)
            .ok_or(StockError::QuantityOverflow)
    }

    /// Undo a partial insertion. Exact matching: we take back precisely
    /// the kind of item we just put in.
    fn roll_back_insert(&self, container: &mut dyn Container, amount: u32) {
        let mut remains = amount;
        while remains > 0 {
            let batch = remains.min(self.spec.max_batch());
            let removed: u32 = container
                .remove_batch(ItemBatch::new(&self.spec, batch), &ExactMatcher)
                .iter()
                .map(|s| s.quantity)
                .sum();
            if removed == 0 {
                log::warn!(
                    "Container refused rollback of {} base units of {}",
                    remains,
                    self.spec.id()
                );
                break;
            }
            remains -= removed;
        }
    }

    /// Undo a partial removal by putting back exactly the stacks taken.
    /// A fuzzy matcher may have consumed items whose instance data differs
    /// from our own spec; reinserting our spec instead would destroy it.
    fn roll_back_remove(&self, container: &mut dyn Container, taken: Vec<ItemStack>) {
        for stack in taken {
            let mut remains = stack.quantity;
            while remains > 0 {
                let batch = remains.min(stack.spec.max_batch());
                let overflow = container.insert_batch(ItemBatch::new(&stack.spec, batch));
                let moved = batch - overflow;
                if moved == 0 {
                    log::warn!(
                        "Container refused rollback of {} base units of {}",
                        remains,
                        stack.spec.id()
                    );
                    break;
                }
                remains -= moved;
            }
        }
    }
}

impl StockUnit for ItemStockUnit {
    fn kind(&self) -> &'static str {
        Self::KIND
    }

    fn add(
        &self,
        entries: u32,
        container: Option<&mut dyn Container>,
        _actor: Option<&ActorId>,
        _ctx: &StockContext,
    ) -> Result<TransactionResult, StockError> {
        let container = container.ok_or(StockError::MissingContainer)?;
        let total = self.base_units(entries)?;

        let mut remains = total;
        while remains > 0 {
            let batch = remains.min(self.spec.max_batch());
            let overflow = container.insert_batch(ItemBatch::new(&self.spec, batch));
            remains -= batch - overflow;

            if overflow > 0 {
                let inserted = total - remains;
                log::debug!(
                    "Add of {} x {} ran out of space, rolling back {} base units",
                    entries,
                    self.spec.id(),
                    inserted
                );
                if inserted > 0 {
                    self.roll_back_insert(container, inserted);
                }
                return Ok(TransactionResult::Failure(FailureReason::ContainerFull {
                    missing: remains,
                }));
            }
        }

        Ok(TransactionResult::Success)
    }

    fn remove(
        &self,
        entries: u32,
        container: Option<&mut dyn Container>,
        _actor: Option<&ActorId>,
        ctx: &StockContext,
    ) -> Result<TransactionResult, StockError> {
        let container = container.ok_or(StockError::MissingContainer)?;
        let total = self.base_units(entries)?;

        let mut taken: Vec<ItemStack> = Vec::new();
        let mut remains = total;
        while remains > 0 {
            let batch = remains.min(self.spec.max_batch());
            let stacks = container.remove_batch(ItemBatch::new(&self.spec, batch), ctx.matcher());
            let removed: u32 = stacks.iter().map(|s| s.quantity).sum();
            taken.extend(stacks);
            remains -= removed;

            if removed < batch {
                log::debug!(
                    "Remove of {} x {} ran out of stock, rolling back {} base units",
                    entries,
                    self.spec.id(),
                    total - remains
                );
                self.roll_back_remove(container, taken);
                return Ok(TransactionResult::Failure(
                    FailureReason::InsufficientStock { missing: remains },
                ));
            }
        }

        Ok(TransactionResult::Success)
    }

    fn remaining(
        &self,
        container: Option<&dyn Container>,
        _actor: Option<&ActorId>,
        ctx: &StockContext,
    ) -> Result<u32, StockError> {
        let container = container.ok_or(StockError::MissingContainer)?;
        Ok(container.count_matching(&self.spec, ctx.matcher()) / self.entries_per_unit)
    }

    fn free_space(
        &self,
        container: Option<&dyn Container>,
        _actor: Option<&ActorId>,
        _ctx: &StockContext,
    ) -> Result<u32, StockError> {
        let container = container.ok_or(StockError::MissingContainer)?;
        Ok(container.count_free_space(&self.spec) / self.entries_per_unit)
    }

    fn matches_unit(&self, other: &dyn StockUnit, ctx: &StockContext) -> bool {
        match other.as_any().downcast_ref::<ItemStockUnit>() {
            Some(other) => {
                // Cheap reject before consulting the matcher
                other.entries_per_unit == self.entries_per_unit
                    && ctx.matcher().matches(&self.spec, &other.spec)
            }
            None => false,
        }
    }

    fn matches_spec(&self, spec: &ItemSpec, ctx: &StockContext) -> bool {
        ctx.matcher().matches(&self.spec, spec)
    }

    fn entries_per_unit(&self) -> u32 {
        self.entries_per_unit
    }

    fn display_name(&self) -> String {
        self.spec.display_name().to_string()
    }

    fn compact_name(&self) -> String {
        abbreviate(self.spec.display_name())
    }

    fn encode(&self) -> Result<String, EncodeError> {
        Ok(codec::encode_fields(
            Self::KIND,
            self.spec.encode()?,
            self.entries_per_unit,
        ))
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Shorten an over-long dotted name: every segment but the last collapses
/// to its first character. Names within the limit pass through untouched.
fn abbreviate(name: &str) -> String {
    if name.chars().count() <= COMPACT_NAME_LIMIT {
        return name.to_string();
    }

    let segments: Vec<&str> = name.split('.').collect();
    let mut compact = String::new();
    for (i, segment) in segments.iter().enumerate() {
        if i + 1 < segments.len() {
            if let Some(first) = segment.chars().next() {
                compact.push(first);
            }
            compact.push('.');
        } else {
            compact.push_str(segment);
        }
    }
    compact
}
