//! The stock-unit contract

use core::any::Any;

use tradepost_inventory::inventory::Container;
use tradepost_inventory::item::ItemSpec;
use tradepost_inventory::matcher::{ExactMatcher, ItemMatcher, LooseMatcher};

use crate::codec::{self, DecodeError, EncodeError};
use crate::item_stock::ItemStockUnit;
use crate::result::{ActorId, StockError, TransactionResult};

/// The owning context a stock unit operates under.
///
/// Carries the fungibility policy. Passed explicitly into every operation
/// that compares or counts resources; stock units hold no ambient state.
pub struct StockContext {
    matcher: Box<dyn ItemMatcher>,
}

impl StockContext {
    /// Create a context with a custom matching policy
    pub fn new(matcher: Box<dyn ItemMatcher>) -> Self {
        Self { matcher }
    }

    /// Context with strict matching (id and instance data)
    pub fn exact() -> Self {
        Self::new(Box::new(ExactMatcher))
    }

    /// Context with fuzzy matching (id only)
    pub fn loose() -> Self {
        Self::new(Box::new(LooseMatcher))
    }

    /// Get the active matching policy
    pub fn matcher(&self) -> &dyn ItemMatcher {
        self.matcher.as_ref()
    }
}

impl Default for StockContext {
    fn default() -> Self {
        Self::exact()
    }
}

/// A class of fungible, countable resource tradeable in whole entries.
///
/// One entry converts to `entries_per_unit()` base units. Variants that
/// live in a container take it as `Some(..)`; passing `None` to a variant
/// that needs one is a caller contract violation
/// ([`StockError::MissingContainer`]).
///
/// Instances are single-owner: transfers mutate the caller-supplied
/// container synchronously, so sharing across threads needs external
/// synchronization.
pub trait StockUnit: Any {
    /// Serialization discriminator for this variant
    fn kind(&self) -> &'static str;

    /// Insert `entries` whole entries into the container.
    ///
    /// All-or-nothing: a partial transfer is rolled back and reported as
    /// a [`TransactionResult::Failure`].
    fn add(
        &self,
        entries: u32,
        container: Option<&mut dyn Container>,
        actor: Option<&ActorId>,
        ctx: &StockContext,
    ) -> Result<TransactionResult, StockError>;

    /// Remove `entries` whole entries from the container.
    ///
    /// All-or-nothing, like [`StockUnit::add`].
    fn remove(
        &self,
        entries: u32,
        container: Option<&mut dyn Container>,
        actor: Option<&ActorId>,
        ctx: &StockContext,
    ) -> Result<TransactionResult, StockError>;

    /// How many whole entries the container currently holds
    /// (incomplete entries do not count)
    fn remaining(
        &self,
        container: Option<&dyn Container>,
        actor: Option<&ActorId>,
        ctx: &StockContext,
    ) -> Result<u32, StockError>;

    /// How many more whole entries the container could take
    fn free_space(
        &self,
        container: Option<&dyn Container>,
        actor: Option<&ActorId>,
        ctx: &StockContext,
    ) -> Result<u32, StockError>;

    /// Fungibility test against another stock unit.
    /// Units of different variants never match.
    fn matches_unit(&self, other: &dyn StockUnit, ctx: &StockContext) -> bool;

    /// Fungibility test against a raw item description
    fn matches_spec(&self, spec: &ItemSpec, ctx: &StockContext) -> bool;

    /// Base units per entry
    fn entries_per_unit(&self) -> u32;

    /// Full display name
    fn display_name(&self) -> String;

    /// Abbreviated name for length-constrained display surfaces
    fn compact_name(&self) -> String;

    /// Encode this unit into its persisted textual form
    fn encode(&self) -> Result<String, EncodeError>;

    /// Get as Any reference (for variant downcasting)
    fn as_any(&self) -> &dyn Any;
}

/// Decode a stock unit from its persisted textual form, dispatching on
/// the `type` tag. The set of known kinds is closed.
pub fn decode_stock_unit(text: &str) -> Result<Box<dyn StockUnit>, DecodeError> {
    let fields = codec::decode_fields(text)?;
    let kind = fields
        .kind
        .as_deref()
        .ok_or(DecodeError::MissingKey(codec::KEY_TYPE))?;

    match kind {
        ItemStockUnit::KIND => Ok(Box::new(ItemStockUnit::from_fields(&fields)?)),
        other => Err(DecodeError::UnknownKind(other.to_string())),
    }
}

/// Decode, logging and discarding failures.
///
/// For callers that only care whether a persisted value is usable.
pub fn decode_stock_unit_opt(text: &str) -> Option<Box<dyn StockUnit>> {
    match decode_stock_unit(text) {
        Ok(unit) => Some(unit),
        Err(err) => {
            log::warn!("Discarding undecodable stock unit: {}", err);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tradepost_inventory::item::ItemSpec;

    fn stone_unit() -> ItemStockUnit {
        let spec = ItemSpec::new("minecraft.item.stone")
            .with_name("Stone")
            .with_max_batch(64);
        ItemStockUnit::new(spec, 8).unwrap()
    }

    #[test]
    fn test_decode_dispatches_on_tag() {
        let text = stone_unit().encode().unwrap();
        let unit = decode_stock_unit(&text).unwrap();

        assert_eq!(unit.kind(), ItemStockUnit::KIND);
        assert_eq!(unit.entries_per_unit(), 8);
        assert!(unit.as_any().downcast_ref::<ItemStockUnit>().is_some());
    }

    #[test]
    fn test_decode_unknown_kind() {
        let text = r#"{"type":"essence","item":"{}","entriesPerUnit":"1"}"#;
        assert!(matches!(
            decode_stock_unit(text).err().unwrap(),
            DecodeError::UnknownKind(kind) if kind == "essence"
        ));
    }

    #[test]
    fn test_decode_requires_tag() {
        let item = ItemSpec::new("stone").encode().unwrap();
        let text = codec::encode_fields("item", item, 2);
        // Strip by re-encoding without the tag
        let no_tag = text.replacen(r#""type":"item""#, r#""other":"x""#, 1);

        assert!(matches!(
            decode_stock_unit(&no_tag).err().unwrap(),
            DecodeError::MissingKey("type")
        ));
    }

    #[test]
    fn test_decode_opt_swallows_failures() {
        assert!(decode_stock_unit_opt("{broken").is_none());
        assert!(decode_stock_unit_opt(r#"{"type":"item"}"#).is_none());

        let text = stone_unit().encode().unwrap();
        assert!(decode_stock_unit_opt(&text).is_some());
    }

    /// Minimal unrelated variant standing in for a future stock kind
    struct VoucherUnit;

    impl StockUnit for VoucherUnit {
        fn kind(&self) -> &'static str {
            "voucher"
        }

        fn add(
            &self,
            _entries: u32,
            _container: Option<&mut dyn Container>,
            _actor: Option<&ActorId>,
            _ctx: &StockContext,
        ) -> Result<TransactionResult, StockError> {
            Ok(TransactionResult::Success)
        }

        fn remove(
            &self,
            _entries: u32,
            _container: Option<&mut dyn Container>,
            _actor: Option<&ActorId>,
            _ctx: &StockContext,
        ) -> Result<TransactionResult, StockError> {
            Ok(TransactionResult::Success)
        }

        fn remaining(
            &self,
            _container: Option<&dyn Container>,
            _actor: Option<&ActorId>,
            _ctx: &StockContext,
        ) -> Result<u32, StockError> {
            Ok(0)
        }

        fn free_space(
            &self,
            _container: Option<&dyn Container>,
            _actor: Option<&ActorId>,
            _ctx: &StockContext,
        ) -> Result<u32, StockError> {
            Ok(0)
        }

        fn matches_unit(&self, other: &dyn StockUnit, _ctx: &StockContext) -> bool {
            other.as_any().downcast_ref::<VoucherUnit>().is_some()
        }

        fn matches_spec(&self, _spec: &ItemSpec, _ctx: &StockContext) -> bool {
            false
        }

        fn entries_per_unit(&self) -> u32 {
            1
        }

        fn display_name(&self) -> String {
            "Voucher".to_string()
        }

        fn compact_name(&self) -> String {
            self.display_name()
        }

        fn encode(&self) -> Result<String, EncodeError> {
            Ok(codec::encode_fields(self.kind(), String::new(), 1))
        }

        fn as_any(&self) -> &dyn core::any::Any {
            self
        }
    }

    #[test]
    fn test_cross_variant_units_never_match() {
        let item = stone_unit();
        let voucher = VoucherUnit;
        let ctx = StockContext::exact();

        assert!(!item.matches_unit(&voucher, &ctx));
        assert!(!voucher.matches_unit(&item, &ctx));
    }

    #[test]
    fn test_context_policies() {
        use tradepost_inventory::item::ItemProperty;

        let plain = ItemSpec::new("sword");
        let worn = ItemSpec::new("sword").with_property("wear", ItemProperty::Int(3));

        assert!(!StockContext::exact().matcher().matches(&plain, &worn));
        assert!(StockContext::loose().matcher().matches(&plain, &worn));
    }
}
