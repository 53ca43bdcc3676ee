//! Tradepost Stock - Tradeable Stock Units
//!
//! This crate provides the stock-unit accounting primitive trade logic
//! builds on: discrete, countable resources that move in and out of a
//! bounded container in whole entries.
//!
//! # Features
//!
//! - Variant-polymorphic stock-unit contract
//! - Item-based variant with entry-to-base-unit arithmetic
//! - Capacity-aware, all-or-nothing transfers
//! - Floor-division remaining and free-space queries
//! - Policy-driven fungibility matching
//! - Lossless textual persistence with typed decode errors
//!
//! # Example
//!
//! ```ignore
//! use tradepost_inventory::prelude::*;
//! use tradepost_stock::prelude::*;
//!
//! let stone = ItemSpec::new("minecraft.item.stone")
//!     .with_name("Stone")
//!     .with_max_batch(64);
//!
//! // One trade entry is eight stones
//! let unit = ItemStockUnit::new(stone, 8)?;
//! let ctx = StockContext::exact();
//!
//! let mut chest = Inventory::new(27);
//! unit.add(4, Some(&mut chest), None, &ctx)?;
//! assert_eq!(unit.remaining(Some(&chest), None, &ctx)?, 4);
//! ```

pub mod codec;
pub mod item_stock;
pub mod result;
pub mod unit;

pub mod prelude {
    pub use crate::codec::{DecodeError, EncodeError};
    pub use crate::item_stock::{ItemStockUnit, COMPACT_NAME_LIMIT};
    pub use crate::result::{ActorId, FailureReason, StockError, TransactionResult};
    pub use crate::unit::{decode_stock_unit, decode_stock_unit_opt, StockContext, StockUnit};
}

pub use prelude::*;
