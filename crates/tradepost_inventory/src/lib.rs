//! Tradepost Inventory - Items and Containers
//!
//! This crate provides the item and container layer of Tradepost.
//!
//! # Features
//!
//! - Item descriptions with instance properties
//! - Per-call transfer batches bounded by max batch size
//! - Slot-based inventory with stacking and overflow reporting
//! - Pluggable fungibility matching (exact or loose)
//! - Textual item sub-encoding for persistence
//!
//! # Example
//!
//! ```ignore
//! use tradepost_inventory::prelude::*;
//!
//! let gold = ItemSpec::new("gold").with_name("Gold Coin").with_max_batch(64);
//!
//! let mut inventory = Inventory::new(27);
//! let overflow = inventory.insert_batch(ItemBatch::new(&gold, 100));
//! assert_eq!(overflow, 0);
//! ```

pub mod inventory;
pub mod item;
pub mod matcher;

pub mod prelude {
    pub use crate::inventory::{Container, Inventory, ItemStack};
    pub use crate::item::{ItemBatch, ItemProperty, ItemSpec};
    pub use crate::matcher::{ExactMatcher, ItemMatcher, LooseMatcher};
}

pub use prelude::*;
