//! Shopping cart persisted to a key-value slot.
//!
//! - [`CartState`] - immutable, ordered list of [`LineItem`]s unique by id
//! - [`CartStore`] - owns the current state and writes it through to storage
//! - [`SlotStorage`] - the storage seam, with [`MemoryStorage`] for tests

mod line_item;
mod state;
mod storage;
mod store;

pub use line_item::LineItem;
pub use state::{CartState, DuplicateLineItem};
pub use storage::{MemoryStorage, SlotStorage, StorageError};
pub use store::{CART_SLOT_KEY, CartStore};
