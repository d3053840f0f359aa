//! Error types for the arena-agents crate.
//!
//! Inventory and equipment helpers return typed errors rather than
//! panicking. The resolver in `arena-core` maps them onto reason codes in
//! the day's events, so none of these ever escape a gameplay call.

use arena_types::{ActionFailure, ItemDefId};

/// Errors that can occur during inventory and equipment operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AgentError {
    /// Adding a new stack would exceed the slot capacity.
    #[error("inventory full: {capacity} slots in use")]
    InventoryFull {
        /// Maximum number of stacks.
        capacity: u32,
    },

    /// The index does not point at an inventory stack.
    #[error("no inventory item at index {0}")]
    BadIndex(usize),

    /// The item definition is not in the catalog.
    #[error("unknown item definition: {0}")]
    UnknownItem(ItemDefId),

    /// The item has no equipment slot.
    #[error("item {0} cannot be equipped")]
    NotEquippable(ItemDefId),
}

impl AgentError {
    /// The event reason code this error reports as.
    pub const fn reason(&self) -> ActionFailure {
        match self {
            Self::InventoryFull { .. } => ActionFailure::InventoryFull,
            Self::BadIndex(_) | Self::UnknownItem(_) => ActionFailure::BadIndex,
            Self::NotEquippable(_) => ActionFailure::NotEquippable,
        }
    }
}
