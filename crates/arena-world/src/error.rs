//! Error types for the `arena-world` crate.
//!
//! Only map construction and validation are fallible. Gameplay queries
//! answer with `Option` or a [`MoveBlockReason`] instead.
//!
//! [`MoveBlockReason`]: arena_types::MoveBlockReason

use arena_types::AreaId;

/// Errors that can occur while building or validating a map.
#[derive(Debug, thiserror::Error)]
pub enum WorldError {
    /// An area referenced by the adjacency list does not exist.
    #[error("area not found: {0}")]
    AreaNotFound(AreaId),

    /// An area was inserted twice.
    #[error("duplicate area id: {0}")]
    DuplicateArea(AreaId),

    /// An edge is present in one direction only.
    #[error("edge {from} -> {to} has no reverse edge")]
    AsymmetricEdge {
        /// Edge origin.
        from: AreaId,
        /// Edge target.
        to: AreaId,
    },

    /// The map has no hub area.
    #[error("map has no hub area (id 1)")]
    MissingHub,

    /// The requested map is too small to hold a hub and one wild area.
    #[error("map size {0} is too small")]
    MapTooSmall(u32),
}
