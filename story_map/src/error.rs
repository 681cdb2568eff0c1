//! Error types for map operations.

use story_cards::{CardId, FunctionNumber};
use thiserror::Error;

/// Problems with persisted or restored arrangement state.
#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("malformed snapshot data: {0}")]
    Json(#[from] serde_json::Error),

    #[error("snapshot has {found} slots, map has {expected}")]
    LengthMismatch { expected: usize, found: usize },

    #[error("{function} appears in more than one slot")]
    DuplicateFunction { function: FunctionNumber },

    #[error("card built for slot {index} is {found}, snapshot records {expected}")]
    FactoryMismatch {
        index: usize,
        expected: FunctionNumber,
        found: FunctionNumber,
    },

    #[error("card {card} was built for more than one slot")]
    DuplicateCard { card: CardId },
}

/// Errors from map operations.
///
/// A rejected drop is not an error; see `DropOutcome`.
#[derive(Debug, Error)]
pub enum MapError {
    #[error("slot index {index} is out of range for a map of {slot_count} slots")]
    OutOfRange { index: usize, slot_count: usize },

    #[error("slot {index} cannot be anchored at a non-finite point")]
    InvalidAnchor { index: usize },

    #[error("slot {index} does not hold card {card}")]
    StaleInstance { index: usize, card: CardId },

    #[error("invalid snapshot: {0}")]
    InvalidSnapshot(#[from] SnapshotError),
}
