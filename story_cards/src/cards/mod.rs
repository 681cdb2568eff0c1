//! Card definitions.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Number of narrative functions in Propp's morphology, and so the number of
/// slots on a story map.
pub const PROPP_FUNCTION_COUNT: usize = 31;

/// Unique identifier for a placed card instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CardId(pub Uuid);

impl CardId {
    /// Create a new random card ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Create a card ID from a specific UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Create a nil card ID.
    pub fn nil() -> Self {
        Self(Uuid::nil())
    }
}

impl Default for CardId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The number identifying one of Propp's narrative functions.
///
/// Serialized as a bare integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FunctionNumber(pub u32);

impl FunctionNumber {
    pub fn new(number: u32) -> Self {
        Self(number)
    }

    pub fn get(&self) -> u32 {
        self.0
    }
}

impl From<u32> for FunctionNumber {
    fn from(number: u32) -> Self {
        Self(number)
    }
}

impl std::fmt::Display for FunctionNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "function {}", self.0)
    }
}

/// A story card: one instance of a narrative function.
///
/// A card carries no position. Where it is drawn is decided by the slot that
/// holds it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Card {
    pub id: CardId,
    pub function: FunctionNumber,
}

impl Card {
    /// Create a fresh card instance for the function with the given number.
    pub fn new(function: u32) -> Self {
        Self::for_function(FunctionNumber(function))
    }

    /// Create a fresh card instance for the given function.
    pub fn for_function(function: FunctionNumber) -> Self {
        Self {
            id: CardId::new(),
            function,
        }
    }

    /// Create a card with a known identity.
    pub fn with_id(id: CardId, function: FunctionNumber) -> Self {
        Self { id, function }
    }

    /// Whether two cards represent the same narrative function.
    pub fn same_function(&self, other: &Card) -> bool {
        self.function == other.function
    }
}
