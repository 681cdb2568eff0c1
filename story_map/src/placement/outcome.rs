//! Drop requests and their outcomes.

use serde::{Deserialize, Serialize};
use story_cards::{Card, Point};

/// A card dropped onto the map at a point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DropRequest {
    pub card: Card,

    /// Drop point, in the same coordinate space as the slot anchors.
    pub target: Point,

    /// The slot holding `card`, if the card already belongs to this map.
    pub already_present: Option<usize>,
}

impl DropRequest {
    /// A card arriving from outside the map.
    pub fn new_card(card: Card, target: Point) -> Self {
        Self {
            card,
            target,
            already_present: None,
        }
    }

    /// A card of this map being moved from slot `from`.
    pub fn reposition(card: Card, from: usize, target: Point) -> Self {
        Self {
            card,
            target,
            already_present: Some(from),
        }
    }
}

/// Why a drop was turned away.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RejectReason {
    /// Every slot is taken.
    Capacity,
    /// A card for the same function is already on the map.
    Duplicate,
}

impl std::fmt::Display for RejectReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RejectReason::Capacity => write!(f, "the story map is full"),
            RejectReason::Duplicate => write!(f, "that function is already on the story map"),
        }
    }
}

/// Result of a drop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DropOutcome {
    /// The card now sits in slot `index`.
    Accepted { index: usize },
    Rejected { reason: RejectReason },
}

impl DropOutcome {
    pub fn rejected(reason: RejectReason) -> Self {
        DropOutcome::Rejected { reason }
    }

    pub fn is_accepted(&self) -> bool {
        matches!(self, DropOutcome::Accepted { .. })
    }

    /// The slot the card landed in, if accepted.
    pub fn index(&self) -> Option<usize> {
        match self {
            DropOutcome::Accepted { index } => Some(*index),
            DropOutcome::Rejected { .. } => None,
        }
    }
}

/// Where a card dragged off this map ended up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DropSite {
    /// Back onto this map's own background.
    OwnBackground,
    /// Some other drop target.
    Elsewhere,
}
