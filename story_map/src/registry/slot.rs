//! A single slot in the grid.

use serde::Serialize;
use story_cards::{Card, Point};

/// One fixed position on the map that holds at most one card.
#[derive(Debug, Clone, Serialize)]
pub struct Slot {
    index: usize,

    /// Set by the layout side, read by the resolver.
    pub(crate) anchor: Point,

    pub(crate) occupant: Option<Card>,
}

impl Slot {
    pub(crate) fn new(index: usize, anchor: Point) -> Self {
        Self {
            index,
            anchor,
            occupant: None,
        }
    }

    /// Position of this slot in the grid's canonical order.
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn anchor(&self) -> Point {
        self.anchor
    }

    pub fn occupant(&self) -> Option<Card> {
        self.occupant
    }

    pub fn is_occupied(&self) -> bool {
        self.occupant.is_some()
    }
}
