//! Slot Registry - the fixed, ordered grid of slots on a story map.
//!
//! The registry is a plain container. It range-checks indices and nothing
//! else: keeping function numbers unique across slots is the job of whoever
//! writes to it (placement and snapshot restore).

mod slot;

pub use slot::*;

use serde::Serialize;
use story_cards::{Card, CardId, FunctionNumber, Point, PROPP_FUNCTION_COUNT};

use crate::error::MapError;

/// Ordered sequence of slots. The number of slots never changes after
/// construction.
#[derive(Debug, Clone, Serialize)]
pub struct SlotRegistry {
    slots: Vec<Slot>,
}

impl SlotRegistry {
    /// Create a registry with one slot per anchor, in the given order.
    pub fn new(anchors: impl IntoIterator<Item = Point>) -> Self {
        let slots = anchors
            .into_iter()
            .enumerate()
            .map(|(index, anchor)| Slot::new(index, anchor))
            .collect();
        Self { slots }
    }

    /// Create a registry of `count` empty slots anchored at the origin, to be
    /// positioned later with `set_anchor`.
    pub fn with_slot_count(count: usize) -> Self {
        Self::new(std::iter::repeat(Point::ORIGIN).take(count))
    }

    /// Number of slots. Fixed at construction.
    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    /// All slots in index order.
    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    fn slot(&self, index: usize) -> Result<&Slot, MapError> {
        let slot_count = self.slots.len();
        self.slots
            .get(index)
            .ok_or(MapError::OutOfRange { index, slot_count })
    }

    fn slot_mut(&mut self, index: usize) -> Result<&mut Slot, MapError> {
        let slot_count = self.slots.len();
        self.slots
            .get_mut(index)
            .ok_or(MapError::OutOfRange { index, slot_count })
    }

    pub fn anchor_of(&self, index: usize) -> Result<Point, MapError> {
        self.slot(index).map(Slot::anchor)
    }

    /// Move a slot's anchor. Called by the layout side when the grid is re-laid.
    pub fn set_anchor(&mut self, index: usize, anchor: Point) -> Result<(), MapError> {
        let slot = self.slot_mut(index)?;
        if !anchor.is_finite() {
            return Err(MapError::InvalidAnchor { index });
        }
        slot.anchor = anchor;
        Ok(())
    }

    pub fn occupant_of(&self, index: usize) -> Result<Option<CardId>, MapError> {
        self.slot(index).map(|slot| slot.occupant().map(|card| card.id))
    }

    /// The full card held by a slot.
    pub fn card_at(&self, index: usize) -> Result<Option<Card>, MapError> {
        self.slot(index).map(Slot::occupant)
    }

    /// Overwrite a slot's occupant without any admission checks.
    ///
    /// Returns the card that was there before.
    pub fn set_occupant(
        &mut self,
        index: usize,
        card: Option<Card>,
    ) -> Result<Option<Card>, MapError> {
        let slot = self.slot_mut(index)?;
        Ok(std::mem::replace(&mut slot.occupant, card))
    }

    /// Indices of empty slots, ascending.
    pub fn free_indices(&self) -> Vec<usize> {
        self.slots
            .iter()
            .filter(|slot| !slot.is_occupied())
            .map(Slot::index)
            .collect()
    }

    /// Lowest-indexed empty slot.
    pub fn first_free(&self) -> Option<usize> {
        self.slots
            .iter()
            .find(|slot| !slot.is_occupied())
            .map(Slot::index)
    }

    pub fn occupied_count(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_occupied()).count()
    }

    pub fn free_count(&self) -> usize {
        self.slot_count() - self.occupied_count()
    }

    pub fn is_full(&self) -> bool {
        self.occupied_count() >= self.slot_count()
    }

    /// Slot currently holding the given card instance.
    pub fn index_of(&self, card: CardId) -> Option<usize> {
        self.slots
            .iter()
            .find(|slot| slot.occupant().is_some_and(|c| c.id == card))
            .map(Slot::index)
    }

    /// Slot currently holding a card for the given function.
    pub fn index_of_function(&self, function: FunctionNumber) -> Option<usize> {
        self.slots
            .iter()
            .find(|slot| slot.occupant().is_some_and(|c| c.function == function))
            .map(Slot::index)
    }

    pub fn contains_function(&self, function: FunctionNumber) -> bool {
        self.index_of_function(function).is_some()
    }

    /// Placed cards in slot order.
    pub fn placed_cards(&self) -> Vec<Card> {
        self.slots.iter().filter_map(Slot::occupant).collect()
    }

    /// Deal the placed cards back into the occupied slots in ascending
    /// function order. The occupied set does not change. Returns whether any
    /// card moved.
    pub fn sort_by_function(&mut self) -> bool {
        let current = self.placed_cards();
        let mut sorted = current.clone();
        sorted.sort_by_key(|card| card.function);

        if sorted == current {
            return false;
        }

        let occupied = self.slots.iter_mut().filter(|slot| slot.is_occupied());
        for (slot, card) in occupied.zip(sorted) {
            slot.occupant = Some(card);
        }
        true
    }

    /// Empty every slot.
    pub fn clear(&mut self) {
        for slot in &mut self.slots {
            slot.occupant = None;
        }
    }
}

impl Default for SlotRegistry {
    /// One slot per Propp function, all anchored at the origin.
    fn default() -> Self {
        Self::with_slot_count(PROPP_FUNCTION_COUNT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_registry_has_one_slot_per_function() {
        let registry = SlotRegistry::default();
        assert_eq!(registry.slot_count(), 31);
        assert_eq!(registry.free_count(), 31);
        assert_eq!(registry.occupied_count(), 0);
    }

    #[test]
    fn test_slots_keep_their_index_and_anchor() {
        let registry = SlotRegistry::new(vec![Point::new(0.0, 0.0), Point::new(5.0, 1.0)]);

        assert_eq!(registry.slots()[1].index(), 1);
        assert_eq!(registry.anchor_of(1).unwrap(), Point::new(5.0, 1.0));
    }

    #[test]
    fn test_out_of_range() {
        let mut registry = SlotRegistry::with_slot_count(3);

        assert!(matches!(
            registry.anchor_of(3),
            Err(MapError::OutOfRange { index: 3, slot_count: 3 })
        ));
        assert!(registry.occupant_of(7).is_err());
        assert!(registry.set_occupant(3, Some(Card::new(1))).is_err());
        assert!(registry.set_anchor(10, Point::ORIGIN).is_err());
    }

    #[test]
    fn test_non_finite_anchor_rejected() {
        let mut registry = SlotRegistry::new(vec![Point::new(2.0, 3.0)]);

        assert!(matches!(
            registry.set_anchor(0, Point::new(f64::NAN, f64::NAN)),
            Err(MapError::InvalidAnchor { index: 0 })
        ));
        assert!(registry.set_anchor(0, Point::new(f64::INFINITY, 0.0)).is_err());
        assert_eq!(registry.anchor_of(0).unwrap(), Point::new(2.0, 3.0));
    }

    #[test]
    fn test_sort_by_function_keeps_occupied_set() {
        let mut registry = SlotRegistry::with_slot_count(4);
        registry.set_occupant(0, Some(Card::new(8))).unwrap();
        registry.set_occupant(1, Some(Card::new(3))).unwrap();
        registry.set_occupant(3, Some(Card::new(5))).unwrap();

        assert!(registry.sort_by_function());

        let functions: Vec<Option<u32>> = (0..4)
            .map(|i| registry.card_at(i).unwrap().map(|c| c.function.get()))
            .collect();
        assert_eq!(functions, vec![Some(3), Some(5), None, Some(8)]);
        assert!(!registry.sort_by_function());
    }

    #[test]
    fn test_set_occupant_returns_previous() {
        let mut registry = SlotRegistry::with_slot_count(2);
        let first = Card::new(1);
        let second = Card::new(2);

        assert_eq!(registry.set_occupant(0, Some(first)).unwrap(), None);
        assert_eq!(registry.set_occupant(0, Some(second)).unwrap(), Some(first));
        assert_eq!(registry.occupant_of(0).unwrap(), Some(second.id));
        assert_eq!(registry.set_occupant(0, None).unwrap(), Some(second));
        assert_eq!(registry.occupant_of(0).unwrap(), None);
    }

    #[test]
    fn test_free_indices_ascending() {
        let mut registry = SlotRegistry::with_slot_count(5);
        registry.set_occupant(1, Some(Card::new(1))).unwrap();
        registry.set_occupant(3, Some(Card::new(2))).unwrap();

        assert_eq!(registry.free_indices(), vec![0, 2, 4]);
        assert_eq!(registry.first_free(), Some(0));
        assert_eq!(registry.occupied_count() + registry.free_count(), 5);
    }

    #[test]
    fn test_lookups() {
        let mut registry = SlotRegistry::with_slot_count(4);
        let card = Card::new(9);
        registry.set_occupant(2, Some(card)).unwrap();

        assert_eq!(registry.index_of(card.id), Some(2));
        assert_eq!(registry.index_of(CardId::new()), None);
        assert_eq!(registry.index_of_function(FunctionNumber(9)), Some(2));
        assert!(registry.contains_function(FunctionNumber(9)));
        assert!(!registry.contains_function(FunctionNumber(8)));
    }

    #[test]
    fn test_placed_cards_in_slot_order() {
        let mut registry = SlotRegistry::with_slot_count(4);
        let late = Card::new(20);
        let early = Card::new(3);
        registry.set_occupant(3, Some(early)).unwrap();
        registry.set_occupant(0, Some(late)).unwrap();

        assert_eq!(registry.placed_cards(), vec![late, early]);
    }

    #[test]
    fn test_full_and_clear() {
        let mut registry = SlotRegistry::with_slot_count(2);
        registry.set_occupant(0, Some(Card::new(1))).unwrap();
        registry.set_occupant(1, Some(Card::new(2))).unwrap();
        assert!(registry.is_full());
        assert_eq!(registry.first_free(), None);

        registry.clear();
        assert!(!registry.is_full());
        assert_eq!(registry.free_count(), 2);
    }
}
