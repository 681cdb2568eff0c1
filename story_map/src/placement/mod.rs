//! Placement Controller - decides where a dropped card goes, or whether it is
//! turned away.
//!
//! The rules for a drop, first match wins:
//! 1. **Reposition**: the card is already on this map. It leaves its slot and
//!    takes the free slot nearest the drop point (its own slot included).
//! 2. **Capacity**: every slot is taken, reject.
//! 3. **Duplicate**: a card for the same function is already placed, reject.
//! 4. **Place**: take the free slot nearest the drop point, or the lowest free
//!    slot when the drop point is unusable.

mod outcome;

pub use outcome::*;

use story_cards::{Card, CardId, ConfigError, MapConfig, Point};

use crate::error::MapError;
use crate::events::{ListenerId, Listeners, MapEvent, MapId, MapListener};
use crate::registry::SlotRegistry;
use crate::resolver::nearest_free_slot;

/// A story map: one slot registry plus the listeners interested in it.
///
/// All mutation goes through `StoryMap`, so the registry is never observed
/// half-updated. Listeners are called only once a mutation has finished.
#[derive(Debug)]
pub struct StoryMap {
    id: MapId,
    registry: SlotRegistry,
    listeners: Listeners,
}

impl StoryMap {
    /// Create a map around an existing registry.
    pub fn new(registry: SlotRegistry) -> Self {
        Self {
            id: MapId::new(),
            registry,
            listeners: Listeners::new(),
        }
    }

    /// Create a map with one empty slot per anchor.
    pub fn with_anchors(anchors: impl IntoIterator<Item = Point>) -> Self {
        Self::new(SlotRegistry::new(anchors))
    }

    /// Create a map laid out according to a configuration.
    pub fn from_config(config: &MapConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::with_anchors(config.anchors()))
    }

    pub fn id(&self) -> MapId {
        self.id
    }

    /// Read-only view of the slots.
    pub fn registry(&self) -> &SlotRegistry {
        &self.registry
    }

    pub(crate) fn registry_mut(&mut self) -> &mut SlotRegistry {
        &mut self.registry
    }

    pub fn slot_count(&self) -> usize {
        self.registry.slot_count()
    }

    pub fn occupant_of(&self, index: usize) -> Result<Option<CardId>, MapError> {
        self.registry.occupant_of(index)
    }

    pub fn free_indices(&self) -> Vec<usize> {
        self.registry.free_indices()
    }

    /// Placed cards in slot order.
    pub fn placed_cards(&self) -> Vec<Card> {
        self.registry.placed_cards()
    }

    /// Move a slot's anchor after the grid has been re-laid. Does not count as
    /// an arrangement change. Non-finite anchors are refused.
    pub fn set_anchor(&mut self, index: usize, anchor: Point) -> Result<(), MapError> {
        self.registry.set_anchor(index, anchor)
    }

    /// Register a listener for this map's events.
    pub fn subscribe(&mut self, listener: impl MapListener + 'static) -> ListenerId {
        self.listeners.subscribe(Box::new(listener))
    }

    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        self.listeners.unsubscribe(id)
    }

    pub(crate) fn notify_changed(&mut self) {
        self.listeners
            .emit(MapEvent::ArrangementChanged { map: self.id });
    }

    /// Handle a card dropped onto this map.
    ///
    /// `already_present` must name the slot that holds `card` if the card is
    /// one of this map's own. A rejected drop leaves the map untouched and
    /// sends no notification; an accepted one sends exactly one.
    pub fn attempt_drop(&mut self, request: DropRequest) -> Result<DropOutcome, MapError> {
        let DropRequest {
            card,
            target,
            already_present,
        } = request;

        if let Some(old_index) = already_present {
            return self.reposition(card, old_index, target);
        }

        if self.registry.is_full() {
            return Ok(DropOutcome::rejected(RejectReason::Capacity));
        }

        if self.registry.contains_function(card.function) {
            return Ok(DropOutcome::rejected(RejectReason::Duplicate));
        }

        let Some(index) = self.resolve(target) else {
            return Ok(DropOutcome::rejected(RejectReason::Capacity));
        };

        self.registry.set_occupant(index, Some(card))?;
        self.notify_changed();
        Ok(DropOutcome::Accepted { index })
    }

    /// Handle a drop, looking up whether the card is already on this map.
    pub fn drop_card(&mut self, card: Card, target: Point) -> Result<DropOutcome, MapError> {
        let already_present = self.registry.index_of(card.id);
        self.attempt_drop(DropRequest {
            card,
            target,
            already_present,
        })
    }

    fn reposition(
        &mut self,
        card: Card,
        old_index: usize,
        target: Point,
    ) -> Result<DropOutcome, MapError> {
        let placed = match self.registry.card_at(old_index)? {
            Some(placed) if placed.id == card.id => placed,
            _ => {
                return Err(MapError::StaleInstance {
                    index: old_index,
                    card: card.id,
                })
            }
        };

        self.registry.set_occupant(old_index, None)?;
        // The vacated slot is free, so this always finds somewhere
        let index = self.resolve(target).unwrap_or(old_index);
        self.registry.set_occupant(index, Some(placed))?;

        self.notify_changed();
        Ok(DropOutcome::Accepted { index })
    }

    /// Nearest free slot to `target`, or the lowest free slot when `target`
    /// is not a usable point or the search comes up empty.
    fn resolve(&self, target: Point) -> Option<usize> {
        let nearest = if target.is_finite() {
            nearest_free_slot(target, &self.registry)
        } else {
            None
        };
        nearest.or_else(|| self.registry.first_free())
    }

    /// A card that came from `index` was dropped somewhere.
    ///
    /// Landing back on this map's own background is not a departure and is
    /// ignored. Otherwise the slot is cleared and the departed card returned;
    /// a notification is sent only if a card was actually removed.
    pub fn detach(&mut self, index: usize, landed_on: DropSite) -> Result<Option<Card>, MapError> {
        if landed_on == DropSite::OwnBackground {
            // Still range-check so a bad index is reported either way
            self.registry.card_at(index)?;
            return Ok(None);
        }

        let removed = self.registry.set_occupant(index, None)?;
        if removed.is_some() {
            self.notify_changed();
        }
        Ok(removed)
    }

    /// Ask listeners to focus a card. Only cards on this map can be focused.
    pub fn focus(&mut self, card: CardId) -> bool {
        if self.registry.index_of(card).is_none() {
            return false;
        }
        self.listeners.emit(MapEvent::FocusRequested { map: self.id, card });
        true
    }

    /// Put the placed cards into function order.
    ///
    /// The set of occupied slots stays the same; the cards are dealt back into
    /// those slots in ascending function number. Returns whether anything moved.
    pub fn sort(&mut self) -> bool {
        if !self.registry.sort_by_function() {
            return false;
        }
        self.notify_changed();
        true
    }
}
