//! Snapshot Manager - capture and restore of which function sits in which slot.
//!
//! A snapshot records function numbers only. Card identities and anchors are
//! not part of it; restoring builds fresh cards through a factory.
//!
//! Persisted form is a versioned record:
//!
//! ```json
//! {"version":"v1","slots":[3,null,12,null]}
//! ```

mod document;

pub use document::*;

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use story_cards::{Card, FunctionNumber};

use crate::error::{MapError, SnapshotError};
use crate::placement::StoryMap;
use crate::registry::SlotRegistry;

/// Slot-ordered list of the function in each slot, `None` for an empty slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "SnapshotRecord", from = "SnapshotRecord")]
pub struct Snapshot {
    slots: Vec<Option<FunctionNumber>>,
}

/// On-disk layout, tagged by format version.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "version")]
enum SnapshotRecord {
    #[serde(rename = "v1")]
    V1 { slots: Vec<Option<FunctionNumber>> },
}

impl From<Snapshot> for SnapshotRecord {
    fn from(snapshot: Snapshot) -> Self {
        SnapshotRecord::V1 {
            slots: snapshot.slots,
        }
    }
}

impl From<SnapshotRecord> for Snapshot {
    fn from(record: SnapshotRecord) -> Self {
        match record {
            SnapshotRecord::V1 { slots } => Snapshot { slots },
        }
    }
}

impl Snapshot {
    pub fn new(slots: Vec<Option<FunctionNumber>>) -> Self {
        Self { slots }
    }

    /// Number of slots recorded.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn slots(&self) -> &[Option<FunctionNumber>] {
        &self.slots
    }

    pub fn get(&self, index: usize) -> Option<FunctionNumber> {
        self.slots.get(index).copied().flatten()
    }

    pub fn occupied_count(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    /// Check that this snapshot can be restored onto a map of `slot_count` slots.
    pub fn validate(&self, slot_count: usize) -> Result<(), SnapshotError> {
        if self.slots.len() != slot_count {
            return Err(SnapshotError::LengthMismatch {
                expected: slot_count,
                found: self.slots.len(),
            });
        }

        let mut seen = HashSet::new();
        for function in self.slots.iter().flatten() {
            if !seen.insert(*function) {
                return Err(SnapshotError::DuplicateFunction {
                    function: *function,
                });
            }
        }

        Ok(())
    }

    pub fn to_json(&self) -> Result<String, SnapshotError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Parse a persisted snapshot. Length is checked on restore, when the
    /// target map is known.
    pub fn from_json(json: &str) -> Result<Self, SnapshotError> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Record the function held by every slot, in slot order.
pub fn capture(registry: &SlotRegistry) -> Snapshot {
    Snapshot {
        slots: registry
            .slots()
            .iter()
            .map(|slot| slot.occupant().map(|card| card.function))
            .collect(),
    }
}

/// Rebuild the registry's occupancy from a snapshot.
///
/// Slot `i` is cleared when the snapshot has nothing there, and otherwise
/// given the card `factory` builds for the recorded function. Slots are
/// handled in ascending order. The snapshot is validated, and every card
/// built and checked (right function, no card reused), before any slot is
/// written, so a failure leaves the registry as it was.
pub fn restore<F>(
    snapshot: &Snapshot,
    registry: &mut SlotRegistry,
    mut factory: F,
) -> Result<(), MapError>
where
    F: FnMut(FunctionNumber) -> Card,
{
    snapshot.validate(registry.slot_count())?;

    let mut cards: Vec<Option<Card>> = Vec::with_capacity(snapshot.len());
    let mut built = HashSet::new();
    for (index, slot) in snapshot.slots.iter().enumerate() {
        let Some(expected) = *slot else {
            cards.push(None);
            continue;
        };

        let card = factory(expected);
        if card.function != expected {
            return Err(SnapshotError::FactoryMismatch {
                index,
                expected,
                found: card.function,
            }
            .into());
        }
        if !built.insert(card.id) {
            return Err(SnapshotError::DuplicateCard { card: card.id }.into());
        }
        cards.push(Some(card));
    }

    for (index, card) in cards.into_iter().enumerate() {
        registry.set_occupant(index, card)?;
    }

    Ok(())
}

impl StoryMap {
    /// Snapshot the current arrangement.
    pub fn capture(&self) -> Snapshot {
        capture(self.registry())
    }

    /// Replace the arrangement with a snapshot, building a fresh card for
    /// every recorded function. Sends one change notification on success.
    pub fn restore(&mut self, snapshot: &Snapshot) -> Result<(), MapError> {
        self.restore_with(snapshot, Card::for_function)
    }

    /// Like `restore`, with the caller supplying the cards.
    pub fn restore_with<F>(&mut self, snapshot: &Snapshot, factory: F) -> Result<(), MapError>
    where
        F: FnMut(FunctionNumber) -> Card,
    {
        restore(snapshot, self.registry_mut(), factory)?;
        self.notify_changed();
        Ok(())
    }
}
