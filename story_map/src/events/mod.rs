//! Notifications a story map sends to its collaborators.
//!
//! Listeners are registered on the map that emits to them. Events carry the
//! map's identity and nothing else about the arrangement; a listener that
//! needs the new state asks the map for it after the call returns.

use serde::{Deserialize, Serialize};
use std::sync::mpsc::Sender;
use story_cards::CardId;
use uuid::Uuid;

/// Unique identifier for a story map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MapId(pub Uuid);

impl MapId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn nil() -> Self {
        Self(Uuid::nil())
    }
}

impl Default for MapId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for MapId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Something a map tells its listeners.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MapEvent {
    /// Which card sits in which slot has changed.
    ArrangementChanged { map: MapId },

    /// A card on the map was picked for editing.
    FocusRequested { map: MapId, card: CardId },
}

impl MapEvent {
    /// The map that sent this event.
    pub fn map(&self) -> MapId {
        match self {
            MapEvent::ArrangementChanged { map } => *map,
            MapEvent::FocusRequested { map, .. } => *map,
        }
    }
}

/// Receiver of map events.
///
/// Delivery is fire-and-forget. A listener only ever sees the event, never the
/// map, so it cannot reach back into a mutation that is still in progress.
pub trait MapListener {
    fn on_event(&mut self, event: &MapEvent);
}

impl<F> MapListener for F
where
    F: FnMut(&MapEvent),
{
    fn on_event(&mut self, event: &MapEvent) {
        self(event)
    }
}

impl MapListener for Sender<MapEvent> {
    fn on_event(&mut self, event: &MapEvent) {
        // A dropped receiver just means nobody is listening any more
        let _ = self.send(*event);
    }
}

/// Handle returned by `subscribe`, used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

/// The set of listeners registered on one map.
#[derive(Default)]
pub struct Listeners {
    next_id: u64,
    entries: Vec<(ListenerId, Box<dyn MapListener>)>,
}

impl Listeners {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, listener: Box<dyn MapListener>) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.entries.push((id, listener));
        id
    }

    /// Returns false if the listener was not registered.
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(entry, _)| *entry != id);
        self.entries.len() != before
    }

    /// Deliver an event to every listener in subscription order.
    pub fn emit(&mut self, event: MapEvent) {
        for (_, listener) in &mut self.entries {
            listener.on_event(&event);
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl std::fmt::Debug for Listeners {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Listeners")
            .field("count", &self.entries.len())
            .finish()
    }
}
