//! # Story Map
//!
//! The placement engine behind a Storymaps story map: a fixed grid of slots,
//! one per Propp function, onto which story cards are dropped.
//!
//! ## Core Components
//!
//! - **registry**: The ordered slots, their anchors and occupants
//! - **resolver**: Nearest-free-slot search over the registry
//! - **placement**: Drop admission rules and the `StoryMap` that owns a registry
//! - **snapshot**: Capture and restore of the arrangement, and the saved-story file
//! - **events**: Listener registration for arrangement and focus notifications
//!
//! ## Design Philosophy
//!
//! - **Values, not faults**: A rejected drop is an ordinary outcome; only
//!   programming and integrity errors come back as `Err`
//! - **No hidden state**: Card-to-slot relations live in the registry, keyed by index
//! - **Synchronous**: Every entry point runs to completion before any listener hears of it

pub mod error;
pub mod events;
pub mod placement;
pub mod registry;
pub mod resolver;
pub mod snapshot;

pub use error::*;
pub use events::*;
pub use placement::*;
pub use registry::*;
pub use resolver::*;
pub use snapshot::*;
