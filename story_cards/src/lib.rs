//! # Story Cards
//!
//! The vocabulary shared by every part of Storymaps: story cards and the Propp
//! functions they stand for, the 2D geometry of the slot grid, and the map
//! configuration. This crate holds definitions only and never mutates a map.

pub mod cards;
pub mod config;
pub mod geometry;

pub use cards::*;
pub use config::*;
pub use geometry::*;
