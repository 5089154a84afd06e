//! Core data models for event spacing.

pub mod coordinate;
pub mod event;

pub use coordinate::{Coordinate, Rectangle};
pub use event::Event;
