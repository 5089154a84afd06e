//! Eventspacer - evenly spaced claimable spots for event areas
//!
//! This library provides the point generator and the shared types and
//! collaborators used by the `space` and `server` binaries.

pub mod config;
pub mod error;
pub mod models;
pub mod roads;
pub mod spacer;
pub mod store;
pub mod trigger;

pub use error::{SpacerError, TriggerError};
pub use models::{Coordinate, Event, Rectangle};
pub use spacer::{generate, EventSpacer};
