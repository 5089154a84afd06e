//! Evenly spaced point generation over a geographic rectangle.
//!
//! Walks an expanding square spiral from the rectangle's center using
//! great-circle hops, keeping every hop that lands inside the rectangle.

pub mod boundary;
pub mod geodesic;
mod service;
pub mod spiral;

pub use boundary::inclusive;
pub use geodesic::{destination_point, haversine_distance, EARTH_RADIUS_M};
pub use service::{generate_blocking, validate_request, EventSpacer};
pub use spiral::{center, generate, Direction, Reach, SpiralState};
