//! Event document structure.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::{Coordinate, Rectangle};

/// Event document as held by the event store.
///
/// Only the boundaries and spacing feed point generation; `spaced_points` is
/// the only field written back. The rest passes through untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    /// Document ID (last segment of the document path)
    #[serde(default)]
    pub id: String,

    pub name: String,

    pub nw_boundary: Coordinate,

    pub se_boundary: Coordinate,

    /// Target distance between neighbouring points
    pub spacing_meters: f64,

    /// Generated lattice, center first
    #[serde(default)]
    pub spaced_points: Vec<Coordinate>,

    /// Claimant ID → time the spot was claimed
    #[serde(default)]
    pub claimed_spots: HashMap<String, DateTime<Utc>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiration: Option<DateTime<Utc>>,
}

impl Event {
    /// Create an event with no points, claims or expiration
    pub fn new(
        id: &str,
        name: &str,
        nw_boundary: Coordinate,
        se_boundary: Coordinate,
        spacing_meters: f64,
    ) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            nw_boundary,
            se_boundary,
            spacing_meters,
            spaced_points: Vec::new(),
            claimed_spots: HashMap::new(),
            expiration: None,
        }
    }

    pub fn rectangle(&self) -> Rectangle {
        Rectangle::new(self.nw_boundary, self.se_boundary)
    }
}
