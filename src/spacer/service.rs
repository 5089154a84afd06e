//! Event spacing service: validate, generate, snap and persist.

use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{debug, info};

use super::geodesic::{haversine_distance, EARTH_RADIUS_M};
use super::spiral::{center, generate};
use crate::error::SpacerError;
use crate::models::{Coordinate, Event, Rectangle};
use crate::roads::{snap_in_chunks, RoadSnapper, DEFAULT_CHUNK_SIZE};
use crate::store::EventStore;
use crate::trigger::DocumentEventPayload;

/// Fills events with spaced points and writes them back to the store
pub struct EventSpacer {
    store: Arc<dyn EventStore>,
    snapper: Option<Arc<dyn RoadSnapper>>,
    max_points: usize,
    snap_chunk_size: usize,
}

impl EventSpacer {
    /// Create a service writing to `store`, capping events at `max_points`
    pub fn new(store: Arc<dyn EventStore>, max_points: usize) -> Self {
        Self {
            store,
            snapper: None,
            max_points,
            snap_chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }

    /// Snap generated points to roads before persisting
    pub fn with_road_snapper(mut self, snapper: Arc<dyn RoadSnapper>, chunk_size: usize) -> Self {
        self.snapper = Some(snapper);
        self.snap_chunk_size = chunk_size;
        self
    }

    pub fn max_points(&self) -> usize {
        self.max_points
    }

    pub fn store(&self) -> &Arc<dyn EventStore> {
        &self.store
    }

    /// Replace the event's points with a freshly generated lattice and
    /// persist it
    pub async fn space_event(&self, mut event: Event) -> Result<Event> {
        validate_request(&event.rectangle(), event.spacing_meters, self.max_points)?;

        event.spaced_points = generate_blocking(
            event.nw_boundary,
            event.se_boundary,
            event.spacing_meters,
            self.max_points,
        )
        .await
        .with_context(|| format!("Point generation failed for event {}", event.id))?;
        info!(
            "Event {} filled with {} points at {} m spacing",
            event.id,
            event.spaced_points.len(),
            event.spacing_meters
        );

        if let Some(snapper) = &self.snapper {
            let generated = event.spaced_points.len();
            event.spaced_points =
                snap_in_chunks(snapper.as_ref(), &event.spaced_points, self.snap_chunk_size)
                    .await
                    .with_context(|| format!("Failed to snap points for event {}", event.id))?;
            debug!(
                "Snapped event {}: {} of {} points kept",
                event.id,
                event.spaced_points.len(),
                generated
            );
        }

        self.store
            .update_event(&event)
            .await
            .with_context(|| format!("Failed to update event {}", event.id))?;

        Ok(event)
    }

    /// Decode a document change notification and space the event it carries
    pub async fn handle_trigger(&self, payload: DocumentEventPayload) -> Result<Event> {
        let event = payload.into_event().map_err(SpacerError::from)?;
        debug!("Decoded event {} from trigger", event.id);
        self.space_event(event).await
    }

    /// Regenerate points for an event already in the store
    pub async fn respace(&self, id: &str) -> Result<Event> {
        let event = self
            .store
            .fetch_event(id)
            .await
            .with_context(|| format!("Failed to fetch event {}", id))?
            .ok_or_else(|| SpacerError::EventNotFound(id.to_string()))?;

        self.space_event(event).await
    }
}

/// Run [`generate`] on the blocking thread pool
pub async fn generate_blocking(
    nw: Coordinate,
    se: Coordinate,
    spacing_m: f64,
    max_points: usize,
) -> Result<Vec<Coordinate>> {
    tokio::task::spawn_blocking(move || generate(nw, se, spacing_m, max_points))
        .await
        .context("Point generation task failed")
}

/// Check the generator's preconditions
pub fn validate_request(
    rectangle: &Rectangle,
    spacing_meters: f64,
    max_points: usize,
) -> Result<(), SpacerError> {
    if !spacing_meters.is_finite() || spacing_meters <= 0.0 {
        return Err(SpacerError::InvalidSpacing(spacing_meters));
    }
    if max_points == 0 {
        return Err(SpacerError::InvalidMaxPoints);
    }
    rectangle.validate()?;
    check_reach(rectangle, spacing_meters)
}

/// The walk has to start inside the rectangle and overshoot every edge
/// without crossing a pole or the antimeridian.
fn check_reach(rectangle: &Rectangle, spacing_meters: f64) -> Result<(), SpacerError> {
    let Rectangle { nw, se } = *rectangle;
    let reject = |reason| SpacerError::UnreachableArea { nw, se, reason };

    if !rectangle.contains(&center(nw, se)) {
        return Err(reject("center falls outside the area"));
    }

    // Angular distance the walk may cover past the center
    let extent =
        ((haversine_distance(nw, se) + 2.0 * spacing_meters) / EARTH_RADIUS_M).to_degrees();

    if nw.lat + extent >= 90.0 || se.lat - extent <= -90.0 {
        return Err(reject("walk would cross a pole"));
    }

    let widest = (nw.lat.abs().max(se.lat.abs()) + extent).to_radians();
    let extent_lng = extent / widest.cos();

    if nw.lng - extent_lng <= -180.0 || se.lng + extent_lng >= 180.0 {
        return Err(reject("walk would cross the antimeridian"));
    }

    Ok(())
}
