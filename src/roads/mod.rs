//! Road-snapping enrichment collaborator.
//!
//! Moves generated points onto the nearest road. Point generation does not
//! depend on it; the service only calls it when one is configured.

use anyhow::Result;
use futures::future::BoxFuture;
use tracing::debug;

use crate::error::SpacerError;
use crate::models::Coordinate;

/// Points per road-snapping request
pub const DEFAULT_CHUNK_SIZE: usize = 100;

/// Maps coordinates to the nearest point on a road.
///
/// Implementations may drop points they cannot snap, so the output can be
/// shorter than the input but never longer.
pub trait RoadSnapper: Send + Sync {
    fn nearest_roads<'a>(
        &'a self,
        points: &'a [Coordinate],
    ) -> BoxFuture<'a, Result<Vec<Coordinate>>>;
}

/// Snap `points` in chunks of at most `chunk_size`, preserving order
pub async fn snap_in_chunks(
    snapper: &dyn RoadSnapper,
    points: &[Coordinate],
    chunk_size: usize,
) -> Result<Vec<Coordinate>> {
    let mut snapped = Vec::with_capacity(points.len());

    for chunk in points.chunks(chunk_size.max(1)) {
        let result = snapper.nearest_roads(chunk).await?;

        if result.len() > chunk.len() {
            return Err(SpacerError::SnappedTooManyPoints {
                sent: chunk.len(),
                received: result.len(),
            }
            .into());
        }

        debug!("Snapped {} of {} points", result.len(), chunk.len());
        snapped.extend(result);
    }

    Ok(snapped)
}
