//! Error types for event validation and spacing.

use thiserror::Error;

use crate::models::Coordinate;

/// Errors raised at the service boundary. The generator itself never fails.
#[derive(Debug, Error)]
pub enum SpacerError {
    #[error("spacing must be a positive, finite number of meters, got {0}")]
    InvalidSpacing(f64),

    #[error("coordinate ({latitude}, {longitude}) is out of range")]
    InvalidCoordinate { latitude: f64, longitude: f64 },

    #[error("boundary {nw} is not north-west of {se}")]
    MisorientedRectangle { nw: Coordinate, se: Coordinate },

    #[error("area {nw} to {se} cannot be spaced: {reason}")]
    UnreachableArea {
        nw: Coordinate,
        se: Coordinate,
        reason: &'static str,
    },

    #[error("point cap must be at least 1")]
    InvalidMaxPoints,

    #[error("event {0} not found")]
    EventNotFound(String),

    #[error("road snapping returned {received} points for {sent} inputs")]
    SnappedTooManyPoints { sent: usize, received: usize },

    #[error(transparent)]
    Trigger(#[from] TriggerError),
}

impl SpacerError {
    /// Whether the error stems from caller input rather than a collaborator
    pub fn is_invalid_input(&self) -> bool {
        matches!(
            self,
            SpacerError::InvalidSpacing(_)
                | SpacerError::InvalidCoordinate { .. }
                | SpacerError::MisorientedRectangle { .. }
                | SpacerError::UnreachableArea { .. }
                | SpacerError::InvalidMaxPoints
                | SpacerError::Trigger(_)
        )
    }
}

/// Errors from decoding a document change notification
#[derive(Debug, Error)]
pub enum TriggerError {
    #[error("malformed trigger payload: {0}")]
    Json(#[from] serde_json::Error),

    #[error("trigger payload carries no document")]
    MissingDocument,

    #[error("document is missing field '{0}'")]
    MissingField(&'static str),

    #[error("field '{field}' holds invalid integer '{value}'")]
    InvalidInteger { field: &'static str, value: String },
}
