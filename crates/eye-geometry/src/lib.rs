//! Eye-Region Landmark Geometry
//!
//! Validated landmark containers and the eye aspect ratio (EAR) computation
//! used by the drowsiness decision engine:
//! - Boundary validation of detector output into fixed-shape containers
//! - 6-point eye contours and full 68-point face-mesh intake
//! - Pure EAR computation with degenerate-geometry detection
//!
//! Pure geometry: no state, no I/O.

pub mod ear;
pub mod landmarks;

pub use ear::{average_ear, eye_aspect_ratio, MIN_EYE_WIDTH};
pub use landmarks::{
    EyeLandmarks, FaceObservation, Point2, EYE_POINT_COUNT, FACE_MESH_POINT_COUNT,
    LEFT_EYE_OFFSET, RIGHT_EYE_OFFSET,
};

use thiserror::Error;

/// Errors raised while validating detector output into landmark containers
#[derive(Debug, Clone, Error)]
pub enum LandmarkError {
    /// Wrong number of points for the expected contour
    #[error("landmark set has {actual} points, expected {expected}")]
    PointCount { expected: usize, actual: usize },

    /// Coordinate is NaN or infinite
    #[error("landmark {index} has non-finite coordinates ({x}, {y})")]
    NonFiniteCoordinate { index: usize, x: f32, y: f32 },
}
