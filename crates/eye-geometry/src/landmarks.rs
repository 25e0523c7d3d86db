//! Landmark containers and boundary validation
//!
//! Point sets arrive from an external face-landmark detector as loose lists;
//! they are validated into fixed-shape containers here before any geometry
//! runs on them.

use serde::{Deserialize, Serialize};

use crate::LandmarkError;

/// Number of points in one eye contour
pub const EYE_POINT_COUNT: usize = 6;

/// Number of points in a full face mesh (dlib 68-point layout)
pub const FACE_MESH_POINT_COUNT: usize = 68;

/// Offset of the left-eye contour within a 68-point face mesh
pub const LEFT_EYE_OFFSET: usize = 36;

/// Offset of the right-eye contour within a 68-point face mesh
pub const RIGHT_EYE_OFFSET: usize = 42;

/// 2D landmark point in pixel coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point2 {
    pub x: f32,
    pub y: f32,
}

impl Point2 {
    /// Create a new point
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point
    pub fn distance(&self, other: &Point2) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Whether both coordinates are finite
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl From<[f32; 2]> for Point2 {
    fn from(p: [f32; 2]) -> Self {
        Self { x: p[0], y: p[1] }
    }
}

/// One eye contour: exactly 6 points, anatomically indexed as
/// [outer corner, upper lid 1, upper lid 2, inner corner, lower lid 2, lower lid 1]
#[derive(Debug, Clone, PartialEq)]
pub struct EyeLandmarks {
    points: [Point2; EYE_POINT_COUNT],
}

impl EyeLandmarks {
    /// Build from a fixed-size array, rejecting non-finite coordinates
    pub fn new(points: [Point2; EYE_POINT_COUNT]) -> Result<Self, LandmarkError> {
        for (index, point) in points.iter().enumerate() {
            if !point.is_finite() {
                return Err(LandmarkError::NonFiniteCoordinate {
                    index,
                    x: point.x,
                    y: point.y,
                });
            }
        }
        Ok(Self { points })
    }

    /// Build from a slice, rejecting wrong point counts
    pub fn from_slice(points: &[Point2]) -> Result<Self, LandmarkError> {
        let fixed: [Point2; EYE_POINT_COUNT] =
            points.try_into().map_err(|_| LandmarkError::PointCount {
                expected: EYE_POINT_COUNT,
                actual: points.len(),
            })?;
        Self::new(fixed)
    }

    /// All points in anatomical index order
    pub fn points(&self) -> &[Point2; EYE_POINT_COUNT] {
        &self.points
    }

    /// Outer eye corner (index 0)
    pub fn outer_corner(&self) -> Point2 {
        self.points[0]
    }

    /// Inner eye corner (index 3)
    pub fn inner_corner(&self) -> Point2 {
        self.points[3]
    }
}

/// Left and right eye contours for one detected face in one frame
#[derive(Debug, Clone, PartialEq)]
pub struct FaceObservation {
    pub left: EyeLandmarks,
    pub right: EyeLandmarks,
}

impl FaceObservation {
    /// Pair two validated eye contours
    pub fn new(left: EyeLandmarks, right: EyeLandmarks) -> Self {
        Self { left, right }
    }

    /// Slice the eye contours out of a full 68-point face mesh
    /// (left eye at points 36..42, right eye at points 42..48)
    pub fn from_face_mesh(points: &[Point2]) -> Result<Self, LandmarkError> {
        if points.len() != FACE_MESH_POINT_COUNT {
            return Err(LandmarkError::PointCount {
                expected: FACE_MESH_POINT_COUNT,
                actual: points.len(),
            });
        }
        let left =
            EyeLandmarks::from_slice(&points[LEFT_EYE_OFFSET..LEFT_EYE_OFFSET + EYE_POINT_COUNT])?;
        let right = EyeLandmarks::from_slice(
            &points[RIGHT_EYE_OFFSET..RIGHT_EYE_OFFSET + EYE_POINT_COUNT],
        )?;
        Ok(Self { left, right })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contour() -> [Point2; EYE_POINT_COUNT] {
        [
            Point2::new(100.0, 200.0),
            Point2::new(110.0, 192.0),
            Point2::new(122.0, 192.0),
            Point2::new(130.0, 200.0),
            Point2::new(122.0, 208.0),
            Point2::new(110.0, 208.0),
        ]
    }

    #[test]
    fn test_valid_contour() {
        let eye = EyeLandmarks::new(contour()).unwrap();
        assert_eq!(eye.outer_corner(), Point2::new(100.0, 200.0));
        assert_eq!(eye.inner_corner(), Point2::new(130.0, 200.0));
    }

    #[test]
    fn test_wrong_point_count() {
        let points = vec![Point2::new(0.0, 0.0); 5];
        let err = EyeLandmarks::from_slice(&points).unwrap_err();
        assert!(matches!(
            err,
            LandmarkError::PointCount { expected: 6, actual: 5 }
        ));
    }

    #[test]
    fn test_non_finite_coordinate() {
        let mut points = contour();
        points[2].y = f32::NAN;
        assert!(EyeLandmarks::new(points).is_err());

        let mut points = contour();
        points[4].x = f32::INFINITY;
        assert!(EyeLandmarks::new(points).is_err());
    }

    #[test]
    fn test_face_mesh_eye_regions() {
        // Mesh filled with a marker point except at the two eye regions
        let mut mesh = vec![Point2::new(1.0, 1.0); FACE_MESH_POINT_COUNT];
        for (i, p) in contour().iter().enumerate() {
            mesh[LEFT_EYE_OFFSET + i] = *p;
            mesh[RIGHT_EYE_OFFSET + i] = Point2::new(p.x + 60.0, p.y);
        }

        let face = FaceObservation::from_face_mesh(&mesh).unwrap();
        assert_eq!(face.left.outer_corner(), Point2::new(100.0, 200.0));
        assert_eq!(face.right.outer_corner(), Point2::new(160.0, 200.0));
    }

    #[test]
    fn test_face_mesh_wrong_size() {
        let mesh = vec![Point2::new(0.0, 0.0); 48];
        assert!(FaceObservation::from_face_mesh(&mesh).is_err());
    }

    #[test]
    fn test_face_mesh_non_finite_eye_point() {
        let mut mesh = vec![Point2::new(1.0, 1.0); FACE_MESH_POINT_COUNT];
        mesh[LEFT_EYE_OFFSET + 3] = Point2::new(f32::NAN, 0.0);
        assert!(FaceObservation::from_face_mesh(&mesh).is_err());
    }
}
