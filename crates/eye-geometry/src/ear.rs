//! Eye Aspect Ratio Computation

use crate::landmarks::{EyeLandmarks, FaceObservation};

/// Corner-to-corner widths at or below this are treated as degenerate geometry
pub const MIN_EYE_WIDTH: f32 = 1e-6;

/// Compute the eye aspect ratio for one eye contour.
///
/// With points p0..p5 in anatomical index order:
///
/// ```text
/// EAR = (|p1 - p5| + |p2 - p4|) / (2 * |p0 - p3|)
/// ```
///
/// Returns `None` when the corner-to-corner width is degenerate. Callers must
/// treat that as "no usable signal", never as a closed eye.
pub fn eye_aspect_ratio(eye: &EyeLandmarks) -> Option<f32> {
    let p = eye.points();
    let width = p[0].distance(&p[3]);
    if width <= MIN_EYE_WIDTH {
        return None;
    }
    let upper = p[1].distance(&p[5]);
    let lower = p[2].distance(&p[4]);
    Some((upper + lower) / (2.0 * width))
}

/// Average EAR over both eyes, `None` if either eye is degenerate
pub fn average_ear(face: &FaceObservation) -> Option<f32> {
    let left = eye_aspect_ratio(&face.left)?;
    let right = eye_aspect_ratio(&face.right)?;
    Some((left + right) / 2.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::landmarks::{Point2, EYE_POINT_COUNT};
    use proptest::prelude::*;

    fn eye_from(points: [(f32, f32); EYE_POINT_COUNT]) -> EyeLandmarks {
        let points = points.map(|(x, y)| Point2::new(x, y));
        EyeLandmarks::new(points).unwrap()
    }

    /// Contour with vertical openings of 16px over a 30px width: EAR = 32/60
    fn open_eye() -> EyeLandmarks {
        eye_from([
            (100.0, 200.0),
            (110.0, 192.0),
            (122.0, 192.0),
            (130.0, 200.0),
            (122.0, 208.0),
            (110.0, 208.0),
        ])
    }

    /// Lids collapsed onto the corner axis: EAR = 0
    fn closed_eye() -> EyeLandmarks {
        eye_from([
            (100.0, 200.0),
            (110.0, 200.0),
            (122.0, 200.0),
            (130.0, 200.0),
            (122.0, 200.0),
            (110.0, 200.0),
        ])
    }

    #[test]
    fn test_open_eye_ratio() {
        let ear = eye_aspect_ratio(&open_eye()).unwrap();
        assert!((ear - 32.0 / 60.0).abs() < 1e-6);
    }

    #[test]
    fn test_closed_eye_ratio() {
        let ear = eye_aspect_ratio(&closed_eye()).unwrap();
        assert!(ear.abs() < 1e-6);
    }

    #[test]
    fn test_coincident_corners_undefined() {
        // Outer and inner corner at the same point: zero width
        let eye = eye_from([
            (100.0, 200.0),
            (110.0, 192.0),
            (122.0, 192.0),
            (100.0, 200.0),
            (122.0, 208.0),
            (110.0, 208.0),
        ]);
        assert_eq!(eye_aspect_ratio(&eye), None);
    }

    #[test]
    fn test_average_ear() {
        let face = FaceObservation::new(open_eye(), closed_eye());
        let ear = average_ear(&face).unwrap();
        assert!((ear - 16.0 / 60.0).abs() < 1e-6);
    }

    #[test]
    fn test_average_ear_degenerate_eye() {
        let degenerate = eye_from([
            (50.0, 50.0),
            (50.0, 50.0),
            (50.0, 50.0),
            (50.0, 50.0),
            (50.0, 50.0),
            (50.0, 50.0),
        ]);
        let face = FaceObservation::new(open_eye(), degenerate);
        assert_eq!(average_ear(&face), None);
    }

    proptest! {
        #[test]
        fn test_scale_invariance(scale in 0.01f32..100.0) {
            let base = eye_aspect_ratio(&open_eye()).unwrap();
            let points = open_eye()
                .points()
                .map(|p| Point2::new(p.x * scale, p.y * scale));
            let scaled = eye_aspect_ratio(&EyeLandmarks::new(points).unwrap()).unwrap();
            prop_assert!((scaled - base).abs() < 1e-3);
        }

        #[test]
        fn test_translation_invariance(dx in -5000.0f32..5000.0, dy in -5000.0f32..5000.0) {
            let base = eye_aspect_ratio(&open_eye()).unwrap();
            let points = open_eye()
                .points()
                .map(|p| Point2::new(p.x + dx, p.y + dy));
            let translated = eye_aspect_ratio(&EyeLandmarks::new(points).unwrap()).unwrap();
            prop_assert!((translated - base).abs() < 1e-3);
        }
    }
}
