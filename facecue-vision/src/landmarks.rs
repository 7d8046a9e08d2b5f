use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::shape::{self, FaceShape};

/// Number of points in the standard 68-point landmark layout
pub const LANDMARK_COUNT: usize = 68;

const JAW_OUTLINE: std::ops::Range<usize> = 0..17;
// Jaw plus both eyebrows; 17 and 26 are the outer brow ends
const FACE_CONTOUR: std::ops::Range<usize> = 0..27;

/// A 2D landmark position in image coordinates
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Scale both axes independently (used when resizing detections)
    pub fn scale(self, sx: f64, sy: f64) -> Self {
        Self {
            x: self.x * sx,
            y: self.y * sy,
        }
    }
}

/// 68-point facial landmarks as produced by the external detector
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Point>", into = "Vec<Point>")]
pub struct FaceLandmarks {
    points: Vec<Point>,
}

impl FaceLandmarks {
    pub fn new(points: Vec<Point>) -> Result<Self> {
        if points.len() != LANDMARK_COUNT {
            return Err(Error::InvalidLandmarkCount {
                expected: LANDMARK_COUNT,
                actual: points.len(),
            });
        }
        Ok(Self { points })
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Lower face boundary, corner to corner through the chin
    pub fn jaw_outline(&self) -> &[Point] {
        &self.points[JAW_OUTLINE]
    }

    /// Outer face boundary: jaw outline followed by both eyebrows
    pub fn face_contour(&self) -> &[Point] {
        &self.points[FACE_CONTOUR]
    }

    pub fn classify_shape(&self) -> Result<FaceShape> {
        classify_landmarks(&self.points)
    }
}

/// Classify a borrowed 68-point landmark slice without taking ownership
pub fn classify_landmarks(points: &[Point]) -> Result<FaceShape> {
    if points.len() != LANDMARK_COUNT {
        return Err(Error::InvalidLandmarkCount {
            expected: LANDMARK_COUNT,
            actual: points.len(),
        });
    }
    shape::classify(&points[JAW_OUTLINE], &points[FACE_CONTOUR])
}

impl TryFrom<Vec<Point>> for FaceLandmarks {
    type Error = Error;

    fn try_from(points: Vec<Point>) -> Result<Self> {
        Self::new(points)
    }
}

impl From<FaceLandmarks> for Vec<Point> {
    fn from(landmarks: FaceLandmarks) -> Self {
        landmarks.points
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid() -> Vec<Point> {
        (0..LANDMARK_COUNT)
            .map(|i| Point::new(i as f64, (i * 2) as f64))
            .collect()
    }

    #[test]
    fn test_rejects_wrong_count() {
        let err = FaceLandmarks::new(vec![Point::default(); 5]).unwrap_err();
        assert_eq!(
            err,
            Error::InvalidLandmarkCount {
                expected: 68,
                actual: 5
            }
        );
    }

    #[test]
    fn test_outline_slices() {
        let lm = FaceLandmarks::new(grid()).unwrap();
        assert_eq!(lm.jaw_outline().len(), 17);
        assert_eq!(lm.face_contour().len(), 27);
        assert_eq!(lm.face_contour()[17], Point::new(17.0, 34.0));
        assert_eq!(lm.face_contour()[26], Point::new(26.0, 52.0));
    }

    #[test]
    fn test_classify_borrowed_slice() {
        let points = grid();
        let owned = FaceLandmarks::new(points.clone()).unwrap();
        assert_eq!(classify_landmarks(&points), owned.classify_shape());
        assert_eq!(
            classify_landmarks(&points[..20]),
            Err(Error::InvalidLandmarkCount {
                expected: 68,
                actual: 20
            })
        );
    }

    #[test]
    fn test_point_scale() {
        assert_eq!(Point::new(10.0, 20.0).scale(2.0, 0.5), Point::new(20.0, 10.0));
    }

    #[test]
    fn test_deserialize_checks_count() {
        let json = serde_json::to_string(&grid()).unwrap();
        let lm: FaceLandmarks = serde_json::from_str(&json).unwrap();
        assert_eq!(lm.points().len(), 68);

        let short = serde_json::from_str::<FaceLandmarks>(r#"[{"x":1,"y":2}]"#);
        assert!(short.is_err());
    }
}
