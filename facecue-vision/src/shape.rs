//! Face shape heuristic from jaw and contour landmarks.
//!
//! Four horizontal/vertical distances are taken from the outlines and turned
//! into three ratios, which then run through an ordered rule chain where the
//! first matching rule decides the label:
//!
//! | rule | condition | label |
//! |------|-----------|-------|
//! | 1 | jaw/height < 1.2 and cheek/forehead < 1.5 | Round |
//! | 2 | jaw/height > 1.5 and cheek/forehead > 1.4 | Square |
//! | 3 | jaw/height > 1.3 and cheek/forehead < 1.5 | Oval |
//! | 4 | first jaw point left of the chin point | Heart |
//! | 5 | cheek/forehead < 1.2 and jaw/cheek < 1.5 | Diamond |
//! | - | otherwise | Undetermined |
//!
//! Zero-width measurements are not rejected. Ratios follow IEEE 754 (`x/0`
//! is infinite, `0/0` is NaN and fails every comparison).

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::landmarks::Point;

/// Jaw needs index 3 and index `len - 4` to be distinct cheekbone points
pub const MIN_JAW_POINTS: usize = 8;
/// Contour needs the forehead corners at 17 and 26
pub const MIN_CONTOUR_POINTS: usize = 27;

const FOREHEAD_LEFT: usize = 17;
const FOREHEAD_RIGHT: usize = 26;
const CHEEKBONE_OFFSET: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FaceShape {
    Round,
    Square,
    Oval,
    Heart,
    Diamond,
    Undetermined,
}

impl FaceShape {
    pub const ALL: [FaceShape; 6] = [
        FaceShape::Round,
        FaceShape::Square,
        FaceShape::Oval,
        FaceShape::Heart,
        FaceShape::Diamond,
        FaceShape::Undetermined,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FaceShape::Round => "Round",
            FaceShape::Square => "Square",
            FaceShape::Oval => "Oval",
            FaceShape::Heart => "Heart",
            FaceShape::Diamond => "Diamond",
            FaceShape::Undetermined => "Undetermined",
        }
    }
}

impl fmt::Display for FaceShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raw distances and derived ratios used by the rule chain
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ShapeMeasurements {
    pub jaw_width: f64,
    pub jaw_height: f64,
    pub cheekbone_width: f64,
    pub forehead_width: f64,
    pub jaw_to_cheek: f64,
    pub jaw_to_height: f64,
    pub cheek_to_forehead: f64,
    /// Heart rule compares coordinates directly, not ratios
    pub jaw_left_of_chin: bool,
}

impl ShapeMeasurements {
    pub fn measure(jaw: &[Point], contour: &[Point]) -> Result<Self> {
        check_len("jaw outline", jaw, MIN_JAW_POINTS)?;
        check_len("face contour", contour, MIN_CONTOUR_POINTS)?;

        let first = jaw[0];
        let last = jaw[jaw.len() - 1];
        let chin = jaw[jaw.len() / 2];

        let jaw_width = (first.x - last.x).abs();
        let jaw_height = (first.y - chin.y).abs();
        let cheekbone_width =
            (jaw[CHEEKBONE_OFFSET].x - jaw[jaw.len() - 1 - CHEEKBONE_OFFSET].x).abs();
        let forehead_width = (contour[FOREHEAD_LEFT].x - contour[FOREHEAD_RIGHT].x).abs();

        Ok(Self {
            jaw_width,
            jaw_height,
            cheekbone_width,
            forehead_width,
            jaw_to_cheek: jaw_width / cheekbone_width,
            jaw_to_height: jaw_width / jaw_height,
            cheek_to_forehead: cheekbone_width / forehead_width,
            jaw_left_of_chin: first.x < chin.x,
        })
    }

    /// Run the ordered rule chain; first match wins
    pub fn shape(&self) -> FaceShape {
        let jh = self.jaw_to_height;
        let cf = self.cheek_to_forehead;

        if jh < 1.2 && cf < 1.5 {
            FaceShape::Round
        } else if jh > 1.5 && cf > 1.4 {
            FaceShape::Square
        } else if jh > 1.3 && cf < 1.5 {
            FaceShape::Oval
        } else if self.jaw_left_of_chin {
            FaceShape::Heart
        } else if cf < 1.2 && self.jaw_to_cheek < 1.5 {
            FaceShape::Diamond
        } else {
            FaceShape::Undetermined
        }
    }
}

fn check_len(outline: &'static str, points: &[Point], required: usize) -> Result<()> {
    if points.len() < required {
        return Err(Error::IndexOutOfRange {
            outline,
            required,
            actual: points.len(),
        });
    }
    Ok(())
}

/// Classify a face shape from its jaw outline and face contour.
///
/// Fails with [`Error::IndexOutOfRange`] when `jaw` has fewer than
/// [`MIN_JAW_POINTS`] or `contour` fewer than [`MIN_CONTOUR_POINTS`] points.
pub fn classify(jaw: &[Point], contour: &[Point]) -> Result<FaceShape> {
    let m = ShapeMeasurements::measure(jaw, contour)?;
    let shape = m.shape();
    log::trace!(
        "jaw/height {:.3}, cheek/forehead {:.3}, jaw/cheek {:.3} -> {}",
        m.jaw_to_height,
        m.cheek_to_forehead,
        m.jaw_to_cheek,
        shape
    );
    Ok(shape)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contour(left: f64, right: f64) -> Vec<Point> {
        let mut c = vec![Point::default(); MIN_CONTOUR_POINTS];
        c[FOREHEAD_LEFT] = Point::new(left, 0.0);
        c[FOREHEAD_RIGHT] = Point::new(right, 0.0);
        c
    }

    // 9-point jaw; index 4 is the chin, 3 and 5 the cheekbones
    fn jaw(first: Point, cheek_l: f64, chin: Point, cheek_r: f64, last: Point) -> Vec<Point> {
        let mut j = vec![Point::default(); 9];
        j[0] = first;
        j[3] = Point::new(cheek_l, 0.0);
        j[4] = chin;
        j[5] = Point::new(cheek_r, 0.0);
        j[8] = last;
        j
    }

    #[test]
    fn test_measurements() {
        let j = jaw(
            Point::new(0.0, 100.0),
            20.0,
            Point::new(50.0, 60.0),
            80.0,
            Point::new(100.0, 100.0),
        );
        let m = ShapeMeasurements::measure(&j, &contour(10.0, 90.0)).unwrap();
        assert_eq!(m.jaw_width, 100.0);
        assert_eq!(m.jaw_height, 40.0);
        assert_eq!(m.cheekbone_width, 60.0);
        assert_eq!(m.forehead_width, 80.0);
        assert_eq!(m.jaw_to_height, 2.5);
        assert_eq!(m.cheek_to_forehead, 0.75);
        assert!((m.jaw_to_cheek - 100.0 / 60.0).abs() < 1e-12);
        assert!(m.jaw_left_of_chin);
    }

    #[test]
    fn test_round() {
        // jaw/height = 100/100 = 1.0, cheek/forehead = 60/80
        let j = jaw(
            Point::new(0.0, 100.0),
            20.0,
            Point::new(50.0, 0.0),
            80.0,
            Point::new(100.0, 100.0),
        );
        assert_eq!(classify(&j, &contour(10.0, 90.0)).unwrap(), FaceShape::Round);
    }

    #[test]
    fn test_square() {
        // jaw/height = 2.5, cheek/forehead = 60/40 = 1.5
        let j = jaw(
            Point::new(0.0, 100.0),
            20.0,
            Point::new(50.0, 60.0),
            80.0,
            Point::new(100.0, 100.0),
        );
        assert_eq!(classify(&j, &contour(30.0, 70.0)).unwrap(), FaceShape::Square);
    }

    #[test]
    fn test_heart_beats_diamond() {
        // jaw/height = 1.25 misses the first three rules, first.x < chin.x
        let j = jaw(
            Point::new(0.0, 100.0),
            20.0,
            Point::new(50.0, 20.0),
            80.0,
            Point::new(100.0, 100.0),
        );
        assert_eq!(classify(&j, &contour(10.0, 90.0)).unwrap(), FaceShape::Heart);
    }

    #[test]
    fn test_diamond() {
        // mirrored jaw so the Heart check fails, jaw/cheek = 100/80
        let j = jaw(
            Point::new(100.0, 100.0),
            90.0,
            Point::new(50.0, 20.0),
            10.0,
            Point::new(0.0, 100.0),
        );
        assert_eq!(classify(&j, &contour(0.0, 80.0)).unwrap(), FaceShape::Diamond);
    }

    #[test]
    fn test_undetermined() {
        // mirrored, cheek/forehead = 80/40 = 2.0 fails Diamond
        let j = jaw(
            Point::new(100.0, 100.0),
            90.0,
            Point::new(50.0, 20.0),
            10.0,
            Point::new(0.0, 100.0),
        );
        assert_eq!(
            classify(&j, &contour(30.0, 70.0)).unwrap(),
            FaceShape::Undetermined
        );
    }

    #[test]
    fn test_all_points_equal_is_undetermined() {
        let j = vec![Point::new(5.0, 5.0); 17];
        let c = vec![Point::new(5.0, 5.0); 27];
        let m = ShapeMeasurements::measure(&j, &c).unwrap();
        assert!(m.jaw_to_height.is_nan());
        assert!(m.cheek_to_forehead.is_nan());
        assert_eq!(m.shape(), FaceShape::Undetermined);
    }

    #[test]
    fn test_zero_height_infinite_ratio() {
        // flat jaw: jaw/height = inf, cheek/forehead = 60/80
        let j = jaw(
            Point::new(0.0, 100.0),
            20.0,
            Point::new(50.0, 100.0),
            80.0,
            Point::new(100.0, 100.0),
        );
        let m = ShapeMeasurements::measure(&j, &contour(10.0, 90.0)).unwrap();
        assert!(m.jaw_to_height.is_infinite());
        assert_eq!(m.shape(), FaceShape::Oval);
    }

    #[test]
    fn test_short_jaw() {
        let err = classify(&[Point::default(); 3], &contour(0.0, 1.0)).unwrap_err();
        assert_eq!(
            err,
            Error::IndexOutOfRange {
                outline: "jaw outline",
                required: MIN_JAW_POINTS,
                actual: 3
            }
        );
    }

    #[test]
    fn test_short_contour() {
        let err = classify(&[Point::default(); 17], &[Point::default(); 26]).unwrap_err();
        assert!(matches!(
            err,
            Error::IndexOutOfRange {
                outline: "face contour",
                actual: 26,
                ..
            }
        ));
    }

    #[test]
    fn test_display() {
        let names: Vec<String> = FaceShape::ALL.iter().map(|s| s.to_string()).collect();
        assert_eq!(
            names,
            ["Round", "Square", "Oval", "Heart", "Diamond", "Undetermined"]
        );
    }
}
