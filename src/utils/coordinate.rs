use nalgebra::Point2;
use serde::{Deserialize, Serialize};
use crate::utils::utils::round_to;

/// A single landmark point in frame pixel coordinates.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Coordinate2D {
    pub x: f32,
    pub y: f32,
}

/// Face location reported by the detector, top-left corner plus size.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct FaceBox {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl FaceBox {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        FaceBox { x, y, width, height }
    }

    /// centroid returns the geometric center of the box.
    pub fn centroid(&self) -> Point2<f32> {
        Point2::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// max_side is the larger of width and height. Used as the match radius.
    pub fn max_side(&self) -> f32 {
        self.width.max(self.height)
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.width.is_finite() && self.height.is_finite()
    }

    /// rounded snaps every field to the given precision, e.g. 0.1.
    pub fn rounded(&self, precision: f32) -> Self {
        FaceBox {
            x: round_to(self.x, precision),
            y: round_to(self.y, precision),
            width: round_to(self.width, precision),
            height: round_to(self.height, precision),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::utils::coordinate::FaceBox;

    #[test]
    fn test_centroid() {
        let face_box = FaceBox::new(10.0, 10.0, 40.0, 40.0);
        let c = face_box.centroid();
        assert_eq!(c.x, 30.0);
        assert_eq!(c.y, 30.0);
    }

    #[test]
    fn test_max_side() {
        assert_eq!(FaceBox::new(0.0, 0.0, 40.0, 55.0).max_side(), 55.0);
        assert_eq!(FaceBox::new(0.0, 0.0, 61.0, 20.0).max_side(), 61.0);
    }

    #[test]
    fn test_is_finite() {
        assert!(FaceBox::new(1.0, 2.0, 3.0, 4.0).is_finite());
        assert!(!FaceBox::new(f32::NAN, 2.0, 3.0, 4.0).is_finite());
        assert!(!FaceBox::new(1.0, 2.0, f32::INFINITY, 4.0).is_finite());
    }

    #[test]
    fn test_rounded() {
        let face_box = FaceBox::new(10.04, 11.06, 39.97, 40.449).rounded(0.1);
        assert!((face_box.x - 10.0).abs() < 1e-4);
        assert!((face_box.y - 11.1).abs() < 1e-4);
        assert!((face_box.width - 40.0).abs() < 1e-4);
        assert!((face_box.height - 40.4).abs() < 1e-4);
    }

    #[test]
    fn test_deserialize_face_box() {
        let face_box: FaceBox = serde_json::from_str(r#"{"x":12.5,"y":11,"width":40,"height":42}"#).unwrap();
        assert_eq!(face_box, FaceBox::new(12.5, 11.0, 40.0, 42.0));
    }
}
