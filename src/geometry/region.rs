use crate::math::polygon_2d::signed_area_2d;
use crate::math::Point2;

/// A polygonal region: one outer contour and zero or more holes.
///
/// Produced by boolean operations. The outer contour winds clockwise, holes
/// wind counter-clockwise.
#[derive(Debug, Clone, PartialEq)]
pub struct Region {
    pub outer: Vec<Point2>,
    pub holes: Vec<Vec<Point2>>,
}

impl Region {
    /// Creates a region without holes.
    #[must_use]
    pub fn simple(outer: Vec<Point2>) -> Self {
        Self {
            outer,
            holes: Vec::new(),
        }
    }

    #[must_use]
    pub fn has_holes(&self) -> bool {
        !self.holes.is_empty()
    }

    /// Area of the outer contour minus the area of the holes.
    #[must_use]
    pub fn area(&self) -> f64 {
        let holes: f64 = self.holes.iter().map(|h| signed_area_2d(h).abs()).sum();
        signed_area_2d(&self.outer).abs() - holes
    }
}
