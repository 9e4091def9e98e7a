use crate::error::Result;
use crate::geometry::Region;
use crate::math::polygon_2d;
use crate::math::Point2;

use super::boolean::{Intersect2D, Subtract2D};
use super::offset::PolygonOffset2D;

/// Polygon primitives consumed by the floor plan builder.
///
/// Implementations must return outer contours wound clockwise and report
/// holes separately, so callers can reject holed results.
pub trait PolygonOps {
    /// Intersects `subject` with `clip`, one region per connected piece.
    ///
    /// # Errors
    ///
    /// Returns an error if the inputs are degenerate.
    fn intersect(&self, subject: &[Point2], clip: &[Point2]) -> Result<Vec<Region>>;

    /// Subtracts the union of `clips` from `subject`.
    ///
    /// # Errors
    ///
    /// Returns an error if the inputs are degenerate.
    fn difference(&self, subject: &[Point2], clips: &[Vec<Point2>]) -> Result<Vec<Region>>;

    fn is_clockwise(&self, polygon: &[Point2]) -> bool;

    /// Offsets `polygon` inward by `distance` (outward when negative).
    ///
    /// # Errors
    ///
    /// Returns an error if the polygon collapses.
    fn shrink(&self, polygon: &[Point2], distance: f64) -> Result<Vec<Point2>>;
}

/// Default [`PolygonOps`]: boolean operations through `i_overlay`, offsets
/// through [`PolygonOffset2D`].
#[derive(Debug, Clone, Copy, Default)]
pub struct OverlayPolygonOps;

impl PolygonOps for OverlayPolygonOps {
    fn intersect(&self, subject: &[Point2], clip: &[Point2]) -> Result<Vec<Region>> {
        Intersect2D::new(subject, clip).execute()
    }

    fn difference(&self, subject: &[Point2], clips: &[Vec<Point2>]) -> Result<Vec<Region>> {
        Subtract2D::new(subject, clips).execute()
    }

    fn is_clockwise(&self, polygon: &[Point2]) -> bool {
        polygon_2d::is_clockwise(polygon)
    }

    fn shrink(&self, polygon: &[Point2], distance: f64) -> Result<Vec<Point2>> {
        PolygonOffset2D::new(polygon.to_vec(), distance).execute()
    }
}
