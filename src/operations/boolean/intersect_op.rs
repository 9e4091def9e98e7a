use crate::error::Result;
use crate::geometry::Region;
use crate::math::Point2;

use super::engine::boolean_execute;
use super::select::BooleanOp;

/// Computes the boolean intersection of two polygons.
pub struct Intersect2D<'a> {
    subject: &'a [Point2],
    clip: &'a [Point2],
}

impl<'a> Intersect2D<'a> {
    /// Creates a new `Intersect2D` operation.
    #[must_use]
    pub fn new(subject: &'a [Point2], clip: &'a [Point2]) -> Self {
        Self { subject, clip }
    }

    /// Executes the intersection.
    ///
    /// Returns one region per connected piece of the overlap; an empty list
    /// when the polygons are disjoint.
    ///
    /// # Errors
    ///
    /// Returns `OperationError::InvalidInput` if the subject has fewer than
    /// 3 vertices.
    pub fn execute(&self) -> Result<Vec<Region>> {
        boolean_execute(self.subject, &[self.clip.to_vec()], BooleanOp::Intersect)
    }
}
