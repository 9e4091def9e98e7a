use crate::error::Result;
use crate::geometry::Region;
use crate::math::Point2;

use super::engine::boolean_execute;
use super::select::BooleanOp;

/// Subtracts the union of a set of polygons from a subject polygon.
pub struct Subtract2D<'a> {
    subject: &'a [Point2],
    clips: &'a [Vec<Point2>],
}

impl<'a> Subtract2D<'a> {
    /// Creates a new `Subtract2D` operation.
    #[must_use]
    pub fn new(subject: &'a [Point2], clips: &'a [Vec<Point2>]) -> Self {
        Self { subject, clips }
    }

    /// Executes the subtraction.
    ///
    /// # Errors
    ///
    /// Returns `OperationError::InvalidInput` if the subject has fewer than
    /// 3 vertices.
    pub fn execute(&self) -> Result<Vec<Region>> {
        boolean_execute(self.subject, self.clips, BooleanOp::Subtract)
    }
}
