use crate::math::distance_2d::{point_to_line_dist, point_to_segment_dist};
use crate::math::intersect_2d::{point_at, project_onto_line, project_parameter};
use crate::math::polygon_2d::left_normal;
use crate::math::{cross_2d, Point2, Vector2, TOLERANCE};

/// A directed 2D line segment.
///
/// Parametric positions are measured along `start`→`end`: `0` is `start`,
/// `1` is `end`. For an edge of a clockwise polygon the left normal points
/// outward.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment2 {
    pub start: Point2,
    pub end: Point2,
}

impl Segment2 {
    /// Creates a new segment.
    #[must_use]
    pub fn new(start: Point2, end: Point2) -> Self {
        Self { start, end }
    }

    /// Returns the `i`-th edge of a closed polygon (`vertex[i]`→`vertex[i+1]`).
    ///
    /// # Panics
    ///
    /// Panics if `polygon` is empty.
    #[must_use]
    pub fn polygon_edge(polygon: &[Point2], i: usize) -> Self {
        let n = polygon.len();
        Self::new(polygon[i % n], polygon[(i + 1) % n])
    }

    #[must_use]
    pub fn length(&self) -> f64 {
        (self.end - self.start).norm()
    }

    /// Unit direction, or zero for a degenerate segment.
    #[must_use]
    pub fn direction(&self) -> Vector2 {
        let d = self.end - self.start;
        let len = d.norm();
        if len < TOLERANCE {
            Vector2::zeros()
        } else {
            d / len
        }
    }

    /// Outward normal when the segment is an edge of a clockwise polygon.
    #[must_use]
    pub fn outward_normal(&self) -> Vector2 {
        left_normal(self.direction())
    }

    /// Parametric position of the projection of `point` onto the supporting line.
    #[must_use]
    pub fn parameter_of(&self, point: &Point2) -> f64 {
        project_parameter(point, &self.start, &self.end)
    }

    /// Point at parametric position `t` on the supporting line.
    #[must_use]
    pub fn point_at(&self, t: f64) -> Point2 {
        point_at(&self.start, &self.end, t)
    }

    /// Projection of `point` onto the supporting line.
    #[must_use]
    pub fn project(&self, point: &Point2) -> Point2 {
        project_onto_line(point, &self.start, &self.end)
    }

    /// Signed side of `point`: positive on the left (outside for a clockwise
    /// polygon edge), negative on the right.
    #[must_use]
    pub fn side_of(&self, point: &Point2) -> f64 {
        cross_2d(&(self.end - self.start), &(point - self.start))
    }

    /// Signed perpendicular distance of `point`, positive on the left.
    #[must_use]
    pub fn signed_distance(&self, point: &Point2) -> f64 {
        let len = self.length();
        if len < TOLERANCE {
            return 0.0;
        }
        self.side_of(point) / len
    }

    #[must_use]
    pub fn distance_to(&self, point: &Point2) -> f64 {
        point_to_segment_dist(point, &self.start, &self.end)
    }

    #[must_use]
    pub fn line_distance_to(&self, point: &Point2) -> f64 {
        point_to_line_dist(point, &self.start, &self.end)
    }

    /// Returns `true` if `other` runs along this segment: parallel (either
    /// direction), both endpoints within `distance` of the supporting line,
    /// and the two spans overlap by more than `distance`.
    #[must_use]
    pub fn runs_along(&self, other: &Segment2, distance: f64) -> bool {
        let len = self.length();
        if len < TOLERANCE || other.length() < TOLERANCE {
            return false;
        }
        if cross_2d(&self.direction(), &other.direction()).abs() > distance / len.max(1.0) {
            return false;
        }
        if self.line_distance_to(&other.start) > distance
            || self.line_distance_to(&other.end) > distance
        {
            return false;
        }
        let t0 = self.parameter_of(&other.start);
        let t1 = self.parameter_of(&other.end);
        let overlap = t0.max(t1).min(1.0) - t0.min(t1).max(0.0);
        overlap * len > distance
    }
}
