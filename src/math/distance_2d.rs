use super::{cross_2d, Point2, TOLERANCE};

/// Returns the minimum distance from `point` to the segment `a`→`b`.
#[must_use]
pub fn point_to_segment_dist(point: &Point2, a: &Point2, b: &Point2) -> f64 {
    let ab = b - a;
    let len_sq = ab.norm_squared();

    if len_sq < TOLERANCE * TOLERANCE {
        // Degenerate segment (zero length).
        return (point - a).norm();
    }

    // Project point onto the infinite line, clamp to [0, 1].
    let t = ((point - a).dot(&ab) / len_sq).clamp(0.0, 1.0);
    (point - (a + ab * t)).norm()
}

/// Returns the perpendicular distance from `point` to the infinite line
/// through `a` and `b`.
#[must_use]
pub fn point_to_line_dist(point: &Point2, a: &Point2, b: &Point2) -> f64 {
    let ab = b - a;
    let len = ab.norm();
    if len < TOLERANCE {
        return (point - a).norm();
    }
    cross_2d(&ab, &(point - a)).abs() / len
}
