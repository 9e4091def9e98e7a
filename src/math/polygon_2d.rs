use super::{cross_2d, Point2, Vector2, TOLERANCE};
use crate::error::{GeometryError, Result};

/// Computes the signed area of a polygon (shoelace formula).
///
/// Positive for counter-clockwise, negative for clockwise.
#[must_use]
pub fn signed_area_2d(points: &[Point2]) -> f64 {
    let n = points.len();
    if n < 3 {
        return 0.0;
    }
    let mut sum = 0.0;
    for i in 0..n {
        let j = (i + 1) % n;
        sum += points[i].x * points[j].y - points[j].x * points[i].y;
    }
    sum * 0.5
}

/// Returns `true` if the polygon winds clockwise (negative signed area).
#[must_use]
pub fn is_clockwise(points: &[Point2]) -> bool {
    signed_area_2d(points) < 0.0
}

/// Returns the polygon with clockwise winding, reversing it if needed.
#[must_use]
pub fn ensure_clockwise(points: &[Point2]) -> Vec<Point2> {
    if signed_area_2d(points) > 0.0 {
        points.iter().rev().copied().collect()
    } else {
        points.to_vec()
    }
}

/// Returns the polygon with counter-clockwise winding, reversing it if needed.
#[must_use]
pub fn ensure_counter_clockwise(points: &[Point2]) -> Vec<Point2> {
    if signed_area_2d(points) < 0.0 {
        points.iter().rev().copied().collect()
    } else {
        points.to_vec()
    }
}

/// Rotates a closed polygon so it starts at the leftmost vertex (smallest x),
/// breaking ties by smallest y. Ensures deterministic output for tests.
#[must_use]
pub fn rotate_to_canonical_start(points: &[Point2]) -> Vec<Point2> {
    if points.len() < 2 {
        return points.to_vec();
    }
    let mut best = 0;
    for (i, pt) in points.iter().enumerate().skip(1) {
        let b = &points[best];
        if pt.x < b.x - TOLERANCE || (pt.x - b.x).abs() < TOLERANCE && pt.y < b.y {
            best = i;
        }
    }
    if best == 0 {
        return points.to_vec();
    }
    let mut rotated = Vec::with_capacity(points.len());
    rotated.extend_from_slice(&points[best..]);
    rotated.extend_from_slice(&points[..best]);
    rotated
}

/// Removes coincident and collinear vertices from a closed polygon.
///
/// Two vertices closer than `epsilon` are merged; a vertex whose two edges
/// deviate by less than `epsilon` (cross product of unit directions) is
/// dropped. Runs until no vertex is removed.
#[must_use]
pub fn simplify_contour(points: &[Point2], epsilon: f64) -> Vec<Point2> {
    let mut current: Vec<Point2> = Vec::with_capacity(points.len());
    for p in points {
        if current.last().map_or(true, |last| (p - last).norm() >= epsilon) {
            current.push(*p);
        }
    }
    while current.len() > 1 && (current[0] - current[current.len() - 1]).norm() < epsilon {
        current.pop();
    }

    loop {
        let n = current.len();
        if n <= 3 {
            return current;
        }
        let mut removed = false;
        for i in 0..n {
            let prev = current[(i + n - 1) % n];
            let curr = current[i];
            let next = current[(i + 1) % n];
            let d0 = curr - prev;
            let d1 = next - curr;
            let (l0, l1) = (d0.norm(), d1.norm());
            if l0 < epsilon || l1 < epsilon || cross_2d(&(d0 / l0), &(d1 / l1)).abs() < epsilon {
                current.remove(i);
                removed = true;
                break;
            }
        }
        if !removed {
            return current;
        }
    }
}

/// Checks if a point is inside a polygon using ray casting.
#[must_use]
pub fn point_in_polygon(point: &Point2, polygon: &[Point2]) -> bool {
    if polygon.len() < 3 {
        return false;
    }

    let mut inside = false;
    let n = polygon.len();
    let mut j = n - 1;
    for i in 0..n {
        let pi = &polygon[i];
        let pj = &polygon[j];
        if ((pi.y > point.y) != (pj.y > point.y))
            && (point.x < (pj.x - pi.x) * (point.y - pi.y) / (pj.y - pi.y) + pi.x)
        {
            inside = !inside;
        }
        j = i;
    }
    inside
}

/// Computes the normalized direction from point `a` to point `b`.
///
/// # Errors
///
/// Returns `GeometryError::ZeroVector` if the segment has zero length.
pub fn segment_direction(a: &Point2, b: &Point2) -> Result<Vector2> {
    let d = b - a;
    let len = d.norm();
    if len < TOLERANCE {
        return Err(GeometryError::ZeroVector.into());
    }
    Ok(d / len)
}

/// Returns the left-pointing normal of a direction vector.
///
/// For a clockwise polygon this is the outward normal of an edge.
#[must_use]
pub fn left_normal(dir: Vector2) -> Vector2 {
    Vector2::new(-dir.y, dir.x)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn cw_square() -> Vec<Point2> {
        vec![
            Point2::new(0.0, 0.0),
            Point2::new(0.0, 1.0),
            Point2::new(1.0, 1.0),
            Point2::new(1.0, 0.0),
        ]
    }

    #[test]
    fn signed_area_cw_square() {
        let area = signed_area_2d(&cw_square());
        assert!((area + 1.0).abs() < TOLERANCE);
        assert!(is_clockwise(&cw_square()));
    }

    #[test]
    fn signed_area_degenerate() {
        assert!((signed_area_2d(&[Point2::new(0.0, 0.0)])).abs() < TOLERANCE);
        assert!((signed_area_2d(&[])).abs() < TOLERANCE);
    }

    #[test]
    fn winding_normalization() {
        let ccw = ensure_counter_clockwise(&cw_square());
        assert!(!is_clockwise(&ccw));
        let cw = ensure_clockwise(&ccw);
        assert!(is_clockwise(&cw));
    }

    #[test]
    fn canonical_start_rotation() {
        let pts = vec![
            Point2::new(1.0, 0.0),
            Point2::new(1.0, 1.0),
            Point2::new(0.0, 1.0),
            Point2::new(0.0, 0.0),
        ];
        let rotated = rotate_to_canonical_start(&pts);
        assert!((rotated[0].x).abs() < TOLERANCE);
        assert!((rotated[0].y).abs() < TOLERANCE);
    }

    #[test]
    fn simplify_drops_collinear_and_duplicates() {
        let pts = vec![
            Point2::new(0.0, 0.0),
            Point2::new(0.0, 0.5),
            Point2::new(0.0, 1.0),
            Point2::new(1.0, 1.0),
            Point2::new(1.0, 1.0),
            Point2::new(1.0, 0.0),
            Point2::new(0.0, 0.0),
        ];
        let simplified = simplify_contour(&pts, 1e-9);
        assert_eq!(simplified.len(), 4, "{simplified:?}");
    }

    #[test]
    fn point_in_square() {
        assert!(point_in_polygon(&Point2::new(0.5, 0.5), &cw_square()));
        assert!(!point_in_polygon(&Point2::new(1.5, 0.5), &cw_square()));
    }

    #[test]
    fn segment_direction_zero_length() {
        let a = Point2::new(1.0, 1.0);
        assert!(segment_direction(&a, &a).is_err());
        let dir = segment_direction(&a, &Point2::new(4.0, 5.0)).unwrap();
        assert!((dir.x - 0.6).abs() < TOLERANCE);
    }

    #[test]
    fn left_normal_points_outward_for_cw() {
        // Edge (0,0)->(0,1) of a CW square: outside is x < 0.
        let n = left_normal(Vector2::new(0.0, 1.0));
        assert!((n.x + 1.0).abs() < TOLERANCE);
        assert!(n.y.abs() < TOLERANCE);
    }
}
