use super::{cross_2d, Point2, Vector2, TOLERANCE};

/// Parametric 2D line-line intersection.
///
/// Given lines `p1 + t * d1` and `p2 + u * d2`, returns `(t, u)` if not parallel.
#[must_use]
pub fn line_line_intersect_2d(
    p1: &Point2,
    d1: &Vector2,
    p2: &Point2,
    d2: &Vector2,
) -> Option<(f64, f64)> {
    let cross = cross_2d(d1, d2);
    if cross.abs() < TOLERANCE {
        return None;
    }
    let delta = p2 - p1;
    let t = cross_2d(&delta, d2) / cross;
    let u = cross_2d(&delta, d1) / cross;
    Some((t, u))
}

/// Parametric position of `point` projected onto the line through `a` and `b`.
///
/// `0` maps to `a`, `1` maps to `b`. Values outside `[0, 1]` lie on the
/// line's extension. A degenerate line returns `0`.
#[must_use]
pub fn project_parameter(point: &Point2, a: &Point2, b: &Point2) -> f64 {
    let ab = b - a;
    let len_sq = ab.norm_squared();
    if len_sq < TOLERANCE * TOLERANCE {
        return 0.0;
    }
    (point - a).dot(&ab) / len_sq
}

/// Linear interpolation between `a` and `b`: `a + (b - a) * t`.
#[must_use]
pub fn point_at(a: &Point2, b: &Point2, t: f64) -> Point2 {
    a + (b - a) * t
}

/// Projects `point` onto the infinite line through `a` and `b`.
#[must_use]
pub fn project_onto_line(point: &Point2, a: &Point2, b: &Point2) -> Point2 {
    point_at(a, b, project_parameter(point, a, b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn perpendicular_lines_intersect() {
        let hit = line_line_intersect_2d(
            &Point2::new(0.0, 0.0),
            &Vector2::new(1.0, 0.0),
            &Point2::new(2.0, -1.0),
            &Vector2::new(0.0, 1.0),
        );
        let (t, u) = hit.unwrap_or((f64::NAN, f64::NAN));
        assert!((t - 2.0).abs() < TOLERANCE, "t={t}");
        assert!((u - 1.0).abs() < TOLERANCE, "u={u}");
    }

    #[test]
    fn parallel_lines_do_not_intersect() {
        let hit = line_line_intersect_2d(
            &Point2::new(0.0, 0.0),
            &Vector2::new(1.0, 0.0),
            &Point2::new(0.0, 1.0),
            &Vector2::new(-2.0, 0.0),
        );
        assert!(hit.is_none());
    }

    #[test]
    fn projection_parameter_beyond_segment() {
        let a = Point2::new(0.0, 0.0);
        let b = Point2::new(2.0, 0.0);
        assert!((project_parameter(&Point2::new(1.0, 5.0), &a, &b) - 0.5).abs() < TOLERANCE);
        assert!((project_parameter(&Point2::new(-2.0, 1.0), &a, &b) + 1.0).abs() < TOLERANCE);
        let p = project_onto_line(&Point2::new(3.0, 7.0), &a, &b);
        assert!((p.x - 3.0).abs() < TOLERANCE && p.y.abs() < TOLERANCE);
    }
}
