use crate::error::{OperationError, Result};
use crate::math::intersect_2d::line_line_intersect_2d;
use crate::math::polygon_2d::{is_clockwise, left_normal, segment_direction, signed_area_2d};
use crate::math::{Point2, Vector2, TOLERANCE};

/// Offsets a closed polygon by moving every edge along its normal.
///
/// # Algorithm
///
/// 1. **Phase A**: Offset each edge's supporting line by `distance` along the
///    inward normal (the winding decides which side is inward).
/// 2. **Phase B**: Intersect consecutive offset lines to get the new vertices.
/// 3. **Phase C**: An edge whose image collapsed or flipped direction is
///    removed and its neighbours are re-intersected, until every surviving
///    edge keeps its original direction.
///
/// While no edge collapses, vertex `i` of the result is the image of input
/// vertex `i`, so the output can be matched index-for-index with the input.
///
/// # Sign Convention
///
/// - Positive distance: shrink (inward)
/// - Negative distance: expand (outward)
#[derive(Debug)]
pub struct PolygonOffset2D {
    points: Vec<Point2>,
    distance: f64,
}

/// Supporting line of one offset edge.
#[derive(Debug, Clone, Copy)]
struct OffsetLine {
    base: Point2,
    dir: Vector2,
}

impl PolygonOffset2D {
    /// Creates a new polygon offset operation.
    #[must_use]
    pub fn new(points: Vec<Point2>, distance: f64) -> Self {
        Self { points, distance }
    }

    /// Executes the offset, preserving the input winding.
    ///
    /// # Errors
    ///
    /// - `OperationError::InvalidInput` if fewer than 3 points are provided or
    ///   an edge has zero length
    /// - `OperationError::Failed` if the polygon collapses during the offset
    pub fn execute(&self) -> Result<Vec<Point2>> {
        let n = self.points.len();
        if n < 3 {
            return Err(OperationError::InvalidInput(
                "at least 3 points are required for polygon offset".to_owned(),
            )
            .into());
        }

        if self.distance.abs() < TOLERANCE {
            return Ok(self.points.clone());
        }

        // Phase A: offset lines.
        let inward_sign = if is_clockwise(&self.points) { -1.0 } else { 1.0 };
        let mut lines = Vec::with_capacity(n);
        for i in 0..n {
            let a = self.points[i];
            let b = self.points[(i + 1) % n];
            let dir = segment_direction(&a, &b).map_err(|_| {
                OperationError::InvalidInput(format!(
                    "zero-length edge at vertex {i} ({}, {})",
                    a.x, a.y
                ))
            })?;
            let offset = left_normal(dir) * (inward_sign * self.distance);
            lines.push(OffsetLine {
                base: a + offset,
                dir,
            });
        }

        // Phases B & C.
        let mut active: Vec<usize> = (0..n).collect();
        let result = loop {
            if active.len() < 3 {
                return Err(OperationError::Failed(
                    "offset collapsed to fewer than 3 edges".to_owned(),
                )
                .into());
            }

            let vertices = intersect_consecutive(&lines, &active);
            match most_collapsed_edge(&lines, &active, &vertices) {
                Some(k) => {
                    active.remove(k);
                }
                None => break vertices,
            }
        };

        // Inward offset must shrink the polygon without inverting it.
        let original_area = signed_area_2d(&self.points);
        let result_area = signed_area_2d(&result);
        if self.distance > 0.0
            && (original_area * result_area <= 0.0 || result_area.abs() > original_area.abs())
        {
            return Err(OperationError::Failed(
                "offset collapsed (passed through center)".to_owned(),
            )
            .into());
        }

        Ok(result)
    }
}

/// Builds one vertex per active edge: vertex `k` joins the lines of
/// `active[k - 1]` and `active[k]`.
fn intersect_consecutive(lines: &[OffsetLine], active: &[usize]) -> Vec<Point2> {
    let m = active.len();
    let mut vertices = Vec::with_capacity(m);
    for k in 0..m {
        let prev = &lines[active[(k + m - 1) % m]];
        let curr = &lines[active[k]];
        let vertex = match line_line_intersect_2d(&prev.base, &prev.dir, &curr.base, &curr.dir) {
            Some((t, _)) => prev.base + prev.dir * t,
            // Collinear (or reversed) neighbours: the offset start of the edge.
            None => curr.base,
        };
        vertices.push(vertex);
    }
    vertices
}

/// Returns the index (into `active`) of the edge whose image is most
/// collapsed, or `None` if every edge still runs in its original direction.
///
/// An edge that follows an anti-parallel neighbour (a collapsed spike) is
/// always reported first.
fn most_collapsed_edge(lines: &[OffsetLine], active: &[usize], vertices: &[Point2]) -> Option<usize> {
    let m = active.len();
    let mut worst: Option<(usize, f64)> = None;
    for k in 0..m {
        let dir = lines[active[k]].dir;
        let prev_dir = lines[active[(k + m - 1) % m]].dir;
        let along = if prev_dir.dot(&dir) < -1.0 + TOLERANCE {
            f64::NEG_INFINITY
        } else {
            (vertices[(k + 1) % m] - vertices[k]).dot(&dir)
        };
        if along <= TOLERANCE && worst.map_or(true, |(_, w)| along < w) {
            worst = Some((k, along));
        }
    }
    worst.map(|(k, _)| k)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn cw_rect(x0: f64, y0: f64, x1: f64, y1: f64) -> Vec<Point2> {
        vec![
            Point2::new(x0, y0),
            Point2::new(x0, y1),
            Point2::new(x1, y1),
            Point2::new(x1, y0),
        ]
    }

    #[test]
    fn shrink_square_keeps_vertex_order() {
        let square = cw_rect(-10.0, -10.0, 10.0, 10.0);
        let inner = PolygonOffset2D::new(square.clone(), 0.1).execute().unwrap();
        assert_eq!(inner.len(), 4);
        for (o, i) in square.iter().zip(&inner) {
            assert!((i.x.abs() - 9.9).abs() < 1e-9, "{i:?}");
            assert!((i.y.abs() - 9.9).abs() < 1e-9, "{i:?}");
            assert_eq!(o.x.signum(), i.x.signum());
            assert_eq!(o.y.signum(), i.y.signum());
        }
        assert!(is_clockwise(&inner));
    }

    #[test]
    fn expand_restores_shrink() {
        let square = cw_rect(0.0, 0.0, 4.0, 3.0);
        let inner = PolygonOffset2D::new(square.clone(), 0.5).execute().unwrap();
        let outer = PolygonOffset2D::new(inner, -0.5).execute().unwrap();
        for (a, b) in square.iter().zip(&outer) {
            assert!((a - b).norm() < 1e-9, "{a:?} vs {b:?}");
        }
    }

    #[test]
    fn shrink_counter_clockwise_is_also_inward() {
        let ccw: Vec<Point2> = cw_rect(0.0, 0.0, 2.0, 2.0).into_iter().rev().collect();
        let inner = PolygonOffset2D::new(ccw, 0.25).execute().unwrap();
        assert!((signed_area_2d(&inner) - 2.25).abs() < 1e-9);
    }

    #[test]
    fn shrink_l_shape_reflex_corner() {
        // CW L-shape with a reflex vertex at (1, 1).
        let l_shape = vec![
            Point2::new(0.0, 0.0),
            Point2::new(0.0, 2.0),
            Point2::new(1.0, 2.0),
            Point2::new(1.0, 1.0),
            Point2::new(2.0, 1.0),
            Point2::new(2.0, 0.0),
        ];
        let inner = PolygonOffset2D::new(l_shape, 0.1).execute().unwrap();
        assert_eq!(inner.len(), 6);
        assert!((inner[3] - Point2::new(0.9, 0.9)).norm() < 1e-9, "{:?}", inner[3]);
    }

    #[test]
    fn notch_widens_without_losing_vertices() {
        // A 0.1-wide notch cut into the top edge.
        let notched = vec![
            Point2::new(0.0, 0.0),
            Point2::new(0.0, 4.0),
            Point2::new(1.95, 4.0),
            Point2::new(1.95, 3.0),
            Point2::new(2.05, 3.0),
            Point2::new(2.05, 4.0),
            Point2::new(4.0, 4.0),
            Point2::new(4.0, 0.0),
        ];
        let inner = PolygonOffset2D::new(notched, 0.2).execute().unwrap();
        assert_eq!(inner.len(), 8);
        assert!((inner[3] - Point2::new(1.75, 2.8)).norm() < 1e-9, "{:?}", inner[3]);
        assert!((inner[4] - Point2::new(2.25, 2.8)).norm() < 1e-9, "{:?}", inner[4]);
    }

    #[test]
    fn thin_tab_collapses() {
        // A 0.1-wide tab sticking out of the top edge vanishes when shrinking by 0.2.
        let tabbed = vec![
            Point2::new(0.0, 0.0),
            Point2::new(0.0, 4.0),
            Point2::new(1.95, 4.0),
            Point2::new(1.95, 5.0),
            Point2::new(2.05, 5.0),
            Point2::new(2.05, 4.0),
            Point2::new(4.0, 4.0),
            Point2::new(4.0, 0.0),
        ];
        let inner = PolygonOffset2D::new(tabbed, 0.2).execute().unwrap();
        assert!(inner.len() < 8, "expected collapsed edges, got {}", inner.len());
        assert!(inner.iter().all(|p| p.y < 3.8 + 1e-9), "{inner:?}");
        assert!(is_clockwise(&inner));
    }

    #[test]
    fn shrink_past_center_fails() {
        let square = cw_rect(0.0, 0.0, 1.0, 1.0);
        assert!(PolygonOffset2D::new(square, 0.6).execute().is_err());
    }

    #[test]
    fn too_few_points_rejected() {
        let pts = vec![Point2::new(0.0, 0.0), Point2::new(1.0, 0.0)];
        assert!(PolygonOffset2D::new(pts, 0.1).execute().is_err());
    }
}
