use i_overlay::core::fill_rule::FillRule;
use i_overlay::float::single::SingleFloatOverlay;

use crate::error::{OperationError, Result};
use crate::geometry::Region;
use crate::math::polygon_2d::{
    ensure_clockwise, ensure_counter_clockwise, rotate_to_canonical_start, signed_area_2d,
    simplify_contour,
};
use crate::math::Point2;

use super::select::BooleanOp;

/// Vertices closer than this are merged when reading overlay output.
const MERGE_DISTANCE: f64 = 1e-7;

/// Contours with less area than this are dropped from overlay output.
const MIN_AREA: f64 = 1e-9;

/// Executes a 2D boolean operation between `subject` and the union of `clips`.
///
/// Every output shape becomes one [`Region`]: the first contour is the
/// outer boundary (normalized clockwise), the rest are holes (normalized
/// counter-clockwise).
pub fn boolean_execute(
    subject: &[Point2],
    clips: &[Vec<Point2>],
    op: BooleanOp,
) -> Result<Vec<Region>> {
    if subject.len() < 3 {
        return Err(OperationError::InvalidInput(
            "subject polygon must have at least 3 vertices".to_owned(),
        )
        .into());
    }

    let subject_paths = vec![contour_to_path(subject)];
    let clip_paths: Vec<Vec<[f64; 2]>> = clips
        .iter()
        .filter(|c| c.len() >= 3)
        .map(|c| contour_to_path(c))
        .collect();

    if clip_paths.is_empty() {
        // Nothing to clip against: intersect is empty, subtract is identity.
        return Ok(match op {
            BooleanOp::Intersect => Vec::new(),
            BooleanOp::Subtract => vec![Region::simple(rotate_to_canonical_start(
                &ensure_clockwise(subject),
            ))],
        });
    }

    // Result is Vec<Vec<Vec<[f64; 2]>>>: shapes, each a list of contours.
    let shapes = subject_paths.overlay(&clip_paths, op.overlay_rule(), FillRule::NonZero);

    Ok(shapes.iter().filter_map(|shape| shape_to_region(shape)).collect())
}

fn contour_to_path(contour: &[Point2]) -> Vec<[f64; 2]> {
    contour.iter().map(|p| [p.x, p.y]).collect()
}

fn path_to_contour(path: &[[f64; 2]]) -> Option<Vec<Point2>> {
    let points: Vec<Point2> = path.iter().map(|p| Point2::new(p[0], p[1])).collect();
    let points = simplify_contour(&points, MERGE_DISTANCE);
    if points.len() < 3 || signed_area_2d(&points).abs() < MIN_AREA {
        return None;
    }
    Some(points)
}

fn shape_to_region(shape: &[Vec<[f64; 2]>]) -> Option<Region> {
    let (outer, holes) = shape.split_first()?;
    let outer = path_to_contour(outer)?;
    let holes = holes
        .iter()
        .filter_map(|h| path_to_contour(h))
        .map(|h| ensure_counter_clockwise(&h))
        .collect();
    Some(Region {
        outer: rotate_to_canonical_start(&ensure_clockwise(&outer)),
        holes,
    })
}
