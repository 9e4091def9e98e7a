use std::fmt;

use tracing::warn;

use crate::error::{GeometryError, PlanError, Result};
use crate::geometry::Segment2;
use crate::math::polygon_2d::{point_in_polygon, signed_area_2d};
use crate::math::Point2;
use crate::operations::PolygonOps;

use super::facade::FacadeRing;
use super::floor::FloorPlan;
use super::wall_section::{build_sections, WallSection};

/// Identifier of a room, assigned sequentially in insertion order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RoomId(pub u32);

impl fmt::Display for RoomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "room#{}", self.0)
    }
}

/// Geometry of one placed room.
///
/// `outer_footprint[i]` and `inner_footprint[i]` always describe the same
/// physical corner; every downstream computation relies on it.
#[derive(Debug, Clone, PartialEq)]
pub struct RoomPlan {
    id: RoomId,
    outer_footprint: Vec<Point2>,
    inner_footprint: Vec<Point2>,
    wall_thickness: f64,
    sections: Vec<WallSection>,
}

impl RoomPlan {
    /// Builds a room from an accepted, clockwise outer footprint.
    ///
    /// If shrinking changes the vertex count, the outer footprint is
    /// regenerated by expanding the inner one back out.
    ///
    /// # Errors
    ///
    /// - `PlanError::InvalidArgument` if `wall_thickness` is not positive
    /// - `OperationError::Failed` if the room is too thin for its walls
    /// - `GeometryError::Degenerate` if the footprints cannot be matched
    pub fn new<O: PolygonOps + ?Sized>(
        id: RoomId,
        outer_footprint: Vec<Point2>,
        wall_thickness: f64,
        ops: &O,
    ) -> Result<Self> {
        if !wall_thickness.is_finite() || wall_thickness <= 0.0 {
            return Err(PlanError::InvalidArgument(format!(
                "wall thickness must be positive, got {wall_thickness}"
            ))
            .into());
        }

        let mut outer_footprint = outer_footprint;
        let inner_footprint = ops.shrink(&outer_footprint, wall_thickness)?;
        if inner_footprint.len() != outer_footprint.len() {
            warn!(
                room = %id,
                outer = outer_footprint.len(),
                inner = inner_footprint.len(),
                "regenerating outer footprint from inner footprint"
            );
            outer_footprint = ops.shrink(&inner_footprint, -wall_thickness)?;
            if outer_footprint.len() != inner_footprint.len() {
                return Err(GeometryError::Degenerate(format!(
                    "{id}: outer footprint has {} vertices, inner has {}",
                    outer_footprint.len(),
                    inner_footprint.len()
                ))
                .into());
            }
        }

        let sections = build_sections(&outer_footprint, &inner_footprint);
        Ok(Self {
            id,
            outer_footprint,
            inner_footprint,
            wall_thickness,
            sections,
        })
    }

    #[must_use]
    pub fn id(&self) -> RoomId {
        self.id
    }

    #[must_use]
    pub fn outer_footprint(&self) -> &[Point2] {
        &self.outer_footprint
    }

    #[must_use]
    pub fn inner_footprint(&self) -> &[Point2] {
        &self.inner_footprint
    }

    #[must_use]
    pub fn wall_thickness(&self) -> f64 {
        self.wall_thickness
    }

    /// Wall sections in perimeter order, corners and straights alternating.
    #[must_use]
    pub fn sections(&self) -> &[WallSection] {
        &self.sections
    }

    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.outer_footprint.len()
    }

    #[must_use]
    pub fn outer_edge(&self, i: usize) -> Segment2 {
        Segment2::polygon_edge(&self.outer_footprint, i)
    }

    #[must_use]
    pub fn inner_edge(&self, i: usize) -> Segment2 {
        Segment2::polygon_edge(&self.inner_footprint, i)
    }

    /// Area enclosed by the outer footprint.
    #[must_use]
    pub fn area(&self) -> f64 {
        signed_area_2d(&self.outer_footprint).abs()
    }

    #[must_use]
    pub fn contains(&self, point: &Point2) -> bool {
        point_in_polygon(point, &self.outer_footprint)
    }

    /// Facade ring of this room in a frozen plan.
    ///
    /// # Errors
    ///
    /// Returns `PlanError::UnknownRoom` if the room does not belong to `plan`.
    pub fn facades<'p>(&self, plan: &'p FloorPlan) -> Result<&'p FacadeRing> {
        plan.facades(self.id)
    }
}

/// Looks up a room by id in an id-ordered room list.
pub(crate) fn find_room(rooms: &[RoomPlan], id: RoomId) -> Option<&RoomPlan> {
    rooms
        .binary_search_by_key(&id, RoomPlan::id)
        .ok()
        .map(|i| &rooms[i])
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::math::polygon_2d::is_clockwise;
    use crate::operations::OverlayPolygonOps;

    fn cw_rect(x0: f64, y0: f64, x1: f64, y1: f64) -> Vec<Point2> {
        vec![
            Point2::new(x0, y0),
            Point2::new(x0, y1),
            Point2::new(x1, y1),
            Point2::new(x1, y0),
        ]
    }

    #[test]
    fn inner_footprint_matches_outer() {
        let room = RoomPlan::new(RoomId(0), cw_rect(0.0, 0.0, 6.0, 4.0), 0.2, &OverlayPolygonOps)
            .unwrap();
        assert_eq!(room.inner_footprint().len(), room.outer_footprint().len());
        assert!(is_clockwise(room.inner_footprint()));
        for (o, i) in room.outer_footprint().iter().zip(room.inner_footprint()) {
            assert!(((o - i).norm() - 0.2 * 2f64.sqrt()).abs() < 1e-9);
        }
        assert_eq!(room.sections().len(), 8);
        assert!((room.area() - 24.0).abs() < 1e-9);
    }

    #[test]
    fn tab_triggers_outer_regeneration() {
        // A thin tab collapses under the wall offset, so the outer is rebuilt.
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
        let room = RoomPlan::new(RoomId(3), tabbed, 0.2, &OverlayPolygonOps).unwrap();
        assert_eq!(room.outer_footprint().len(), room.inner_footprint().len());
        assert!(room.outer_footprint().iter().all(|p| p.y < 4.0 + 1e-9));
        assert_eq!(room.sections().len(), room.edge_count() * 2);
    }

    #[test]
    fn non_positive_thickness_rejected() {
        let err = RoomPlan::new(RoomId(0), cw_rect(0.0, 0.0, 1.0, 1.0), 0.0, &OverlayPolygonOps)
            .unwrap_err();
        assert!(matches!(
            err,
            crate::FloorplanError::Plan(PlanError::InvalidArgument(_))
        ));
    }

    #[test]
    fn too_thin_for_walls_fails() {
        assert!(
            RoomPlan::new(RoomId(0), cw_rect(0.0, 0.0, 0.3, 5.0), 0.2, &OverlayPolygonOps).is_err()
        );
    }

    #[test]
    fn find_room_by_id() {
        let rooms: Vec<RoomPlan> = (0..3)
            .map(|i| {
                let x = f64::from(i) * 10.0;
                RoomPlan::new(RoomId(i), cw_rect(x, 0.0, x + 5.0, 5.0), 0.1, &OverlayPolygonOps)
                    .unwrap()
            })
            .collect();
        assert_eq!(find_room(&rooms, RoomId(2)).map(RoomPlan::id), Some(RoomId(2)));
        assert!(find_room(&rooms, RoomId(7)).is_none());
    }
}
