use tracing::debug;

use crate::error::{PlanError, Result};
use crate::geometry::Region;
use crate::math::Point2;
use crate::operations::{OverlayPolygonOps, PolygonOps};

use super::adjacency::AdjacencyIndex;
use super::config::PlanTolerances;
use super::floor::{FloorPlan, PlanView};
use super::neighbour::Neighbour;
use super::room::{RoomId, RoomPlan};

/// Incrementally places rooms on a floor, then freezes into a [`FloorPlan`].
///
/// Rooms are clipped to the floor and to the rooms placed before them, so
/// outer footprints never overlap. Adjacency is recomputed lazily after
/// rooms are added.
#[derive(Debug)]
pub struct FloorPlanBuilder<O: PolygonOps = OverlayPolygonOps> {
    footprint: Vec<Point2>,
    ops: O,
    tolerances: PlanTolerances,
    rooms: Vec<RoomPlan>,
    /// Accepted fragments before the safety margin, one per room.
    claimed: Vec<Vec<Point2>>,
    next_id: u32,
    frozen: bool,
    dirty: bool,
    adjacency: AdjacencyIndex,
}

impl FloorPlanBuilder {
    /// Creates a builder for the given clockwise floor outline with the
    /// default polygon operations and tolerances.
    ///
    /// # Errors
    ///
    /// Returns `PlanError::InvalidArgument` if the outline has fewer than 3
    /// vertices or is not wound clockwise.
    pub fn new(footprint: Vec<Point2>) -> Result<Self> {
        Self::with_ops(footprint, OverlayPolygonOps, PlanTolerances::default())
    }
}

impl<O: PolygonOps> FloorPlanBuilder<O> {
    /// Creates a builder with custom polygon operations and tolerances.
    ///
    /// # Errors
    ///
    /// Returns `PlanError::InvalidArgument` if the outline has fewer than 3
    /// vertices, is not wound clockwise, or a tolerance is not positive.
    pub fn with_ops(footprint: Vec<Point2>, ops: O, tolerances: PlanTolerances) -> Result<Self> {
        tolerances.validate()?;
        check_outline(&ops, &footprint, "floor footprint")?;
        Ok(Self {
            footprint,
            ops,
            tolerances,
            rooms: Vec::new(),
            claimed: Vec::new(),
            next_id: 0,
            frozen: false,
            dirty: false,
            adjacency: AdjacencyIndex::default(),
        })
    }

    #[must_use]
    pub fn ops(&self) -> &O {
        &self.ops
    }

    #[must_use]
    pub fn tolerances(&self) -> &PlanTolerances {
        &self.tolerances
    }

    #[must_use]
    pub fn is_frozen(&self) -> bool {
        self.frozen
    }

    /// Places a room with clockwise outer `footprint` and walls of
    /// `wall_thickness`.
    ///
    /// The footprint is clipped to the floor and to the area claimed by the
    /// existing rooms, then shrunk by the safety margin. If clipping leaves
    /// several pieces, they become separate rooms only when `allow_split` is
    /// set. Returns the ids of the rooms created, which is empty when the
    /// room was rejected.
    ///
    /// # Errors
    ///
    /// - `PlanError::InvalidState` if the plan has been frozen
    /// - `PlanError::InvalidArgument` if the footprint has fewer than 3
    ///   vertices, is not clockwise, or `wall_thickness` is not positive
    pub fn add_room(
        &mut self,
        footprint: &[Point2],
        wall_thickness: f64,
        allow_split: bool,
    ) -> Result<Vec<RoomId>> {
        if self.frozen {
            return Err(PlanError::InvalidState("cannot add a room to a frozen plan".into()).into());
        }
        check_outline(&self.ops, footprint, "room footprint")?;
        if !wall_thickness.is_finite() || wall_thickness <= 0.0 {
            return Err(PlanError::InvalidArgument(format!(
                "wall thickness must be positive, got {wall_thickness}"
            ))
            .into());
        }

        let on_floor = self.ops.intersect(footprint, &self.footprint)?;
        let Some(on_floor) = accept(on_floor, allow_split, "floor") else {
            return Ok(Vec::new());
        };

        let fragments = if self.claimed.is_empty() {
            on_floor
        } else {
            let mut free = Vec::new();
            for piece in &on_floor {
                free.extend(self.ops.difference(&piece.outer, &self.claimed)?);
            }
            let Some(free) = accept(free, allow_split, "existing rooms") else {
                return Ok(Vec::new());
            };
            free
        };

        let mut ids = Vec::with_capacity(fragments.len());
        for fragment in fragments {
            let mut outer = fragment.outer;
            if !self.ops.is_clockwise(&outer) {
                outer.reverse();
            }
            let shrunk = match self.ops.shrink(&outer, self.tolerances.safety_margin) {
                Ok(shrunk) => shrunk,
                Err(err) => {
                    debug!(error = %err, "skipping fragment: safety margin collapsed it");
                    continue;
                }
            };
            let id = RoomId(self.next_id);
            match RoomPlan::new(id, shrunk, wall_thickness, &self.ops) {
                Ok(room) => {
                    self.next_id += 1;
                    self.rooms.push(room);
                    self.claimed.push(outer);
                    self.dirty = true;
                    ids.push(id);
                }
                Err(err) => debug!(error = %err, "skipping fragment: walls do not fit"),
            }
        }
        Ok(ids)
    }

    /// Recomputes the adjacency index if rooms were added since the last call.
    ///
    /// # Errors
    ///
    /// Returns `PlanError::InvariantViolated` if two rooms' windings disagree.
    pub fn refresh_adjacency(&mut self) -> Result<&AdjacencyIndex> {
        if self.dirty {
            self.adjacency = AdjacencyIndex::compute(&self.rooms, &self.tolerances)?;
            self.dirty = false;
        }
        Ok(&self.adjacency)
    }

    /// Neighbour records of `room`, refreshing adjacency first.
    ///
    /// # Errors
    ///
    /// - `PlanError::UnknownRoom` if no room has this id
    /// - `PlanError::InvariantViolated` if the refresh fails
    pub fn neighbours(&mut self, room: RoomId) -> Result<&[Neighbour]> {
        self.room(room)?;
        Ok(self.refresh_adjacency()?.neighbours(room))
    }

    /// Freezes the plan: no more rooms can be added, and the returned
    /// [`FloorPlan`] carries the final adjacency and every room's facades.
    ///
    /// Calling it again returns an equal plan.
    ///
    /// # Errors
    ///
    /// Returns an error if adjacency or facade derivation fails.
    pub fn freeze(&mut self) -> Result<FloorPlan> {
        self.frozen = true;
        self.refresh_adjacency()?;
        FloorPlan::assemble(
            self.footprint.clone(),
            self.rooms.clone(),
            self.adjacency.clone(),
            self.tolerances,
        )
    }
}

impl<O: PolygonOps> PlanView for FloorPlanBuilder<O> {
    fn footprint(&self) -> &[Point2] {
        &self.footprint
    }

    fn rooms(&self) -> &[RoomPlan] {
        &self.rooms
    }
}

fn check_outline<O: PolygonOps + ?Sized>(ops: &O, outline: &[Point2], what: &str) -> Result<()> {
    if outline.len() < 3 {
        return Err(PlanError::InvalidArgument(format!(
            "{what} needs at least 3 vertices, got {}",
            outline.len()
        ))
        .into());
    }
    if outline.iter().any(|p| !p.x.is_finite() || !p.y.is_finite()) {
        return Err(PlanError::InvalidArgument(format!("{what} has non-finite coordinates")).into());
    }
    if !ops.is_clockwise(outline) {
        return Err(PlanError::InvalidArgument(format!("{what} must be wound clockwise")).into());
    }
    Ok(())
}

/// Applies the placement rules to the pieces left after clipping against
/// `stage`: at least one piece, no holes, and a single piece unless
/// splitting is allowed.
fn accept(pieces: Vec<Region>, allow_split: bool, stage: &str) -> Option<Vec<Region>> {
    if pieces.is_empty() {
        debug!(stage, "room rejected: nothing left after clipping");
        return None;
    }
    if pieces.len() > 1 && !allow_split {
        debug!(stage, pieces = pieces.len(), "room rejected: clipping split it");
        return None;
    }
    if pieces.iter().any(Region::has_holes) {
        debug!(stage, "room rejected: clipping left a hole");
        return None;
    }
    Some(pieces)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::FloorplanError;
    use crate::math::polygon_2d::is_clockwise;

    fn cw_rect(x0: f64, y0: f64, x1: f64, y1: f64) -> Vec<Point2> {
        vec![
            Point2::new(x0, y0),
            Point2::new(x0, y1),
            Point2::new(x1, y1),
            Point2::new(x1, y0),
        ]
    }

    fn builder() -> FloorPlanBuilder {
        FloorPlanBuilder::new(cw_rect(-100.0, -100.0, 100.0, 100.0)).unwrap()
    }

    #[test]
    fn floor_outline_is_validated() {
        let ccw: Vec<Point2> = cw_rect(0.0, 0.0, 1.0, 1.0).into_iter().rev().collect();
        assert!(matches!(
            FloorPlanBuilder::new(ccw).unwrap_err(),
            FloorplanError::Plan(PlanError::InvalidArgument(_))
        ));
        assert!(FloorPlanBuilder::new(vec![Point2::origin(), Point2::new(1.0, 0.0)]).is_err());
    }

    #[test]
    fn ids_are_sequential() {
        let mut plan = builder();
        assert_eq!(plan.add_room(&cw_rect(0.0, 0.0, 5.0, 5.0), 0.1, false).unwrap(), vec![RoomId(0)]);
        assert_eq!(plan.add_room(&cw_rect(10.0, 0.0, 15.0, 5.0), 0.1, false).unwrap(), vec![RoomId(1)]);
        assert_eq!(plan.rooms().len(), 2);
        assert!(plan.rooms().iter().all(|r| is_clockwise(r.outer_footprint())));
    }

    #[test]
    fn room_is_clipped_to_floor() {
        let mut plan = builder();
        let ids = plan.add_room(&cw_rect(90.0, 0.0, 110.0, 10.0), 0.1, false).unwrap();
        let room = plan.room(ids[0]).unwrap();
        assert!(room.outer_footprint().iter().all(|p| p.x < 100.0));
        assert!((room.area() - 100.0).abs() < 0.1);
    }

    #[test]
    fn overlapping_room_is_trimmed() {
        let mut plan = builder();
        plan.add_room(&cw_rect(0.0, 0.0, 10.0, 10.0), 0.1, false).unwrap();
        let ids = plan.add_room(&cw_rect(5.0, 0.0, 15.0, 10.0), 0.1, false).unwrap();
        assert_eq!(ids.len(), 1);
        let room = plan.room(ids[0]).unwrap();
        assert!(room.outer_footprint().iter().all(|p| p.x > 10.0));
    }

    #[test]
    fn room_outside_floor_or_fully_covered_is_rejected() {
        let mut plan = builder();
        assert!(plan.add_room(&cw_rect(200.0, 0.0, 210.0, 10.0), 0.1, false).unwrap().is_empty());
        plan.add_room(&cw_rect(0.0, 0.0, 10.0, 10.0), 0.1, false).unwrap();
        assert!(plan.add_room(&cw_rect(2.0, 2.0, 8.0, 8.0), 0.1, false).unwrap().is_empty());
    }

    #[test]
    fn room_around_existing_room_is_rejected() {
        let mut plan = builder();
        plan.add_room(&cw_rect(-1.0, -1.0, 1.0, 1.0), 0.1, false).unwrap();
        // Clipping would leave a hole.
        assert!(plan.add_room(&cw_rect(-10.0, -10.0, 10.0, 10.0), 0.1, true).unwrap().is_empty());
        assert_eq!(plan.rooms().len(), 1);
    }

    #[test]
    fn invalid_room_arguments() {
        let mut plan = builder();
        let ccw: Vec<Point2> = cw_rect(0.0, 0.0, 1.0, 1.0).into_iter().rev().collect();
        assert!(plan.add_room(&ccw, 0.1, false).is_err());
        assert!(plan.add_room(&cw_rect(0.0, 0.0, 1.0, 1.0), -0.1, false).is_err());
        assert!(plan.add_room(&cw_rect(0.0, 0.0, 1.0, 1.0), f64::NAN, false).is_err());
    }

    #[test]
    fn sliver_fragment_is_skipped() {
        let mut plan = builder();
        plan.add_room(&cw_rect(-50.0, 0.3, 50.0, 50.0), 0.1, false).unwrap();
        // Only a 0.3-wide strip is free below the first room; its walls cannot fit.
        let ids = plan.add_room(&cw_rect(-10.0, 0.0, 10.0, 10.0), 0.2, false).unwrap();
        assert!(ids.is_empty());
        // The id was not consumed.
        let ids = plan.add_room(&cw_rect(60.0, 0.0, 70.0, 10.0), 0.1, false).unwrap();
        assert_eq!(ids, vec![RoomId(1)]);
    }

    #[test]
    fn neighbours_refresh_after_insertions() {
        let mut plan = builder();
        plan.add_room(&cw_rect(0.0, 0.0, 5.0, 5.0), 0.1, false).unwrap();
        assert!(plan.neighbours(RoomId(0)).unwrap().is_empty());
        plan.add_room(&cw_rect(5.0, 0.0, 10.0, 5.0), 0.1, false).unwrap();
        assert_eq!(plan.neighbours(RoomId(0)).unwrap().len(), 1);
        assert!(matches!(
            plan.neighbours(RoomId(4)).unwrap_err(),
            FloorplanError::Plan(PlanError::UnknownRoom(_))
        ));
    }

    #[test]
    fn freeze_is_idempotent_and_final() {
        let mut plan = builder();
        plan.add_room(&cw_rect(0.0, 0.0, 5.0, 5.0), 0.1, false).unwrap();
        let first = plan.freeze().unwrap();
        let second = plan.freeze().unwrap();
        assert_eq!(first, second);
        assert!(plan.is_frozen());
        assert!(matches!(
            plan.add_room(&cw_rect(10.0, 0.0, 15.0, 5.0), 0.1, false).unwrap_err(),
            FloorplanError::Plan(PlanError::InvalidState(_))
        ));
    }
}
