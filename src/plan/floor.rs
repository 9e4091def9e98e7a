use std::collections::BTreeMap;

use tracing::debug;

use crate::error::{PlanError, Result};
use crate::math::Point2;

use super::adjacency::AdjacencyIndex;
use super::config::PlanTolerances;
use super::facade::{FacadeDeriver, FacadeRing};
use super::neighbour::Neighbour;
use super::room::{find_room, RoomId, RoomPlan};

/// Read access shared by [`FloorPlanBuilder`](super::FloorPlanBuilder) and
/// [`FloorPlan`].
pub trait PlanView {
    /// The floor outline, wound clockwise.
    fn footprint(&self) -> &[Point2];

    /// Rooms in id order.
    fn rooms(&self) -> &[RoomPlan];

    /// Looks up a room by id.
    ///
    /// # Errors
    ///
    /// Returns `PlanError::UnknownRoom` if no room has this id.
    fn room(&self, id: RoomId) -> Result<&RoomPlan> {
        find_room(self.rooms(), id).ok_or_else(|| PlanError::UnknownRoom(id).into())
    }

    /// The room whose outer footprint contains `point`, if any.
    fn room_containing(&self, point: &Point2) -> Option<&RoomPlan> {
        self.rooms().iter().find(|room| room.contains(point))
    }
}

/// A frozen floor plan with prebuilt adjacency and facades.
#[derive(Debug, Clone, PartialEq)]
pub struct FloorPlan {
    footprint: Vec<Point2>,
    rooms: Vec<RoomPlan>,
    tolerances: PlanTolerances,
    adjacency: AdjacencyIndex,
    facades: BTreeMap<RoomId, FacadeRing>,
}

impl FloorPlan {
    /// Derives every room's facade ring and assembles the frozen plan.
    pub(crate) fn assemble(
        footprint: Vec<Point2>,
        rooms: Vec<RoomPlan>,
        adjacency: AdjacencyIndex,
        tolerances: PlanTolerances,
    ) -> Result<Self> {
        let deriver = FacadeDeriver::new(&footprint, &tolerances);
        let mut facades = BTreeMap::new();
        for room in &rooms {
            let ring = deriver.derive(room, adjacency.neighbours(room.id()), &rooms)?;
            facades.insert(room.id(), ring);
        }
        debug!(
            rooms = rooms.len(),
            neighbours = adjacency.len(),
            facades = facades.values().map(FacadeRing::len).sum::<usize>(),
            "floor plan frozen"
        );
        Ok(Self {
            footprint,
            rooms,
            tolerances,
            adjacency,
            facades,
        })
    }

    /// Neighbour records of `room`.
    ///
    /// # Errors
    ///
    /// Returns `PlanError::UnknownRoom` if no room has this id.
    pub fn neighbours(&self, room: RoomId) -> Result<&[Neighbour]> {
        self.room(room)?;
        Ok(self.adjacency.neighbours(room))
    }

    /// Facade ring of `room`.
    ///
    /// # Errors
    ///
    /// Returns `PlanError::UnknownRoom` if no room has this id.
    pub fn facades(&self, room: RoomId) -> Result<&FacadeRing> {
        self.facades
            .get(&room)
            .ok_or_else(|| PlanError::UnknownRoom(room).into())
    }

    #[must_use]
    pub fn adjacency(&self) -> &AdjacencyIndex {
        &self.adjacency
    }

    #[must_use]
    pub fn tolerances(&self) -> &PlanTolerances {
        &self.tolerances
    }
}

impl PlanView for FloorPlan {
    fn footprint(&self) -> &[Point2] {
        &self.footprint
    }

    fn rooms(&self) -> &[RoomPlan] {
        &self.rooms
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::FloorplanError;
    use crate::operations::OverlayPolygonOps;

    fn cw_rect(x0: f64, y0: f64, x1: f64, y1: f64) -> Vec<Point2> {
        vec![
            Point2::new(x0, y0),
            Point2::new(x0, y1),
            Point2::new(x1, y1),
            Point2::new(x1, y0),
        ]
    }

    fn two_room_plan() -> FloorPlan {
        let tolerances = PlanTolerances::default();
        let rooms = vec![
            RoomPlan::new(RoomId(0), cw_rect(0.0, 0.0, 4.999, 5.0), 0.1, &OverlayPolygonOps)
                .unwrap(),
            RoomPlan::new(RoomId(1), cw_rect(5.001, 0.0, 10.0, 5.0), 0.1, &OverlayPolygonOps)
                .unwrap(),
        ];
        let adjacency = AdjacencyIndex::compute(&rooms, &tolerances).unwrap();
        FloorPlan::assemble(cw_rect(0.0, 0.0, 10.0, 5.0), rooms, adjacency, tolerances).unwrap()
    }

    #[test]
    fn frozen_plan_queries() {
        let plan = two_room_plan();
        assert_eq!(plan.rooms().len(), 2);
        assert_eq!(plan.neighbours(RoomId(0)).unwrap().len(), 1);
        assert_eq!(plan.facades(RoomId(1)).unwrap().len(), 8);
        assert_eq!(
            plan.room_containing(&Point2::new(7.0, 2.0)).map(RoomPlan::id),
            Some(RoomId(1))
        );
        assert!(plan.room_containing(&Point2::new(5.0, 2.0)).is_none());

        let room = plan.room(RoomId(0)).unwrap();
        assert_eq!(room.facades(&plan).unwrap(), plan.facades(RoomId(0)).unwrap());
    }

    #[test]
    fn unknown_room_is_an_error() {
        let plan = two_room_plan();
        for err in [
            plan.neighbours(RoomId(5)).unwrap_err(),
            plan.facades(RoomId(5)).unwrap_err(),
            plan.room(RoomId(5)).unwrap_err(),
        ] {
            assert!(matches!(
                err,
                FloorplanError::Plan(PlanError::UnknownRoom(RoomId(5)))
            ));
        }
    }

    #[test]
    fn shared_wall_facades_face_each_other() {
        let plan = two_room_plan();
        let ring = plan.facades(RoomId(0)).unwrap();
        let shared: Vec<_> = ring
            .iter()
            .filter(|(_, f)| f.neighbour == Some(RoomId(1)))
            .collect();
        assert_eq!(shared.len(), 1);
        // Every corner and three of the four walls lie on the floor outline.
        let external = ring.iter().filter(|(_, f)| f.is_external).count();
        assert_eq!(external, 7);
    }

    #[test]
    fn frozen_plan_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<FloorPlan>();
    }
}
