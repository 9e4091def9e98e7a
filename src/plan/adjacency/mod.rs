mod marker;
mod occlusion;

pub use marker::{classify_overlap, OverlapKind};

use std::collections::BTreeMap;

use tracing::trace;

use crate::error::{PlanError, Result};
use crate::geometry::Segment2;
use crate::math::TOLERANCE;

use super::config::PlanTolerances;
use super::neighbour::Neighbour;
use super::room::{RoomId, RoomPlan};
use marker::{link_pair, marker_pair, sorted_order, Marker};
use occlusion::{retained_pieces, Span};

/// Neighbour records of every room, keyed by room id.
///
/// For every outer edge of every room, the anti-parallel edges of the other
/// rooms that face it are projected onto it. Where several facing walls
/// overlap along the edge, only the nearest one is kept.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AdjacencyIndex {
    by_room: BTreeMap<RoomId, Vec<Neighbour>>,
}

/// A wall of another room facing the edge under consideration.
struct Facing {
    room: RoomId,
    edge: usize,
    segment: Segment2,
}

impl AdjacencyIndex {
    /// Computes the neighbour records of every room in `rooms`.
    ///
    /// # Errors
    ///
    /// Returns `PlanError::InvariantViolated` if a facing wall projects onto
    /// an edge in the wrong order, which means the rooms' windings disagree.
    pub fn compute(rooms: &[RoomPlan], tolerances: &PlanTolerances) -> Result<Self> {
        let mut by_room = BTreeMap::new();
        for room in rooms {
            let mut records = Vec::new();
            for i in 0..room.edge_count() {
                edge_neighbours(room, i, rooms, tolerances, &mut records)?;
            }
            by_room.insert(room.id(), records);
        }
        Ok(Self { by_room })
    }

    /// Neighbour records of `room`, empty for isolated or unknown rooms.
    #[must_use]
    pub fn neighbours(&self, room: RoomId) -> &[Neighbour] {
        self.by_room
            .get(&room)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Total number of neighbour records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.by_room.values().map(Vec::len).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Rooms in id order with their neighbour records.
    pub fn iter(&self) -> impl Iterator<Item = (RoomId, &[Neighbour])> {
        self.by_room.iter().map(|(id, records)| (*id, records.as_slice()))
    }
}

/// Returns `true` if `facing` is anti-parallel to `edge` and the two lie in
/// front of each other.
fn faces_each_other(edge: &Segment2, facing: &Segment2, anti_parallel: f64) -> bool {
    if edge.direction().dot(&facing.direction()) > -1.0 + anti_parallel {
        return false;
    }
    let in_front = [
        edge.signed_distance(&facing.start),
        edge.signed_distance(&facing.end),
        facing.signed_distance(&edge.start),
        facing.signed_distance(&edge.end),
    ]
    .into_iter()
    .filter(|d| *d >= -TOLERANCE)
    .count();
    in_front >= 3
}

/// Appends the neighbour records of outer edge `i` of `room` to `out`.
fn edge_neighbours(
    room: &RoomPlan,
    i: usize,
    rooms: &[RoomPlan],
    tolerances: &PlanTolerances,
    out: &mut Vec<Neighbour>,
) -> Result<()> {
    let edge = room.outer_edge(i);
    let edge_length = edge.length();
    if edge_length < TOLERANCE {
        return Ok(());
    }

    let mut facings: Vec<Facing> = Vec::new();
    let mut markers: Vec<Marker> = Vec::new();
    for other in rooms.iter().filter(|o| o.id() != room.id()) {
        for j in 0..other.edge_count() {
            let segment = other.outer_edge(j);
            if !faces_each_other(&edge, &segment, tolerances.anti_parallel) {
                continue;
            }
            let ct = edge.parameter_of(&segment.start);
            let dt = edge.parameter_of(&segment.end);
            if ct < dt - TOLERANCE {
                return Err(PlanError::InvariantViolated(format!(
                    "{} edge {j} projects onto {} edge {i} in reverse ({dt} > {ct})",
                    other.id(),
                    room.id()
                ))
                .into());
            }
            if let Some(pair) = marker_pair(&edge, &segment, dt, ct) {
                link_pair(&mut markers, pair, facings.len());
                facings.push(Facing {
                    room: other.id(),
                    edge: j,
                    segment,
                });
            }
        }
    }
    if markers.is_empty() {
        return Ok(());
    }
    trace!(room = %room.id(), edge = i, markers = markers.len(), "collected markers");

    let spans: Vec<Span> = markers
        .chunks_exact(2)
        .map(|m| Span::new(m[0].t, m[1].t, (m[0].distance + m[1].distance) * 0.5))
        .collect();

    for index in sorted_order(&markers) {
        let marker = &markers[index];
        if !marker.is_start {
            continue;
        }
        let end = &markers[marker.sibling];
        let candidate = Span::new(marker.t, end.t, (marker.distance + end.distance) * 0.5);
        let occluders: Vec<Span> = spans
            .iter()
            .enumerate()
            .filter(|(k, _)| *k != marker.pair)
            .map(|(_, s)| *s)
            .collect();
        let pieces = retained_pieces(&candidate, &occluders);
        if pieces.len() != 1 || pieces[0] != (candidate.start, candidate.end) {
            trace!(
                room = %room.id(),
                edge = i,
                pair = marker.pair,
                pieces = pieces.len(),
                "facing span clipped by nearer wall"
            );
        }

        let facing = &facings[marker.pair];
        for (at, bt) in pieces {
            if (bt - at) * edge_length < tolerances.merge_epsilon {
                continue;
            }
            let a = edge.point_at(at);
            let b = edge.point_at(bt);
            let c = facing.segment.project(&b);
            let d = facing.segment.project(&a);
            out.push(Neighbour {
                room_ab: room.id(),
                edge_ab: i,
                room_cd: facing.room,
                edge_cd: facing.edge,
                a,
                b,
                c,
                d,
                at,
                bt,
                ct: facing.segment.parameter_of(&c),
                dt: facing.segment.parameter_of(&d),
            });
        }
    }
    Ok(())
}
