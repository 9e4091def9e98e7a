use crate::error::{PlanError, Result};
use crate::geometry::Segment2;
use crate::math::{Point2, TOLERANCE};
use crate::plan::config::PlanTolerances;
use crate::plan::neighbour::Neighbour;
use crate::plan::room::{find_room, RoomPlan};
use crate::plan::wall_section::{SectionKind, WallSection};

use super::{Facade, FacadeRing};

/// A parametric slice of a straight section, optionally facing a neighbour.
type Piece<'n> = (f64, f64, Option<&'n Neighbour>);

/// Splits a room's wall sections into classified facades.
///
/// Corners are external when either of their outer edges runs along the
/// floor outline, internal otherwise. Straight sections are cut at the
/// neighbour records of their edge; the parts between records stay
/// internal.
#[derive(Debug)]
pub struct FacadeDeriver<'a> {
    floor: &'a [Point2],
    tolerances: &'a PlanTolerances,
}

impl<'a> FacadeDeriver<'a> {
    /// Creates a deriver for a plan with the given floor outline.
    #[must_use]
    pub fn new(floor: &'a [Point2], tolerances: &'a PlanTolerances) -> Self {
        Self { floor, tolerances }
    }

    /// Derives the facade ring of `room`.
    ///
    /// `neighbours` are the records of `room`; `rooms` must contain every
    /// room they refer to.
    ///
    /// # Errors
    ///
    /// Returns `PlanError::UnknownRoom` if a neighbour record refers to a
    /// room missing from `rooms`.
    pub fn derive(
        &self,
        room: &RoomPlan,
        neighbours: &[Neighbour],
        rooms: &[RoomPlan],
    ) -> Result<FacadeRing> {
        let n = room.edge_count();
        let mut facades = Vec::with_capacity(room.sections().len());
        for section in room.sections() {
            match section.kind {
                SectionKind::Corner { vertex, .. } => {
                    let external = self.along_floor(&room.outer_edge(vertex + n - 1))
                        || self.along_floor(&room.outer_edge(vertex));
                    facades.push(classify_plain(*section, external));
                }
                SectionKind::Straight { edge } => {
                    self.split_straight(room, edge, section, neighbours, rooms, &mut facades)?;
                }
            }
        }
        Ok(FacadeRing::link(facades))
    }

    /// Returns `true` if `edge` runs along some edge of the floor outline.
    fn along_floor(&self, edge: &Segment2) -> bool {
        (0..self.floor.len()).any(|k| {
            Segment2::polygon_edge(self.floor, k).runs_along(edge, self.tolerances.boundary_distance)
        })
    }

    fn split_straight(
        &self,
        room: &RoomPlan,
        edge: usize,
        section: &WallSection,
        neighbours: &[Neighbour],
        rooms: &[RoomPlan],
        out: &mut Vec<Facade>,
    ) -> Result<()> {
        let inner = section.inner_segment();
        let length = inner.length();
        if length < TOLERANCE {
            out.push(Facade::internal(*section));
            return Ok(());
        }

        let mut records: Vec<(f64, f64, &Neighbour)> = neighbours
            .iter()
            .filter(|r| r.edge_ab == edge)
            .map(|r| (inner.parameter_of(&r.a), inner.parameter_of(&r.b), r))
            .filter(|(from, to, _)| *to > TOLERANCE && *from < 1.0 - TOLERANCE)
            .collect();
        records.sort_by(|x, y| x.0.total_cmp(&y.0));

        let min_span = self.tolerances.merge_epsilon / length;
        let mut pieces: Vec<Piece<'_>> = Vec::with_capacity(records.len() * 2 + 1);
        let mut cursor = 0.0;
        for (from, to, record) in records {
            let from = from.max(cursor);
            let to = to.min(1.0);
            if to - from < min_span {
                continue;
            }
            if from > cursor {
                pieces.push((cursor, from, None));
            }
            pieces.push((from, to, Some(record)));
            cursor = to;
        }

        if pieces.is_empty() {
            let external = self.along_floor(&room.outer_edge(edge));
            out.push(classify_plain(*section, external));
            return Ok(());
        }
        if cursor < 1.0 {
            pieces.push((cursor, 1.0, None));
        }

        for (from, to, record) in absorb_slivers(pieces, min_span) {
            match record {
                Some(record) => out.push(facing_facade(section, from, to, record, rooms)?),
                None => out.push(Facade::internal(section.slice(from, to))),
            }
        }
        Ok(())
    }
}

fn classify_plain(section: WallSection, external: bool) -> Facade {
    if external {
        Facade::external(section)
    } else {
        Facade::internal(section)
    }
}

/// Merges gaps shorter than `min_span` into the facade before them (or
/// after them, at the start of the section).
fn absorb_slivers(pieces: Vec<Piece<'_>>, min_span: f64) -> Vec<Piece<'_>> {
    let mut merged: Vec<Piece<'_>> = Vec::with_capacity(pieces.len());
    let mut pending: Option<f64> = None;
    for (from, to, record) in pieces {
        let from = pending.take().unwrap_or(from);
        if record.is_none() && to - from < min_span {
            match merged.last_mut() {
                Some(last) => last.1 = to,
                None => pending = Some(from),
            }
            continue;
        }
        merged.push((from, to, record));
    }
    if let Some(from) = pending {
        merged.push((from, 1.0, None));
    }
    merged
}

/// The slice `[from, to]` of `section` facing the room of `record`.
///
/// The inner points stay on this room's inner wall; the outer points are
/// carried across onto the neighbour's inner wall.
fn facing_facade(
    section: &WallSection,
    from: f64,
    to: f64,
    record: &Neighbour,
    rooms: &[RoomPlan],
) -> Result<Facade> {
    let other = find_room(rooms, record.room_cd).ok_or(PlanError::UnknownRoom(record.room_cd))?;
    let other_inner = other.inner_edge(record.edge_cd);
    let inner = section.inner_segment();
    let c = inner.point_at(from);
    let d = inner.point_at(to);
    let a = other_inner.project(&c);
    let b = other_inner.project(&d);
    let slice = WallSection {
        kind: section.kind,
        a,
        b,
        c,
        d,
        along: section.along,
        width: (d - c).norm(),
    };
    Ok(Facade::facing(slice, record.room_cd, record.edge_cd))
}
