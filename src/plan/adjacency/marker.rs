use crate::geometry::Segment2;
use crate::math::{Point2, TOLERANCE};

/// How the projection `[dt, ct]` of a facing wall overlaps an edge's own `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlapKind {
    NoOverlap,
    /// The facing wall covers the end of the edge: `0 < dt < 1 <= ct`.
    EndOverlap,
    /// The facing wall lies within the edge: `0 <= dt < ct <= 1`.
    Contained,
    /// The facing wall covers the start of the edge: `dt <= 0 < ct < 1`.
    StartOverlap,
    /// The edge lies within the facing wall: `dt <= 0` and `ct >= 1`.
    ReverseContained,
}

/// Classifies the overlap of `[dt, ct]` against `[0, 1]`.
#[must_use]
pub fn classify_overlap(dt: f64, ct: f64) -> OverlapKind {
    if ct <= TOLERANCE || dt >= 1.0 - TOLERANCE || ct - dt <= TOLERANCE {
        return OverlapKind::NoOverlap;
    }
    match (dt > 0.0, ct < 1.0) {
        (true, true) => OverlapKind::Contained,
        (true, false) => OverlapKind::EndOverlap,
        (false, true) => OverlapKind::StartOverlap,
        (false, false) => OverlapKind::ReverseContained,
    }
}

/// One end of a shared span along an edge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Marker {
    /// Parametric position along the edge.
    pub t: f64,
    /// Gap between the edge and the facing wall at `t`, used to rank occluders.
    pub distance: f64,
    /// Index of the facing wall this marker belongs to.
    pub pair: usize,
    /// Index of the other marker of the same pair.
    pub sibling: usize,
    pub is_start: bool,
}

impl Marker {
    fn new(t: f64, on_edge: Point2, on_other: Point2) -> Self {
        Self {
            t,
            distance: (on_other - on_edge).norm(),
            pair: 0,
            sibling: 0,
            is_start: false,
        }
    }
}

/// Builds the start and end markers of the span `facing` shares with `edge`.
///
/// `dt`/`ct` are the positions of `facing.end`/`facing.start` projected onto
/// `edge`. Returns `None` when the spans do not overlap. The returned markers
/// are not yet linked; see [`link_pair`].
#[must_use]
pub fn marker_pair(edge: &Segment2, facing: &Segment2, dt: f64, ct: f64) -> Option<[Marker; 2]> {
    let pair = match classify_overlap(dt, ct) {
        OverlapKind::NoOverlap => return None,
        OverlapKind::Contained => [
            Marker::new(dt, edge.point_at(dt), facing.end),
            Marker::new(ct, edge.point_at(ct), facing.start),
        ],
        OverlapKind::ReverseContained => [
            Marker::new(0.0, edge.start, facing.project(&edge.start)),
            Marker::new(1.0, edge.end, facing.project(&edge.end)),
        ],
        OverlapKind::StartOverlap => [
            Marker::new(0.0, edge.start, facing.project(&edge.start)),
            Marker::new(ct, edge.point_at(ct), facing.start),
        ],
        OverlapKind::EndOverlap => [
            Marker::new(dt, edge.point_at(dt), facing.end),
            Marker::new(1.0, edge.end, facing.project(&edge.end)),
        ],
    };
    Some(pair)
}

/// Appends a marker pair to `markers`, linking the two as natural siblings.
pub fn link_pair(markers: &mut Vec<Marker>, [mut start, mut end]: [Marker; 2], pair: usize) {
    let base = markers.len();
    start.pair = pair;
    start.sibling = base + 1;
    start.is_start = true;
    end.pair = pair;
    end.sibling = base;
    end.is_start = false;
    markers.push(start);
    markers.push(end);
}

/// Marker indices sorted by position along the edge, ties by insertion order.
#[must_use]
pub fn sorted_order(markers: &[Marker]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..markers.len()).collect();
    order.sort_by(|&i, &j| markers[i].t.total_cmp(&markers[j].t).then(i.cmp(&j)));
    order
}
