use crate::math::TOLERANCE;

/// A parametric interval along an edge, with the gap to the wall facing it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Span {
    pub start: f64,
    pub end: f64,
    pub distance: f64,
}

impl Span {
    #[must_use]
    pub fn new(start: f64, end: f64, distance: f64) -> Self {
        Self {
            start,
            end,
            distance,
        }
    }

    fn overlaps(&self, from: f64, to: f64) -> bool {
        self.start < to - TOLERANCE && self.end > from + TOLERANCE
    }
}

/// Effect of one occluder on one piece of a candidate span.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Clip {
    Untouched,
    Removed,
    /// The occluder covers the start; the piece now begins at the given position.
    ShortenedStart(f64),
    /// The occluder covers the end; the piece now ends at the given position.
    ShortenedEnd(f64),
    /// The occluder sits inside; two pieces remain.
    Split((f64, f64), (f64, f64)),
}

/// Clips the piece `[from, to]` against `occluder`.
#[must_use]
pub fn clip_piece(from: f64, to: f64, occluder: &Span) -> Clip {
    if !occluder.overlaps(from, to) {
        return Clip::Untouched;
    }
    let covers_start = occluder.start <= from + TOLERANCE;
    let covers_end = occluder.end >= to - TOLERANCE;
    match (covers_start, covers_end) {
        (true, true) => Clip::Removed,
        (true, false) => Clip::ShortenedStart(occluder.end),
        (false, true) => Clip::ShortenedEnd(occluder.start),
        (false, false) => Clip::Split((from, occluder.start), (occluder.end, to)),
    }
}

/// Pieces of `candidate` left visible by every span in `others` that is
/// strictly nearer. Equidistant spans do not hide each other.
#[must_use]
pub fn retained_pieces(candidate: &Span, others: &[Span]) -> Vec<(f64, f64)> {
    let mut pieces = vec![(candidate.start, candidate.end)];
    for occluder in others.iter().filter(|o| o.distance < candidate.distance) {
        let mut next = Vec::with_capacity(pieces.len() + 1);
        for (from, to) in pieces {
            match clip_piece(from, to, occluder) {
                Clip::Untouched => next.push((from, to)),
                Clip::Removed => {}
                Clip::ShortenedStart(start) => next.push((start, to)),
                Clip::ShortenedEnd(end) => next.push((from, end)),
                Clip::Split(first, second) => {
                    next.push(first);
                    next.push(second);
                }
            }
        }
        pieces = next;
        if pieces.is_empty() {
            break;
        }
    }
    pieces
}
