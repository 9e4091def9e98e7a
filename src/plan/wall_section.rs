use crate::geometry::Segment2;
use crate::math::{Point2, Vector2, TOLERANCE};

/// Which slice of the perimeter a [`WallSection`] covers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SectionKind {
    /// Around outer vertex `vertex`, spanning the end of edge `vertex - 1`
    /// and the start of edge `vertex`. `apex` is the outer vertex itself.
    Corner { vertex: usize, apex: Point2 },
    /// The run of outer edge `edge` between its two corners.
    Straight { edge: usize },
}

/// A quad-shaped slice of a room's wall.
///
/// `a`→`b` lies on the outer side, `c`→`d` on the inner side, both in
/// perimeter order. For corners `c == d` (the inner vertex) and `width` is 0.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WallSection {
    pub kind: SectionKind,
    pub a: Point2,
    pub b: Point2,
    pub c: Point2,
    pub d: Point2,
    /// Unit direction along the wall.
    pub along: Vector2,
    pub width: f64,
}

impl WallSection {
    #[must_use]
    pub fn is_corner(&self) -> bool {
        matches!(self.kind, SectionKind::Corner { .. })
    }

    #[must_use]
    pub fn outer_segment(&self) -> Segment2 {
        Segment2::new(self.a, self.b)
    }

    #[must_use]
    pub fn inner_segment(&self) -> Segment2 {
        Segment2::new(self.c, self.d)
    }

    /// The part of this section between parametric positions `from` and `to`
    /// along its inner edge.
    #[must_use]
    pub fn slice(&self, from: f64, to: f64) -> WallSection {
        let outer = self.outer_segment();
        let inner = self.inner_segment();
        WallSection {
            kind: self.kind,
            a: outer.point_at(from),
            b: outer.point_at(to),
            c: inner.point_at(from),
            d: inner.point_at(to),
            along: self.along,
            width: self.width * (to - from),
        }
    }
}

/// Decomposes matched outer/inner footprints into wall sections in
/// perimeter order: `corner(0), straight(0), corner(1), straight(1), …`.
///
/// `outer[i]` and `inner[i]` must be the same physical vertex.
pub(crate) fn build_sections(outer: &[Point2], inner: &[Point2]) -> Vec<WallSection> {
    let n = outer.len();
    let mut sections = Vec::with_capacity(n * 2);

    for i in 0..n {
        let prev_edge = Segment2::polygon_edge(outer, i + n - 1);
        let next_edge = Segment2::polygon_edge(outer, i);
        let inner_vertex = inner[i];

        // Corner: from the end of the previous straight to the start of the next.
        let a = prev_edge.project(&inner_vertex);
        let b = next_edge.project(&inner_vertex);
        let along = Segment2::new(a, b).direction();
        sections.push(WallSection {
            kind: SectionKind::Corner {
                vertex: i,
                apex: outer[i],
            },
            a,
            b,
            c: inner_vertex,
            d: inner_vertex,
            along: if along.norm() < TOLERANCE {
                next_edge.direction()
            } else {
                along
            },
            width: 0.0,
        });

        // Straight: the rest of edge i.
        let c = inner[i];
        let d = inner[(i + 1) % n];
        let a = next_edge.project(&c);
        let b = next_edge.project(&d);
        sections.push(WallSection {
            kind: SectionKind::Straight { edge: i },
            a,
            b,
            c,
            d,
            along: next_edge.direction(),
            width: (b - a).norm(),
        });
    }

    sections
}
