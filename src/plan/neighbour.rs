use crate::math::Point2;

use super::room::RoomId;

/// A span of wall shared by two facing rooms.
///
/// `a`→`b` runs along outer edge `edge_ab` of `room_ab` in that edge's
/// direction; `c`→`d` runs along outer edge `edge_cd` of `room_cd` in its
/// own direction, so `c` faces `b` and `d` faces `a`. The `*t` fields are the
/// parametric positions of the points along their edges (`at <= bt`,
/// `ct <= dt`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Neighbour {
    pub room_ab: RoomId,
    pub edge_ab: usize,
    pub room_cd: RoomId,
    pub edge_cd: usize,
    pub a: Point2,
    pub b: Point2,
    pub c: Point2,
    pub d: Point2,
    pub at: f64,
    pub bt: f64,
    pub ct: f64,
    pub dt: f64,
}

impl Neighbour {
    /// Length of the shared span on `room_ab`'s side.
    #[must_use]
    pub fn length(&self) -> f64 {
        (self.b - self.a).norm()
    }
}
