mod derive;

pub use derive::FacadeDeriver;

use slotmap::SlotMap;

use super::room::RoomId;
use super::wall_section::WallSection;

slotmap::new_key_type! {
    /// Unique identifier for a facade within its ring.
    pub struct FacadeId;
}

/// One slice of a room's wall with its classification.
///
/// A facade is external (on the floor outline), faces a neighbouring room,
/// or is plain internal when it is neither.
#[derive(Debug, Clone, PartialEq)]
pub struct Facade {
    pub neighbour: Option<RoomId>,
    /// Outer edge of the neighbouring room this facade faces.
    pub neighbour_edge: Option<usize>,
    pub is_external: bool,
    pub section: WallSection,
    next: FacadeId,
    previous: FacadeId,
}

impl Facade {
    #[must_use]
    pub fn external(section: WallSection) -> Self {
        Self::unlinked(None, None, true, section)
    }

    #[must_use]
    pub fn internal(section: WallSection) -> Self {
        Self::unlinked(None, None, false, section)
    }

    /// A facade shared with outer edge `edge` of room `room`.
    #[must_use]
    pub fn facing(section: WallSection, room: RoomId, edge: usize) -> Self {
        Self::unlinked(Some(room), Some(edge), false, section)
    }

    fn unlinked(
        neighbour: Option<RoomId>,
        neighbour_edge: Option<usize>,
        is_external: bool,
        section: WallSection,
    ) -> Self {
        Self {
            neighbour,
            neighbour_edge,
            is_external,
            section,
            next: FacadeId::default(),
            previous: FacadeId::default(),
        }
    }

    /// The following facade in perimeter order.
    #[must_use]
    pub fn next(&self) -> FacadeId {
        self.next
    }

    /// The preceding facade in perimeter order.
    #[must_use]
    pub fn previous(&self) -> FacadeId {
        self.previous
    }
}

/// A room's facades, linked circularly in perimeter order.
#[derive(Debug, Clone, Default)]
pub struct FacadeRing {
    facades: SlotMap<FacadeId, Facade>,
    order: Vec<FacadeId>,
}

impl FacadeRing {
    /// Stores `facades` and links them into a ring in the given order.
    #[must_use]
    pub fn link(facades: Vec<Facade>) -> Self {
        let mut store = SlotMap::with_capacity_and_key(facades.len());
        let order: Vec<FacadeId> = facades.into_iter().map(|f| store.insert(f)).collect();
        let n = order.len();
        for (k, &id) in order.iter().enumerate() {
            if let Some(facade) = store.get_mut(id) {
                facade.next = order[(k + 1) % n];
                facade.previous = order[(k + n - 1) % n];
            }
        }
        Self {
            facades: store,
            order,
        }
    }

    /// The facade starting the perimeter walk (the one at outer vertex 0).
    #[must_use]
    pub fn head(&self) -> Option<FacadeId> {
        self.order.first().copied()
    }

    #[must_use]
    pub fn get(&self, id: FacadeId) -> Option<&Facade> {
        self.facades.get(id)
    }

    #[must_use]
    pub fn next(&self, id: FacadeId) -> Option<FacadeId> {
        self.facades.get(id).map(Facade::next)
    }

    #[must_use]
    pub fn previous(&self, id: FacadeId) -> Option<FacadeId> {
        self.facades.get(id).map(Facade::previous)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Facades in perimeter order, starting at [`head`](Self::head).
    pub fn iter(&self) -> impl Iterator<Item = (FacadeId, &Facade)> {
        self.order
            .iter()
            .filter_map(|&id| self.facades.get(id).map(|f| (id, f)))
    }
}

impl PartialEq for FacadeRing {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self
                .iter()
                .map(|(_, f)| f)
                .zip(other.iter().map(|(_, f)| f))
                .all(|(a, b)| {
                    a.neighbour == b.neighbour
                        && a.neighbour_edge == b.neighbour_edge
                        && a.is_external == b.is_external
                        && a.section == b.section
                })
    }
}
