pub mod error;
pub mod geometry;
pub mod math;
pub mod operations;
pub mod plan;

pub use error::{FloorplanError, Result};
pub use plan::{
    AdjacencyIndex, Facade, FacadeDeriver, FacadeId, FacadeRing, FloorPlan, FloorPlanBuilder,
    Neighbour, PlanTolerances, PlanView, RoomId, RoomPlan, SectionKind, WallSection,
};
