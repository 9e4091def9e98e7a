pub mod adjacency;
pub mod builder;
pub mod config;
pub mod facade;
pub mod floor;
pub mod neighbour;
pub mod room;
pub mod wall_section;

pub use adjacency::AdjacencyIndex;
pub use builder::FloorPlanBuilder;
pub use config::PlanTolerances;
pub use facade::{Facade, FacadeDeriver, FacadeId, FacadeRing};
pub use floor::{FloorPlan, PlanView};
pub use neighbour::Neighbour;
pub use room::{RoomId, RoomPlan};
pub use wall_section::{SectionKind, WallSection};
