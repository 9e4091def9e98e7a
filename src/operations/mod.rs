pub mod boolean;
pub mod offset;
pub mod polygon_ops;

pub use polygon_ops::{OverlayPolygonOps, PolygonOps};
