pub mod region;
pub mod segment;

pub use region::Region;
pub use segment::Segment2;
