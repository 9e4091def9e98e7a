mod engine;
mod intersect_op;
mod select;
mod subtract;

pub use intersect_op::Intersect2D;
pub use select::BooleanOp;
pub use subtract::Subtract2D;
