mod aabb;
mod curve;

pub use aabb::AABB;
pub use curve::{Curve, ARC_LENGTH_DIVISIONS, DEGENERATE_TANGENT};
