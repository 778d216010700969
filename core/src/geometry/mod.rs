use nalgebra as na;

pub type Point2 = na::Point2<f64>;
pub type Vector2 = na::Vector2<f64>;

/// Absolute tolerance used for point coincidence when no other tolerance is supplied.
pub const EPSILON: f64 = 1e-10;

pub mod primitives;
pub use primitives::*;

pub mod utils_2d;

pub mod intersection;
pub use intersection::*;

pub fn dist_sq(p1: &Point2, p2: &Point2) -> f64 {
    na::distance_squared(p1, p2)
}

/// True when the two points are within `tolerance` of each other.
#[inline]
pub fn within(p1: &Point2, p2: &Point2, tolerance: f64) -> bool {
    dist_sq(p1, p2) <= tolerance * tolerance
}
