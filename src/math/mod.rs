pub mod compare;
pub mod intersect_2d;
pub mod orientation;
pub mod polar;

pub use compare::{eps_eq, eps_ge, eps_gt, eps_le, eps_lt, eps_ne, points_eq};
pub use orientation::{orientation, Orientation};
pub use polar::PolarPoint;

/// 2D point type.
pub type Point2 = nalgebra::Point2<f64>;

/// 2D vector type.
pub type Vector2 = nalgebra::Vector2<f64>;

/// Global geometric tolerance for floating-point comparisons.
pub const TOLERANCE: f64 = 1e-10;
