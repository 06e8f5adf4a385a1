//! Tolerance-aware comparisons.
//!
//! Every decision the visibility sweep makes goes through these predicates,
//! so two values closer than [`TOLERANCE`] are never ordered.

use super::{Point2, TOLERANCE};

/// `true` if `a` and `b` differ by less than [`TOLERANCE`].
#[must_use]
#[allow(clippy::float_cmp)]
pub fn eps_eq(a: f64, b: f64) -> bool {
    a == b || (a - b).abs() < TOLERANCE
}

/// Negation of [`eps_eq`].
#[must_use]
pub fn eps_ne(a: f64, b: f64) -> bool {
    !eps_eq(a, b)
}

/// `a < b` by more than the tolerance.
#[must_use]
pub fn eps_lt(a: f64, b: f64) -> bool {
    a < b && eps_ne(a, b)
}

/// `a > b` by more than the tolerance.
#[must_use]
pub fn eps_gt(a: f64, b: f64) -> bool {
    a > b && eps_ne(a, b)
}

/// `a <= b` up to the tolerance.
#[must_use]
pub fn eps_le(a: f64, b: f64) -> bool {
    eps_eq(a, b) || a < b
}

/// `a >= b` up to the tolerance.
#[must_use]
pub fn eps_ge(a: f64, b: f64) -> bool {
    eps_eq(a, b) || a > b
}

/// Component-wise [`eps_eq`] on two points.
#[must_use]
pub fn points_eq(a: &Point2, b: &Point2) -> bool {
    eps_eq(a.x, b.x) && eps_eq(a.y, b.y)
}
