use super::Point2;

/// Turn direction of an ordered point triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    CounterClockwise,
    Clockwise,
    Collinear,
}

/// Classifies the turn `a -> b -> c` by the sign of [`cross`].
///
/// Zero and NaN cross products are both reported as collinear.
#[must_use]
pub fn orientation(a: &Point2, b: &Point2, c: &Point2) -> Orientation {
    let cross = cross(a, b, c);
    if cross > 0.0 {
        Orientation::CounterClockwise
    } else if cross < 0.0 {
        Orientation::Clockwise
    } else {
        Orientation::Collinear
    }
}

/// Cross product of `(b - a)` and `(c - a)`.
#[must_use]
pub fn cross(a: &Point2, b: &Point2, c: &Point2) -> f64 {
    (b.x - a.x) * (c.y - a.y) - (b.y - a.y) * (c.x - a.x)
}

/// Dot product of `(b - a)` and `(c - a)`.
#[must_use]
pub fn dot(a: &Point2, b: &Point2, c: &Point2) -> f64 {
    (c.x - a.x) * (b.x - a.x) + (c.y - a.y) * (b.y - a.y)
}

/// `true` if the open interiors of `[a, b]` and `[c, d]` cross.
///
/// Touching at an endpoint or overlapping collinearly does not count.
#[must_use]
pub fn proper_intersect(a: &Point2, b: &Point2, c: &Point2, d: &Point2) -> bool {
    cross(a, b, c) * cross(a, b, d) < 0.0 && cross(c, d, a) * cross(c, d, b) < 0.0
}
