use crate::math::{Point2, Vector2};

/// A half-line leaving `origin` at a fixed angle.
///
/// The parametric form is: `P(t) = origin + t * (cos angle, sin angle)`, `t >= 0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray2 {
    origin: Point2,
    angle: f64,
}

impl Ray2 {
    /// Creates a ray from an origin and an angle in radians.
    #[must_use]
    pub fn new(origin: Point2, angle: f64) -> Self {
        Self { origin, angle }
    }

    /// A ray leaving the coordinate origin.
    #[must_use]
    pub fn from_origin(angle: f64) -> Self {
        Self::new(Point2::origin(), angle)
    }

    #[must_use]
    pub fn origin(&self) -> &Point2 {
        &self.origin
    }

    #[must_use]
    pub fn angle(&self) -> f64 {
        self.angle
    }

    /// Unit direction vector.
    #[must_use]
    pub fn direction(&self) -> Vector2 {
        Vector2::new(self.angle.cos(), self.angle.sin())
    }
}
