use std::f64::consts::TAU;

use super::{eps_eq, Point2};

/// A point in polar coordinates about the current origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PolarPoint {
    /// Distance from the origin.
    pub r: f64,
    /// Angle in radians.
    pub theta: f64,
}

impl PolarPoint {
    /// Creates a polar point from radius and angle.
    #[must_use]
    pub fn new(r: f64, theta: f64) -> Self {
        Self { r, theta }
    }

    /// The origin, `r = 0, theta = 0`.
    #[must_use]
    pub fn origin() -> Self {
        Self { r: 0.0, theta: 0.0 }
    }

    /// Converts a cartesian point. `theta` is in `(-pi, pi]` as returned by `atan2`.
    #[must_use]
    pub fn from_cartesian(p: &Point2) -> Self {
        Self {
            r: (p.x * p.x + p.y * p.y).sqrt(),
            theta: p.y.atan2(p.x),
        }
    }

    #[must_use]
    pub fn to_cartesian(&self) -> Point2 {
        Point2::new(self.theta.cos() * self.r, self.theta.sin() * self.r)
    }

    #[must_use]
    pub fn is_origin(&self) -> bool {
        eps_eq(self.r, 0.0)
    }

    /// Rotates clockwise by `delta` radians and renormalizes `theta` into `[0, 2pi)`.
    pub fn rotate_clockwise(&mut self, delta: f64) {
        self.theta -= delta;
        self.normalize();
    }

    /// Returns a copy rotated clockwise by `delta` radians.
    #[must_use]
    pub fn rotated_clockwise(mut self, delta: f64) -> Self {
        self.rotate_clockwise(delta);
        self
    }

    /// `true` if both coordinates agree within tolerance.
    #[must_use]
    pub fn approx_eq(&self, other: &Self) -> bool {
        eps_eq(self.r, other.r) && eps_eq(self.theta, other.theta)
    }

    // Non-positive angles are lifted first, so an angle a hair below zero
    // wraps through 2pi and lands on 0 instead of staying at 2pi.
    fn normalize(&mut self) {
        if !self.theta.is_finite() {
            return;
        }
        while self.theta <= 0.0 {
            self.theta += TAU;
        }
        while self.theta >= TAU {
            self.theta -= TAU;
        }
    }
}
