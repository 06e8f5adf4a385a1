use crate::math::intersect_2d::{
    point_on_segment, segment_ray_intersect_2d, segment_segment_intersect_2d,
};
use crate::math::orientation::proper_intersect;
use crate::math::{points_eq, Point2};

use super::Ray2;

/// A directed line segment from `start` to `end`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineSegment {
    pub start: Point2,
    pub end: Point2,
}

impl LineSegment {
    /// Creates a segment between two points.
    #[must_use]
    pub fn new(start: Point2, end: Point2) -> Self {
        Self { start, end }
    }

    /// `true` if both endpoints coincide within tolerance.
    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        points_eq(&self.start, &self.end)
    }

    #[must_use]
    pub fn contains_point(&self, p: &Point2) -> bool {
        point_on_segment(p, &self.start, &self.end)
    }

    /// `true` if the open interiors of the two segments cross.
    #[must_use]
    pub fn intersects_properly(&self, other: &Self) -> bool {
        proper_intersect(&self.start, &self.end, &other.start, &other.end)
    }

    /// Intersection point with another segment, see [`segment_segment_intersect_2d`].
    #[must_use]
    pub fn intersection(&self, other: &Self) -> Option<Point2> {
        segment_segment_intersect_2d(&self.start, &self.end, &other.start, &other.end)
    }

    /// Intersection point with a ray, see [`segment_ray_intersect_2d`].
    #[must_use]
    pub fn ray_intersection(&self, ray: &Ray2) -> Option<Point2> {
        segment_ray_intersect_2d(&self.start, &self.end, ray.origin(), ray.angle())
    }
}
