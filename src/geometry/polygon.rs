use crate::math::orientation::cross;
use crate::math::{points_eq, Point2, Vector2, TOLERANCE};

use super::LineSegment;

/// A simple polygon given by its vertices in counter-clockwise order.
///
/// Simplicity (no self-intersections) is a caller guarantee and is never
/// checked. Winding can be queried with [`SimplePolygon::is_ccw`].
#[derive(Debug, Clone, PartialEq)]
pub struct SimplePolygon {
    vertices: Vec<Point2>,
}

impl SimplePolygon {
    /// Creates a polygon from its vertices.
    #[must_use]
    pub fn new(vertices: Vec<Point2>) -> Self {
        Self { vertices }
    }

    #[must_use]
    pub fn vertices(&self) -> &[Point2] {
        &self.vertices
    }

    /// Consumes the polygon, returning its vertices.
    #[must_use]
    pub fn into_vertices(self) -> Vec<Point2> {
        self.vertices
    }

    /// Returns the number of vertices.
    #[must_use]
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Iterates the edges `v[i] -> v[i + 1]`, closing with `v[n - 1] -> v[0]`.
    pub fn edges(&self) -> impl Iterator<Item = LineSegment> + '_ {
        let n = self.vertices.len();
        (0..n).map(move |i| LineSegment::new(self.vertices[i], self.vertices[(i + 1) % n]))
    }

    /// Returns a copy moved by `offset`.
    #[must_use]
    pub fn translated(&self, offset: &Vector2) -> Self {
        Self::new(self.vertices.iter().map(|v| v + offset).collect())
    }

    /// Returns a copy scaled uniformly about the coordinate origin.
    #[must_use]
    pub fn scaled(&self, factor: f64) -> Self {
        Self::new(self.vertices.iter().map(|v| v * factor).collect())
    }

    /// Signed area (shoelace formula). Positive for counter-clockwise winding.
    #[must_use]
    pub fn signed_area(&self) -> f64 {
        let n = self.vertices.len();
        if n < 3 {
            return 0.0;
        }
        let mut sum = 0.0;
        for i in 0..n {
            let a = &self.vertices[i];
            let b = &self.vertices[(i + 1) % n];
            sum += a.x * b.y - b.x * a.y;
        }
        sum * 0.5
    }

    #[must_use]
    pub fn is_ccw(&self) -> bool {
        self.signed_area() > 0.0
    }

    /// Point-in-polygon test. Points on the boundary count as inside.
    #[must_use]
    pub fn contains_point(&self, p: &Point2) -> bool {
        if self.vertices.len() < 3 {
            return false;
        }
        if self.edges().any(|e| e.contains_point(p)) {
            return true;
        }
        self.winding_number(p) != 0
    }

    /// `true` if no edge properly crosses the sight segment `from -> to`.
    ///
    /// Grazing a vertex or running along an edge does not block the view.
    #[must_use]
    pub fn is_visible(&self, from: &Point2, to: &Point2) -> bool {
        let sight = LineSegment::new(*from, *to);
        !self.edges().any(|e| e.intersects_properly(&sight))
    }

    /// Returns a copy without repeated vertices and without vertices in the
    /// middle of a straight run.
    ///
    /// A vertex where the boundary doubles back on itself is collinear with
    /// its neighbours but is kept. Polygons that would drop below three
    /// vertices are returned unchanged.
    #[must_use]
    pub fn without_collinear(&self) -> Self {
        let mut kept: Vec<Point2> = Vec::with_capacity(self.vertices.len());
        for v in &self.vertices {
            if kept.last().is_some_and(|last| points_eq(last, v)) {
                continue;
            }
            kept.push(*v);
        }
        while kept.len() > 1 && points_eq(&kept[0], &kept[kept.len() - 1]) {
            kept.pop();
        }

        // Removing one vertex can make its neighbour collinear, so sweep
        // until nothing changes.
        let mut changed = true;
        while changed && kept.len() > 3 {
            changed = false;
            let n = kept.len();
            for i in 0..n {
                let prev = kept[(i + n - 1) % n];
                let next = kept[(i + 1) % n];
                let straight = (kept[i] - prev).dot(&(next - kept[i])) >= 0.0;
                if straight && cross(&prev, &kept[i], &next).abs() < TOLERANCE {
                    kept.remove(i);
                    changed = true;
                    break;
                }
            }
        }

        if kept.len() < 3 {
            return self.clone();
        }
        Self::new(kept)
    }

    /// Winding number of `p` with respect to the boundary.
    ///
    /// Non-zero => inside, zero => outside.
    fn winding_number(&self, p: &Point2) -> i32 {
        let n = self.vertices.len();
        let mut winding = 0i32;
        for i in 0..n {
            let a = &self.vertices[i];
            let b = &self.vertices[(i + 1) % n];
            if a.y <= p.y {
                if b.y > p.y && cross(a, b, p) > 0.0 {
                    winding += 1;
                }
            } else if b.y <= p.y && cross(a, b, p) < 0.0 {
                winding -= 1;
            }
        }
        winding
    }
}
