use super::orientation::{cross, dot};
use super::{eps_eq, eps_ge, eps_le, points_eq, Point2, Vector2, TOLERANCE};

/// `true` if `p` lies on the closed segment `[a, b]`.
///
/// Collinearity is tested against [`TOLERANCE`], the projection bound exactly.
#[must_use]
#[allow(clippy::float_cmp)]
pub fn point_on_segment(p: &Point2, a: &Point2, b: &Point2) -> bool {
    if a == p || b == p {
        return true;
    }
    if cross(a, b, p).abs() > TOLERANCE {
        return false;
    }
    let projection = dot(a, b, p);
    if projection < 0.0 {
        return false;
    }
    projection <= (b - a).norm_squared()
}

/// Intersection point of the segments `[a0, a1]` and `[b0, b1]`.
///
/// Degenerate (single point) segments and shared endpoints are answered
/// directly. For collinear overlaps the overlap point closest to `a0` is
/// returned. Parameters are clamped to be non-negative so rounding never
/// places the result behind a segment start.
#[must_use]
pub fn segment_segment_intersect_2d(
    a0: &Point2,
    a1: &Point2,
    b0: &Point2,
    b1: &Point2,
) -> Option<Point2> {
    if points_eq(a0, a1) && point_on_segment(a0, b0, b1) {
        return Some(*a0);
    }
    if points_eq(b0, b1) && point_on_segment(b0, a0, a1) {
        return Some(*b0);
    }
    if points_eq(a0, b0) || points_eq(a0, b1) {
        return Some(*a0);
    }
    if points_eq(a1, b0) || points_eq(a1, b1) {
        return Some(*a1);
    }

    let r = a1 - a0;
    let s = b1 - b0;
    let qp = b0 - a0;
    let rxs = cross_2d(&r, &s);
    let qpxr = cross_2d(&qp, &r);

    if eps_eq(rxs, 0.0) && eps_eq(qpxr, 0.0) {
        let rr = r.dot(&r);
        let t0 = qp.dot(&r) / rr;
        let t1 = t0 + s.dot(&r) / rr;
        let t = interval_overlap_start(t0, t1, 0.0, 1.0)?;
        return Some(a0 + r * t.max(0.0));
    }

    // Parallel and apart.
    if eps_eq(rxs, 0.0) {
        return None;
    }

    let u = qpxr / rxs;
    let t = cross_2d(&qp, &s) / rxs;
    if eps_le(0.0, u) && eps_le(u, 1.0) && eps_ge(t, 0.0) && eps_le(t, 1.0) {
        Some(b0 + s * u.max(0.0))
    } else {
        None
    }
}

/// Intersection of the segment `[a0, a1]` with the ray leaving `origin` at `angle`.
///
/// When the segment lies along the ray, the overlap endpoint farthest along
/// the ray is returned.
#[must_use]
pub fn segment_ray_intersect_2d(
    a0: &Point2,
    a1: &Point2,
    origin: &Point2,
    angle: f64,
) -> Option<Point2> {
    if points_eq(a0, a1) {
        let d = a0 - origin;
        let phi = d.y.atan2(d.x);
        return (eps_eq(phi.cos(), angle.cos()) && eps_eq(phi.sin(), angle.sin())).then_some(*a0);
    }

    let r = Vector2::new(angle.cos(), angle.sin());
    let s = a1 - a0;
    let qp = a0 - origin;
    let rxs = cross_2d(&r, &s);
    let qpxr = cross_2d(&qp, &r);

    if eps_eq(rxs, 0.0) && eps_eq(qpxr, 0.0) {
        let rr = r.dot(&r);
        let t0 = qp.dot(&r) / rr;
        let t1 = t0 + s.dot(&r) / rr;
        let far = t0.max(t1);
        return eps_ge(far, 0.0).then(|| origin + r * far.max(0.0));
    }

    if eps_eq(rxs, 0.0) {
        return None;
    }

    let u = qpxr / rxs;
    let t = cross_2d(&qp, &s) / rxs;
    if eps_le(0.0, u) && eps_le(u, 1.0) && eps_ge(t, 0.0) {
        Some(a0 + s * u.max(0.0))
    } else {
        None
    }
}

/// Start of the overlap of the intervals `[a, b]` and `[c, d]` (either
/// bound order), or `None` if they are disjoint.
fn interval_overlap_start(a: f64, b: f64, c: f64, d: f64) -> Option<f64> {
    let (a, b) = if eps_le(a, b) { (a, b) } else { (b, a) };
    let (c, d) = if eps_le(c, d) { (c, d) } else { (d, c) };

    if eps_le(a, c) && eps_le(c, b) {
        Some(c)
    } else if eps_le(c, a) && eps_le(a, d) {
        Some(a)
    } else if eps_le(a, d) && eps_le(d, b) {
        Some(d)
    } else if eps_le(c, b) && eps_le(b, d) {
        Some(b)
    } else {
        None
    }
}

/// 2D cross product: `(a.x * b.y - a.y * b.x)`.
#[inline]
fn cross_2d(a: &Vector2, b: &Vector2) -> f64 {
    a.x * b.y - a.y * b.x
}
