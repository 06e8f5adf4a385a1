//! Visibility polygon of a point inside a simple polygon.
//!
//! The computation runs in three stages: [`preprocess`] normalizes the
//! polygon around the viewpoint, [`sweep`] walks its boundary once and
//! [`postprocess`] maps the surviving boundary back to the caller's frame.

#[cfg(test)]
mod fixtures;
mod postprocess;
mod preprocess;
mod sweep;

use rayon::prelude::*;
use tracing::debug;

use crate::error::{GeometryError, Result};
use crate::geometry::SimplePolygon;
use crate::math::Point2;

use postprocess::postprocess;
use preprocess::preprocess;
use sweep::Sweep;

/// Validation and output switches for visibility computations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VisibilityParams {
    /// Reject polygons whose vertices are not in counter-clockwise order.
    pub check_winding: bool,
    /// Reject viewpoints outside the polygon. Boundary points are accepted.
    pub check_containment: bool,
    /// Drop duplicate and collinear vertices from the result.
    pub merge_collinear: bool,
}

impl Default for VisibilityParams {
    fn default() -> Self {
        Self {
            check_winding: true,
            check_containment: true,
            merge_collinear: false,
        }
    }
}

/// Computes the region of a simple polygon visible from one viewpoint.
///
/// The polygon must be simple and counter-clockwise. The viewpoint may lie
/// in the interior, on an edge or on a vertex. The result lists its vertices
/// counter-clockwise.
pub struct VisibilityPolygon<'a> {
    polygon: &'a SimplePolygon,
    viewpoint: Point2,
    params: VisibilityParams,
}

impl<'a> VisibilityPolygon<'a> {
    /// Creates a new `VisibilityPolygon` operation with default parameters.
    #[must_use]
    pub fn new(polygon: &'a SimplePolygon, viewpoint: Point2) -> Self {
        Self {
            polygon,
            viewpoint,
            params: VisibilityParams::default(),
        }
    }

    #[must_use]
    pub fn with_params(mut self, params: VisibilityParams) -> Self {
        self.params = params;
        self
    }

    /// Executes the operation, returning the visibility polygon.
    ///
    /// # Errors
    ///
    /// - `GeometryError::TooFewVertices` if the polygon has fewer than 3
    ///   vertices.
    /// - `GeometryError::ClockwiseWinding` if winding is checked and the
    ///   polygon is clockwise.
    /// - `GeometryError::ViewpointOutside` if containment is checked and the
    ///   viewpoint lies outside the polygon.
    /// - `OperationError::Failed` if the sweep meets input that is not a
    ///   simple polygon around the viewpoint.
    pub fn execute(&self) -> Result<SimplePolygon> {
        validate_polygon(self.polygon, &self.params)?;
        visibility_from(self.polygon, &self.viewpoint, &self.params)
    }
}

/// Computes visibility polygons for many viewpoints in the same polygon.
///
/// Viewpoints are processed in parallel. Result `i` belongs to viewpoint `i`.
pub struct BatchVisibility<'a> {
    polygon: &'a SimplePolygon,
    viewpoints: Vec<Point2>,
    params: VisibilityParams,
}

impl<'a> BatchVisibility<'a> {
    #[must_use]
    pub fn new(polygon: &'a SimplePolygon, viewpoints: Vec<Point2>) -> Self {
        Self {
            polygon,
            viewpoints,
            params: VisibilityParams::default(),
        }
    }

    /// Sets the parameters shared by every viewpoint.
    #[must_use]
    pub fn with_params(mut self, params: VisibilityParams) -> Self {
        self.params = params;
        self
    }

    /// Executes the operation, returning one polygon per viewpoint.
    ///
    /// # Errors
    ///
    /// Fails on the same conditions as [`VisibilityPolygon::execute`]. The
    /// first failing viewpoint fails the whole batch.
    pub fn execute(&self) -> Result<Vec<SimplePolygon>> {
        validate_polygon(self.polygon, &self.params)?;
        debug!(
            viewpoints = self.viewpoints.len(),
            vertices = self.polygon.len(),
            "batch visibility"
        );
        self.viewpoints
            .par_iter()
            .map(|z| visibility_from(self.polygon, z, &self.params))
            .collect()
    }
}

fn validate_polygon(polygon: &SimplePolygon, params: &VisibilityParams) -> Result<()> {
    if polygon.len() < 3 {
        return Err(GeometryError::TooFewVertices {
            count: polygon.len(),
        }
        .into());
    }
    if params.check_winding && !polygon.is_ccw() {
        return Err(GeometryError::ClockwiseWinding {
            signed_area: polygon.signed_area(),
        }
        .into());
    }
    Ok(())
}

fn visibility_from(
    polygon: &SimplePolygon,
    viewpoint: &Point2,
    params: &VisibilityParams,
) -> Result<SimplePolygon> {
    if params.check_containment && !polygon.contains_point(viewpoint) {
        return Err(GeometryError::ViewpointOutside {
            x: viewpoint.x,
            y: viewpoint.y,
        }
        .into());
    }

    debug!(
        x = viewpoint.x,
        y = viewpoint.y,
        vertices = polygon.len(),
        "computing visibility polygon"
    );

    let pre = preprocess(polygon, viewpoint)?;
    let boundary = Sweep::new(&pre.sequence)?.run()?;
    let result = postprocess(
        &boundary,
        pre.sequence.z_is_vertex(),
        pre.rotation,
        viewpoint,
        params.merge_collinear,
    );

    debug!(vertices = result.len(), "visibility polygon done");
    Ok(result)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::f64::consts::TAU;

    use proptest::prelude::*;
    use proptest::sample::Index;

    use super::fixtures::{comb, convex, notched, spiral, walled_room};
    use super::*;
    use crate::error::VisipolError;
    use crate::geometry::LineSegment;
    use crate::math::orientation::cross;
    use crate::math::points_eq;

    fn p(x: f64, y: f64) -> Point2 {
        Point2::new(x, y)
    }

    fn init_tracing() {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    }

    fn assert_vertices(actual: &SimplePolygon, expected: &[(f64, f64)]) {
        assert_eq!(
            actual.len(),
            expected.len(),
            "got {:?}",
            actual.vertices()
        );
        for (v, &(x, y)) in actual.vertices().iter().zip(expected) {
            assert!(points_eq(v, &p(x, y)), "expected ({x}, {y}), got {v:?}");
        }
    }

    /// `true` if some edge clearly crosses the sight line from `z` to just
    /// short of `w`. Grazing contacts within `1e-9` do not count.
    fn blocked(polygon: &SimplePolygon, z: &Point2, w: &Point2) -> bool {
        let near = z + (w - z) * 0.999;
        polygon.edges().any(|e| {
            let c = [
                cross(&e.start, &e.end, z),
                cross(&e.start, &e.end, &near),
                cross(z, &near, &e.start),
                cross(z, &near, &e.end),
            ];
            c.iter().all(|x| x.abs() > 1e-9) && c[0] * c[1] < 0.0 && c[2] * c[3] < 0.0
        })
    }

    fn assert_all_visible(polygon: &SimplePolygon, z: &Point2, result: &SimplePolygon) {
        for w in result.vertices() {
            assert!(!blocked(polygon, z, w), "{w:?} not visible from {z:?}");
        }
    }

    fn on_boundary(polygon: &SimplePolygon, w: &Point2) -> bool {
        polygon.edges().any(|e: LineSegment| {
            let d = e.end - e.start;
            let t = ((w - e.start).dot(&d) / d.norm_squared()).clamp(0.0, 1.0);
            (w - (e.start + d * t)).norm() < 1e-7
        })
    }

    // ── fixtures ──

    #[test]
    fn interior_viewpoint_convex() {
        init_tracing();
        let vp = VisibilityPolygon::new(&convex(), p(4.0, 4.0)).execute().unwrap();
        assert_vertices(&vp, &[(4.0, 6.0), (2.0, 2.0), (6.0, 2.0), (6.0, 6.0)]);
    }

    #[test]
    fn interior_viewpoint_notched() {
        init_tracing();
        let poly = notched();
        let z = p(4.0, 4.0);
        let vp = VisibilityPolygon::new(&poly, z).execute().unwrap();
        assert_vertices(&vp, &[(4.0, 6.0), (1.0, 4.0), (-2.0, 4.0), (-2.0, 2.0), (6.0, 2.0)]);
        assert!(vp.is_ccw());
        assert_all_visible(&poly, &z, &vp);
    }

    #[test]
    fn edge_viewpoint_notched_casts_shadow() {
        init_tracing();
        let poly = notched();
        let z = p(-2.0, 3.0);
        let vp = VisibilityPolygon::new(&poly, z).execute().unwrap();
        assert_vertices(
            &vp,
            &[
                (-2.0, 2.0),
                (6.0, 2.0),
                (4.428_571_428_571_428, 5.142_857_142_857_142),
                (1.0, 4.0),
                (-1.0, 6.0),
                (-2.0, 4.0),
            ],
        );
        assert!(vp.is_ccw());
    }

    #[test]
    fn vertex_viewpoint_notched() {
        init_tracing();
        let vp = VisibilityPolygon::new(&notched(), p(1.0, 4.0)).execute().unwrap();
        assert_vertices(
            &vp,
            &[(-1.0, 6.0), (-2.0, 4.0), (-2.0, 2.0), (6.0, 2.0), (4.0, 6.0), (1.0, 4.0)],
        );
        assert!(vp.is_ccw());
    }

    #[test]
    fn edge_viewpoint_convex() {
        let vp = VisibilityPolygon::new(&convex(), p(4.0, 2.0)).execute().unwrap();
        assert_vertices(&vp, &[(6.0, 2.0), (6.0, 6.0), (4.0, 6.0), (2.0, 2.0)]);
    }

    #[test]
    fn vertex_viewpoint_convex() {
        let vp = VisibilityPolygon::new(&convex(), p(6.0, 2.0)).execute().unwrap();
        assert_vertices(&vp, &[(6.0, 6.0), (4.0, 6.0), (2.0, 2.0), (6.0, 2.0)]);
    }

    #[test]
    fn spiral_sees_first_corridor() {
        init_tracing();
        let poly = spiral();
        let z = p(0.25, 0.25);
        let vp = VisibilityPolygon::new(&poly, z).execute().unwrap();
        assert_vertices(
            &vp,
            &[(0.0, 0.0), (6.0, 0.0), (6.0, 22.0 / 19.0), (5.0, 1.0), (0.0, 1.0)],
        );
        assert!(vp.is_ccw());
        assert_all_visible(&poly, &z, &vp);
    }

    #[test]
    fn comb_base_sees_into_neighbouring_teeth() {
        let poly = comb();
        let z = p(5.0, 0.5);
        let vp = VisibilityPolygon::new(&poly, z).execute().unwrap();
        assert_vertices(
            &vp,
            &[
                (6.0, 1.0),
                (4.0, 1.0),
                (3.0, 1.5),
                (3.0, 1.0),
                (1.0, 1.0),
                (0.0, 1.125),
                (0.0, 0.0),
                (10.0, 0.0),
                (10.0, 1.125),
                (9.0, 1.0),
                (7.0, 1.0),
                (7.0, 1.5),
            ],
        );
        assert!(vp.is_ccw());
        assert_all_visible(&poly, &z, &vp);
    }

    #[test]
    fn comb_tooth_looks_down_into_base() {
        let poly = comb();
        let z = p(0.5, 4.5);
        let vp = VisibilityPolygon::new(&poly, z).execute().unwrap();
        assert_vertices(
            &vp,
            &[(1.0, 5.0), (0.0, 5.0), (0.0, 0.0), (8.0 / 7.0, 0.0), (1.0, 1.0)],
        );
        assert!(vp.is_ccw());
        assert_all_visible(&poly, &z, &vp);
    }

    #[test]
    fn wall_across_shadow_ray_hides_pocket() {
        let poly = walled_room(false);
        let z = p(0.0, 0.0);
        let vp = VisibilityPolygon::new(&poly, z).execute().unwrap();
        assert_vertices(
            &vp,
            &[
                (2.0, 0.0),
                (2.0, 2.0),
                (64.0 / 17.0, 64.0 / 17.0),
                (3.6, 4.0),
                (-7.0, 6.0),
                (-7.0, -7.0),
                (2.0, -7.0),
            ],
        );
        assert!(vp.is_ccw());
        assert_all_visible(&poly, &z, &vp);
    }

    #[test]
    fn wall_tip_on_shadow_ray() {
        let poly = walled_room(true);
        let z = p(0.0, 0.0);
        let vp = VisibilityPolygon::new(&poly, z).execute().unwrap();
        assert_vertices(
            &vp,
            &[
                (2.0, 0.0),
                (2.0, 2.0),
                (5.0, 5.0),
                (3.4, 4.4),
                (-7.0, 6.0),
                (-7.0, -7.0),
                (2.0, -7.0),
            ],
        );
        assert!(vp.is_ccw());
        assert_all_visible(&poly, &z, &vp);
    }

    // ── validation ──

    #[test]
    fn too_few_vertices() {
        let line = SimplePolygon::new(vec![p(0.0, 0.0), p(1.0, 0.0)]);
        let err = VisibilityPolygon::new(&line, p(0.5, 0.0)).execute().unwrap_err();
        assert!(matches!(
            err,
            VisipolError::Geometry(GeometryError::TooFewVertices { count: 2 })
        ));

        let err = BatchVisibility::new(&line, vec![p(0.5, 0.0)]).execute().unwrap_err();
        assert!(matches!(
            err,
            VisipolError::Geometry(GeometryError::TooFewVertices { count: 2 })
        ));
    }

    #[test]
    fn clockwise_polygon_rejected() {
        let mut cw = convex().into_vertices();
        cw.reverse();
        let cw = SimplePolygon::new(cw);
        let err = VisibilityPolygon::new(&cw, p(4.0, 4.0)).execute().unwrap_err();
        match err {
            VisipolError::Geometry(GeometryError::ClockwiseWinding { signed_area }) => {
                assert!(signed_area < 0.0);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn viewpoint_outside_rejected() {
        // (1, 5) lies in the notch, outside the polygon.
        let err = VisibilityPolygon::new(&notched(), p(1.0, 5.0)).execute().unwrap_err();
        assert!(matches!(
            err,
            VisipolError::Geometry(GeometryError::ViewpointOutside { .. })
        ));
    }

    #[test]
    fn unchecked_params_keep_valid_results() {
        let params = VisibilityParams {
            check_winding: false,
            check_containment: false,
            merge_collinear: false,
        };
        let checked = VisibilityPolygon::new(&notched(), p(4.0, 4.0)).execute().unwrap();
        let unchecked = VisibilityPolygon::new(&notched(), p(4.0, 4.0))
            .with_params(params)
            .execute()
            .unwrap();
        assert_eq!(checked, unchecked);
    }

    // ── params ──

    #[test]
    fn default_params() {
        let params = VisibilityParams::default();
        assert!(params.check_winding);
        assert!(params.check_containment);
        assert!(!params.merge_collinear);
    }

    #[test]
    fn merge_collinear_drops_midpoints() {
        // Midpoints on the bottom and right edges are vertices of the
        // polygon and of the plain result.
        let poly = SimplePolygon::new(vec![
            p(0.0, 0.0),
            p(2.0, 0.0),
            p(4.0, 0.0),
            p(4.0, 2.0),
            p(4.0, 4.0),
            p(0.0, 4.0),
        ]);
        let z = p(1.0, 1.0);
        let plain = VisibilityPolygon::new(&poly, z).execute().unwrap();
        assert_eq!(plain.len(), 6);

        let params = VisibilityParams {
            merge_collinear: true,
            ..VisibilityParams::default()
        };
        let merged = VisibilityPolygon::new(&poly, z).with_params(params).execute().unwrap();
        assert_eq!(merged.len(), 4);
        assert!(merged.is_ccw());
    }

    // ── batch ──

    #[test]
    fn batch_matches_single_runs_in_order() {
        let poly = notched();
        let viewpoints = vec![p(4.0, 4.0), p(-2.0, 3.0), p(1.0, 4.0)];
        let batch = BatchVisibility::new(&poly, viewpoints.clone()).execute().unwrap();
        assert_eq!(batch.len(), viewpoints.len());
        for (z, result) in viewpoints.iter().zip(&batch) {
            let single = VisibilityPolygon::new(&poly, *z).execute().unwrap();
            assert_eq!(&single, result);
        }
    }

    #[test]
    fn batch_fails_on_any_outside_viewpoint() {
        let poly = notched();
        let err = BatchVisibility::new(&poly, vec![p(4.0, 4.0), p(10.0, 10.0)])
            .execute()
            .unwrap_err();
        assert!(matches!(
            err,
            VisipolError::Geometry(GeometryError::ViewpointOutside { .. })
        ));
    }

    #[test]
    fn batch_empty() {
        let batch = BatchVisibility::new(&convex(), Vec::new()).execute().unwrap();
        assert!(batch.is_empty());
    }

    // ── properties ──

    fn regular_polygon(n: usize, radius: f64, phase: f64, center: Point2) -> SimplePolygon {
        #[allow(clippy::cast_precision_loss)]
        let step = TAU / n as f64;
        SimplePolygon::new(
            (0..n)
                .map(|k| {
                    #[allow(clippy::cast_precision_loss)]
                    let angle = phase + step * k as f64;
                    p(center.x + radius * angle.cos(), center.y + radius * angle.sin())
                })
                .collect(),
        )
    }

    /// Star-shaped about the origin: spoke `k` sits at angle
    /// `(k + jitter) * 2pi / n` with the given radius.
    fn radial_polygon(spokes: &[(f64, f64)]) -> SimplePolygon {
        #[allow(clippy::cast_precision_loss)]
        let step = TAU / spokes.len() as f64;
        SimplePolygon::new(
            spokes
                .iter()
                .enumerate()
                .map(|(k, &(jitter, radius))| {
                    #[allow(clippy::cast_precision_loss)]
                    let angle = step * k as f64 + jitter * step;
                    p(radius * angle.cos(), radius * angle.sin())
                })
                .collect(),
        )
    }

    /// `center + s * (a + u * (b - a) - center)` for the edge `a -> b`
    /// starting at vertex `k`.
    fn towards_edge(poly: &SimplePolygon, center: &Point2, k: usize, u: f64, s: f64) -> Point2 {
        let a = poly.vertices()[k];
        let b = poly.vertices()[(k + 1) % poly.len()];
        let target = a + (b - a) * u;
        center + (target - center) * s
    }

    proptest! {
        #[test]
        fn convex_polygon_sees_itself(
            n in 3usize..12,
            radius in 0.5f64..100.0,
            phase in 0.0f64..TAU,
            cx in -100.0f64..100.0,
            cy in -100.0f64..100.0,
            kind in 0usize..3,
            edge in any::<Index>(),
            u in 0.05f64..0.95,
            s in 0.0f64..0.95,
        ) {
            let center = p(cx, cy);
            let poly = regular_polygon(n, radius, phase, center);
            let k = edge.index(n);
            // Interior point, point on an edge, or a vertex.
            let z = match kind {
                0 => towards_edge(&poly, &center, k, u, s),
                1 => towards_edge(&poly, &center, k, u, 1.0),
                _ => poly.vertices()[k],
            };

            let vp = VisibilityPolygon::new(&poly, z).execute().unwrap();
            prop_assert_eq!(vp.len(), n);
            let first = &vp.vertices()[0];
            let shift = poly.vertices().iter().position(|w| (first - w).norm() < 1e-6);
            prop_assert!(shift.is_some(), "{:?} is not a polygon vertex", first);
            let shift = shift.unwrap();
            for (i, v) in vp.vertices().iter().enumerate() {
                let w = &poly.vertices()[(shift + i) % n];
                prop_assert!((v - w).norm() < 1e-6, "vertex {} is {:?}, expected {:?}", i, v, w);
            }
        }

        #[test]
        fn radial_polygon_boundary_is_visible(
            spokes in prop::collection::vec((0.0f64..0.8, 1.0f64..10.0), 5..14),
            edge in any::<Index>(),
            u in 0.0f64..1.0,
            s in 0.0f64..0.999,
        ) {
            let poly = radial_polygon(&spokes);
            let z = towards_edge(&poly, &Point2::origin(), edge.index(poly.len()), u, s);

            let vp = VisibilityPolygon::new(&poly, z).execute().unwrap();
            prop_assert!(vp.is_ccw());
            for w in vp.vertices() {
                prop_assert!(!blocked(&poly, &z, w), "{:?} not visible from {:?}", w, z);
                prop_assert!(on_boundary(&poly, w), "{:?} is off the boundary", w);
            }
        }

        #[test]
        fn repeated_runs_agree(x in -1.9f64..5.9, y in 2.1f64..3.9) {
            let poly = notched();
            let z = p(x, y);
            prop_assume!(poly.contains_point(&z));
            let a = VisibilityPolygon::new(&poly, z).execute().unwrap();
            let b = VisibilityPolygon::new(&poly, z).execute().unwrap();
            prop_assert_eq!(a.len(), b.len());
            for (va, vb) in a.vertices().iter().zip(b.vertices()) {
                prop_assert!((va - vb).norm() < 1e-10);
            }
        }
    }
}
