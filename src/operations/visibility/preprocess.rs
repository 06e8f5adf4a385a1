use std::f64::consts::{PI, TAU};

use tracing::warn;

use crate::error::{OperationError, Result};
use crate::geometry::SimplePolygon;
use crate::math::{orientation, points_eq, Orientation, Point2, PolarPoint};

/// A boundary point with its angular displacement from `v0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct VertexDisplacement {
    pub point: PolarPoint,
    pub alpha: f64,
}

impl VertexDisplacement {
    pub fn new(point: PolarPoint, alpha: f64) -> Self {
        Self { point, alpha }
    }

    pub fn cartesian(&self) -> Point2 {
        self.point.to_cartesian()
    }
}

/// Polygon vertices around the viewpoint, starting at `v0` on the positive
/// x-axis, each carrying its accumulated angular displacement.
///
/// When the viewpoint is itself a vertex, that vertex is not part of the
/// sequence; postprocessing appends it to the result.
#[derive(Debug, Clone)]
pub(crate) struct CanonicalSequence {
    entries: Vec<VertexDisplacement>,
    z_is_vertex: bool,
}

impl CanonicalSequence {
    pub fn entries(&self) -> &[VertexDisplacement] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn z_is_vertex(&self) -> bool {
        self.z_is_vertex
    }
}

/// Output of [`preprocess`]: the sequence and the clockwise rotation that
/// moved `v0` onto the positive x-axis.
#[derive(Debug, Clone)]
pub(crate) struct Preprocessed {
    pub sequence: CanonicalSequence,
    pub rotation: f64,
}

/// Shifts `viewpoint` to the origin, picks the start vertex `v0`, rotates
/// `v0` onto the positive x-axis and computes angular displacements.
///
/// # Errors
///
/// Returns `OperationError::Failed` if no vertex can serve as `v0`, which
/// only happens for viewpoints outside the polygon.
pub(crate) fn preprocess(polygon: &SimplePolygon, viewpoint: &Point2) -> Result<Preprocessed> {
    let shifted = polygon.translated(&(-viewpoint.coords));
    let origin = Point2::origin();
    let n = shifted.len();

    let apex = shifted.vertices().iter().position(|v| points_eq(v, &origin));
    let start = initial_vertex(&shifted, apex).ok_or_else(|| {
        OperationError::Failed("no polygon vertex is visible from the viewpoint".to_owned())
    })?;
    let rotation = PolarPoint::from_cartesian(&shifted.vertices()[start]).theta;

    let points: Vec<PolarPoint> = (0..n)
        .map(|k| (start + k) % n)
        .filter(|&i| Some(i) != apex)
        .map(|i| PolarPoint::from_cartesian(&shifted.vertices()[i]).rotated_clockwise(rotation))
        .collect();

    Ok(Preprocessed {
        sequence: CanonicalSequence {
            entries: angular_displacements(&points),
            z_is_vertex: apex.is_some(),
        },
        rotation,
    })
}

/// Index of the start vertex `v0` in the shifted polygon.
///
/// - viewpoint is a vertex: the next vertex in CCW order;
/// - viewpoint on an edge: that edge's end vertex;
/// - otherwise: the nearest vertex visible from the origin.
fn initial_vertex(shifted: &SimplePolygon, apex: Option<usize>) -> Option<usize> {
    let n = shifted.len();
    if let Some(apex) = apex {
        return Some((apex + 1) % n);
    }

    let origin = Point2::origin();
    if let Some(edge) = shifted.edges().position(|e| e.contains_point(&origin)) {
        return Some((edge + 1) % n);
    }

    let mut best: Option<(usize, f64)> = None;
    for (i, v) in shifted.vertices().iter().enumerate() {
        if !shifted.is_visible(&origin, v) {
            continue;
        }
        let r = PolarPoint::from_cartesian(v).r;
        if best.map_or(true, |(_, best_r)| r < best_r) {
            best = Some((i, r));
        }
    }
    best.map(|(i, _)| i)
}

/// Accumulates the signed turn between consecutive points, as seen from
/// the origin. Each step is the smaller of the two arcs between the angles.
fn angular_displacements(points: &[PolarPoint]) -> Vec<VertexDisplacement> {
    let origin = Point2::origin();
    let mut out: Vec<VertexDisplacement> = Vec::with_capacity(points.len());

    for (i, p) in points.iter().enumerate() {
        let alpha = match out.last() {
            None => p.theta,
            Some(prev) => {
                let raw = (p.theta - prev.point.theta).abs();
                let angle = raw.min(TAU - raw);
                let alpha = match orientation(&origin, &prev.cartesian(), &p.to_cartesian()) {
                    Orientation::CounterClockwise => prev.alpha + angle,
                    Orientation::Clockwise => prev.alpha - angle,
                    Orientation::Collinear => prev.alpha,
                };
                if (alpha - prev.alpha).abs() >= PI {
                    warn!(
                        index = i,
                        step = alpha - prev.alpha,
                        "angular displacement step of half a turn, input is likely malformed"
                    );
                }
                alpha
            }
        };
        out.push(VertexDisplacement::new(*p, alpha));
    }

    out
}
