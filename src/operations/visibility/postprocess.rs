use super::preprocess::VertexDisplacement;
use crate::geometry::SimplePolygon;
use crate::math::{Point2, PolarPoint};

/// Maps the swept boundary back into the caller's frame.
///
/// Entries are taken bottom first. When the viewpoint is a polygon vertex it
/// closes the boundary as the last vertex. Every point is rotated back by
/// `rotation` and shifted by `viewpoint`.
pub(crate) fn postprocess(
    boundary: &[VertexDisplacement],
    z_is_vertex: bool,
    rotation: f64,
    viewpoint: &Point2,
    merge_collinear: bool,
) -> SimplePolygon {
    let apex = z_is_vertex.then(PolarPoint::origin);
    let vertices: Vec<Point2> = boundary
        .iter()
        .map(|entry| entry.point)
        .chain(apex)
        .map(|point| point.rotated_clockwise(-rotation).to_cartesian() + viewpoint.coords)
        .collect();

    let polygon = SimplePolygon::new(vertices);
    if merge_collinear {
        polygon.without_collinear()
    } else {
        polygon
    }
}
