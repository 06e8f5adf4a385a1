//! Polygons shared by the visibility tests.

use crate::geometry::SimplePolygon;
use crate::math::Point2;

pub fn polygon(points: &[(f64, f64)]) -> SimplePolygon {
    SimplePolygon::new(points.iter().map(|&(x, y)| Point2::new(x, y)).collect())
}

pub fn convex() -> SimplePolygon {
    polygon(&[(6.0, 6.0), (4.0, 6.0), (2.0, 2.0), (6.0, 2.0)])
}

pub fn notched() -> SimplePolygon {
    polygon(&[
        (-2.0, 2.0),
        (6.0, 2.0),
        (4.0, 6.0),
        (1.0, 4.0),
        (-1.0, 6.0),
        (-2.0, 4.0),
    ])
}

/// Square spiral with a corridor of width 1, entered at the origin.
pub fn spiral() -> SimplePolygon {
    polygon(&[
        (0.0, 0.0),
        (6.0, 0.0),
        (6.0, 6.0),
        (1.0, 6.0),
        (1.0, 2.0),
        (4.0, 2.0),
        (4.0, 4.0),
        (3.0, 4.0),
        (3.0, 3.0),
        (2.0, 3.0),
        (2.0, 5.0),
        (5.0, 5.0),
        (5.0, 1.0),
        (0.0, 1.0),
    ])
}

/// Four teeth of width 1 standing on a base strip.
pub fn comb() -> SimplePolygon {
    polygon(&[
        (0.0, 0.0),
        (10.0, 0.0),
        (10.0, 5.0),
        (9.0, 5.0),
        (9.0, 1.0),
        (7.0, 1.0),
        (7.0, 5.0),
        (6.0, 5.0),
        (6.0, 1.0),
        (4.0, 1.0),
        (4.0, 5.0),
        (3.0, 5.0),
        (3.0, 1.0),
        (1.0, 1.0),
        (1.0, 5.0),
        (0.0, 5.0),
    ])
}

/// Room whose corner (2, 2) hides a pocket, with a wall reaching from
/// the left across the corner's shadow ray. `tip` places the wall's end
/// exactly on that ray.
pub fn walled_room(tip: bool) -> SimplePolygon {
    let wall: &[(f64, f64)] = if tip {
        &[(5.0, 5.0), (3.4, 4.4)]
    } else {
        &[(4.0, 5.2), (5.2, 2.2), (5.0, 2.0), (3.6, 4.0)]
    };
    let mut points = vec![
        (2.0, 0.0),
        (2.0, 2.0),
        (3.0, 1.0),
        (6.0, 1.0),
        (7.0, 8.0),
        (-7.0, 8.0),
        (-7.0, 6.5),
    ];
    points.extend_from_slice(wall);
    points.extend_from_slice(&[(-7.0, 6.0), (-7.0, -7.0), (2.0, -7.0)]);
    polygon(&points)
}
