pub mod polygon;
pub mod ray;
pub mod segment;

pub use polygon::SimplePolygon;
pub use ray::Ray2;
pub use segment::LineSegment;
