//! Visibility polygons inside simple polygons.
//!
//! Implements the linear-time sweep of Joe and Simpson (1985): the polygon is
//! normalized around the viewpoint, its boundary is swept once with the
//! advance/retard/scan procedures, and the surviving boundary stack is
//! turned back into a counter-clockwise polygon.
//!
//! ```
//! use visipol::math::Point2;
//! use visipol::{SimplePolygon, VisibilityPolygon};
//!
//! let room = SimplePolygon::new(vec![
//!     Point2::new(-2.0, 2.0),
//!     Point2::new(6.0, 2.0),
//!     Point2::new(4.0, 6.0),
//!     Point2::new(1.0, 4.0),
//!     Point2::new(-1.0, 6.0),
//!     Point2::new(-2.0, 4.0),
//! ]);
//!
//! let visible = VisibilityPolygon::new(&room, Point2::new(4.0, 4.0))
//!     .execute()
//!     .unwrap();
//! assert_eq!(visible.len(), 5);
//! ```

pub mod error;
pub mod geometry;
pub mod math;
pub mod operations;

pub use error::{Result, VisipolError};
pub use geometry::{LineSegment, Ray2, SimplePolygon};
pub use operations::visibility::{BatchVisibility, VisibilityParams, VisibilityPolygon};
