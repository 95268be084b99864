//! Value types shared by the `geolayer` crates.
//!
//! The crate is free of any I/O. It defines:
//! * geographic points ([`geo::GeoPoint2d`]) and the closed set of geometry variants ([`Geometry`]),
//! * the [`GeometryCollection`] that keeps geometries bucketed by their [`GeometryType`],
//! * pixel space [`Rect`](cartesian::Rect)angles used for viewport culling,
//! * the [`ScreenProjection`](projection::ScreenProjection) boundary through which a host converts between
//!   geographic and pixel coordinates.

pub mod cartesian;
pub mod collection;
pub mod contour;
pub mod error;
pub mod geo;
pub mod geometry;
pub mod projection;
pub mod segment;

pub use collection::GeometryCollection;
pub use contour::{ClosedContour, Contour};
pub use geometry::{Geometry, GeometryType};
pub use segment::Segment;
