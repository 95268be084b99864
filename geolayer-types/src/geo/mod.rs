//! Types for geographic coordinates.

mod point;

pub use point::{GeoPoint, GeoPoint2d, NewGeoPoint};
