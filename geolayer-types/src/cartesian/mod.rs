//! Types for cartesian (pixel) coordinates.

mod rect;

pub use nalgebra::Point2;
pub use rect::Rect;

/// Pixel position on a draw surface, measured from its top-left corner.
pub type Pixel = Point2<i32>;
