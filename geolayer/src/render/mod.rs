//! Drawing of geometry layers onto a pixel surface.
//!
//! The drawing surface is abstracted by the [`Canvas`] trait. The host provides an implementation on top of its
//! graphics backend, and the [`ViewportRenderer`] issues draw calls only for the parts of a layer that are inside the
//! canvas' visible area.

use geolayer_types::cartesian::{Pixel, Rect};

use crate::symbology::{LineSymbology, PointSymbology, PolygonSymbology};
use crate::Color;

#[cfg(feature = "image")]
mod image_canvas;
#[cfg(feature = "image")]
pub mod overview;
mod renderer;

#[cfg(feature = "image")]
pub use image_canvas::ImageCanvas;
pub use renderer::{RenderStats, ViewportRenderer};

/// Drawing surface.
pub trait Canvas {
    /// Part of the surface currently shown to the user, in pixels.
    fn visible_rect(&self) -> Rect<i32>;
    /// Draws a filled circle.
    fn draw_circle(&mut self, center: Pixel, paint: &PointPaint);
    /// Draws a straight line segment.
    fn draw_line(&mut self, from: Pixel, to: Pixel, paint: &LinePaint);
    /// Fills an axis-aligned rectangle.
    fn fill_rect(&mut self, rect: Rect<i32>, color: Color);
}

/// Specifies the way a point is drawn: a filled circle of a fixed pixel radius.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointPaint {
    /// Fill color.
    pub color: Color,
    /// Radius in pixels.
    pub radius: f64,
}

impl From<&PointSymbology> for PointPaint {
    fn from(value: &PointSymbology) -> Self {
        Self {
            color: value.color,
            radius: value.radius,
        }
    }
}

/// Specifies the way a line segment is drawn.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinePaint {
    /// Stroke color.
    pub color: Color,
    /// Stroke width in pixels.
    pub width: f64,
}

impl From<&LineSymbology> for LinePaint {
    fn from(value: &LineSymbology) -> Self {
        Self {
            color: value.color,
            width: value.thickness,
        }
    }
}

impl From<&PolygonSymbology> for LinePaint {
    fn from(value: &PolygonSymbology) -> Self {
        Self {
            color: value.color,
            width: value.thickness,
        }
    }
}

/// A single draw call issued to a [`Canvas`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DrawPrimitive {
    /// See [`Canvas::draw_circle`].
    Circle {
        /// Center of the circle.
        center: Pixel,
        /// Paint of the circle.
        paint: PointPaint,
    },
    /// See [`Canvas::draw_line`].
    Line {
        /// Start of the segment.
        from: Pixel,
        /// End of the segment.
        to: Pixel,
        /// Paint of the segment.
        paint: LinePaint,
    },
    /// See [`Canvas::fill_rect`].
    Rect {
        /// Filled area.
        rect: Rect<i32>,
        /// Fill color.
        color: Color,
    },
}

/// Canvas that does not draw anything but remembers every draw call it receives.
///
/// Useful to check what a renderer does, or to forward the draw calls to a backend that cannot implement [`Canvas`]
/// directly.
#[derive(Debug, Clone)]
pub struct RecordingCanvas {
    visible: Rect<i32>,
    primitives: Vec<DrawPrimitive>,
}

impl RecordingCanvas {
    /// Creates an empty canvas with the given visible area.
    pub fn new(visible: Rect<i32>) -> Self {
        Self {
            visible,
            primitives: vec![],
        }
    }

    /// Draw calls received so far, in order.
    pub fn primitives(&self) -> &[DrawPrimitive] {
        &self.primitives
    }

    /// Endpoints of all received line segments.
    pub fn lines(&self) -> Vec<(Pixel, Pixel)> {
        self.primitives
            .iter()
            .filter_map(|primitive| match primitive {
                DrawPrimitive::Line { from, to, .. } => Some((*from, *to)),
                _ => None,
            })
            .collect()
    }

    /// Centers of all received circles.
    pub fn circles(&self) -> Vec<Pixel> {
        self.primitives
            .iter()
            .filter_map(|primitive| match primitive {
                DrawPrimitive::Circle { center, .. } => Some(*center),
                _ => None,
            })
            .collect()
    }
}

impl Canvas for RecordingCanvas {
    fn visible_rect(&self) -> Rect<i32> {
        self.visible
    }

    fn draw_circle(&mut self, center: Pixel, paint: &PointPaint) {
        self.primitives.push(DrawPrimitive::Circle {
            center,
            paint: *paint,
        });
    }

    fn draw_line(&mut self, from: Pixel, to: Pixel, paint: &LinePaint) {
        self.primitives.push(DrawPrimitive::Line {
            from,
            to,
            paint: *paint,
        });
    }

    fn fill_rect(&mut self, rect: Rect<i32>, color: Color) {
        self.primitives.push(DrawPrimitive::Rect { rect, color });
    }
}
