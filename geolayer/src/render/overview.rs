//! Small icons representing a layer in layer lists.

use geolayer_types::cartesian::{Pixel, Rect};
use geolayer_types::GeometryType;
use image::RgbaImage;

use crate::error::GeolayerError;
use crate::render::{Canvas, ImageCanvas, LinePaint, PointPaint};
use crate::Color;

/// Width and height of an overview glyph in pixels.
pub const OVERVIEW_SIZE: u32 = 48;

const POINT_RADIUS: f64 = 12.0;
const LINE_WIDTH: f64 = 5.0;
const POLYGON_INSET: i32 = 6;

/// Draws the overview glyph of a layer: a circle for points, a diagonal stroke for lines and a square for polygons,
/// in the given color over a transparent background.
pub fn render_overview(geometry_type: GeometryType, color: Color) -> Result<RgbaImage, GeolayerError> {
    let size = OVERVIEW_SIZE as i32;
    let mut canvas = ImageCanvas::new(OVERVIEW_SIZE, OVERVIEW_SIZE)?;

    match geometry_type {
        GeometryType::Point => canvas.draw_circle(
            Pixel::new(size / 2, size / 2),
            &PointPaint {
                color,
                radius: POINT_RADIUS,
            },
        ),
        GeometryType::Line => canvas.draw_line(
            Pixel::new(0, 0),
            Pixel::new(size, size),
            &LinePaint {
                color,
                width: LINE_WIDTH,
            },
        ),
        GeometryType::Polygon => canvas.fill_rect(
            Rect::new(
                POLYGON_INSET,
                POLYGON_INSET,
                size - POLYGON_INSET,
                size - POLYGON_INSET,
            ),
            color,
        ),
    }

    Ok(canvas.into_image())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn is_set(image: &RgbaImage, x: u32, y: u32) -> bool {
        image.get_pixel(x, y).0[3] != 0
    }

    #[test]
    fn glyph_has_fixed_size() {
        for geometry_type in GeometryType::ALL {
            let image = render_overview(geometry_type, Color::RED).unwrap();
            assert_eq!(image.dimensions(), (OVERVIEW_SIZE, OVERVIEW_SIZE));
        }
    }

    #[test]
    fn point_glyph_is_a_circle() {
        let image = render_overview(GeometryType::Point, Color::RED).unwrap();
        assert_eq!(image.get_pixel(24, 24).0, [255, 0, 0, 255]);
        assert!(is_set(&image, 36, 24));
        assert!(!is_set(&image, 37, 24));
        assert!(!is_set(&image, 0, 0));
    }

    #[test]
    fn line_glyph_is_a_diagonal() {
        let image = render_overview(GeometryType::Line, Color::BLUE).unwrap();
        assert!(is_set(&image, 0, 0));
        assert!(is_set(&image, 47, 47));
        assert!(is_set(&image, 20, 22));
        assert!(!is_set(&image, 47, 0));
    }

    #[test]
    fn polygon_glyph_is_a_square() {
        let image = render_overview(GeometryType::Polygon, Color::GREEN).unwrap();
        assert!(is_set(&image, 6, 6));
        assert!(is_set(&image, 42, 42));
        assert!(!is_set(&image, 5, 5));
        assert!(!is_set(&image, 43, 24));
    }
}
