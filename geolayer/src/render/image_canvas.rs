use std::path::Path;

use geolayer_types::cartesian::{Pixel, Rect};
use image::{Rgba, RgbaImage};
use tiny_skia::{Paint, PathBuilder, Pixmap, Stroke, Transform};

use crate::error::GeolayerError;
use crate::render::{Canvas, LinePaint, PointPaint};
use crate::Color;

const MIN_LINE_WIDTH: f32 = 1.0;

/// [`Canvas`] that rasterizes draw calls into an RGBA bitmap.
///
/// The whole bitmap is visible. Shapes are anti-aliased and painted over the existing content. Integer pixel
/// coordinates address pixel centers, so a circle at `(10, 10)` is centered in the middle of that pixel.
pub struct ImageCanvas {
    pixmap: Pixmap,
}

impl ImageCanvas {
    /// Creates a transparent canvas of the given size.
    ///
    /// Fails if either dimension is zero or the bitmap is too large to allocate.
    pub fn new(width: u32, height: u32) -> Result<Self, GeolayerError> {
        let pixmap = Pixmap::new(width, height).ok_or(GeolayerError::CanvasSize { width, height })?;
        Ok(Self { pixmap })
    }

    /// Creates a canvas of the given size filled with `background`.
    pub fn with_background(width: u32, height: u32, background: Color) -> Result<Self, GeolayerError> {
        let mut canvas = Self::new(width, height)?;
        canvas.pixmap.fill(skia_color(background));
        Ok(canvas)
    }

    /// Copy of the bitmap drawn so far.
    pub fn to_image(&self) -> RgbaImage {
        RgbaImage::from_fn(self.pixmap.width(), self.pixmap.height(), |x, y| {
            let channels = self.pixmap.pixel(x, y).map_or([0; 4], |pixel| {
                let color = pixel.demultiply();
                [color.red(), color.green(), color.blue(), color.alpha()]
            });
            Rgba(channels)
        })
    }

    /// Consumes the canvas and returns its bitmap.
    pub fn into_image(self) -> RgbaImage {
        self.to_image()
    }

    /// Saves the bitmap to a file. Image format is chosen by the file extension.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), GeolayerError> {
        self.to_image().save(path)?;
        Ok(())
    }
}

fn skia_color(color: Color) -> tiny_skia::Color {
    let [r, g, b, a] = color.to_u8_array();
    tiny_skia::Color::from_rgba8(r, g, b, a)
}

fn fill(color: Color) -> Paint<'static> {
    let mut paint = Paint::default();
    paint.set_color(skia_color(color));
    paint.anti_alias = true;
    paint
}

fn pixel_center(pixel: Pixel) -> (f32, f32) {
    (pixel.x as f32 + 0.5, pixel.y as f32 + 0.5)
}

impl Canvas for ImageCanvas {
    fn visible_rect(&self) -> Rect<i32> {
        let width = i32::try_from(self.pixmap.width()).unwrap_or(i32::MAX);
        let height = i32::try_from(self.pixmap.height()).unwrap_or(i32::MAX);
        Rect::new(0, 0, width - 1, height - 1)
    }

    fn draw_circle(&mut self, center: Pixel, paint: &PointPaint) {
        let radius = paint.radius as f32;
        if !radius.is_finite() {
            log::warn!("Circle radius {} cannot be drawn", paint.radius);
            return;
        }

        let (x, y) = pixel_center(center);
        if let Some(path) = PathBuilder::from_circle(x, y, radius) {
            self.pixmap.fill_path(
                &path,
                &fill(paint.color),
                tiny_skia::FillRule::Winding,
                Transform::identity(),
                None,
            );
        }
    }

    fn draw_line(&mut self, from: Pixel, to: Pixel, paint: &LinePaint) {
        let width = paint.width as f32;
        if !width.is_finite() {
            log::warn!("Line width {} cannot be drawn", paint.width);
            return;
        }

        let mut builder = PathBuilder::new();
        let (x, y) = pixel_center(from);
        builder.move_to(x, y);
        let (x, y) = pixel_center(to);
        builder.line_to(x, y);

        if let Some(path) = builder.finish() {
            let stroke = Stroke {
                width: width.max(MIN_LINE_WIDTH),
                ..Default::default()
            };
            self.pixmap
                .stroke_path(&path, &fill(paint.color), &stroke, Transform::identity(), None);
        }
    }

    fn fill_rect(&mut self, rect: Rect<i32>, color: Color) {
        // Rect edges are inclusive pixel indices.
        let bounds = tiny_skia::Rect::from_ltrb(
            rect.x_min as f32,
            rect.y_min as f32,
            rect.x_max as f32 + 1.0,
            rect.y_max as f32 + 1.0,
        );

        if let Some(bounds) = bounds {
            self.pixmap
                .fill_rect(bounds, &fill(color), Transform::identity(), None);
        }
    }
}
