//! Conversion between geographic and pixel coordinates.
//!
//! Map projection math is owned by the host application: a slippy map widget, a print layout or a test fixture
//! provides an implementation of [`ScreenProjection`] for the current view. [`LinearProjection`] is a plain
//! equirectangular mapping useful for tests and offline rendering.

use crate::cartesian::{Pixel, Point2, Rect};
use crate::error::GeolayerTypesError;
use crate::geo::{GeoPoint, GeoPoint2d, NewGeoPoint};

/// Converts points between geographic coordinates and screen pixels of the current view.
pub trait ScreenProjection {
    /// Projects a geographic point to a pixel. Returns `None` if the point cannot be shown in this view.
    fn to_pixel(&self, point: &GeoPoint2d) -> Option<Pixel>;
    /// Converts a pixel back to a geographic point. Returns `None` if the pixel does not correspond to any point.
    fn from_pixel(&self, pixel: Pixel) -> Option<GeoPoint2d>;
}

impl<T: ScreenProjection + ?Sized> ScreenProjection for &T {
    fn to_pixel(&self, point: &GeoPoint2d) -> Option<Pixel> {
        (**self).to_pixel(point)
    }

    fn from_pixel(&self, pixel: Pixel) -> Option<GeoPoint2d> {
        (**self).from_pixel(pixel)
    }
}

/// Equirectangular projection: longitude grows to the right, latitude grows up, with a fixed number of pixels per
/// degree on both axes.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct LinearProjection {
    origin: GeoPoint2d,
    pixels_per_degree: f64,
}

impl LinearProjection {
    /// Creates a projection that puts `origin` at pixel `(0, 0)`.
    pub fn new(origin: GeoPoint2d, pixels_per_degree: f64) -> Result<Self, GeolayerTypesError> {
        if !pixels_per_degree.is_finite() || pixels_per_degree <= 0.0 {
            return Err(GeolayerTypesError::InvalidProjection(format!(
                "scale must be a positive number, got {pixels_per_degree}"
            )));
        }

        Ok(Self {
            origin,
            pixels_per_degree,
        })
    }

    /// Creates a projection that fits `extent` (`x` is longitude, `y` is latitude) into a `width` x `height`
    /// pixel surface, keeping the aspect ratio.
    pub fn fit(extent: Rect<f64>, width: u32, height: u32) -> Result<Self, GeolayerTypesError> {
        let x_scale = width as f64 / extent.width();
        let y_scale = height as f64 / extent.height();
        let pixels_per_degree = x_scale.min(y_scale);

        Self::new(
            GeoPoint2d::latlon(extent.y_max(), extent.x_min()),
            pixels_per_degree,
        )
    }

    /// Number of pixels per one degree of latitude or longitude.
    pub fn pixels_per_degree(&self) -> f64 {
        self.pixels_per_degree
    }
}

impl ScreenProjection for LinearProjection {
    fn to_pixel(&self, point: &GeoPoint2d) -> Option<Pixel> {
        let x = ((point.lon() - self.origin.lon()) * self.pixels_per_degree).round();
        let y = ((self.origin.lat() - point.lat()) * self.pixels_per_degree).round();

        let range = i32::MIN as f64..=i32::MAX as f64;
        if !range.contains(&x) || !range.contains(&y) {
            return None;
        }

        Some(Point2::new(x as i32, y as i32))
    }

    fn from_pixel(&self, pixel: Pixel) -> Option<GeoPoint2d> {
        Some(GeoPoint2d::latlon(
            self.origin.lat() - pixel.y as f64 / self.pixels_per_degree,
            self.origin.lon() + pixel.x as f64 / self.pixels_per_degree,
        ))
    }
}
