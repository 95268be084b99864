use geolayer_types::cartesian::Rect;
use geolayer_types::geo::GeoPoint2d;
use geolayer_types::projection::ScreenProjection;
use geolayer_types::{Geometry, GeometryType};

use crate::error::GeolayerError;
use crate::render::{Canvas, LinePaint, PointPaint};
use crate::symbology::Symbology;

/// Number of draw calls issued and skipped by one [`ViewportRenderer::render`] pass.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub struct RenderStats {
    /// Circles and line segments sent to the canvas.
    pub drawn: usize,
    /// Points and segments left out because they are outside the visible area or cannot be projected.
    pub culled: usize,
}

// Paint resolved from the layer symbology, one variant per geometry type.
enum Paint {
    Point(PointPaint),
    Line(LinePaint),
    Polygon(LinePaint),
}

/// Draws geometries of one type onto a canvas, skipping the parts that are not visible.
///
/// Culling works on whole primitives:
/// * a point is drawn if its projected pixel is inside the visible rectangle (edges included);
/// * a segment is drawn if its bounding rectangle and the visible rectangle contain one another. A segment that
///   crosses the edge of the visible area is not drawn at all.
pub struct ViewportRenderer<'a, P: ScreenProjection + ?Sized> {
    projection: &'a P,
}

impl<'a, P: ScreenProjection + ?Sized> ViewportRenderer<'a, P> {
    /// Creates a renderer using the given projection of the current view.
    pub fn new(projection: &'a P) -> Self {
        Self { projection }
    }

    /// Draws `geometries` of `geometry_type` with the given symbology.
    ///
    /// Fails with [`GeolayerError::SymbologyTypeMismatch`] without drawing anything if the symbology is made for
    /// another geometry type. Geometries of a type other than `geometry_type` are skipped.
    pub fn render(
        &self,
        geometry_type: GeometryType,
        symbology: &Symbology,
        geometries: &[Geometry],
        canvas: &mut dyn Canvas,
    ) -> Result<RenderStats, GeolayerError> {
        let paint = resolve_paint(geometry_type, symbology)?;
        let visible = canvas.visible_rect();
        let mut stats = RenderStats::default();

        for geometry in geometries {
            match geometry {
                Geometry::Point(point) => match &paint {
                    Paint::Point(paint) => self.render_point(point, paint, visible, canvas, &mut stats),
                    Paint::Line(_) | Paint::Polygon(_) => skip_foreign(geometry, geometry_type),
                },
                Geometry::Line(_) => match &paint {
                    Paint::Line(paint) => self.render_segments(geometry, paint, visible, canvas, &mut stats),
                    Paint::Point(_) | Paint::Polygon(_) => skip_foreign(geometry, geometry_type),
                },
                Geometry::Polygon(_) => match &paint {
                    Paint::Polygon(paint) => self.render_segments(geometry, paint, visible, canvas, &mut stats),
                    Paint::Point(_) | Paint::Line(_) => skip_foreign(geometry, geometry_type),
                },
            }
        }

        log::debug!(
            "Rendered {geometry_type} layer: {} geometries, {} primitives drawn, {} culled",
            geometries.len(),
            stats.drawn,
            stats.culled
        );

        Ok(stats)
    }

    fn render_point(
        &self,
        point: &GeoPoint2d,
        paint: &PointPaint,
        visible: Rect<i32>,
        canvas: &mut dyn Canvas,
        stats: &mut RenderStats,
    ) {
        match self.projection.to_pixel(point) {
            Some(pixel) if visible.contains(&pixel) => {
                canvas.draw_circle(pixel, paint);
                stats.drawn += 1;
            }
            pixel => {
                log::trace!("Point {point:?} at pixel {pixel:?} is not visible");
                stats.culled += 1;
            }
        }
    }

    fn render_segments(
        &self,
        geometry: &Geometry,
        paint: &LinePaint,
        visible: Rect<i32>,
        canvas: &mut dyn Canvas,
        stats: &mut RenderStats,
    ) {
        for segment in geometry.iter_segments() {
            let Some((from, to)) = segment.map(|point| self.projection.to_pixel(point)) else {
                log::trace!("Segment {segment:?} cannot be projected");
                stats.culled += 1;
                continue;
            };

            let bbox = Rect::from_corners(from, to);
            if visible.mutually_contains(&bbox) {
                canvas.draw_line(from, to, paint);
                stats.drawn += 1;
            } else {
                log::trace!("Segment {from:?} - {to:?} is culled");
                stats.culled += 1;
            }
        }
    }
}

fn resolve_paint(geometry_type: GeometryType, symbology: &Symbology) -> Result<Paint, GeolayerError> {
    match (geometry_type, symbology) {
        (GeometryType::Point, Symbology::Point(s)) => Ok(Paint::Point(s.into())),
        (GeometryType::Line, Symbology::Line(s)) => Ok(Paint::Line(s.into())),
        (GeometryType::Polygon, Symbology::Polygon(s)) => Ok(Paint::Polygon(s.into())),
        (layer, symbology) => Err(GeolayerError::SymbologyTypeMismatch {
            layer,
            symbology: symbology.geometry_type(),
        }),
    }
}

fn skip_foreign(geometry: &Geometry, geometry_type: GeometryType) {
    log::warn!(
        "Skipping {} geometry in a {geometry_type} layer",
        geometry.geometry_type()
    );
}
