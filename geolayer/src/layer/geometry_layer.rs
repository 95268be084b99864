use std::fmt::{Display, Formatter};

use geolayer_types::projection::ScreenProjection;
use geolayer_types::{Geometry, GeometryType};

use crate::control::{ListenerId, TapDispatcher, TapKind, TapListener, TouchEvent};
use crate::error::GeolayerError;
use crate::layer::{LayerBuilder, DEFAULT_LAYER_NAME};
use crate::render::{Canvas, RenderStats, ViewportRenderer};
use crate::symbology::Symbology;

/// A named set of geometries of one type, drawn with one symbology.
///
/// In edit mode the layer also turns user taps into point geometries and gives them to its tap listeners. The layer
/// does not add these points to itself: it is up to a listener to decide what to do with them.
///
/// ```
/// use geolayer::layer::GeometryLayer;
/// use geolayer::geolayer_types::{Geometry, GeometryType, latlon};
///
/// let mut layer = GeometryLayer::builder()
///     .with_name("Wells")
///     .with_type(GeometryType::Point)
///     .build()
///     .unwrap();
///
/// layer.add_geometry(Geometry::point(latlon!(52.1, 4.3))).unwrap();
/// assert!(layer.add_geometry(Geometry::line(vec![])).is_err());
/// ```
#[derive(Debug)]
pub struct GeometryLayer {
    name: String,
    geometry_type: GeometryType,
    symbology: Symbology,
    geometries: Vec<Geometry>,
    editable: bool,
    taps: TapDispatcher,
}

impl GeometryLayer {
    /// Creates an empty layer that is not editable.
    ///
    /// The symbology is not checked against the geometry type here. A layer with a mismatching symbology fails to
    /// render. Use [`GeometryLayer::builder`] to check it on creation.
    pub fn new(name: impl Into<String>, geometry_type: GeometryType, symbology: Symbology) -> Self {
        Self {
            name: name.into(),
            geometry_type,
            symbology,
            geometries: vec![],
            editable: false,
            taps: TapDispatcher::default(),
        }
    }

    /// Creates a builder for a layer.
    pub fn builder() -> LayerBuilder {
        LayerBuilder::default()
    }

    /// Display name of the layer.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Sets display name of the layer.
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Type of the geometries in the layer.
    pub fn geometry_type(&self) -> GeometryType {
        self.geometry_type
    }

    /// Changes the type of the layer. Geometries already in the layer are kept but are not drawn if their type
    /// differs from the new one.
    pub fn set_type(&mut self, geometry_type: GeometryType) {
        self.geometry_type = geometry_type;
    }

    /// Symbology the layer is drawn with.
    pub fn symbology(&self) -> &Symbology {
        &self.symbology
    }

    /// Replaces the symbology of the layer.
    pub fn set_symbology(&mut self, symbology: Symbology) {
        self.symbology = symbology;
    }

    /// Whether taps are turned into geometries.
    pub fn is_editable(&self) -> bool {
        self.editable
    }

    /// Turns edit mode on or off.
    pub fn set_editable(&mut self, editable: bool) {
        self.editable = editable;
    }

    /// Geometries of the layer in the order they were added.
    pub fn geometries(&self) -> &[Geometry] {
        &self.geometries
    }

    /// Appends a geometry. Fails if the geometry type differs from the layer type.
    pub fn add_geometry(&mut self, geometry: Geometry) -> Result<(), GeolayerError> {
        self.check_type(&geometry)?;
        self.geometries.push(geometry);
        Ok(())
    }

    /// Appends all the geometries. If any of them has a type different from the layer type, nothing is added.
    pub fn add_geometries(
        &mut self,
        geometries: impl IntoIterator<Item = Geometry>,
    ) -> Result<(), GeolayerError> {
        let geometries: Vec<_> = geometries.into_iter().collect();
        for geometry in &geometries {
            self.check_type(geometry)?;
        }

        self.geometries.extend(geometries);
        Ok(())
    }

    fn check_type(&self, geometry: &Geometry) -> Result<(), GeolayerError> {
        if geometry.geometry_type() == self.geometry_type {
            Ok(())
        } else {
            Err(GeolayerError::GeometryTypeMismatch {
                layer: self.geometry_type,
                geometry: geometry.geometry_type(),
            })
        }
    }

    /// Registers a listener for single taps.
    pub fn add_single_tap_listener(&mut self, listener: impl TapListener + 'static) -> ListenerId {
        self.taps.listeners_mut(TapKind::Single).add(listener)
    }

    /// Removes a single tap listener. Returns false if it was not registered.
    pub fn remove_single_tap_listener(&mut self, id: ListenerId) -> bool {
        self.taps.listeners_mut(TapKind::Single).remove(id)
    }

    /// Registers a listener for double taps.
    pub fn add_double_tap_listener(&mut self, listener: impl TapListener + 'static) -> ListenerId {
        self.taps.listeners_mut(TapKind::Double).add(listener)
    }

    /// Removes a double tap listener. Returns false if it was not registered.
    pub fn remove_double_tap_listener(&mut self, id: ListenerId) -> bool {
        self.taps.listeners_mut(TapKind::Double).remove(id)
    }

    /// Handles a single tap. Returns the number of listeners notified, which is always 0 when the layer is not
    /// editable.
    pub fn handle_single_tap<P: ScreenProjection + ?Sized>(
        &self,
        event: &TouchEvent,
        projection: &P,
    ) -> usize {
        self.handle_tap(TapKind::Single, event, projection)
    }

    /// Handles a double tap. See [`route_tap`](crate::control::route_tap) for how two-finger taps are treated.
    pub fn handle_double_tap<P: ScreenProjection + ?Sized>(
        &self,
        event: &TouchEvent,
        projection: &P,
    ) -> usize {
        self.handle_tap(TapKind::Double, event, projection)
    }

    fn handle_tap<P: ScreenProjection + ?Sized>(
        &self,
        kind: TapKind,
        event: &TouchEvent,
        projection: &P,
    ) -> usize {
        if !self.editable {
            log::trace!("Layer `{}` is not editable, ignoring {kind:?} tap", self.name);
            return 0;
        }

        self.taps.dispatch(kind, event, projection)
    }

    /// Draws the visible part of the layer.
    pub fn render<P: ScreenProjection + ?Sized>(
        &self,
        projection: &P,
        canvas: &mut dyn Canvas,
    ) -> Result<RenderStats, GeolayerError> {
        ViewportRenderer::new(projection).render(
            self.geometry_type,
            &self.symbology,
            &self.geometries,
            canvas,
        )
    }

    /// Icon of the layer for layer lists. See [`render_overview`](crate::render::overview::render_overview).
    #[cfg(feature = "image")]
    pub fn overview(&self) -> Result<image::RgbaImage, GeolayerError> {
        crate::render::overview::render_overview(self.geometry_type, self.symbology.color())
    }
}

impl Default for GeometryLayer {
    fn default() -> Self {
        Self::new(
            DEFAULT_LAYER_NAME,
            GeometryType::Polygon,
            Symbology::default_for(GeometryType::Polygon),
        )
    }
}

impl Display for GeometryLayer {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.geometry_type)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::RecordingCanvas;
    use crate::symbology::{LineSymbology, PointSymbology, PolygonSymbology};
    use crate::Color;
    use assert_matches::assert_matches;
    use geolayer_types::cartesian::{Pixel, Rect};
    use geolayer_types::latlon;
    use geolayer_types::projection::LinearProjection;
    use std::cell::Cell;
    use std::rc::Rc;

    fn projection() -> LinearProjection {
        LinearProjection::new(latlon!(0.0, 0.0), 1.0).unwrap()
    }

    #[test]
    fn default_layer() {
        let layer = GeometryLayer::default();
        assert_eq!(layer.name(), "default");
        assert_eq!(layer.geometry_type(), GeometryType::Polygon);
        assert_eq!(
            layer.symbology(),
            &Symbology::Polygon(PolygonSymbology::default())
        );
        assert!(!layer.is_editable());
        assert!(layer.geometries().is_empty());
        assert_eq!(layer.to_string(), "Polygon");
    }

    #[cfg(feature = "image")]
    #[test]
    fn overview_uses_symbology_color() {
        let layer = GeometryLayer::new(
            "Wells",
            GeometryType::Point,
            Symbology::Point(PointSymbology::new(Color::BLUE, 3.0)),
        );

        let image = layer.overview().unwrap();
        assert_eq!(image.get_pixel(24, 24).0, [0, 0, 255, 255]);
        assert_eq!(image.get_pixel(0, 0).0[3], 0);
    }

    #[test]
    fn geometries_of_other_type_are_rejected() {
        let mut layer = GeometryLayer::default();
        let result = layer.add_geometry(Geometry::point(latlon!(1.0, 1.0)));
        assert_matches!(
            result,
            Err(GeolayerError::GeometryTypeMismatch {
                layer: GeometryType::Polygon,
                geometry: GeometryType::Point
            })
        );
        assert!(layer.geometries().is_empty());
    }

    #[test]
    fn add_geometries_is_all_or_nothing() {
        let mut layer = GeometryLayer::new(
            "roads",
            GeometryType::Line,
            Symbology::default_for(GeometryType::Line),
        );
        let line = Geometry::line(vec![latlon!(0.0, 0.0), latlon!(1.0, 1.0)]);

        assert!(layer
            .add_geometries([line.clone(), Geometry::point(latlon!(0.0, 0.0))])
            .is_err());
        assert!(layer.geometries().is_empty());

        layer.add_geometries([line.clone(), line]).unwrap();
        assert_eq!(layer.geometries().len(), 2);
    }

    #[test]
    fn taps_are_ignored_unless_editable() {
        let calls = Rc::new(Cell::new(0));
        let mut layer = GeometryLayer::default();
        let counter = calls.clone();
        layer.add_single_tap_listener(move |_: &Geometry| counter.set(counter.get() + 1));

        let event = TouchEvent::single(Pixel::new(5, 5));
        assert_eq!(layer.handle_single_tap(&event, &projection()), 0);
        assert_eq!(calls.get(), 0);

        layer.set_editable(true);
        assert_eq!(layer.handle_single_tap(&event, &projection()), 1);
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn removed_listener_is_not_notified() {
        let calls = Rc::new(Cell::new(0));
        let mut layer = GeometryLayer::default();
        layer.set_editable(true);
        let counter = calls.clone();
        let id = layer.add_double_tap_listener(move |_: &Geometry| counter.set(counter.get() + 1));

        assert!(layer.remove_double_tap_listener(id));
        assert!(!layer.remove_single_tap_listener(id));
        assert_eq!(
            layer.handle_double_tap(&TouchEvent::single(Pixel::new(1, 1)), &projection()),
            0
        );
        assert_eq!(calls.get(), 0);
    }

    #[test]
    fn set_symbology_of_other_type_fails_rendering() {
        let mut layer = GeometryLayer::default();
        layer.set_symbology(Symbology::Line(LineSymbology::default()));

        let mut canvas = RecordingCanvas::new(Rect::new(0, 0, 100, 100));
        assert_matches!(
            layer.render(&projection(), &mut canvas),
            Err(GeolayerError::SymbologyTypeMismatch { .. })
        );
    }

    #[test]
    fn changing_type_keeps_geometries() {
        let mut layer = GeometryLayer::default();
        layer
            .add_geometry(Geometry::polygon(vec![
                latlon!(-10.0, 10.0),
                latlon!(-10.0, 20.0),
                latlon!(-20.0, 20.0),
            ]))
            .unwrap();

        layer.set_type(GeometryType::Line);
        layer.set_symbology(Symbology::default_for(GeometryType::Line));
        assert_eq!(layer.geometries().len(), 1);

        let mut canvas = RecordingCanvas::new(Rect::new(0, 0, 100, 100));
        let stats = layer.render(&projection(), &mut canvas).unwrap();
        assert_eq!(stats, RenderStats::default());
        assert_eq!(layer.to_string(), "Line");
    }
}
