use geolayer_types::{Geometry, GeometryType};

use crate::error::GeolayerError;
use crate::layer::{GeometryLayer, DEFAULT_LAYER_NAME};
use crate::symbology::Symbology;

/// Convenience type to initialize a [`GeometryLayer`].
///
/// If only one of geometry type and symbology is given, the other one is derived from it. If neither is given, the
/// layer is a polygon layer with the default polygon symbology.
///
/// ```
/// use geolayer::layer::LayerBuilder;
/// use geolayer::symbology::{LineSymbology, Symbology};
/// use geolayer::Color;
///
/// let layer = LayerBuilder::default()
///     .with_name("Roads")
///     .with_symbology(Symbology::Line(LineSymbology::new(Color::RED, 2.0)))
///     .editable(true)
///     .build()
///     .unwrap();
///
/// assert_eq!(layer.to_string(), "Line");
/// ```
#[derive(Debug, Default)]
pub struct LayerBuilder {
    name: Option<String>,
    geometry_type: Option<GeometryType>,
    symbology: Option<Symbology>,
    geometries: Vec<Geometry>,
    editable: bool,
}

impl LayerBuilder {
    /// Sets the display name of the layer.
    ///
    /// Defaults to `"default"`.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets the geometry type of the layer.
    pub fn with_type(mut self, geometry_type: GeometryType) -> Self {
        self.geometry_type = Some(geometry_type);
        self
    }

    /// Sets the symbology of the layer.
    pub fn with_symbology(mut self, symbology: Symbology) -> Self {
        self.symbology = Some(symbology);
        self
    }

    /// Adds initial geometries to the layer.
    pub fn with_geometries(mut self, geometries: impl IntoIterator<Item = Geometry>) -> Self {
        self.geometries.extend(geometries);
        self
    }

    /// Sets the edit mode of the layer.
    ///
    /// Defaults to `false`.
    pub fn editable(mut self, editable: bool) -> Self {
        self.editable = editable;
        self
    }

    /// Creates the layer.
    ///
    /// # Errors
    ///
    /// * [`GeolayerError::SymbologyTypeMismatch`] if the symbology is made for another geometry type than the layer.
    /// * [`GeolayerError::GeometryTypeMismatch`] if any of the initial geometries has another type than the layer.
    pub fn build(self) -> Result<GeometryLayer, GeolayerError> {
        let geometry_type = self
            .geometry_type
            .or_else(|| self.symbology.map(|symbology| symbology.geometry_type()))
            .unwrap_or(GeometryType::Polygon);
        let symbology = self
            .symbology
            .unwrap_or_else(|| Symbology::default_for(geometry_type));

        if symbology.geometry_type() != geometry_type {
            return Err(GeolayerError::SymbologyTypeMismatch {
                layer: geometry_type,
                symbology: symbology.geometry_type(),
            });
        }

        let name = self.name.unwrap_or_else(|| DEFAULT_LAYER_NAME.to_owned());
        let mut layer = GeometryLayer::new(name, geometry_type, symbology);
        layer.set_editable(self.editable);
        layer.add_geometries(self.geometries)?;

        Ok(layer)
    }
}
