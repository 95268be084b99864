//! Symbologies describe how the geometries of a [`GeometryLayer`](crate::layer::GeometryLayer) are drawn.
//!
//! There is one symbology variant per [`GeometryType`]. A layer must be given the variant matching its own type,
//! otherwise drawing fails with
//! [`GeolayerError::SymbologyTypeMismatch`](crate::error::GeolayerError::SymbologyTypeMismatch).
//!
//! With the `serde` feature symbologies can be loaded from JSON:
//!
//! ```
//! use geolayer::symbology::Symbology;
//!
//! let symbology = Symbology::from_json(r##"{"type": "line", "color": "#FF0000", "thickness": 3.0}"##).unwrap();
//! assert_eq!(symbology.geometry_type(), geolayer::geolayer_types::GeometryType::Line);
//! ```

use geolayer_types::GeometryType;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::Color;

#[cfg(feature = "serde")]
use crate::error::GeolayerError;

const DEFAULT_RADIUS: f64 = 10.0;
const DEFAULT_THICKNESS: f64 = 5.0;

/// Style of a point layer: a filled circle.
#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PointSymbology {
    /// Fill color of the circle.
    pub color: Color,
    /// Radius of the circle in pixels.
    pub radius: f64,
}

impl PointSymbology {
    /// Creates a new instance.
    pub fn new(color: Color, radius: f64) -> Self {
        Self { color, radius }
    }
}

impl Default for PointSymbology {
    fn default() -> Self {
        Self::new(Color::BLACK, DEFAULT_RADIUS)
    }
}

/// Style of a line layer: a stroke of fixed width.
#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LineSymbology {
    /// Stroke color.
    pub color: Color,
    /// Stroke width in pixels.
    pub thickness: f64,
}

impl LineSymbology {
    /// Creates a new instance.
    pub fn new(color: Color, thickness: f64) -> Self {
        Self { color, thickness }
    }
}

impl Default for LineSymbology {
    fn default() -> Self {
        Self::new(Color::BLACK, DEFAULT_THICKNESS)
    }
}

/// Style of a polygon layer: the outline of the ring drawn with fixed width.
#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PolygonSymbology {
    /// Outline color.
    pub color: Color,
    /// Outline width in pixels.
    pub thickness: f64,
}

impl PolygonSymbology {
    /// Creates a new instance.
    pub fn new(color: Color, thickness: f64) -> Self {
        Self { color, thickness }
    }
}

impl Default for PolygonSymbology {
    fn default() -> Self {
        Self::new(Color::BLACK, DEFAULT_THICKNESS)
    }
}

/// Visual style of one geometry type.
#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "type", rename_all = "lowercase"))]
pub enum Symbology {
    /// See [`PointSymbology`].
    Point(PointSymbology),
    /// See [`LineSymbology`].
    Line(LineSymbology),
    /// See [`PolygonSymbology`].
    Polygon(PolygonSymbology),
}

impl Symbology {
    /// Default symbology for the given geometry type.
    pub fn default_for(geometry_type: GeometryType) -> Self {
        match geometry_type {
            GeometryType::Point => Self::Point(PointSymbology::default()),
            GeometryType::Line => Self::Line(LineSymbology::default()),
            GeometryType::Polygon => Self::Polygon(PolygonSymbology::default()),
        }
    }

    /// Geometry type this symbology is made for.
    pub fn geometry_type(&self) -> GeometryType {
        match self {
            Symbology::Point(_) => GeometryType::Point,
            Symbology::Line(_) => GeometryType::Line,
            Symbology::Polygon(_) => GeometryType::Polygon,
        }
    }

    /// Color of the symbology.
    pub fn color(&self) -> Color {
        match self {
            Symbology::Point(s) => s.color,
            Symbology::Line(s) => s.color,
            Symbology::Polygon(s) => s.color,
        }
    }

    /// Creates a copy of the symbology with the given color.
    pub fn with_color(&self, color: Color) -> Self {
        match *self {
            Symbology::Point(s) => Symbology::Point(PointSymbology { color, ..s }),
            Symbology::Line(s) => Symbology::Line(LineSymbology { color, ..s }),
            Symbology::Polygon(s) => Symbology::Polygon(PolygonSymbology { color, ..s }),
        }
    }

    /// Parses a symbology from its JSON description.
    #[cfg(feature = "serde")]
    pub fn from_json(json: &str) -> Result<Self, GeolayerError> {
        Ok(serde_json::from_str(json)?)
    }
}

impl From<PointSymbology> for Symbology {
    fn from(value: PointSymbology) -> Self {
        Self::Point(value)
    }
}

impl From<LineSymbology> for Symbology {
    fn from(value: LineSymbology) -> Self {
        Self::Line(value)
    }
}

impl From<PolygonSymbology> for Symbology {
    fn from(value: PolygonSymbology) -> Self {
        Self::Polygon(value)
    }
}
