//! Reading and writing geometries in KML.
//!
//! Only the geometric part of KML is supported: `Point`, `LineString` and `Polygon` elements with their
//! `coordinates`. Styles, extended data, inner polygon rings and everything else are skipped when reading and never
//! produced when writing.
//!
//! Coordinates are written as `longitude,latitude` tuples separated by spaces. When reading, an optional third
//! (altitude) field is accepted and ignored.

mod reader;
mod writer;

use geolayer_types::{Geometry, GeometryType};

pub use reader::{parse_coordinates, read_kml_file, read_kml_str, KmlReader};
pub use writer::{write_kml_file, KmlWriter};

const KML_TAG: &str = "kml";
const DOCUMENT_TAG: &str = "Document";
const FOLDER_TAG: &str = "Folder";
const PLACEMARK_TAG: &str = "Placemark";
const NAME_TAG: &str = "name";
const DESCRIPTION_TAG: &str = "description";
const POINT_TAG: &str = "Point";
const LINE_TAG: &str = "LineString";
const POLYGON_TAG: &str = "Polygon";
const OUTER_BOUNDARY_TAG: &str = "outerBoundaryIs";
const INNER_BOUNDARY_TAG: &str = "innerBoundaryIs";
const LINEAR_RING_TAG: &str = "LinearRing";
const COORDINATES_TAG: &str = "coordinates";

const KML_NAMESPACES: [(&str, &str); 4] = [
    ("xmlns", "http://www.opengis.net/kml/2.2"),
    ("xmlns:gx", "http://www.google.com/kml/ext/2.2"),
    ("xmlns:kml", "http://www.opengis.net/kml/2.2"),
    ("xmlns:atom", "http://www.w3.org/2005/Atom"),
];

fn geometry_type_for_tag(tag: &[u8]) -> Option<GeometryType> {
    match tag {
        t if t == POINT_TAG.as_bytes() => Some(GeometryType::Point),
        t if t == LINE_TAG.as_bytes() => Some(GeometryType::Line),
        t if t == POLYGON_TAG.as_bytes() => Some(GeometryType::Polygon),
        _ => None,
    }
}

/// A persisted geometry as provided by a storage layer, ready to be exported.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredGeometryRecord {
    /// Stable identifier of the record. Written as the placemark name.
    pub id: i64,
    /// Geometry of the record.
    pub geometry: Geometry,
}

impl StoredGeometryRecord {
    /// Creates a new record.
    pub fn new(id: i64, geometry: Geometry) -> Self {
        Self { id, geometry }
    }
}
