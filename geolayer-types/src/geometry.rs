//! The closed set of geometry variants and their type tag.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

use crate::contour::{ClosedContour, Contour, ContourSegmentIterator};
use crate::geo::GeoPoint2d;

/// Type tag of a [`Geometry`].
///
/// Every consumer (KML reader and writer, renderer, layers) matches on this enum exhaustively, so adding a variant
/// is a compile time obligation for all of them.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum GeometryType {
    /// Single point.
    Point,
    /// Open polyline.
    Line,
    /// Closed ring.
    Polygon,
}

impl GeometryType {
    /// All geometry types in declaration order.
    pub const ALL: [GeometryType; 3] = [GeometryType::Point, GeometryType::Line, GeometryType::Polygon];

    pub(crate) fn index(self) -> usize {
        match self {
            GeometryType::Point => 0,
            GeometryType::Line => 1,
            GeometryType::Polygon => 2,
        }
    }
}

impl Display for GeometryType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            GeometryType::Point => "Point",
            GeometryType::Line => "Line",
            GeometryType::Polygon => "Polygon",
        };

        f.write_str(name)
    }
}

/// Geographic geometry.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub enum Geometry {
    /// A single coordinate.
    Point(GeoPoint2d),
    /// Ordered vertices; the last vertex is not connected to the first one.
    Line(Contour<GeoPoint2d>),
    /// Ordered vertices of a ring; the last vertex is implicitly connected to the first one.
    Polygon(ClosedContour<GeoPoint2d>),
}

impl Geometry {
    /// Creates a point geometry.
    pub fn point(point: GeoPoint2d) -> Self {
        Self::Point(point)
    }

    /// Creates a line geometry from the given vertices.
    pub fn line(vertices: Vec<GeoPoint2d>) -> Self {
        Self::Line(Contour::new(vertices))
    }

    /// Creates a polygon geometry from the given ring vertices. The first vertex must not be repeated at the end.
    pub fn polygon(vertices: Vec<GeoPoint2d>) -> Self {
        Self::Polygon(ClosedContour::new(vertices))
    }

    /// Type tag of the geometry.
    pub fn geometry_type(&self) -> GeometryType {
        match self {
            Geometry::Point(_) => GeometryType::Point,
            Geometry::Line(_) => GeometryType::Line,
            Geometry::Polygon(_) => GeometryType::Polygon,
        }
    }

    /// Vertices of the geometry in their stored order. A point has exactly one vertex.
    pub fn vertices(&self) -> &[GeoPoint2d] {
        match self {
            Geometry::Point(point) => std::slice::from_ref(point),
            Geometry::Line(contour) => contour,
            Geometry::Polygon(contour) => contour,
        }
    }

    /// Iterates over drawable segments: sequential pairs for lines, cyclic pairs for polygons, nothing for points.
    ///
    /// Lines and polygons with fewer than two vertices produce no segments.
    pub fn iter_segments(&self) -> ContourSegmentIterator<'_, GeoPoint2d> {
        match self {
            Geometry::Point(_) => ContourSegmentIterator::empty(),
            Geometry::Line(contour) => contour.iter_segments(),
            Geometry::Polygon(contour) => contour.iter_segments(),
        }
    }
}

impl From<GeoPoint2d> for Geometry {
    fn from(value: GeoPoint2d) -> Self {
        Self::Point(value)
    }
}
