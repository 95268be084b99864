use std::fmt::{Display, Formatter};

use num_traits::Float;
use serde::{Deserialize, Serialize};

/// Geographic position in degrees.
///
/// Values are never range-checked: a point keeps exactly what was read from a document or unprojected from the
/// screen.
pub trait GeoPoint {
    /// Coordinate number type.
    type Num: Float;

    /// Latitude, degrees.
    fn lat(&self) -> Self::Num;
    /// Longitude, degrees.
    fn lon(&self) -> Self::Num;
}

/// Construction of geographic points.
pub trait NewGeoPoint<N = f64>: GeoPoint<Num = N> + Sized {
    /// Point at `lat`, `lon`.
    fn latlon(lat: N, lon: N) -> Self;

    /// Point at `lon`, `lat`, the order of a KML coordinate tuple.
    fn lonlat(lon: N, lat: N) -> Self {
        Self::latlon(lat, lon)
    }
}

/// Latitude/longitude pair, the only vertex type of [`Geometry`](crate::Geometry).
#[derive(Debug, Clone, Copy, Default, PartialEq, PartialOrd, Deserialize, Serialize)]
pub struct GeoPoint2d {
    lat: f64,
    lon: f64,
}

impl GeoPoint for GeoPoint2d {
    type Num = f64;

    fn lat(&self) -> f64 {
        self.lat
    }

    fn lon(&self) -> f64 {
        self.lon
    }
}

impl NewGeoPoint<f64> for GeoPoint2d {
    fn latlon(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

/// Formats the point as a `lon,lat` tuple with the shortest representation that parses back to the same values.
impl Display for GeoPoint2d {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{},{}", self.lon, self.lat)
    }
}

/// Creates a new [`GeoPoint2d`] from latitude and longitude values (in degrees).
///
/// ```
/// use geolayer_types::geo::GeoPoint;
/// use geolayer_types::latlon;
///
/// let point = latlon!(48.85, 2.35);
/// assert_eq!(point.lat(), 48.85);
/// assert_eq!(point.lon(), 2.35);
/// ```
#[macro_export]
macro_rules! latlon {
    ($lat:expr, $lon:expr) => {
        <$crate::geo::GeoPoint2d as $crate::geo::NewGeoPoint<f64>>::latlon($lat, $lon)
    };
}
