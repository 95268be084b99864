//! See [`GeometryCollection`].

use serde::{Deserialize, Serialize};

use crate::geometry::{Geometry, GeometryType};

/// Geometries bucketed by their [`GeometryType`].
///
/// Every geometry type has a bucket (possibly empty) from the moment the collection is created. Inside a bucket the
/// geometries keep the order they were added in.
#[derive(Debug, Default, Clone, PartialEq, Deserialize, Serialize)]
pub struct GeometryCollection {
    buckets: [Vec<Geometry>; 3],
}

impl GeometryCollection {
    /// Creates an empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends the geometry to the bucket of its own type.
    pub fn push(&mut self, geometry: Geometry) {
        self.buckets[geometry.geometry_type().index()].push(geometry);
    }

    /// Geometries of the given type.
    pub fn get(&self, geometry_type: GeometryType) -> &[Geometry] {
        &self.buckets[geometry_type.index()]
    }

    /// Removes and returns all geometries of the given type, leaving the bucket empty.
    pub fn take(&mut self, geometry_type: GeometryType) -> Vec<Geometry> {
        std::mem::take(&mut self.buckets[geometry_type.index()])
    }

    /// Iterates over all buckets in [`GeometryType::ALL`] order.
    pub fn iter(&self) -> impl Iterator<Item = (GeometryType, &[Geometry])> + '_ {
        GeometryType::ALL
            .into_iter()
            .map(|geometry_type| (geometry_type, self.get(geometry_type)))
    }

    /// Total number of geometries in all buckets.
    pub fn len(&self) -> usize {
        self.buckets.iter().map(Vec::len).sum()
    }

    /// Returns true if there are no geometries in any bucket.
    pub fn is_empty(&self) -> bool {
        self.buckets.iter().all(Vec::is_empty)
    }
}

impl Extend<Geometry> for GeometryCollection {
    fn extend<T: IntoIterator<Item = Geometry>>(&mut self, iter: T) {
        for geometry in iter {
            self.push(geometry);
        }
    }
}

impl FromIterator<Geometry> for GeometryCollection {
    fn from_iter<T: IntoIterator<Item = Geometry>>(iter: T) -> Self {
        let mut collection = Self::new();
        collection.extend(iter);
        collection
    }
}
