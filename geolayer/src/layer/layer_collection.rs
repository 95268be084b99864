use std::ops::{Index, IndexMut};

use geolayer_types::projection::ScreenProjection;

use crate::error::GeolayerError;
use crate::layer::GeometryLayer;
use crate::render::{Canvas, RenderStats};

/// Ordered collection of layers with their visibility.
///
/// Layers are drawn in the order they are stored in the collection, so the last layer ends up on top. Any layer can
/// be temporary hidden with the [`LayerCollection::hide`] or [`LayerCollection::show_by`] methods. Hidden layers are
/// skipped when rendering, but retain their place in the collection.
///
/// ```
/// use geolayer::layer::{GeometryLayer, LayerCollection};
///
/// let mut collection = LayerCollection::default();
/// collection.push(GeometryLayer::default());
/// collection.push(GeometryLayer::default());
///
/// collection.hide(0);
/// assert!(!collection.is_visible(0));
/// assert!(collection.is_visible(1));
/// ```
#[derive(Debug, Default)]
pub struct LayerCollection(Vec<LayerEntry>);

#[derive(Debug)]
struct LayerEntry {
    layer: GeometryLayer,
    is_hidden: bool,
}

impl From<GeometryLayer> for LayerEntry {
    fn from(layer: GeometryLayer) -> Self {
        Self {
            layer,
            is_hidden: false,
        }
    }
}

impl LayerCollection {
    /// Adds the layer to the end of the collection.
    pub fn push(&mut self, layer: GeometryLayer) {
        self.0.push(layer.into())
    }

    /// Inserts a layer at position `index`, shifting all layers after it to the right.
    ///
    /// # Panics
    ///
    /// Panics if `index > len`.
    pub fn insert(&mut self, index: usize, layer: GeometryLayer) {
        self.0.insert(index, layer.into());
    }

    /// Removes a layer at `index`, shifting all layers after it to the left and returning the removed layer.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds.
    pub fn remove(&mut self, index: usize) -> GeometryLayer {
        self.0.remove(index).layer
    }

    /// Swaps two layers in the collection.
    ///
    /// # Panics
    ///
    /// Panics if `a` or `b` are out of bounds.
    pub fn swap(&mut self, a: usize, b: usize) {
        self.0.swap(a, b)
    }

    /// Returns the number of layers in the collection.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if the collection has no layers.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns a reference to the layer at `index`.
    pub fn get(&self, index: usize) -> Option<&GeometryLayer> {
        self.0.get(index).map(|entry| &entry.layer)
    }

    /// Returns a mutable reference to the layer at `index`.
    pub fn get_mut(&mut self, index: usize) -> Option<&mut GeometryLayer> {
        self.0.get_mut(index).map(|entry| &mut entry.layer)
    }

    /// Iterates over all layers in the collection, including the hidden ones.
    pub fn iter(&self) -> impl Iterator<Item = &GeometryLayer> + '_ {
        self.0.iter().map(|entry| &entry.layer)
    }

    /// Iterates over mutable references to all layers in the collection, including the hidden ones.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut GeometryLayer> + '_ {
        self.0.iter_mut().map(|entry| &mut entry.layer)
    }

    /// Iterates over the layers that are not hidden.
    pub fn iter_visible(&self) -> impl Iterator<Item = &GeometryLayer> + '_ {
        self.0
            .iter()
            .filter(|entry| !entry.is_hidden)
            .map(|entry| &entry.layer)
    }

    /// Hides the layer at `index`. Hidden layers are not rendered.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds.
    pub fn hide(&mut self, index: usize) {
        self.0[index].is_hidden = true;
    }

    /// Makes the layer at `index` visible again.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds.
    pub fn show(&mut self, index: usize) {
        self.0[index].is_hidden = false;
    }

    /// Shows the layers for which the predicate returns true and hides all the others.
    pub fn show_by<F>(&mut self, mut f: F)
    where
        F: FnMut(&GeometryLayer) -> bool,
    {
        for entry in &mut self.0 {
            entry.is_hidden = !f(&entry.layer);
        }
    }

    /// Returns true if there is a layer at `index` and it is not hidden.
    pub fn is_visible(&self, index: usize) -> bool {
        self.0.get(index).is_some_and(|entry| !entry.is_hidden)
    }

    /// Draws all visible layers in order. Stops at the first layer that fails to render.
    pub fn render<P: ScreenProjection + ?Sized>(
        &self,
        projection: &P,
        canvas: &mut dyn Canvas,
    ) -> Result<RenderStats, GeolayerError> {
        let mut total = RenderStats::default();
        for layer in self.iter_visible() {
            let stats = layer.render(projection, canvas)?;
            total.drawn += stats.drawn;
            total.culled += stats.culled;
        }

        Ok(total)
    }
}

impl Index<usize> for LayerCollection {
    type Output = GeometryLayer;

    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index].layer
    }
}

impl IndexMut<usize> for LayerCollection {
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        &mut self.0[index].layer
    }
}

impl From<Vec<GeometryLayer>> for LayerCollection {
    fn from(value: Vec<GeometryLayer>) -> Self {
        Self(value.into_iter().map(Into::into).collect())
    }
}

impl FromIterator<GeometryLayer> for LayerCollection {
    fn from_iter<T: IntoIterator<Item = GeometryLayer>>(iter: T) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::{DrawPrimitive, RecordingCanvas};
    use crate::symbology::{PointSymbology, Symbology};
    use crate::Color;
    use geolayer_types::cartesian::Rect;
    use geolayer_types::projection::LinearProjection;
    use geolayer_types::{latlon, Geometry, GeometryType};

    fn named(name: &str) -> GeometryLayer {
        GeometryLayer::new(
            name,
            GeometryType::Polygon,
            Symbology::default_for(GeometryType::Polygon),
        )
    }

    fn point_layer(color: Color) -> GeometryLayer {
        GeometryLayer::builder()
            .with_symbology(Symbology::Point(PointSymbology::new(color, 2.0)))
            .with_geometries([Geometry::point(latlon!(-10.0, 10.0))])
            .build()
            .unwrap()
    }

    fn names(collection: &LayerCollection) -> Vec<&str> {
        collection.iter().map(|layer| layer.name()).collect()
    }

    #[test]
    fn insert_and_remove_keep_order() {
        let mut collection = LayerCollection::from(vec![named("A"), named("B")]);
        collection.insert(1, named("C"));
        assert_eq!(names(&collection), vec!["A", "C", "B"]);

        let removed = collection.remove(0);
        assert_eq!(removed.name(), "A");
        assert_eq!(names(&collection), vec!["C", "B"]);
        assert_eq!(collection[1].name(), "B");
    }

    #[test]
    fn hidden_layers_keep_their_place() {
        let mut collection: LayerCollection = ["A", "B", "C"].into_iter().map(named).collect();
        collection.hide(1);

        assert_eq!(collection.len(), 3);
        assert!(!collection.is_visible(1));
        assert!(!collection.is_visible(3));
        let visible: Vec<_> = collection.iter_visible().map(|layer| layer.name()).collect();
        assert_eq!(visible, vec!["A", "C"]);

        collection.show(1);
        assert!(collection.is_visible(1));
    }

    #[test]
    fn swapped_layers_carry_their_visibility() {
        let mut collection: LayerCollection = ["A", "B", "C"].into_iter().map(named).collect();
        collection.hide(0);
        collection.swap(0, 2);

        assert_eq!(names(&collection), vec!["C", "B", "A"]);
        assert!(collection.is_visible(0));
        assert!(!collection.is_visible(2));
    }

    #[test]
    fn show_by_predicate() {
        let mut collection: LayerCollection = ["A", "B", "C"].into_iter().map(named).collect();
        collection.show_by(|layer| layer.name() != "B");
        assert!(collection.is_visible(0));
        assert!(!collection.is_visible(1));
        assert!(collection.is_visible(2));
    }

    #[test]
    fn renders_only_visible_layers_in_order() {
        let mut collection =
            LayerCollection::from(vec![point_layer(Color::RED), point_layer(Color::BLUE), point_layer(Color::GREEN)]);
        collection.hide(1);

        let projection = LinearProjection::new(latlon!(0.0, 0.0), 1.0).unwrap();
        let mut canvas = RecordingCanvas::new(Rect::new(0, 0, 100, 100));
        let stats = collection.render(&projection, &mut canvas).unwrap();

        assert_eq!(stats.drawn, 2);
        let colors: Vec<_> = canvas
            .primitives()
            .iter()
            .filter_map(|primitive| match primitive {
                DrawPrimitive::Circle { paint, .. } => Some(paint.color),
                _ => None,
            })
            .collect();
        assert_eq!(colors, vec![Color::RED, Color::GREEN]);
    }
}
