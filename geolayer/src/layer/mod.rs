//! Layers are the units of data a map is made of.

mod builder;
mod geometry_layer;
mod layer_collection;

pub use builder::LayerBuilder;
pub use geometry_layer::GeometryLayer;
pub use layer_collection::LayerCollection;

const DEFAULT_LAYER_NAME: &str = "default";
