//! Geolayer keeps geographic vector data (points, lines and polygons) in typed layers, moves it in and out of KML
//! documents and draws the part of it that is visible in the current view.
//!
//! # Quick start
//!
//! ```no_run
//! use geolayer::kml::read_kml_file;
//! use geolayer::layer::GeometryLayer;
//! use geolayer::render::RecordingCanvas;
//! use geolayer::geolayer_types::GeometryType;
//! use geolayer::geolayer_types::cartesian::Rect;
//! use geolayer::geolayer_types::latlon;
//! use geolayer::geolayer_types::projection::LinearProjection;
//!
//! let mut collection = read_kml_file("survey.kml").unwrap();
//! let layer = GeometryLayer::builder()
//!     .with_type(GeometryType::Line)
//!     .with_geometries(collection.take(GeometryType::Line))
//!     .build()
//!     .unwrap();
//!
//! let projection = LinearProjection::new(latlon!(60.0, 10.0), 200.0).unwrap();
//! let mut canvas = RecordingCanvas::new(Rect::new(0, 0, 800, 600));
//! layer.render(&projection, &mut canvas).unwrap();
//! ```
//!
//! # Main components
//!
//! * [`kml`] reads a KML document into a [`GeometryCollection`](geolayer_types::GeometryCollection) and writes
//!   stored records back into KML.
//! * [`layer`] contains the [`GeometryLayer`](layer::GeometryLayer): geometries of one type together with a
//!   [`Symbology`](symbology::Symbology), a name and an edit mode flag.
//! * [`render`] defines the [`Canvas`](render::Canvas) a host draws onto and the
//!   [`ViewportRenderer`](render::ViewportRenderer) that culls everything outside of the visible area.
//! * [`control`] turns user taps into point geometries for layers in edit mode.
//!
//! Conversion between geographic and screen coordinates is not done by this crate. The host supplies it through the
//! [`ScreenProjection`](geolayer_types::projection::ScreenProjection) trait.

#![warn(clippy::unwrap_used)]
#![warn(missing_docs)]

mod color;
pub mod control;
pub mod error;
pub mod kml;
pub mod layer;
pub mod render;
pub mod symbology;

pub use color::Color;
pub use error::GeolayerError;

// Reexport geolayer_types
pub use geolayer_types;
