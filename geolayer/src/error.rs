//! Error types used by the crate.

use geolayer_types::GeometryType;
use thiserror::Error;

/// Geolayer error type.
#[derive(Debug, Error)]
pub enum GeolayerError {
    /// The KML stream is not well-formed XML or could not be read.
    #[error("failed to parse KML at byte {position}")]
    Xml {
        /// Byte offset in the input where the reader stopped.
        position: u64,
        /// Underlying XML error.
        #[source]
        source: quick_xml::Error,
    },
    /// The KML stream is well-formed so far, but its structure is broken (e.g. the document ends inside an element).
    #[error("malformed KML at byte {position}: {message}")]
    MalformedDocument {
        /// Byte offset in the input where the problem was detected.
        position: u64,
        /// Description of the problem.
        message: String,
    },
    /// Serialization of a KML document failed.
    #[error("failed to write KML")]
    Write(#[source] quick_xml::Error),
    /// A layer of one geometry type was given a symbology for another type.
    #[error("{layer} layer cannot be drawn with {symbology} symbology")]
    SymbologyTypeMismatch {
        /// Geometry type of the layer.
        layer: GeometryType,
        /// Geometry type the symbology is made for.
        symbology: GeometryType,
    },
    /// A geometry of one type was added to a layer of another type.
    #[error("{geometry} geometry cannot be added to a {layer} layer")]
    GeometryTypeMismatch {
        /// Geometry type of the layer.
        layer: GeometryType,
        /// Type of the rejected geometry.
        geometry: GeometryType,
    },
    /// Error reading/writing data to the FS or flushing an output stream.
    #[error("file system error: {0}")]
    FsIo(#[from] std::io::Error),
    /// A raster canvas cannot be allocated with the requested size.
    #[cfg(feature = "image")]
    #[error("cannot create a {width}x{height} canvas")]
    CanvasSize {
        /// Requested width in pixels.
        width: u32,
        /// Requested height in pixels.
        height: u32,
    },
    /// Error encoding an image.
    #[cfg(feature = "image")]
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),
    /// A style description could not be deserialized.
    #[cfg(feature = "serde")]
    #[error("invalid style: {0}")]
    Style(#[from] serde_json::Error),
}
