//! This example shows how to draw the geometries of a KML file into a PNG image.
//!
//! Run it with the path to a `.kml` file and, optionally, the output file name:
//!
//! ```shell
//! cargo run --example kml_to_png -- ./tracks.kml tracks.png
//! ```

use anyhow::{anyhow, Result};
use geolayer::geolayer_types::cartesian::{Point2, Rect};
use geolayer::geolayer_types::geo::GeoPoint;
use geolayer::geolayer_types::projection::LinearProjection;
use geolayer::kml::read_kml_file;
use geolayer::layer::{GeometryLayer, LayerCollection};
use geolayer::render::ImageCanvas;
use geolayer::symbology::{LineSymbology, PointSymbology, PolygonSymbology, Symbology};
use geolayer::Color;

const IMAGE_WIDTH: u32 = 1024;
const IMAGE_HEIGHT: u32 = 768;
// Share of the extent added on every side so that the outermost geometries are not cut by the image edge.
const PADDING: f64 = 0.05;
const MIN_EXTENT_DEGREES: f64 = 0.001;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut args = std::env::args().skip(1);
    let input = args.next().ok_or_else(|| {
        anyhow!("This example must be run with the name of the .kml file to draw as the first argument")
    })?;
    let output = args.next().unwrap_or_else(|| "output.png".to_string());

    let mut collection = read_kml_file(&input)?;
    let extent = Rect::from_points(
        collection
            .iter()
            .flat_map(|(_, geometries)| geometries)
            .flat_map(|geometry| geometry.vertices())
            .map(|point| Point2::new(point.lon(), point.lat())),
    )
    .ok_or_else(|| anyhow!("{input} contains no geometries"))?;

    let symbologies = [
        Symbology::Polygon(PolygonSymbology::new(Color::from_hex("#1F78B4"), 3.0)),
        Symbology::Line(LineSymbology::new(Color::from_hex("#E31A1C"), 2.0)),
        Symbology::Point(PointSymbology::new(Color::from_hex("#33A02C"), 5.0)),
    ];

    let mut layers = LayerCollection::default();
    for symbology in symbologies {
        let geometry_type = symbology.geometry_type();
        layers.push(
            GeometryLayer::builder()
                .with_name(geometry_type.to_string())
                .with_symbology(symbology)
                .with_geometries(collection.take(geometry_type))
                .build()?,
        );
    }

    let projection = LinearProjection::fit(padded(extent), IMAGE_WIDTH, IMAGE_HEIGHT)?;
    let mut canvas = ImageCanvas::with_background(IMAGE_WIDTH, IMAGE_HEIGHT, Color::WHITE)?;
    let stats = layers.render(&projection, &mut canvas)?;
    canvas.save(&output)?;

    log::info!(
        "Saved {output}: {} primitives drawn, {} culled",
        stats.drawn,
        stats.culled
    );

    Ok(())
}

fn padded(extent: Rect<f64>) -> Rect<f64> {
    let dx = (extent.width() * PADDING).max(MIN_EXTENT_DEGREES);
    let dy = (extent.height() * PADDING).max(MIN_EXTENT_DEGREES);

    Rect::new(
        extent.x_min() - dx,
        extent.y_min() - dy,
        extent.x_max() + dx,
        extent.y_max() + dy,
    )
}
