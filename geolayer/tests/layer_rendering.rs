use std::cell::RefCell;
use std::rc::Rc;

use geolayer::control::{TouchEvent, TouchPoint};
use geolayer::geolayer_types::cartesian::{Pixel, Rect};
use geolayer::geolayer_types::geo::GeoPoint;
use geolayer::geolayer_types::projection::LinearProjection;
use geolayer::geolayer_types::{latlon, Geometry, GeometryType};
use geolayer::kml::read_kml_str;
use geolayer::layer::{GeometryLayer, LayerCollection};
use geolayer::render::{DrawPrimitive, RecordingCanvas};
use geolayer::symbology::{LineSymbology, PointSymbology, PolygonSymbology, Symbology};
use geolayer::{Color, GeolayerError};

// With the origin at (0, 0) and one pixel per degree, `lon,lat` of `x,-y` lands on pixel (x, y).
const DOCUMENT: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<kml xmlns="http://www.opengis.net/kml/2.2">
  <Document>
    <name>field.kml</name>
    <Folder>
      <name>Survey</name>
      <Placemark>
        <name>1</name>
        <Point><coordinates>50,-50,0</coordinates></Point>
      </Placemark>
      <Placemark>
        <name>2</name>
        <Point><coordinates>150,-50</coordinates></Point>
      </Placemark>
      <Placemark>
        <name>3</name>
        <LineString>
          <tessellate>1</tessellate>
          <coordinates>10,-10 20,-10 20,-20 200,-20</coordinates>
        </LineString>
      </Placemark>
      <Placemark>
        <name>4</name>
        <Polygon>
          <outerBoundaryIs>
            <LinearRing>
              <coordinates>30,-30 60,-30 60,-60 30,-30</coordinates>
            </LinearRing>
          </outerBoundaryIs>
        </Polygon>
      </Placemark>
    </Folder>
  </Document>
</kml>"#;

fn projection() -> LinearProjection {
    LinearProjection::new(latlon!(0.0, 0.0), 1.0).unwrap()
}

fn canvas() -> RecordingCanvas {
    RecordingCanvas::new(Rect::new(0, 0, 100, 100))
}

fn layers() -> LayerCollection {
    let mut collection = read_kml_str(DOCUMENT).unwrap();

    let symbologies = [
        Symbology::Point(PointSymbology::new(Color::RED, 4.0)),
        Symbology::Line(LineSymbology::new(Color::GREEN, 2.0)),
        Symbology::Polygon(PolygonSymbology::new(Color::BLUE, 3.0)),
    ];

    symbologies
        .into_iter()
        .map(|symbology| {
            let geometry_type = symbology.geometry_type();
            GeometryLayer::builder()
                .with_name(geometry_type.to_string())
                .with_symbology(symbology)
                .with_geometries(collection.take(geometry_type))
                .build()
                .unwrap()
        })
        .collect()
}

fn px(x: i32, y: i32) -> Pixel {
    Pixel::new(x, y)
}

#[test]
fn document_is_drawn_with_culling() {
    let _ = env_logger::builder().is_test(true).try_init();

    let layers = layers();
    let mut canvas = canvas();
    let stats = layers.render(&projection(), &mut canvas).unwrap();

    let expected_lines = vec![
        (px(10, 10), px(20, 10)),
        (px(20, 10), px(20, 20)),
        (px(30, 30), px(60, 30)),
        (px(60, 30), px(60, 60)),
        (px(60, 60), px(30, 30)),
        // The ring repeats its first vertex, so it closes with an empty segment.
        (px(30, 30), px(30, 30)),
    ];

    assert_eq!(canvas.circles(), vec![px(50, 50)]);
    assert_eq!(canvas.lines(), expected_lines);
    assert_eq!(stats.drawn, 7);
    // The point outside and the line segment leaving the view.
    assert_eq!(stats.culled, 2);
}

#[test]
fn each_layer_uses_its_own_paint() {
    let layers = layers();
    let mut canvas = canvas();
    layers.render(&projection(), &mut canvas).unwrap();

    for primitive in canvas.primitives() {
        match primitive {
            DrawPrimitive::Circle { paint, .. } => {
                assert_eq!(paint.color, Color::RED);
                assert_eq!(paint.radius, 4.0);
            }
            DrawPrimitive::Line { from, paint, .. } if from.x < 30 => {
                assert_eq!(paint.color, Color::GREEN);
                assert_eq!(paint.width, 2.0);
            }
            DrawPrimitive::Line { paint, .. } => {
                assert_eq!(paint.color, Color::BLUE);
                assert_eq!(paint.width, 3.0);
            }
            DrawPrimitive::Rect { .. } => panic!("unexpected rect"),
        }
    }
}

#[test]
fn hidden_layer_is_not_drawn() {
    let mut layers = layers();
    layers.hide(2);

    let mut canvas = canvas();
    layers.render(&projection(), &mut canvas).unwrap();

    assert_eq!(canvas.lines().len(), 2);
}

#[test]
fn mismatched_layer_stops_rendering() {
    let mut layers = layers();
    layers[0].set_symbology(Symbology::default_for(GeometryType::Polygon));

    let mut canvas = canvas();
    let result = layers.render(&projection(), &mut canvas);

    assert!(matches!(
        result,
        Err(GeolayerError::SymbologyTypeMismatch {
            layer: GeometryType::Point,
            symbology: GeometryType::Polygon
        })
    ));
    assert!(canvas.primitives().is_empty());
}

#[test]
fn tapped_points_are_added_to_layer() {
    let received: Rc<RefCell<Vec<Geometry>>> = Rc::default();
    let mut layers = layers();
    let layer = &mut layers[0];
    layer.set_editable(true);
    let sink = received.clone();
    layer.add_single_tap_listener(move |geometry: &Geometry| sink.borrow_mut().push(geometry.clone()));

    let notified = layer.handle_single_tap(&TouchEvent::single(px(25, 75)), &projection());
    assert_eq!(notified, 1);

    let tapped = received.borrow_mut().pop().unwrap();
    let Geometry::Point(point) = &tapped else {
        panic!("expected a point, got {tapped:?}");
    };
    assert_eq!((point.lon(), point.lat()), (25.0, -75.0));

    layer.add_geometry(tapped).unwrap();
    assert_eq!(layer.geometries().len(), 3);

    let mut canvas = canvas();
    layer.render(&projection(), &mut canvas).unwrap();
    assert_eq!(canvas.circles(), vec![px(50, 50), px(25, 75)]);
}

#[test]
fn close_two_finger_double_tap_is_one_event() {
    let events = Rc::new(RefCell::new(0));
    let mut layer = GeometryLayer::builder()
        .with_type(GeometryType::Point)
        .editable(true)
        .build()
        .unwrap();

    let single = events.clone();
    layer.add_single_tap_listener(move |_: &Geometry| *single.borrow_mut() += 1);
    let double = events.clone();
    layer.add_double_tap_listener(move |_: &Geometry| *double.borrow_mut() += 1);

    let event = TouchEvent::new(vec![
        TouchPoint {
            touch_id: 7,
            position: px(40, 40),
        },
        TouchPoint {
            touch_id: 8,
            position: px(43, 42),
        },
    ]);

    assert_eq!(layer.handle_double_tap(&event, &projection()), 1);
    assert_eq!(*events.borrow(), 1);
}
