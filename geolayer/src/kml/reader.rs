use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use geolayer_types::geo::{GeoPoint2d, NewGeoPoint};
use geolayer_types::{Geometry, GeometryCollection, GeometryType};
use quick_xml::events::Event;
use quick_xml::Reader;

use crate::error::GeolayerError;
use crate::kml::{geometry_type_for_tag, COORDINATES_TAG, INNER_BOUNDARY_TAG};

/// Where the reader is relative to the geometry elements of the document.
#[derive(Debug, Default)]
enum ReaderState {
    /// Outside of any geometry element.
    #[default]
    Idle,
    /// Inside a geometry element, but not inside its `coordinates`.
    InGeometry {
        geometry_type: GeometryType,
        vertices: Vec<GeoPoint2d>,
    },
    /// Inside the `coordinates` element of a geometry: text is parsed as coordinate tuples.
    InCoordinates {
        geometry_type: GeometryType,
        vertices: Vec<GeoPoint2d>,
    },
}

/// Streaming KML reader.
///
/// The document is read in a single forward pass. Only the vertices of the geometry currently being read are kept
/// in memory besides the resulting [`GeometryCollection`].
///
/// ```no_run
/// use geolayer::kml::KmlReader;
/// use geolayer::geolayer_types::GeometryType;
///
/// let file = std::fs::File::open("tracks.kml").unwrap();
/// let geometries = KmlReader::from_reader(file).read().unwrap();
/// println!("{} lines", geometries.get(GeometryType::Line).len());
/// ```
pub struct KmlReader<R: BufRead> {
    reader: Reader<R>,
    state: ReaderState,
    depth: usize,
    inner_boundary_depth: usize,
    geometries: GeometryCollection,
}

impl<R: Read> KmlReader<BufReader<R>> {
    /// Creates a reader over an unbuffered source.
    pub fn from_reader(source: R) -> Self {
        Self::new(BufReader::new(source))
    }
}

impl<R: BufRead> KmlReader<R> {
    /// Creates a reader over a buffered source. The source is expected to be UTF-8 encoded.
    pub fn new(source: R) -> Self {
        let mut reader = Reader::from_reader(source);
        reader.config_mut().trim_text(true);

        Self {
            reader,
            state: ReaderState::Idle,
            depth: 0,
            inner_boundary_depth: 0,
            geometries: GeometryCollection::new(),
        }
    }

    /// Reads the whole document and returns all the geometries found in it.
    ///
    /// The source is consumed and dropped when this method returns, whether it succeeds or not. On failure no
    /// geometries are returned, even the ones read before the error.
    pub fn read(mut self) -> Result<GeometryCollection, GeolayerError> {
        let mut buf = Vec::new();
        loop {
            let event = match self.reader.read_event_into(&mut buf) {
                Ok(event) => event,
                Err(source) => {
                    return Err(GeolayerError::Xml {
                        position: self.position(),
                        source,
                    })
                }
            };

            match event {
                Event::Start(e) => {
                    self.depth += 1;
                    self.on_start(e.local_name().as_ref());
                }
                Event::Empty(e) => {
                    let name = e.local_name();
                    self.on_start(name.as_ref());
                    self.on_end(name.as_ref());
                }
                Event::End(e) => {
                    self.depth = self.depth.saturating_sub(1);
                    self.on_end(e.local_name().as_ref());
                }
                Event::Text(e) => {
                    if matches!(self.state, ReaderState::InCoordinates { .. }) {
                        let text = e.unescape().map_err(|source| GeolayerError::Xml {
                            position: self.position(),
                            source,
                        })?;
                        self.on_text(&text);
                    }
                }
                Event::CData(e) => {
                    if matches!(self.state, ReaderState::InCoordinates { .. }) {
                        let bytes = e.into_inner();
                        let text = std::str::from_utf8(&bytes).map_err(|err| {
                            GeolayerError::MalformedDocument {
                                position: self.position(),
                                message: format!("coordinates are not valid UTF-8: {err}"),
                            }
                        })?;
                        self.on_text(text);
                    }
                }
                Event::Eof => break,
                _ => {}
            }

            buf.clear();
        }

        if self.depth > 0 {
            return Err(GeolayerError::MalformedDocument {
                position: self.position(),
                message: format!("document ended with {} unclosed element(s)", self.depth),
            });
        }

        log::debug!(
            "Read KML document: {} points, {} lines, {} polygons",
            self.geometries.get(GeometryType::Point).len(),
            self.geometries.get(GeometryType::Line).len(),
            self.geometries.get(GeometryType::Polygon).len(),
        );

        Ok(self.geometries)
    }

    fn position(&self) -> u64 {
        self.reader.buffer_position() as u64
    }

    fn on_start(&mut self, name: &[u8]) {
        if let Some(geometry_type) = geometry_type_for_tag(name) {
            if !matches!(self.state, ReaderState::Idle) {
                log::warn!("Nested {geometry_type} element, the enclosing geometry is dropped");
            }

            self.state = ReaderState::InGeometry {
                geometry_type,
                vertices: Vec::new(),
            };
        } else if name == INNER_BOUNDARY_TAG.as_bytes() {
            self.inner_boundary_depth += 1;
        } else if name == COORDINATES_TAG.as_bytes() && self.inner_boundary_depth == 0 {
            self.state = match std::mem::take(&mut self.state) {
                ReaderState::InGeometry {
                    geometry_type,
                    vertices,
                } => ReaderState::InCoordinates {
                    geometry_type,
                    vertices,
                },
                other => other,
            };
        }
    }

    fn on_text(&mut self, text: &str) {
        if let ReaderState::InCoordinates { vertices, .. } = &mut self.state {
            vertices.extend(parse_coordinates(text));
        }
    }

    fn on_end(&mut self, name: &[u8]) {
        if let Some(closed_type) = geometry_type_for_tag(name) {
            match std::mem::take(&mut self.state) {
                ReaderState::InGeometry {
                    geometry_type,
                    vertices,
                }
                | ReaderState::InCoordinates {
                    geometry_type,
                    vertices,
                } if geometry_type == closed_type => {
                    if let Some(geometry) = finish_geometry(geometry_type, vertices) {
                        self.geometries.push(geometry);
                    }
                }
                _ => {}
            }
        } else if name == INNER_BOUNDARY_TAG.as_bytes() {
            self.inner_boundary_depth = self.inner_boundary_depth.saturating_sub(1);
        } else if name == COORDINATES_TAG.as_bytes() {
            self.state = match std::mem::take(&mut self.state) {
                ReaderState::InCoordinates {
                    geometry_type,
                    vertices,
                } => ReaderState::InGeometry {
                    geometry_type,
                    vertices,
                },
                other => other,
            };
        }
    }
}

fn finish_geometry(geometry_type: GeometryType, vertices: Vec<GeoPoint2d>) -> Option<Geometry> {
    match geometry_type {
        GeometryType::Point => {
            if vertices.len() > 1 {
                log::warn!(
                    "Point element has {} coordinate tuples, only the first one is used",
                    vertices.len()
                );
            }

            let point = vertices.into_iter().next();
            if point.is_none() {
                log::warn!("Point element without coordinates is skipped");
            }

            point.map(Geometry::Point)
        }
        GeometryType::Line => Some(Geometry::line(vertices)),
        GeometryType::Polygon => Some(Geometry::polygon(vertices)),
    }
}

/// Parses the text of a KML `coordinates` element.
///
/// The text consists of whitespace separated `longitude,latitude[,altitude]` tuples. Altitude is ignored. Tuples
/// with fewer than two fields or with fields that are not numbers are skipped with a warning, the rest of the text
/// is still parsed.
pub fn parse_coordinates(text: &str) -> Vec<GeoPoint2d> {
    text.split_whitespace()
        .filter_map(|token| {
            let point = parse_tuple(token);
            if point.is_none() {
                log::warn!("Skipping malformed coordinate tuple `{token}`");
            }

            point
        })
        .collect()
}

fn parse_tuple(token: &str) -> Option<GeoPoint2d> {
    let mut fields = token.split(',');
    let lon = fields.next()?.trim().parse::<f64>().ok()?;
    let lat = fields.next()?.trim().parse::<f64>().ok()?;

    Some(GeoPoint2d::lonlat(lon, lat))
}

/// Reads all geometries from a KML file. The file is closed before the function returns.
pub fn read_kml_file(path: impl AsRef<Path>) -> Result<GeometryCollection, GeolayerError> {
    let file = File::open(path.as_ref())?;
    log::debug!("Reading KML file {}", path.as_ref().display());
    KmlReader::from_reader(file).read()
}

/// Reads all geometries from a KML document held in memory.
pub fn read_kml_str(document: &str) -> Result<GeometryCollection, GeolayerError> {
    KmlReader::new(document.as_bytes()).read()
}
