use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use geolayer_types::geo::GeoPoint2d;
use geolayer_types::Geometry;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

use crate::error::GeolayerError;
use crate::kml::{
    StoredGeometryRecord, COORDINATES_TAG, DESCRIPTION_TAG, DOCUMENT_TAG, FOLDER_TAG, KML_NAMESPACES,
    KML_TAG, LINEAR_RING_TAG, LINE_TAG, NAME_TAG, OUTER_BOUNDARY_TAG, PLACEMARK_TAG, POINT_TAG,
    POLYGON_TAG,
};

/// Writes stored geometry records as a KML document.
///
/// The document has a fixed layout: `kml` > `Document` (with a name) > `Folder` (with a name) > one `Placemark`
/// per record. A placemark is named after the record id and has an empty description.
pub struct KmlWriter<W: Write> {
    writer: Writer<W>,
}

impl<W: Write> KmlWriter<W> {
    /// Creates a writer producing a compact document without line breaks.
    pub fn new(sink: W) -> Self {
        Self {
            writer: Writer::new(sink),
        }
    }

    /// Creates a writer that puts every element on its own line, indented by `indent_size` spaces per level.
    pub fn with_indent(sink: W, indent_size: usize) -> Self {
        Self {
            writer: Writer::new_with_indent(sink, b' ', indent_size),
        }
    }

    /// Writes the whole document, flushes the sink and returns it.
    pub fn write(
        mut self,
        document_name: &str,
        folder_name: &str,
        records: &[StoredGeometryRecord],
    ) -> Result<W, GeolayerError> {
        self.emit(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), Some("no"))))?;
        self.emit(Event::Start(
            BytesStart::new(KML_TAG).with_attributes(KML_NAMESPACES),
        ))?;
        self.start(DOCUMENT_TAG)?;
        self.text_element(NAME_TAG, document_name)?;
        self.start(FOLDER_TAG)?;
        self.text_element(NAME_TAG, folder_name)?;

        for record in records {
            self.write_placemark(record)?;
        }

        self.end(FOLDER_TAG)?;
        self.end(DOCUMENT_TAG)?;
        self.end(KML_TAG)?;

        let mut sink = self.writer.into_inner();
        sink.flush()?;

        log::debug!("Wrote KML document `{document_name}` with {} placemarks", records.len());

        Ok(sink)
    }

    fn write_placemark(&mut self, record: &StoredGeometryRecord) -> Result<(), GeolayerError> {
        self.start(PLACEMARK_TAG)?;
        self.text_element(NAME_TAG, &record.id.to_string())?;
        self.text_element(DESCRIPTION_TAG, " ")?;

        match &record.geometry {
            Geometry::Point(point) => {
                self.start(POINT_TAG)?;
                self.coordinates(std::slice::from_ref(point))?;
                self.end(POINT_TAG)?;
            }
            Geometry::Line(contour) => {
                self.start(LINE_TAG)?;
                self.coordinates(contour)?;
                self.end(LINE_TAG)?;
            }
            Geometry::Polygon(contour) => {
                self.start(POLYGON_TAG)?;
                self.start(OUTER_BOUNDARY_TAG)?;
                self.start(LINEAR_RING_TAG)?;
                self.coordinates(contour)?;
                self.end(LINEAR_RING_TAG)?;
                self.end(OUTER_BOUNDARY_TAG)?;
                self.end(POLYGON_TAG)?;
            }
        }

        self.end(PLACEMARK_TAG)
    }

    fn coordinates(&mut self, points: &[GeoPoint2d]) -> Result<(), GeolayerError> {
        let text = points
            .iter()
            .map(GeoPoint2d::to_string)
            .collect::<Vec<_>>()
            .join(" ");

        self.text_element(COORDINATES_TAG, &text)
    }

    fn text_element(&mut self, tag: &str, text: &str) -> Result<(), GeolayerError> {
        self.start(tag)?;
        self.emit(Event::Text(BytesText::new(text)))?;
        self.end(tag)
    }

    fn start(&mut self, tag: &str) -> Result<(), GeolayerError> {
        self.emit(Event::Start(BytesStart::new(tag)))
    }

    fn end(&mut self, tag: &str) -> Result<(), GeolayerError> {
        self.emit(Event::End(BytesEnd::new(tag)))
    }

    fn emit(&mut self, event: Event<'_>) -> Result<(), GeolayerError> {
        self.writer
            .write_event(event)
            .map_err(|err| GeolayerError::Write(err.into()))
    }
}

/// Writes the records into a KML file. The document is named after the file.
pub fn write_kml_file(
    path: impl AsRef<Path>,
    folder_name: &str,
    records: &[StoredGeometryRecord],
) -> Result<(), GeolayerError> {
    let path = path.as_ref();
    let document_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();

    let file = File::create(path)?;
    KmlWriter::with_indent(BufWriter::new(file), 2).write(&document_name, folder_name, records)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use geolayer_types::latlon;

    fn write_to_string(records: &[StoredGeometryRecord]) -> String {
        let bytes = KmlWriter::new(Vec::new())
            .write("doc.kml", "Survey", records)
            .unwrap();
        String::from_utf8(bytes).unwrap()
    }

    #[test]
    fn document_skeleton() {
        let output = write_to_string(&[StoredGeometryRecord::new(
            1,
            Geometry::point(latlon!(48.85, 2.35)),
        )]);

        insta::assert_snapshot!(output, @r#"<?xml version="1.0" encoding="UTF-8" standalone="no"?><kml xmlns="http://www.opengis.net/kml/2.2" xmlns:gx="http://www.google.com/kml/ext/2.2" xmlns:kml="http://www.opengis.net/kml/2.2" xmlns:atom="http://www.w3.org/2005/Atom"><Document><name>doc.kml</name><Folder><name>Survey</name><Placemark><name>1</name><description> </description><Point><coordinates>2.35,48.85</coordinates></Point></Placemark></Folder></Document></kml>"#);
    }

    #[test]
    fn line_coordinates_are_lon_lat_pairs() {
        let output = write_to_string(&[StoredGeometryRecord::new(
            7,
            Geometry::line(vec![latlon!(1.0, 2.0), latlon!(3.5, 4.5)]),
        )]);

        assert!(output.contains(
            "<name>7</name><description> </description><LineString><coordinates>2,1 4.5,3.5</coordinates></LineString>"
        ));
    }

    #[test]
    fn polygon_ring_is_not_closed_explicitly() {
        let output = write_to_string(&[StoredGeometryRecord::new(
            3,
            Geometry::polygon(vec![latlon!(0.0, 0.0), latlon!(0.0, 1.0), latlon!(1.0, 1.0)]),
        )]);

        assert!(output.contains(
            "<Polygon><outerBoundaryIs><LinearRing><coordinates>0,0 1,0 1,1</coordinates></LinearRing></outerBoundaryIs></Polygon>"
        ));
    }

    #[test]
    fn names_are_escaped() {
        let bytes = KmlWriter::new(Vec::new())
            .write("a<b>.kml", "Tom & Jerry", &[])
            .unwrap();
        let output = String::from_utf8(bytes).unwrap();
        assert!(output.contains("<name>a&lt;b&gt;.kml</name>"));
        assert!(output.contains("<name>Tom &amp; Jerry</name>"));
    }

    #[derive(Debug)]
    struct BrokenSink;

    impl Write for BrokenSink {
        fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
            Err(std::io::Error::new(std::io::ErrorKind::Other, "disk full"))
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[derive(Debug)]
    struct UnflushableSink(Vec<u8>);

    impl Write for UnflushableSink {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.write(buf)
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Err(std::io::Error::new(std::io::ErrorKind::Other, "device gone"))
        }
    }

    #[test]
    fn sink_failure_is_reported() {
        let result = KmlWriter::new(BrokenSink).write("doc.kml", "Survey", &[]);
        assert_matches!(result, Err(GeolayerError::Write(_)));
    }

    #[test]
    fn sink_failure_keeps_its_source() {
        let Err(err) = KmlWriter::new(BrokenSink).write("doc.kml", "Survey", &[]) else {
            panic!("writing into a broken sink must fail");
        };

        let source = std::error::Error::source(&err).expect("write error has a source");
        assert!(source.to_string().contains("disk full"), "{source}");
    }

    #[test]
    fn flush_failure_is_io_error() {
        let result = KmlWriter::new(UnflushableSink(Vec::new())).write("doc.kml", "Survey", &[]);
        assert_matches!(result, Err(GeolayerError::FsIo(err)) if err.to_string() == "device gone");
    }

    #[test]
    fn file_is_named_after_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("export.kml");
        write_kml_file(
            &path,
            "Mission",
            &[StoredGeometryRecord::new(1, Geometry::point(latlon!(1.0, 2.0)))],
        )
        .unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.contains("<name>export.kml</name>"));
        assert!(contents.contains("<name>Mission</name>"));
    }
}
