//! Point-placemark KML documents.
//!
//! The header and footer are written as raw XML events so the
//! document can be streamed; each placemark in between is a complete
//! `kml` crate element.

use crate::{
    cell::Coordinate,
    error::H3ToGeoError,
    sink::PointSink,
    text::BoundedText,
};
use h3o::CellIndex;
use kml::{
    types::{Geometry, Placemark, Point},
    Kml, KmlWriter,
};
use quick_xml::{
    events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event},
    Writer,
};
use std::{fmt::Display, io::Write};

pub const DEFAULT_NAME: &str = "geo from H3";
pub const DEFAULT_DESCRIPTION: &str = "from h3ToGeo";

const KML_NS: &str = "http://www.opengis.net/kml/2.2";

/// Document name and description shown in the KML header.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KmlMetadata {
    name: BoundedText,
    description: BoundedText,
}

impl KmlMetadata {
    /// Missing values fall back to [`DEFAULT_NAME`] and
    /// [`DEFAULT_DESCRIPTION`].
    pub fn new(name: Option<BoundedText>, description: Option<BoundedText>) -> Self {
        Self {
            name: name.unwrap_or_else(|| BoundedText::truncated(DEFAULT_NAME)),
            description: description
                .unwrap_or_else(|| BoundedText::truncated(DEFAULT_DESCRIPTION)),
        }
    }

    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    pub fn description(&self) -> &str {
        self.description.as_str()
    }
}

impl Default for KmlMetadata {
    fn default() -> Self {
        Self::new(None, None)
    }
}

pub struct KmlSink<W: Write> {
    out: W,
    closed: bool,
}

impl<W: Write> KmlSink<W> {
    /// Writes the document header to `out`.
    pub fn open(mut out: W, meta: &KmlMetadata) -> Result<Self, H3ToGeoError> {
        write_header(&mut out, meta)?;
        Ok(Self { out, closed: false })
    }
}

impl<W: Write> PointSink for KmlSink<W> {
    fn point(&mut self, cell: CellIndex, center: Coordinate) -> Result<(), H3ToGeoError> {
        let placemark = Placemark {
            name: Some(cell.to_string()),
            geometry: Some(Geometry::Point(Point::new(
                center.lng_degrees(),
                center.lat_degrees(),
                None,
            ))),
            ..Default::default()
        };
        let mut writer = KmlWriter::from_writer(&mut self.out);
        writer.write(&Kml::Placemark(placemark))?;
        self.out.write_all(b"\n")?;
        Ok(())
    }

    fn finish(&mut self) -> Result<(), H3ToGeoError> {
        if !self.closed {
            write_footer(&mut self.out)?;
            self.closed = true;
        }
        self.out.flush()?;
        Ok(())
    }
}

fn write_header<W: Write>(out: W, meta: &KmlMetadata) -> Result<(), H3ToGeoError> {
    let mut writer = Writer::new(out);
    let mut root = BytesStart::new("kml");
    root.push_attribute(("xmlns", KML_NS));
    let opening = [
        Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)),
        Event::Start(root),
        Event::Start(BytesStart::new("Document")),
    ];
    for event in opening {
        writer.write_event(event).map_err(xml_err)?;
        writer.get_mut().write_all(b"\n")?;
    }
    write_text_element(&mut writer, "name", meta.name())?;
    write_text_element(&mut writer, "description", meta.description())?;
    Ok(())
}

fn write_text_element<W: Write>(
    writer: &mut Writer<W>,
    tag: &str,
    text: &str,
) -> Result<(), H3ToGeoError> {
    writer
        .write_event(Event::Start(BytesStart::new(tag)))
        .map_err(xml_err)?;
    writer
        .write_event(Event::Text(BytesText::new(text)))
        .map_err(xml_err)?;
    writer
        .write_event(Event::End(BytesEnd::new(tag)))
        .map_err(xml_err)?;
    writer.get_mut().write_all(b"\n")?;
    Ok(())
}

fn write_footer<W: Write>(out: W) -> Result<(), H3ToGeoError> {
    let mut writer = Writer::new(out);
    for tag in ["Document", "kml"] {
        writer
            .write_event(Event::End(BytesEnd::new(tag)))
            .map_err(xml_err)?;
        writer.get_mut().write_all(b"\n")?;
    }
    Ok(())
}

fn xml_err(err: impl Display) -> H3ToGeoError {
    H3ToGeoError::Xml(err.to_string())
}

#[cfg(test)]
mod tests {
    use super::{KmlMetadata, KmlSink, DEFAULT_DESCRIPTION, DEFAULT_NAME};
    use crate::{cell, sink::PointSink, text::BoundedText};

    fn render(meta: &KmlMetadata, cells: &[&str]) -> String {
        let mut out = Vec::new();
        let mut sink = KmlSink::open(&mut out, meta).unwrap();
        for text in cells {
            let cell = cell::decode(text).unwrap();
            sink.point(cell, cell.into()).unwrap();
        }
        sink.finish().unwrap();
        drop(sink);
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_metadata_defaults() {
        let meta = KmlMetadata::default();
        assert_eq!(meta.name(), DEFAULT_NAME);
        assert_eq!(meta.description(), DEFAULT_DESCRIPTION);
        assert_eq!(meta.name(), "geo from H3");
        assert_eq!(meta.description(), "from h3ToGeo");
    }

    #[test]
    fn test_metadata_overrides() {
        let meta = KmlMetadata::new(Some(BoundedText::truncated("cells")), None);
        assert_eq!(meta.name(), "cells");
        assert_eq!(meta.description(), DEFAULT_DESCRIPTION);
    }

    #[test]
    fn test_empty_document() {
        let doc = render(&KmlMetadata::default(), &[]);
        assert_eq!(
            doc,
            concat!(
                "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n",
                "<kml xmlns=\"http://www.opengis.net/kml/2.2\">\n",
                "<Document>\n",
                "<name>geo from H3</name>\n",
                "<description>from h3ToGeo</description>\n",
                "</Document>\n",
                "</kml>\n",
            )
        );
    }

    #[test]
    fn test_placemark_name_and_point() {
        let doc = render(&KmlMetadata::default(), &["8928308280fffff"]);
        assert_eq!(doc.matches("<Placemark").count(), 1);
        assert!(doc.contains("<name>8928308280fffff</name>"));
        // Point coordinates are lon,lat.
        let coords_start = doc.find("<coordinates>").unwrap() + "<coordinates>".len();
        let coords_len = doc[coords_start..].find("</coordinates>").unwrap();
        let coords = doc[coords_start..coords_start + coords_len].trim();
        assert!(coords.starts_with("-122."));
        assert!(coords.contains(",37."));

        let header_end = doc.find("</description>").unwrap();
        let placemark = doc.find("<Placemark").unwrap();
        let footer = doc.find("</Document>").unwrap();
        assert!(header_end < placemark && placemark < footer);
    }

    #[test]
    fn test_metadata_is_escaped() {
        let meta = KmlMetadata::new(
            Some(BoundedText::truncated("a < b & c")),
            Some(BoundedText::truncated("\"quoted\"")),
        );
        let doc = render(&meta, &[]);
        assert!(doc.contains("<name>a &lt; b &amp; c</name>"));
        assert!(!doc.contains("a < b"));
    }

    #[test]
    fn test_footer_written_once() {
        let mut out = Vec::new();
        let mut sink = KmlSink::open(&mut out, &KmlMetadata::default()).unwrap();
        sink.finish().unwrap();
        sink.finish().unwrap();
        drop(sink);
        let doc = String::from_utf8(out).unwrap();
        assert_eq!(doc.matches("</kml>").count(), 1);
        assert_eq!(doc.matches("</Document>").count(), 1);
    }
}
