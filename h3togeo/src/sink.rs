//! Point output formats.

use crate::{
    cell::Coordinate,
    error::H3ToGeoError,
    kml_sink::{KmlMetadata, KmlSink},
};
use h3o::CellIndex;
use std::io::Write;

/// Destination for decoded cell centers.
pub trait PointSink {
    /// Emit one cell center.
    fn point(&mut self, cell: CellIndex, center: Coordinate) -> Result<(), H3ToGeoError>;

    /// Close out the document and flush. Only the first call writes
    /// a trailer.
    fn finish(&mut self) -> Result<(), H3ToGeoError>;
}

/// Selected once per run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum OutputMode {
    PlainText,
    Kml(KmlMetadata),
}

impl OutputMode {
    /// Returns a sink writing to `out`. KML sinks write their header
    /// before returning.
    pub fn open<'a, W>(&self, out: W) -> Result<Box<dyn PointSink + 'a>, H3ToGeoError>
    where
        W: Write + 'a,
    {
        let sink: Box<dyn PointSink + 'a> = match self {
            OutputMode::PlainText => Box::new(PlainText::new(out)),
            OutputMode::Kml(meta) => Box::new(KmlSink::open(out, meta)?),
        };
        Ok(sink)
    }
}

/// `<lat> <lon>` in degrees, one line per point.
pub struct PlainText<W> {
    out: W,
}

impl<W: Write> PlainText<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }
}

impl<W: Write> PointSink for PlainText<W> {
    fn point(&mut self, _cell: CellIndex, center: Coordinate) -> Result<(), H3ToGeoError> {
        writeln!(
            self.out,
            "{:.10} {:.10}",
            center.lat_degrees(),
            center.lng_degrees()
        )?;
        Ok(())
    }

    fn finish(&mut self) -> Result<(), H3ToGeoError> {
        self.out.flush()?;
        Ok(())
    }
}
